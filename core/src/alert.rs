use log::{info, warn};
use std::fmt;

/// Where the "level is over" signal goes. Best effort only.
pub trait AlertSink: Send + Sync {
    fn alert(&self) -> Result<(), AlertError>;
}

#[derive(Debug)]
pub enum AlertError {
    Io(std::io::Error),
    Command(String),
    Unavailable(String),
}

impl fmt::Display for AlertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertError::Io(e) => write!(f, "alert output failed: {e}"),
            AlertError::Command(msg) => write!(f, "alert command failed: {msg}"),
            AlertError::Unavailable(msg) => write!(f, "alert unavailable: {msg}"),
        }
    }
}

impl std::error::Error for AlertError {}

impl From<std::io::Error> for AlertError {
    fn from(e: std::io::Error) -> Self {
        AlertError::Io(e)
    }
}

/// Fire the sink and swallow any failure. Returns whether it went through.
pub fn sound_alert(sink: &dyn AlertSink) -> bool {
    match sink.alert() {
        Ok(()) => true,
        Err(e) => {
            warn!("{e}");
            info!("Time's up! Moving to the next blind level.");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Broken;

    impl AlertSink for Broken {
        fn alert(&self) -> Result<(), AlertError> {
            Err(AlertError::Unavailable("no speaker".into()))
        }
    }

    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl AlertSink for Counting {
        fn alert(&self) -> Result<(), AlertError> {
            self.0.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[test]
    fn failures_are_swallowed() {
        assert!(!sound_alert(&Broken));
    }

    #[test]
    fn successful_alerts_reach_the_sink() {
        let sink = Counting::default();
        assert!(sound_alert(&sink));
        assert!(sound_alert(&sink));
        assert_eq!(sink.0.load(Ordering::Relaxed), 2);
    }
}
