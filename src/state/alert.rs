use crate::state::app_settings::AppSettings;
use pokerclock_core::{AlertError, AlertSink};
use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

/// Rings the terminal bell.
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn alert(&self) -> Result<(), AlertError> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Runs a user-supplied command (e.g. `paplay ~/bell.wav`); the child is reaped off the UI thread.
pub struct CommandAlert {
    program: String,
    args: Vec<String>,
}

impl CommandAlert {
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(ToString::to_string);
        let program = parts.next()?;
        Some(Self { program, args: parts.collect() })
    }

    fn spawn(&self) -> Result<Child, AlertError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AlertError::Command(format!("{}: {e}", self.program)))
    }
}

/// Wait on `child` from a detached thread.
fn reap_in_background(mut child: Child) -> thread::JoinHandle<io::Result<ExitStatus>> {
    thread::spawn(move || child.wait())
}

impl AlertSink for CommandAlert {
    fn alert(&self) -> Result<(), AlertError> {
        reap_in_background(self.spawn()?);
        Ok(())
    }
}

/// Pick the sink from settings; the bell is the fallback.
pub fn sink_from_settings(settings: &AppSettings) -> Box<dyn AlertSink> {
    match settings.alert_command.as_deref().and_then(CommandAlert::parse) {
        Some(cmd) => Box::new(cmd),
        None => Box::new(TerminalBell),
    }
}
