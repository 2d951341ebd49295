use crate::state::messages::UiEvent;
use log::debug;
use pokerclock_core::{AUTO_ADVANCE_DELAY, AdvanceToken};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// 1 Hz wall-clock driver. Sends `ClockTick` only while the running flag is set,
/// and restarts its period every time the clock is started.
pub struct ClockDriver {
    running: watch::Receiver<bool>,
    ui_events: mpsc::Sender<UiEvent>,
}

impl ClockDriver {
    pub fn new(running: watch::Receiver<bool>, ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { running, ui_events }
    }

    pub async fn run(mut self) {
        loop {
            while !*self.running.borrow_and_update() {
                if self.running.changed().await.is_err() {
                    return;
                }
            }

            debug!("clock driver started");
            let mut ticks = interval(TICK_PERIOD);
            // Skip the immediate first tick so a fresh start gets a full second.
            ticks.tick().await;

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        if self.ui_events.send(UiEvent::ClockTick).await.is_err() {
                            return;
                        }
                    }
                    changed = self.running.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !*self.running.borrow_and_update() {
                            debug!("clock driver stopped");
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// One-shot: after [`AUTO_ADVANCE_DELAY`], hand `token` back to the UI loop.
pub fn schedule_auto_advance(token: AdvanceToken, ui_events: mpsc::Sender<UiEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(AUTO_ADVANCE_DELAY).await;
        let _ = ui_events.send(UiEvent::AutoAdvance(token)).await;
    })
}
