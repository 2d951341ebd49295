mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::alert::sink_from_settings;
use crate::state::app_settings::AppSettings;
use crate::state::messages::UiEvent;
use crate::state::ticker::{ClockDriver, schedule_auto_advance};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{debug, info};
use pokerclock_core::{Action, AdvanceToken, AlertSink, Effect, sound_alert};
use std::collections::HashMap;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let settings = AppSettings::load();
    let log_level = settings.effective_log_level();
    tui_logger::init_logger(log_level)?;
    tui_logger::set_default_level(log_level);

    let app = App::with_settings(settings);
    let alerts = sink_from_settings(&app.settings);
    let app = Arc::new(Mutex::new(app));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (running_tx, running_rx) = watch::channel(false);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Wall clock, ticks only while the clock runs
    let clock_driver = ClockDriver::new(running_rx, ui_event_tx.clone());
    let clock_task = tokio::spawn(clock_driver.run());

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;
    info!("pokerclock {} started", env!("CARGO_PKG_VERSION"));

    let mut effects = EffectRunner {
        alerts,
        ui_events: ui_event_tx,
        pending: HashMap::new(),
    };
    main_ui_loop(terminal, app, ui_event_rx, running_tx, &mut effects).await;

    input_handler.abort();
    clock_task.abort();
    effects.abort_all();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("pokerclock {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "pokerclock - poker tournament clock and cash-game tracker

Usage:
  pokerclock
  pokerclock --help
  pokerclock --version

Environment:
  POKERCLOCK_LOG_LEVEL   error | warn | info | debug | trace (default info)
  POKERCLOCK_BLINDS_JSON Path to a JSON array of blind levels to start with
  POKERCLOCK_PRESET      turbo | normal | deep starting ladder
  POKERCLOCK_ALERT_CMD   Command run when a level ends (default: terminal bell)
  POKERCLOCK_THEME       light | dark"
}

/// Carries out what the store asks for after each transition.
struct EffectRunner {
    alerts: Box<dyn AlertSink>,
    ui_events: mpsc::Sender<UiEvent>,
    pending: HashMap<AdvanceToken, JoinHandle<()>>,
}

impl EffectRunner {
    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Alert => {
                    sound_alert(self.alerts.as_ref());
                }
                Effect::ScheduleAdvance(token) => {
                    let handle = schedule_auto_advance(token, self.ui_events.clone());
                    self.pending.insert(token, handle);
                }
                Effect::CancelAdvance(token) => {
                    if let Some(handle) = self.pending.remove(&token) {
                        debug!("aborting auto-advance {token:?}");
                        handle.abort();
                    }
                }
            }
        }
    }

    fn finished(&mut self, token: AdvanceToken) {
        self.pending.remove(&token);
    }

    fn abort_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    running: watch::Sender<bool>,
    effects: &mut EffectRunner,
) {
    while let Some(ui_event) = ui_events.recv().await {
        let should_redraw = handle_ui_event(ui_event, &app, effects).await;

        let mut app_guard = app.lock().await;
        let is_running = app_guard.is_clock_running();
        running.send_if_modified(|current| {
            let changed = *current != is_running;
            *current = is_running;
            changed
        });

        if should_redraw {
            draw::draw(&mut terminal, &mut app_guard);
        }
    }
}

async fn handle_ui_event(ui_event: UiEvent, app: &Arc<Mutex<App>>, effects: &mut EffectRunner) -> bool {
    match ui_event {
        UiEvent::AppStarted | UiEvent::Resize => true,
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app).await;
            effects.run(app.lock().await.take_effects());
            true
        }
        UiEvent::ClockTick => {
            let mut guard = app.lock().await;
            // A tick can still be queued after a pause.
            if !guard.is_clock_running() {
                return false;
            }
            guard.dispatch(Action::Tick);
            effects.run(guard.take_effects());
            true
        }
        UiEvent::AutoAdvance(token) => {
            effects.finished(token);
            let mut guard = app.lock().await;
            guard.fire_auto_advance(token);
            effects.run(guard.take_effects());
            true
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = match tokio::task::spawn_blocking(crossterm_event::read).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                log::error!("terminal input failed: {e}");
                continue;
            }
            Err(_) => break,
        };
        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
