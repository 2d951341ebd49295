use crossterm::event::KeyEvent;
use pokerclock_core::AdvanceToken;

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// One second of wall-clock time while the clock is running.
    ClockTick,
    /// The delay after a level ran out has elapsed.
    AutoAdvance(AdvanceToken),
}
