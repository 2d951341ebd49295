use crate::app::{App, MenuItem};
use crate::state::app_state::PromptKind;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pokerclock_core::{Action, PlayerField};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }
    let mut guard = app.lock().await;

    if guard.state.prompt.is_some() {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => quit(),
            (KeyCode::Esc, _) => guard.cancel_prompt(),
            (KeyCode::Enter, _) => guard.submit_prompt(),
            (KeyCode::Backspace, _) => guard.prompt_backspace(),
            (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => guard.prompt_push(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => quit(),

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Timer),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Players),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Prizes),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Blinds),
        (_, Char('5'), _) => guard.update_tab(MenuItem::CashGame),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Clock, shared by both game modes
        (MenuItem::Timer | MenuItem::CashGame, Char(' '), _) => guard.toggle_clock(),

        // Timer
        (MenuItem::Timer, Char('r'), _) => guard.dispatch(Action::Reset),
        (MenuItem::Timer, Char('n') | KeyCode::Right, _) => guard.dispatch(Action::NextLevel),
        (MenuItem::Timer, Char('p') | KeyCode::Left, _) => guard.dispatch(Action::PreviousLevel),

        // List navigation
        (_, Char('j') | KeyCode::Down, _) => guard.select_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.select_up(),

        // Players
        (MenuItem::Players, Char('a'), _) => guard.open_prompt(PromptKind::AddPlayer),
        (MenuItem::Players, Char('b'), _) => guard.adjust_selected_player(PlayerField::BuyIns, 1),
        (MenuItem::Players, Char('B'), _) => guard.adjust_selected_player(PlayerField::BuyIns, -1),
        (MenuItem::Players, Char('r'), _) => guard.adjust_selected_player(PlayerField::Rebuys, 1),
        (MenuItem::Players, Char('R'), _) => guard.adjust_selected_player(PlayerField::Rebuys, -1),
        (MenuItem::Players, Char('o'), _) => guard.adjust_selected_player(PlayerField::Addons, 1),
        (MenuItem::Players, Char('O'), _) => guard.adjust_selected_player(PlayerField::Addons, -1),
        (MenuItem::Players, Char('d') | KeyCode::Delete, _) => guard.remove_selected_player(),
        (MenuItem::Players, Char('i'), _) => guard.open_prompt(PromptKind::BuyInAmount),
        (MenuItem::Players, Char('e'), _) => guard.open_prompt(PromptKind::RebuyAmount),
        (MenuItem::Players, Char('u'), _) => guard.open_prompt(PromptKind::AddonAmount),

        // Prizes
        (MenuItem::Prizes, Char('p'), _) => guard.cycle_prize_preset(),
        (MenuItem::Prizes, Char('a'), _) => guard.open_prompt(PromptKind::AddPrize),
        (MenuItem::Prizes, Char('d') | KeyCode::Delete, _) => guard.remove_selected_prize(),
        (MenuItem::Prizes, Char('+') | Char('='), _) => guard.adjust_selected_prize(1.0),
        (MenuItem::Prizes, Char('-'), _) => guard.adjust_selected_prize(-1.0),

        // Blind ladder
        (MenuItem::Blinds, KeyCode::Enter, _) => guard.jump_to_selected_level(),
        (MenuItem::Blinds, Char('a'), _) => guard.open_prompt(PromptKind::AddBlindLevel),
        (MenuItem::Blinds, Char('e'), _) => guard.edit_selected_level(),
        (MenuItem::Blinds, Char('d') | KeyCode::Delete, _) => guard.remove_selected_level(),
        (MenuItem::Blinds, Char('p'), _) => guard.cycle_blind_preset(),

        // Cash game
        (MenuItem::CashGame, Char('r'), _) => guard.reset_cash_session(),
        (MenuItem::CashGame, Char('a'), _) => guard.open_prompt(PromptKind::AddCashPlayer),
        (MenuItem::CashGame, KeyCode::Enter | Char('t'), _) => guard.toggle_selected_cash_player(),
        (MenuItem::CashGame, Char('+') | Char('='), _) => guard.cash_buy_more(),
        (MenuItem::CashGame, Char('-'), _) => guard.cash_refund(),
        (MenuItem::CashGame, Char('$'), _) => guard.prompt_for_selected_cash_player(false),
        (MenuItem::CashGame, Char('n'), _) => guard.prompt_for_selected_cash_player(true),
        (MenuItem::CashGame, Char('d') | KeyCode::Delete, _) => guard.remove_selected_cash_player(),
        (MenuItem::CashGame, Char('e'), _) => guard.open_prompt(PromptKind::CashEntryFee),

        // Global
        (_, Char('g'), _) => guard.toggle_game_mode(),
        (_, Char('s'), _) => guard.toggle_sound(),
        (_, Char('t'), _) => guard.toggle_theme(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn quit() {
    crate::cleanup_terminal();
    std::process::exit(0);
}
