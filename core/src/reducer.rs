use crate::{Action, GameMode, TournamentState, cash_game, ledger, timer};

/// Apply one intent to a snapshot and return the next snapshot. Derived
/// totals are brought up to date before this returns.
pub fn reduce(state: &TournamentState, action: Action) -> TournamentState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut TournamentState, action: Action) {
    match action {
        Action::Start | Action::Resume => timer::start(state),
        Action::Pause => timer::pause(state),
        Action::Reset => timer::reset(state),
        Action::Tick => match state.game_mode {
            GameMode::Tournament => timer::tick(state),
            GameMode::CashGame => cash_game::tick(state),
        },
        Action::NextLevel => timer::next_level(state),
        Action::PreviousLevel => timer::previous_level(state),
        Action::SetLevel(index) => timer::jump_to(state, index),
        Action::UpdateBlindLevels(levels) => timer::replace_levels(state, levels),

        Action::AddPlayer(new_player) => ledger::add_player(state, new_player),
        Action::UpdatePlayer { id, field, value } => ledger::update_player(state, id, field, value),
        Action::RemovePlayer(id) => ledger::remove_player(state, id),
        Action::UpdateBuyInAmount(amount) => ledger::set_buy_in_amount(state, amount),
        Action::UpdateRebuyAmount(amount) => ledger::set_rebuy_amount(state, amount),
        Action::UpdateAddonAmount(amount) => ledger::set_addon_amount(state, amount),

        Action::UpdatePrizeStructure(structure) => state.prize_structure = structure,

        Action::SetGameMode(mode) => {
            state.game_mode = mode;
            timer::stop(state);
        }
        Action::AddCashGamePlayer { name, initial_amount, at } => {
            cash_game::add_player(state, &name, initial_amount, at)
        }
        Action::UpdateCashGamePlayer { id, name, amount_spent, at } => {
            cash_game::update_player(state, id, name.as_deref(), amount_spent, at)
        }
        Action::RemoveCashGamePlayer(id) => cash_game::remove_player(state, id),
        Action::ToggleCashGamePlayer(id) => cash_game::toggle_player(state, id),
        Action::AddCashGamePurchase { id, amount, at } => cash_game::add_purchase(state, id, amount, at),
        Action::SetCashGameEntryFee(fee) => cash_game::set_entry_fee(state, fee),
        Action::ResetCashGameTimer => cash_game::reset_session(state),

        Action::ToggleSound => state.sound_enabled = !state.sound_enabled,
        Action::SetTheme(theme) => state.theme = theme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewPlayer, Theme};

    #[test]
    fn reduce_leaves_the_input_snapshot_untouched() {
        let before = TournamentState::new();
        let after = reduce(&before, Action::AddPlayer(NewPlayer::named("Ana")));
        assert!(before.players.is_empty());
        assert_eq!(after.players.len(), 1);
    }

    #[test]
    fn switching_game_mode_stops_the_clock() {
        let state = reduce(&TournamentState::new(), Action::Start);
        let state = reduce(&state, Action::SetGameMode(GameMode::CashGame));
        assert_eq!(state.game_mode, GameMode::CashGame);
        assert!(state.is_stopped());
    }

    #[test]
    fn paused_clock_survives_a_mode_switch_as_stopped() {
        let state = reduce(&TournamentState::new(), Action::Pause);
        let state = reduce(&state, Action::SetGameMode(GameMode::Tournament));
        assert!(state.is_stopped());
    }

    #[test]
    fn preferences_are_plain_toggles() {
        let state = reduce(&TournamentState::new(), Action::ToggleSound);
        assert!(!state.sound_enabled);
        let state = reduce(&state, Action::SetTheme(Theme::Dark));
        assert_eq!(state.theme, Theme::Dark);
        let state = reduce(&state, Action::ToggleSound);
        assert!(state.sound_enabled);
    }

    #[test]
    fn run_flags_are_never_both_set() {
        let script = [
            Action::Start,
            Action::Pause,
            Action::Tick,
            Action::Resume,
            Action::NextLevel,
            Action::Start,
            Action::SetGameMode(GameMode::CashGame),
            Action::Start,
            Action::Pause,
            Action::ResetCashGameTimer,
            Action::Resume,
            Action::Reset,
        ];
        let mut state = TournamentState::new();
        for action in script {
            state = reduce(&state, action);
            assert!(!(state.is_running && state.is_paused));
        }
    }
}
