use crate::state::app_settings::AppSettings;
use crate::state::app_state::{
    AppState, Prompt, PromptKind, parse_blind_level, parse_cash_player, parse_name, parse_prize,
};
use log::{info, warn};
use pokerclock_core::error::parse_amount;
use pokerclock_core::{
    Action, AdvanceToken, CashGamePlayer, Effect, NewPlayer, Player, PlayerField, Store,
    TournamentState, ValidationError, prizes, timer,
};

/// Percentage step for `+`/`-` on the payout table.
const PRIZE_STEP: f64 = 5.0;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Timer,
    Players,
    Prizes,
    Blinds,
    CashGame,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    store: Store,
    effects: Vec<Effect>,
}

impl App {
    pub fn with_settings(settings: AppSettings) -> Self {
        let mut app = Self {
            state: AppState::new(),
            store: Store::default(),
            effects: Vec::new(),
            settings,
        };
        app.apply_startup_settings();
        app
    }

    fn apply_startup_settings(&mut self) {
        if let Some(preset) = self.settings.preset {
            self.state.blind_preset = preset;
        }
        match self.settings.startup_levels() {
            Ok(Some(levels)) => {
                info!("loaded a ladder of {} levels", levels.len());
                self.dispatch(Action::UpdateBlindLevels(levels));
                self.dispatch(Action::Reset);
            }
            Ok(None) => {}
            Err(e) => self.report(&e),
        }
        if let Some(theme) = self.settings.theme {
            self.dispatch(Action::SetTheme(theme));
        }
    }

    // -----------------------------------------------------------------------
    // Store access
    // -----------------------------------------------------------------------

    pub fn tournament(&self) -> &TournamentState {
        self.store.state()
    }

    pub fn dispatch(&mut self, action: Action) {
        let effects = self.store.dispatch(action);
        self.effects.extend(effects);
        self.clamp_cursors();
    }

    /// Effects produced since the last call, in order.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn fire_auto_advance(&mut self, token: AdvanceToken) {
        let effects = self.store.fire_auto_advance(token);
        self.effects.extend(effects);
    }

    pub fn is_clock_running(&self) -> bool {
        self.tournament().is_running
    }

    fn report(&mut self, err: &ValidationError) {
        warn!("{err}");
        self.state.set_status(err.to_string());
    }

    fn clamp_cursors(&mut self) {
        let state = self.store.state();
        let (players, prizes, levels, cash) = (
            state.players.len(),
            state.prize_structure.len(),
            state.blind_levels.len(),
            state.cash_game_players.len(),
        );
        self.state.players.clamp(players);
        self.state.prizes.clamp(prizes);
        self.state.levels.clamp(levels);
        self.state.cash_players.clamp(cash);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if next == MenuItem::Blinds {
            self.state.levels.index = self.tournament().current_level;
            self.clamp_cursors();
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn select_down(&mut self) {
        let state = self.store.state();
        match self.state.active_tab {
            MenuItem::Players => self.state.players.down(state.players.len()),
            MenuItem::Prizes => self.state.prizes.down(state.prize_structure.len()),
            MenuItem::Blinds => self.state.levels.down(state.blind_levels.len()),
            MenuItem::CashGame => self.state.cash_players.down(state.cash_game_players.len()),
            MenuItem::Timer | MenuItem::Help => {}
        }
    }

    pub fn select_up(&mut self) {
        match self.state.active_tab {
            MenuItem::Players => self.state.players.up(),
            MenuItem::Prizes => self.state.prizes.up(),
            MenuItem::Blinds => self.state.levels.up(),
            MenuItem::CashGame => self.state.cash_players.up(),
            MenuItem::Timer | MenuItem::Help => {}
        }
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Space bar: start a stopped clock, pause a running one, resume a paused one.
    pub fn toggle_clock(&mut self) {
        let state = self.tournament();
        let action = if state.is_running {
            Action::Pause
        } else if state.is_paused {
            Action::Resume
        } else {
            Action::Start
        };
        self.dispatch(action);
    }

    pub fn toggle_sound(&mut self) {
        self.dispatch(Action::ToggleSound);
        let msg = if self.tournament().sound_enabled { "Sound on" } else { "Sound off" };
        self.state.set_status(msg);
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.tournament().theme.toggled();
        self.dispatch(Action::SetTheme(theme));
    }

    pub fn toggle_game_mode(&mut self) {
        let mode = self.tournament().game_mode.toggled();
        self.dispatch(Action::SetGameMode(mode));
        self.state.set_status(format!("{} mode", mode.label()));
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    pub fn selected_player(&self) -> Option<&Player> {
        self.tournament().players.get(self.state.players.index)
    }

    pub fn adjust_selected_player(&mut self, field: PlayerField, delta: i64) {
        let Some(player) = self.selected_player() else {
            return;
        };
        let current = match field {
            PlayerField::BuyIns => player.buy_ins,
            PlayerField::Rebuys => player.rebuys,
            PlayerField::Addons => player.addons,
        };
        let id = player.id;
        self.dispatch(Action::UpdatePlayer { id, field, value: i64::from(current) + delta });
    }

    pub fn remove_selected_player(&mut self) {
        if let Some(player) = self.selected_player() {
            let (id, name) = (player.id, player.name.clone());
            self.dispatch(Action::RemovePlayer(id));
            self.state.set_status(format!("Removed {name}"));
        }
    }

    // -----------------------------------------------------------------------
    // Prizes
    // -----------------------------------------------------------------------

    pub fn cycle_prize_preset(&mut self) {
        let preset = self.state.prize_preset.next();
        self.state.prize_preset = preset;
        self.dispatch(Action::UpdatePrizeStructure(preset.positions()));
        self.state.set_status(format!("Payouts: {}", preset.label()));
    }

    pub fn remove_selected_prize(&mut self) {
        let structure = &self.tournament().prize_structure;
        if let Some(entry) = structure.get(self.state.prizes.index) {
            let updated = prizes::without_position(structure, entry.position);
            self.dispatch(Action::UpdatePrizeStructure(updated));
        }
    }

    /// Nudge the selected share by `steps` * 5 percentage points.
    pub fn adjust_selected_prize(&mut self, steps: f64) {
        let structure = &self.tournament().prize_structure;
        if let Some(entry) = structure.get(self.state.prizes.index) {
            let updated = prizes::with_percentage(
                structure,
                entry.position,
                entry.percentage + steps * PRIZE_STEP,
            );
            self.dispatch(Action::UpdatePrizeStructure(updated));
        }
    }

    // -----------------------------------------------------------------------
    // Blind ladder
    // -----------------------------------------------------------------------

    pub fn cycle_blind_preset(&mut self) {
        let preset = self.state.blind_preset.next();
        self.state.blind_preset = preset;
        self.dispatch(Action::UpdateBlindLevels(preset.levels()));
        self.state.set_status(format!("Blinds: {}", preset.label()));
    }

    pub fn jump_to_selected_level(&mut self) {
        self.dispatch(Action::SetLevel(self.state.levels.index));
        self.update_tab(MenuItem::Timer);
    }

    pub fn remove_selected_level(&mut self) {
        let levels = &self.tournament().blind_levels;
        if levels.len() <= 1 {
            self.state.set_status("The ladder needs at least one level");
            return;
        }
        let updated = timer::without_level(levels, self.state.levels.index);
        self.dispatch(Action::UpdateBlindLevels(updated));
    }

    pub fn edit_selected_level(&mut self) {
        let index = self.state.levels.index;
        if let Some(level) = self.tournament().blind_levels.get(index) {
            let input = match level.ante {
                Some(ante) => format!(
                    "{} {} {ante} {}",
                    level.small_blind, level.big_blind, level.duration
                ),
                None => format!("{} {} {}", level.small_blind, level.big_blind, level.duration),
            };
            self.state.prompt = Some(Prompt::prefilled(PromptKind::EditBlindLevel(index), input));
        }
    }

    // -----------------------------------------------------------------------
    // Cash game
    // -----------------------------------------------------------------------

    pub fn selected_cash_player(&self) -> Option<&CashGamePlayer> {
        self.tournament().cash_game_players.get(self.state.cash_players.index)
    }

    pub fn toggle_selected_cash_player(&mut self) {
        if let Some(player) = self.selected_cash_player() {
            let id = player.id;
            self.dispatch(Action::ToggleCashGamePlayer(id));
        }
    }

    /// Book one more entry fee for the selected player.
    pub fn cash_buy_more(&mut self) {
        let fee = self.tournament().cash_game_entry_fee;
        if let Some(player) = self.selected_cash_player() {
            let id = player.id;
            self.dispatch(Action::add_cash_game_purchase(id, fee));
        }
    }

    /// Take one entry fee back off the selected player, never below zero.
    pub fn cash_refund(&mut self) {
        let fee = self.tournament().cash_game_entry_fee;
        if let Some(player) = self.selected_cash_player() {
            let (id, amount) = (player.id, (player.amount_spent - fee).max(0.0));
            self.dispatch(Action::set_cash_game_amount(id, amount));
        }
    }

    pub fn remove_selected_cash_player(&mut self) {
        if let Some(player) = self.selected_cash_player() {
            let (id, name) = (player.id, player.name.clone());
            self.dispatch(Action::RemoveCashGamePlayer(id));
            self.state.set_status(format!("Removed {name}"));
        }
    }

    pub fn reset_cash_session(&mut self) {
        self.dispatch(Action::ResetCashGameTimer);
        self.state.set_status("Session clock reset");
    }

    pub fn prompt_for_selected_cash_player(&mut self, rename: bool) {
        if let Some(player) = self.selected_cash_player() {
            let prompt = if rename {
                Prompt::prefilled(PromptKind::RenameCashPlayer(player.id), player.name.clone())
            } else {
                Prompt::prefilled(PromptKind::CashAmount(player.id), format!("{}", player.amount_spent))
            };
            self.state.prompt = Some(prompt);
        }
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    pub fn open_prompt(&mut self, kind: PromptKind) {
        let prefill = {
            let state = self.tournament();
            match kind {
                PromptKind::BuyInAmount => Some(state.buy_in_amount),
                PromptKind::RebuyAmount => Some(state.rebuy_amount),
                PromptKind::AddonAmount => Some(state.addon_amount),
                PromptKind::CashEntryFee => Some(state.cash_game_entry_fee),
                _ => None,
            }
        };
        self.state.prompt = Some(match prefill {
            Some(amount) => Prompt::prefilled(kind, format!("{amount}")),
            None => Prompt::new(kind),
        });
    }

    pub fn cancel_prompt(&mut self) {
        self.state.prompt = None;
    }

    pub fn prompt_push(&mut self, c: char) {
        if let Some(prompt) = self.state.prompt.as_mut() {
            prompt.input.push(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = self.state.prompt.as_mut() {
            prompt.input.pop();
        }
    }

    /// Turn the prompt into an intent. On bad input the prompt stays open.
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.state.prompt.take() else {
            return;
        };
        match self.prompt_action(&prompt) {
            Ok(action) => {
                self.dispatch(action);
                self.state.set_status(format!("{}: done", prompt.kind.title()));
            }
            Err(e) => {
                self.report(&e);
                self.state.prompt = Some(prompt);
            }
        }
    }

    fn prompt_action(&self, prompt: &Prompt) -> Result<Action, ValidationError> {
        let state = self.tournament();
        let input = prompt.input.as_str();
        let action = match prompt.kind {
            PromptKind::AddPlayer => Action::AddPlayer(NewPlayer::named(parse_name(input)?)),
            PromptKind::BuyInAmount => Action::UpdateBuyInAmount(parse_amount(input)?),
            PromptKind::RebuyAmount => Action::UpdateRebuyAmount(parse_amount(input)?),
            PromptKind::AddonAmount => Action::UpdateAddonAmount(parse_amount(input)?),
            PromptKind::AddPrize => {
                let entry = parse_prize(input)?;
                Action::UpdatePrizeStructure(prizes::with_position(&state.prize_structure, entry)?)
            }
            PromptKind::AddBlindLevel => Action::UpdateBlindLevels(timer::with_level_appended(
                &state.blind_levels,
                parse_blind_level(input)?,
            )),
            PromptKind::EditBlindLevel(index) => Action::UpdateBlindLevels(
                timer::with_level_replaced(&state.blind_levels, index, parse_blind_level(input)?),
            ),
            PromptKind::AddCashPlayer => {
                let (name, amount) = parse_cash_player(input, state.cash_game_entry_fee)?;
                Action::add_cash_game_player(name, amount)
            }
            PromptKind::CashEntryFee => Action::SetCashGameEntryFee(parse_amount(input)?),
            PromptKind::CashAmount(id) => Action::set_cash_game_amount(id, parse_amount(input)?),
            PromptKind::RenameCashPlayer(id) => Action::UpdateCashGamePlayer {
                id,
                name: Some(parse_name(input)?),
                amount_spent: None,
                at: chrono::Utc::now(),
            },
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokerclock_core::presets::BlindPreset;
    use pokerclock_core::{GameMode, Theme};

    fn app() -> App {
        App::with_settings(AppSettings::default())
    }

    fn submit(app: &mut App, kind: PromptKind, input: &str) {
        app.state.prompt = Some(Prompt::prefilled(kind, input));
        app.submit_prompt();
    }

    #[test]
    fn startup_settings_pick_ladder_and_theme() {
        let settings = AppSettings {
            preset: Some(BlindPreset::Deep),
            theme: Some(Theme::Dark),
            ..AppSettings::default()
        };
        let app = App::with_settings(settings);
        assert_eq!(app.tournament().blind_levels[0].duration, 20);
        assert_eq!(app.tournament().time_remaining, 1200);
        assert!(app.tournament().is_stopped());
        assert_eq!(app.tournament().theme, Theme::Dark);
        assert_eq!(app.state.blind_preset, BlindPreset::Deep);
    }

    #[test]
    fn startup_turbo_ladder_starts_at_ten_minutes() {
        let settings = AppSettings { preset: Some(BlindPreset::Turbo), ..AppSettings::default() };
        let app = App::with_settings(settings);
        assert_eq!(app.tournament().current_level, 0);
        assert_eq!(app.tournament().time_remaining, 600);
    }

    #[test]
    fn bad_ladder_file_keeps_defaults_and_reports() {
        let settings = AppSettings {
            blinds_json: Some("/nope/ladder.json".into()),
            ..AppSettings::default()
        };
        let app = App::with_settings(settings);
        assert_eq!(app.tournament().blind_levels.len(), 10);
        assert!(app.state.status.is_some());
    }

    #[test]
    fn space_cycles_start_pause_resume() {
        let mut app = app();
        app.toggle_clock();
        assert!(app.is_clock_running());
        app.toggle_clock();
        assert!(app.tournament().is_paused);
        app.toggle_clock();
        assert!(app.is_clock_running());
        assert!(!app.tournament().is_paused);
    }

    #[test]
    fn level_expiry_effects_reach_the_host() {
        let mut app = app();
        app.toggle_clock();
        for _ in 0..900 {
            app.dispatch(Action::Tick);
        }
        let effects = app.take_effects();
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], Effect::Alert);
        let Effect::ScheduleAdvance(token) = effects[1] else {
            panic!("expected a scheduled advance, got {effects:?}");
        };
        assert!(app.take_effects().is_empty());

        app.fire_auto_advance(token);
        assert_eq!(app.tournament().current_level, 1);
        assert!(!app.is_clock_running());
    }

    #[test]
    fn player_prompt_and_counters() {
        let mut app = app();
        submit(&mut app, PromptKind::AddPlayer, "  Alice ");
        assert!(app.state.prompt.is_none());
        assert_eq!(app.tournament().players[0].name, "Alice");

        app.adjust_selected_player(PlayerField::Rebuys, 1);
        app.adjust_selected_player(PlayerField::BuyIns, -5);
        let player = &app.tournament().players[0];
        assert_eq!((player.buy_ins, player.rebuys), (0, 1));
        assert_eq!(app.tournament().total_prize_pool, 100.0);

        app.remove_selected_player();
        assert!(app.tournament().players.is_empty());
        assert_eq!(app.state.players.index, 0);
    }

    #[test]
    fn invalid_input_keeps_the_prompt_open() {
        let mut app = app();
        submit(&mut app, PromptKind::BuyInAmount, "-20");
        assert!(app.state.prompt.is_some());
        assert_eq!(app.tournament().buy_in_amount, 100.0);

        submit(&mut app, PromptKind::AddPrize, "1 10");
        assert!(app.state.prompt.is_some());
        assert_eq!(app.tournament().prize_structure.len(), 3);
    }

    #[test]
    fn prize_editing() {
        let mut app = app();
        submit(&mut app, PromptKind::AddPrize, "4 5");
        assert_eq!(app.tournament().prize_structure.len(), 4);
        assert!(!app.tournament().prize_structure_is_valid());

        app.state.prizes.index = 0;
        app.adjust_selected_prize(-1.0);
        assert_eq!(app.tournament().prize_structure[0].percentage, 45.0);
        assert!(app.tournament().prize_structure_is_valid());

        app.state.prizes.index = 3;
        app.remove_selected_prize();
        assert_eq!(app.tournament().prize_structure.len(), 3);
        assert_eq!(app.state.prizes.index, 2);
    }

    #[test]
    fn blind_editing_keeps_at_least_one_level() {
        let mut app = app();
        submit(&mut app, PromptKind::AddBlindLevel, "1000 2000 200 20");
        let levels = &app.tournament().blind_levels;
        assert_eq!(levels.len(), 11);
        assert_eq!(levels[10].level, 11);

        app.state.levels.index = 0;
        app.edit_selected_level();
        assert_eq!(app.state.prompt.as_ref().unwrap().input, "25 50 15");
        app.state.prompt.as_mut().unwrap().input = "30 60 12".to_string();
        app.submit_prompt();
        assert_eq!(app.tournament().blind_levels[0].big_blind, 60);
        assert_eq!(app.tournament().time_remaining, 900);

        for _ in 0..20 {
            app.remove_selected_level();
        }
        assert_eq!(app.tournament().blind_levels.len(), 1);
    }

    #[test]
    fn jumping_to_a_level_shows_the_timer() {
        let mut app = app();
        app.update_tab(MenuItem::Blinds);
        app.select_down();
        app.select_down();
        app.jump_to_selected_level();
        assert_eq!(app.tournament().current_level, 2);
        assert_eq!(app.state.active_tab, MenuItem::Timer);
    }

    #[test]
    fn cash_game_controls() {
        let mut app = app();
        app.toggle_game_mode();
        assert_eq!(app.tournament().game_mode, GameMode::CashGame);

        submit(&mut app, PromptKind::AddCashPlayer, "Dave");
        app.cash_buy_more();
        assert_eq!(app.tournament().cash_game_players[0].amount_spent, 200.0);

        app.cash_refund();
        app.cash_refund();
        app.cash_refund();
        let player = &app.tournament().cash_game_players[0];
        assert_eq!(player.amount_spent, 0.0);
        assert_eq!(player.purchases_total(), 0.0);

        app.toggle_selected_cash_player();
        assert!(!app.tournament().cash_game_players[0].is_active);

        app.prompt_for_selected_cash_player(true);
        app.state.prompt.as_mut().unwrap().input = "David".to_string();
        app.submit_prompt();
        assert_eq!(app.tournament().cash_game_players[0].name, "David");
    }
}
