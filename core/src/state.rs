use crate::presets::{BlindPreset, PrizePreset};
use crate::{BlindLevel, CashGamePlayer, GameMode, Player, PrizePosition, Theme, prizes};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_MINUTES: u32 = 15;
pub const DEFAULT_BUY_IN: f64 = 100.0;
pub const DEFAULT_REBUY: f64 = 100.0;
pub const DEFAULT_ADDON: f64 = 50.0;
pub const DEFAULT_ENTRY_FEE: f64 = 100.0;

/// Seconds left at which the clock turns yellow.
pub const WARNING_SECS: u32 = 300;
/// Seconds left at which the clock turns red.
pub const CRITICAL_SECS: u32 = 60;
/// Seconds left at which a running clock flashes the attention banner.
pub const ATTENTION_SECS: u32 = 10;

/// How close the current level is to ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    Warning,
    Critical,
}

/// The single root snapshot. Only [`crate::reduce`] produces new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentState {
    pub game_mode: GameMode,

    // Timer
    pub current_level: usize,
    pub time_remaining: u32,
    pub is_running: bool,
    pub is_paused: bool,

    // Settings
    pub blind_levels: Vec<BlindLevel>,
    pub default_duration: u32,
    pub buy_in_amount: f64,
    pub rebuy_amount: f64,
    pub addon_amount: f64,

    // Ledger
    pub players: Vec<Player>,

    // Payouts
    pub prize_structure: Vec<PrizePosition>,
    pub total_prize_pool: f64,

    // Cash game
    pub cash_game_time: u64,
    pub cash_game_entry_fee: f64,
    pub cash_game_players: Vec<CashGamePlayer>,

    // Preferences
    pub sound_enabled: bool,
    pub theme: Theme,

    pub(crate) next_id: u64,
}

impl Default for TournamentState {
    fn default() -> Self {
        let blind_levels = BlindPreset::Normal.levels();
        let time_remaining = blind_levels
            .first()
            .map(BlindLevel::duration_secs)
            .unwrap_or(DEFAULT_DURATION_MINUTES * 60);
        Self {
            game_mode: GameMode::Tournament,
            current_level: 0,
            time_remaining,
            is_running: false,
            is_paused: false,
            blind_levels,
            default_duration: DEFAULT_DURATION_MINUTES,
            buy_in_amount: DEFAULT_BUY_IN,
            rebuy_amount: DEFAULT_REBUY,
            addon_amount: DEFAULT_ADDON,
            players: Vec::new(),
            prize_structure: PrizePreset::FiftyThirtyTwenty.positions(),
            total_prize_pool: 0.0,
            cash_game_time: 0,
            cash_game_entry_fee: DEFAULT_ENTRY_FEE,
            cash_game_players: Vec::new(),
            sound_enabled: true,
            theme: Theme::Light,
            next_id: 1,
        }
    }
}

impl TournamentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The level the clock is on, or `None` if the index no longer resolves.
    pub fn current_blind(&self) -> Option<&BlindLevel> {
        self.blind_levels.get(self.current_level)
    }

    pub fn next_blind(&self) -> Option<&BlindLevel> {
        self.blind_levels.get(self.current_level.checked_add(1)?)
    }

    /// Seconds the clock starts from on the level at `index`.
    pub fn level_duration_secs(&self, index: usize) -> u32 {
        self.blind_levels
            .get(index)
            .map(BlindLevel::duration_secs)
            .unwrap_or_else(|| self.default_duration.saturating_mul(60))
    }

    /// A tournament level whose time ran out while the clock was running.
    pub fn is_expired(&self) -> bool {
        self.game_mode == GameMode::Tournament && self.is_running && self.time_remaining == 0
    }

    pub fn is_stopped(&self) -> bool {
        !self.is_running && !self.is_paused
    }

    pub fn urgency(&self) -> Urgency {
        if self.time_remaining <= CRITICAL_SECS {
            Urgency::Critical
        } else if self.time_remaining <= WARNING_SECS {
            Urgency::Warning
        } else {
            Urgency::Calm
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.is_running && self.time_remaining <= ATTENTION_SECS
    }

    pub fn prize_structure_is_valid(&self) -> bool {
        prizes::is_valid_structure(&self.prize_structure)
    }

    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_uses_the_normal_ladder() {
        let state = TournamentState::new();
        assert_eq!(state.blind_levels.len(), 10);
        assert_eq!(state.current_level, 0);
        assert_eq!(state.time_remaining, 900);
        assert_eq!(state.current_blind().map(|b| (b.small_blind, b.big_blind)), Some((25, 50)));
        assert!(state.is_stopped());
        assert!(state.sound_enabled);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn initial_prize_split_is_valid() {
        let state = TournamentState::new();
        let split: Vec<f64> = state.prize_structure.iter().map(|p| p.percentage).collect();
        assert_eq!(split, vec![50.0, 30.0, 20.0]);
        assert!(state.prize_structure_is_valid());
    }

    #[test]
    fn next_blind_stops_at_the_last_level() {
        let mut state = TournamentState::new();
        assert_eq!(state.next_blind().map(|b| b.level), Some(2));
        state.current_level = 9;
        assert!(state.next_blind().is_none());
    }

    #[test]
    fn level_duration_falls_back_to_default() {
        let mut state = TournamentState::new();
        state.default_duration = 12;
        assert_eq!(state.level_duration_secs(0), 900);
        assert_eq!(state.level_duration_secs(42), 720);
    }

    #[test]
    fn urgency_thresholds() {
        let mut state = TournamentState::new();
        state.time_remaining = 301;
        assert_eq!(state.urgency(), Urgency::Calm);
        state.time_remaining = 300;
        assert_eq!(state.urgency(), Urgency::Warning);
        state.time_remaining = 60;
        assert_eq!(state.urgency(), Urgency::Critical);
    }

    #[test]
    fn attention_only_while_running() {
        let mut state = TournamentState::new();
        state.time_remaining = 5;
        assert!(!state.needs_attention());
        state.is_running = true;
        assert!(state.needs_attention());
    }

    #[test]
    fn expiry_requires_tournament_mode() {
        let mut state = TournamentState::new();
        state.is_running = true;
        state.time_remaining = 0;
        assert!(state.is_expired());
        state.game_mode = GameMode::CashGame;
        assert!(!state.is_expired());
    }
}
