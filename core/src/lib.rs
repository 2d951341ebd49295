pub mod action;
pub mod alert;
pub mod cash_game;
pub mod error;
pub mod ledger;
pub mod presets;
pub mod prizes;
pub mod reducer;
pub mod state;
pub mod store;
pub mod timer;

pub use action::{Action, NewPlayer, PlayerField};
pub use alert::{AlertError, AlertSink, sound_alert};
pub use error::ValidationError;
pub use reducer::reduce;
pub use state::TournamentState;
pub use store::{AUTO_ADVANCE_DELAY, AdvanceToken, Effect, Store};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// Selects which tick semantics apply to the shared run flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Tournament,
    #[serde(rename = "cashgame")]
    CashGame,
}

impl GameMode {
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Tournament => "Tournament",
            GameMode::CashGame => "Cash Game",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GameMode::Tournament => GameMode::CashGame,
            GameMode::CashGame => GameMode::Tournament,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// One stage of the tournament clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlindLevel {
    /// 1-based display number, kept contiguous by [`timer::renumber_levels`].
    pub level: u32,
    pub small_blind: u64,
    pub big_blind: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ante: Option<u64>,
    /// Minutes.
    pub duration: u32,
}

impl BlindLevel {
    /// Build a level from user input, rejecting zero blinds or durations.
    /// The display number is assigned when the level joins a ladder.
    pub fn new(
        small_blind: u64,
        big_blind: u64,
        ante: Option<u64>,
        duration: u32,
    ) -> Result<Self, ValidationError> {
        let level = Self { level: 0, small_blind, big_blind, ante, duration };
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ValidationError::NonPositiveBlind);
        }
        if self.duration == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        Ok(())
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration.saturating_mul(60)
    }

    /// "25/50" or "100/200 (ante 25)".
    pub fn label(&self) -> String {
        match self.ante {
            Some(ante) if ante > 0 => {
                format!("{}/{} (ante {ante})", self.small_blind, self.big_blind)
            }
            _ => format!("{}/{}", self.small_blind, self.big_blind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CashPlayerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PurchaseId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for CashPlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Tournament entrant. `total_spent` is derived and only written by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub buy_ins: u32,
    pub rebuys: u32,
    pub addons: u32,
    pub total_spent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrizePosition {
    pub position: u32,
    pub percentage: f64,
}

impl PrizePosition {
    pub fn new(position: u32, percentage: f64) -> Result<Self, ValidationError> {
        if position == 0 {
            return Err(ValidationError::InvalidPosition);
        }
        if percentage.is_nan() || percentage <= 0.0 || percentage > 100.0 {
            return Err(ValidationError::PercentageOutOfRange(percentage));
        }
        Ok(Self { position, percentage })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashGamePlayer {
    pub id: CashPlayerId,
    pub name: String,
    pub amount_spent: f64,
    /// Whole seconds accrued while active.
    pub seconds_in: u64,
    pub is_active: bool,
    pub purchases: Vec<Purchase>,
}

impl CashGamePlayer {
    /// Accrued active time in fractional minutes.
    pub fn time_in(&self) -> f64 {
        self.seconds_in as f64 / 60.0
    }

    pub fn purchases_total(&self) -> f64 {
        self.purchases.iter().map(|p| p.amount).sum()
    }
}
