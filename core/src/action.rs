use crate::{BlindLevel, CashPlayerId, GameMode, PlayerId, PrizePosition, Theme};
use chrono::{DateTime, Utc};

/// Every intent the presentation layer can send. Applied one at a time by
/// [`crate::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Timer / level engine
    Start,
    Pause,
    Resume,
    Reset,
    /// Tournament countdown or cash-game accrual, depending on the game mode.
    Tick,
    NextLevel,
    PreviousLevel,
    SetLevel(usize),
    UpdateBlindLevels(Vec<BlindLevel>),

    // Player ledger
    AddPlayer(NewPlayer),
    UpdatePlayer { id: PlayerId, field: PlayerField, value: i64 },
    RemovePlayer(PlayerId),
    UpdateBuyInAmount(f64),
    UpdateRebuyAmount(f64),
    UpdateAddonAmount(f64),

    // Prize structure
    UpdatePrizeStructure(Vec<PrizePosition>),

    // Cash game
    SetGameMode(GameMode),
    AddCashGamePlayer { name: String, initial_amount: f64, at: DateTime<Utc> },
    UpdateCashGamePlayer {
        id: CashPlayerId,
        name: Option<String>,
        amount_spent: Option<f64>,
        at: DateTime<Utc>,
    },
    RemoveCashGamePlayer(CashPlayerId),
    ToggleCashGamePlayer(CashPlayerId),
    AddCashGamePurchase { id: CashPlayerId, amount: f64, at: DateTime<Utc> },
    SetCashGameEntryFee(f64),
    ResetCashGameTimer,

    // Preferences
    ToggleSound,
    SetTheme(Theme),
}

impl Action {
    pub fn add_cash_game_player(name: impl Into<String>, initial_amount: f64) -> Self {
        Action::AddCashGamePlayer { name: name.into(), initial_amount, at: Utc::now() }
    }

    pub fn add_cash_game_purchase(id: CashPlayerId, amount: f64) -> Self {
        Action::AddCashGamePurchase { id, amount, at: Utc::now() }
    }

    pub fn set_cash_game_amount(id: CashPlayerId, amount_spent: f64) -> Self {
        Action::UpdateCashGamePlayer { id, name: None, amount_spent: Some(amount_spent), at: Utc::now() }
    }

    /// Tick is the only intent the wall-clock driver sends; keep it out of info logs.
    pub fn is_tick(&self) -> bool {
        matches!(self, Action::Tick)
    }
}

/// Which per-player counter an [`Action::UpdatePlayer`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerField {
    BuyIns,
    Rebuys,
    Addons,
}

impl PlayerField {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerField::BuyIns => "buy-ins",
            PlayerField::Rebuys => "rebuys",
            PlayerField::Addons => "add-ons",
        }
    }
}

/// Payload for [`Action::AddPlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub buy_ins: u32,
    pub rebuys: u32,
    pub addons: u32,
}

impl NewPlayer {
    /// A fresh entrant with a single buy-in.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), buy_ins: 1, rebuys: 0, addons: 0 }
    }
}
