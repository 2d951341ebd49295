use crate::app::MenuItem;
use chrono::Local;
use pokerclock_core::error::parse_amount;
use pokerclock_core::presets::{BlindPreset, PrizePreset};
use pokerclock_core::{BlindLevel, CashPlayerId, PrizePosition, ValidationError};

// ---------------------------------------------------------------------------
// List selection
// ---------------------------------------------------------------------------

/// Highlighted row in one of the list tabs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
}

impl Cursor {
    pub fn down(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Keep the cursor on a real row after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Text prompts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AddPlayer,
    BuyInAmount,
    RebuyAmount,
    AddonAmount,
    AddPrize,
    AddBlindLevel,
    EditBlindLevel(usize),
    AddCashPlayer,
    CashEntryFee,
    CashAmount(CashPlayerId),
    RenameCashPlayer(CashPlayerId),
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::AddPlayer => "Add player",
            PromptKind::BuyInAmount => "Buy-in amount",
            PromptKind::RebuyAmount => "Rebuy amount",
            PromptKind::AddonAmount => "Add-on amount",
            PromptKind::AddPrize => "Add payout",
            PromptKind::AddBlindLevel => "Add blind level",
            PromptKind::EditBlindLevel(_) => "Edit blind level",
            PromptKind::AddCashPlayer => "Add cash player",
            PromptKind::CashEntryFee => "Entry fee",
            PromptKind::CashAmount(_) => "Amount spent",
            PromptKind::RenameCashPlayer(_) => "Rename player",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            PromptKind::AddPlayer | PromptKind::RenameCashPlayer(_) => "name",
            PromptKind::BuyInAmount
            | PromptKind::RebuyAmount
            | PromptKind::AddonAmount
            | PromptKind::CashEntryFee
            | PromptKind::CashAmount(_) => "amount",
            PromptKind::AddPrize => "position percentage, e.g. 4 5",
            PromptKind::AddBlindLevel | PromptKind::EditBlindLevel(_) => {
                "small big [ante] minutes, e.g. 100 200 25 15"
            }
            PromptKind::AddCashPlayer => "name [amount], amount defaults to the entry fee",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self { kind, input: String::new() }
    }

    pub fn prefilled(kind: PromptKind, input: impl Into<String>) -> Self {
        Self { kind, input: input.into() }
    }
}

pub fn parse_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

fn parse_number<T: std::str::FromStr>(token: &str, what: &str) -> Result<T, ValidationError> {
    token
        .parse()
        .map_err(|_| ValidationError::Parse(format!("'{token}' is not a valid {what}")))
}

/// "position percentage".
pub fn parse_prize(input: &str) -> Result<PrizePosition, ValidationError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let [position, percentage] = tokens.as_slice() else {
        return Err(ValidationError::Parse("expected a position and a percentage".to_string()));
    };
    let position: u32 = parse_number(position, "position")?;
    let percentage: f64 = parse_number(percentage.trim_end_matches('%'), "percentage")?;
    PrizePosition::new(position, percentage)
}

/// "small big minutes" or "small big ante minutes".
pub fn parse_blind_level(input: &str) -> Result<BlindLevel, ValidationError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let (small, big, ante, minutes) = match tokens.as_slice() {
        [small, big, minutes] => (small, big, None, minutes),
        [small, big, ante, minutes] => (small, big, Some(ante), minutes),
        _ => {
            return Err(ValidationError::Parse(
                "expected small blind, big blind, optional ante and minutes".to_string(),
            ));
        }
    };
    let ante = match ante {
        Some(a) => Some(parse_number::<u64>(a, "ante")?).filter(|a| *a > 0),
        None => None,
    };
    BlindLevel::new(
        parse_number(small, "small blind")?,
        parse_number(big, "big blind")?,
        ante,
        parse_number(minutes, "duration")?,
    )
}

/// "name [amount]". A trailing number is the initial amount, otherwise `entry_fee`.
pub fn parse_cash_player(input: &str, entry_fee: f64) -> Result<(String, f64), ValidationError> {
    let trimmed = input.trim();
    if let Some((name, last)) = trimmed.rsplit_once(char::is_whitespace)
        && let Ok(amount) = parse_amount(last)
    {
        return Ok((parse_name(name)?, amount));
    }
    Ok((parse_name(trimmed)?, entry_fee))
}

// ---------------------------------------------------------------------------
// Root UI state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    /// Last message for the status line, stamped with local time.
    pub status: Option<String>,
    pub prompt: Option<Prompt>,
    pub players: Cursor,
    pub prizes: Cursor,
    pub levels: Cursor,
    pub cash_players: Cursor,
    pub blind_preset: BlindPreset,
    pub prize_preset: PrizePreset,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, msg: impl AsRef<str>) {
        self.status = Some(format!("[{}] {}", Local::now().format("%H:%M:%S"), msg.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_inside_the_list() {
        let mut cursor = Cursor::default();
        cursor.up();
        assert_eq!(cursor.index, 0);
        cursor.down(2);
        cursor.down(2);
        assert_eq!(cursor.index, 1);
        cursor.clamp(1);
        assert_eq!(cursor.index, 0);
        cursor.clamp(0);
        assert_eq!(cursor.index, 0);
    }

    #[test]
    fn prize_input() {
        assert_eq!(parse_prize("4 5").unwrap(), PrizePosition { position: 4, percentage: 5.0 });
        assert_eq!(parse_prize(" 2  12.5% ").unwrap().percentage, 12.5);
        assert_eq!(parse_prize("0 10"), Err(ValidationError::InvalidPosition));
        assert_eq!(parse_prize("1 150"), Err(ValidationError::PercentageOutOfRange(150.0)));
        assert!(matches!(parse_prize("1"), Err(ValidationError::Parse(_))));
        assert!(matches!(parse_prize("first 10"), Err(ValidationError::Parse(_))));
    }

    #[test]
    fn blind_level_input() {
        let level = parse_blind_level("100 200 15").unwrap();
        assert_eq!((level.small_blind, level.big_blind, level.ante, level.duration), (100, 200, None, 15));

        let level = parse_blind_level("100 200 25 20").unwrap();
        assert_eq!(level.ante, Some(25));
        assert_eq!(level.duration, 20);

        assert_eq!(parse_blind_level("100 200 0 20").unwrap().ante, None);
        assert_eq!(parse_blind_level("0 200 15"), Err(ValidationError::NonPositiveBlind));
        assert_eq!(parse_blind_level("100 200 0"), Err(ValidationError::NonPositiveDuration));
        assert!(matches!(parse_blind_level("100 200"), Err(ValidationError::Parse(_))));
        assert!(matches!(parse_blind_level("-5 200 15"), Err(ValidationError::Parse(_))));
    }

    #[test]
    fn cash_player_input() {
        assert_eq!(parse_cash_player("Alice", 100.0).unwrap(), ("Alice".to_string(), 100.0));
        assert_eq!(parse_cash_player("Bob 250", 100.0).unwrap(), ("Bob".to_string(), 250.0));
        assert_eq!(parse_cash_player("Mary Ann", 50.0).unwrap(), ("Mary Ann".to_string(), 50.0));
        assert_eq!(parse_cash_player("Mary Ann 0", 50.0).unwrap(), ("Mary Ann".to_string(), 0.0));
        assert_eq!(parse_cash_player("   ", 50.0), Err(ValidationError::EmptyName));
        assert_eq!(parse_cash_player(" 300", 50.0).unwrap(), ("300".to_string(), 50.0));
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(parse_name("  Carol ").unwrap(), "Carol");
        assert_eq!(parse_name(""), Err(ValidationError::EmptyName));
    }
}
