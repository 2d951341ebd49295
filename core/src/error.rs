use std::fmt;

/// Input rejected before it becomes an [`crate::Action`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    NonPositiveBlind,
    NonPositiveDuration,
    InvalidPosition,
    DuplicatePosition(u32),
    PercentageOutOfRange(f64),
    NegativeAmount(f64),
    Parse(String),
    Ladder(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Name must not be empty"),
            ValidationError::NonPositiveBlind => write!(f, "Blinds must be greater than zero"),
            ValidationError::NonPositiveDuration => {
                write!(f, "Level duration must be at least one minute")
            }
            ValidationError::InvalidPosition => write!(f, "Position must be 1 or higher"),
            ValidationError::DuplicatePosition(pos) => {
                write!(f, "Position {pos} is already in the payout table")
            }
            ValidationError::PercentageOutOfRange(pct) => {
                write!(f, "Percentage {pct} must be above 0 and at most 100")
            }
            ValidationError::NegativeAmount(amount) => {
                write!(f, "Amount {amount} must not be negative")
            }
            ValidationError::Parse(msg) => write!(f, "Could not parse input: {msg}"),
            ValidationError::Ladder(msg) => write!(f, "Invalid blind ladder: {msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a non-negative money amount typed by the user.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::Parse(format!("'{trimmed}' is not a number")))?;
    if !value.is_finite() {
        return Err(ValidationError::Parse(format!("'{trimmed}' is not a number")));
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_decimals_and_whitespace() {
        assert_eq!(parse_amount(" 12.5 "), Ok(12.5));
        assert_eq!(parse_amount("0"), Ok(0.0));
    }

    #[test]
    fn parse_amount_rejects_garbage_and_negatives() {
        assert!(matches!(parse_amount("abc"), Err(ValidationError::Parse(_))));
        assert!(matches!(parse_amount("inf"), Err(ValidationError::Parse(_))));
        assert_eq!(parse_amount("-5"), Err(ValidationError::NegativeAmount(-5.0)));
    }
}
