//! Payout table math. The engine stores whatever table it is given; validity
//! is only reported, never enforced.

use crate::{PrizePosition, ValidationError};

/// Allowed distance from 100% for a table to count as complete.
pub const TOTAL_TOLERANCE: f64 = 0.01;

pub fn total_percentage(structure: &[PrizePosition]) -> f64 {
    structure.iter().map(|p| p.percentage).sum()
}

pub fn is_valid_structure(structure: &[PrizePosition]) -> bool {
    (total_percentage(structure) - 100.0).abs() < TOTAL_TOLERANCE
}

pub fn prize_amount(pool: f64, percentage: f64) -> f64 {
    pool * percentage / 100.0
}

/// One row of the payout view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payout {
    pub position: u32,
    pub percentage: f64,
    pub amount: f64,
}

/// The table sorted by position with each prize worked out against `pool`.
pub fn payouts(structure: &[PrizePosition], pool: f64) -> Vec<Payout> {
    let mut sorted = structure.to_vec();
    sorted.sort_by_key(|p| p.position);
    sorted
        .into_iter()
        .map(|p| Payout {
            position: p.position,
            percentage: p.percentage,
            amount: prize_amount(pool, p.percentage),
        })
        .collect()
}

/// Add a paid position. Duplicates are rejected here, before the table is
/// dispatched.
pub fn with_position(
    structure: &[PrizePosition],
    entry: PrizePosition,
) -> Result<Vec<PrizePosition>, ValidationError> {
    let entry = PrizePosition::new(entry.position, entry.percentage)?;
    if structure.iter().any(|p| p.position == entry.position) {
        return Err(ValidationError::DuplicatePosition(entry.position));
    }
    let mut out = structure.to_vec();
    out.push(entry);
    out.sort_by_key(|p| p.position);
    Ok(out)
}

pub fn without_position(structure: &[PrizePosition], position: u32) -> Vec<PrizePosition> {
    structure.iter().copied().filter(|p| p.position != position).collect()
}

/// Set a position's share, clamped to 0..=100.
pub fn with_percentage(structure: &[PrizePosition], position: u32, percentage: f64) -> Vec<PrizePosition> {
    structure
        .iter()
        .map(|p| {
            if p.position == position {
                PrizePosition { position, percentage: percentage.clamp(0.0, 100.0) }
            } else {
                *p
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, TournamentState, reduce};

    fn table(entries: &[(u32, f64)]) -> Vec<PrizePosition> {
        entries
            .iter()
            .map(|&(position, percentage)| PrizePosition { position, percentage })
            .collect()
    }

    #[test]
    fn fifty_thirty_twenty_of_a_thousand() {
        let amounts: Vec<f64> = payouts(&table(&[(1, 50.0), (2, 30.0), (3, 20.0)]), 1000.0)
            .iter()
            .map(|p| p.amount)
            .collect();
        assert_eq!(amounts, vec![500.0, 300.0, 200.0]);
    }

    #[test]
    fn validity_uses_a_small_tolerance() {
        assert!(is_valid_structure(&table(&[(1, 33.33), (2, 33.33), (3, 33.335)])));
        assert!(!is_valid_structure(&table(&[(1, 70.0), (2, 20.0)])));
        assert!(!is_valid_structure(&[]));
    }

    #[test]
    fn invalid_tables_are_stored_anyway() {
        let broken = table(&[(1, 80.0), (2, 40.0)]);
        let state = reduce(&TournamentState::new(), Action::UpdatePrizeStructure(broken.clone()));
        assert_eq!(state.prize_structure, broken);
        assert!(!state.prize_structure_is_valid());
        let total: f64 = payouts(&state.prize_structure, 1000.0).iter().map(|p| p.amount).sum();
        assert_eq!(total, 1200.0);
    }

    #[test]
    fn payout_view_sorts_by_position() {
        let positions: Vec<u32> = payouts(&table(&[(3, 20.0), (1, 50.0), (2, 30.0)]), 0.0)
            .iter()
            .map(|p| p.position)
            .collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn adding_positions_rejects_duplicates_and_bad_shares() {
        let base = table(&[(1, 50.0), (3, 20.0)]);
        let added = with_position(&base, PrizePosition { position: 2, percentage: 30.0 }).unwrap();
        assert_eq!(added.iter().map(|p| p.position).collect::<Vec<_>>(), vec![1, 2, 3]);

        assert_eq!(
            with_position(&base, PrizePosition { position: 1, percentage: 5.0 }),
            Err(ValidationError::DuplicatePosition(1))
        );
        assert_eq!(
            with_position(&base, PrizePosition { position: 0, percentage: 5.0 }),
            Err(ValidationError::InvalidPosition)
        );
        assert!(matches!(
            with_position(&base, PrizePosition { position: 4, percentage: 120.0 }),
            Err(ValidationError::PercentageOutOfRange(_))
        ));
    }

    #[test]
    fn editing_a_share_clamps_it() {
        let base = table(&[(1, 50.0), (2, 50.0)]);
        let edited = with_percentage(&base, 2, 140.0);
        assert_eq!(edited[1].percentage, 100.0);
        let edited = with_percentage(&base, 1, -5.0);
        assert_eq!(edited[0].percentage, 0.0);
    }

    #[test]
    fn removing_a_position() {
        let base = table(&[(1, 50.0), (2, 30.0), (3, 20.0)]);
        let trimmed = without_position(&base, 2);
        assert_eq!(trimmed, table(&[(1, 50.0), (3, 20.0)]));
    }
}
