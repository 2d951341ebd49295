//! Countdown and level navigation for tournament mode.

use crate::{BlindLevel, TournamentState};
use log::debug;

pub(crate) fn start(state: &mut TournamentState) {
    state.is_running = true;
    state.is_paused = false;
}

pub(crate) fn pause(state: &mut TournamentState) {
    state.is_running = false;
    state.is_paused = true;
}

pub(crate) fn stop(state: &mut TournamentState) {
    state.is_running = false;
    state.is_paused = false;
}

pub(crate) fn reset(state: &mut TournamentState) {
    stop(state);
    state.time_remaining = state.level_duration_secs(state.current_level);
}

pub(crate) fn tick(state: &mut TournamentState) {
    if !state.is_running || state.time_remaining == 0 {
        return;
    }
    state.time_remaining -= 1;
}

/// Move to `index`, reload its duration and stop the clock.
pub(crate) fn jump_to(state: &mut TournamentState, index: usize) {
    state.current_level = index;
    reset(state);
}

pub(crate) fn next_level(state: &mut TournamentState) {
    let last = state.blind_levels.len().saturating_sub(1);
    let next = state.current_level.saturating_add(1).min(last);
    jump_to(state, next);
}

pub(crate) fn previous_level(state: &mut TournamentState) {
    let prev = state.current_level.saturating_sub(1);
    jump_to(state, prev);
}

/// Replace the ladder, renumber it and clamp the current index onto it.
pub(crate) fn replace_levels(state: &mut TournamentState, mut levels: Vec<BlindLevel>) {
    renumber_levels(&mut levels);
    state.blind_levels = levels;

    let clamped = state.current_level.min(state.blind_levels.len().saturating_sub(1));
    if clamped != state.current_level {
        debug!("current level {} no longer exists, moving to {clamped}", state.current_level);
        jump_to(state, clamped);
    }
}

/// Keep display numbers contiguous from 1.
pub fn renumber_levels(levels: &mut [BlindLevel]) {
    for (index, level) in levels.iter_mut().enumerate() {
        level.level = index as u32 + 1;
    }
}

/// A copy of `levels` with `level` appended as the new last stage.
pub fn with_level_appended(levels: &[BlindLevel], level: BlindLevel) -> Vec<BlindLevel> {
    let mut out = levels.to_vec();
    out.push(level);
    renumber_levels(&mut out);
    out
}

/// A copy of `levels` without the stage at `index`, renumbered.
pub fn without_level(levels: &[BlindLevel], index: usize) -> Vec<BlindLevel> {
    let mut out: Vec<BlindLevel> = levels
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, level)| level.clone())
        .collect();
    renumber_levels(&mut out);
    out
}

/// A copy of `levels` with the stage at `index` swapped for `level`.
pub fn with_level_replaced(levels: &[BlindLevel], index: usize, level: BlindLevel) -> Vec<BlindLevel> {
    let mut out = levels.to_vec();
    if let Some(slot) = out.get_mut(index) {
        *slot = level;
    }
    renumber_levels(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, GameMode, reduce};

    fn running() -> TournamentState {
        reduce(&TournamentState::new(), Action::Start)
    }

    fn level(sb: u64, bb: u64, duration: u32) -> BlindLevel {
        BlindLevel::new(sb, bb, None, duration).unwrap()
    }

    #[test]
    fn start_pause_resume_flags_are_exclusive() {
        let state = running();
        assert!(state.is_running && !state.is_paused);
        let state = reduce(&state, Action::Pause);
        assert!(!state.is_running && state.is_paused);
        let state = reduce(&state, Action::Resume);
        assert!(state.is_running && !state.is_paused);
        let again = reduce(&state, Action::Start);
        assert_eq!(again, state);
    }

    #[test]
    fn tick_when_stopped_is_a_no_op() {
        let mut state = TournamentState::new();
        let before = state.clone();
        for _ in 0..25 {
            state = reduce(&state, Action::Tick);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn tick_counts_down_and_stops_at_zero() {
        let mut state = running();
        state.time_remaining = 2;
        let state = reduce(&state, Action::Tick);
        assert_eq!(state.time_remaining, 1);
        let state = reduce(&state, Action::Tick);
        assert_eq!(state.time_remaining, 0);
        let state = reduce(&state, Action::Tick);
        assert_eq!(state.time_remaining, 0);
        assert!(state.is_running);
    }

    #[test]
    fn reset_restores_the_level_duration() {
        let mut state = running();
        for _ in 0..137 {
            state = reduce(&state, Action::Tick);
        }
        assert_eq!(state.time_remaining, 900 - 137);
        let state = reduce(&state, Action::Reset);
        assert_eq!(state.time_remaining, 900);
        assert!(state.is_stopped());
    }

    #[test]
    fn reset_without_levels_uses_default_duration() {
        let state = reduce(&TournamentState::new(), Action::UpdateBlindLevels(vec![]));
        let state = reduce(&state, Action::Reset);
        assert_eq!(state.time_remaining, 15 * 60);
    }

    #[test]
    fn previous_is_clamped_at_first_level() {
        let mut state = TournamentState::new();
        for _ in 0..5 {
            state = reduce(&state, Action::PreviousLevel);
        }
        assert_eq!(state.current_level, 0);
        assert_eq!(state.time_remaining, 900);
    }

    #[test]
    fn next_is_clamped_at_last_level() {
        let mut state = TournamentState::new();
        for _ in 0..25 {
            state = reduce(&state, Action::NextLevel);
        }
        assert_eq!(state.current_level, 9);
        let again = reduce(&state, Action::NextLevel);
        assert_eq!(again, state);
    }

    #[test]
    fn next_level_stops_the_clock_and_loads_duration() {
        let levels = vec![level(25, 50, 15), level(50, 100, 20)];
        let state = reduce(&TournamentState::new(), Action::UpdateBlindLevels(levels));
        let state = reduce(&state, Action::Start);
        let state = reduce(&state, Action::NextLevel);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.time_remaining, 20 * 60);
        assert!(state.is_stopped());
    }

    #[test]
    fn next_level_on_empty_ladder_stays_at_zero() {
        let state = reduce(&TournamentState::new(), Action::UpdateBlindLevels(vec![]));
        let state = reduce(&state, Action::NextLevel);
        assert_eq!(state.current_level, 0);
        assert_eq!(state.time_remaining, 900);
    }

    #[test]
    fn set_level_out_of_range_falls_back_to_default_duration() {
        let mut state = TournamentState::new();
        state.default_duration = 7;
        let state = reduce(&state, Action::SetLevel(3));
        assert_eq!(state.current_level, 3);
        assert_eq!(state.time_remaining, 900);

        let state = reduce(&state, Action::SetLevel(40));
        assert_eq!(state.current_level, 40);
        assert!(state.current_blind().is_none());
        assert_eq!(state.time_remaining, 7 * 60);

        let state = reduce(&state, Action::NextLevel);
        assert_eq!(state.current_level, 9);
    }

    #[test]
    fn shrinking_the_ladder_clamps_the_current_level() {
        let state = reduce(&TournamentState::new(), Action::SetLevel(8));
        let state = reduce(&state, Action::Start);
        let shorter = state.blind_levels[..4].to_vec();
        let state = reduce(&state, Action::UpdateBlindLevels(shorter));
        assert_eq!(state.current_level, 3);
        assert_eq!(state.time_remaining, 900);
        assert!(state.is_stopped());
    }

    #[test]
    fn editing_other_levels_keeps_the_clock_running() {
        let mut state = running();
        state = reduce(&state, Action::Tick);
        let edited = with_level_replaced(&state.blind_levels, 5, level(175, 350, 15));
        let state = reduce(&state, Action::UpdateBlindLevels(edited));
        assert!(state.is_running);
        assert_eq!(state.time_remaining, 899);
        assert_eq!(state.blind_levels[5].small_blind, 175);
        assert_eq!(state.blind_levels[5].level, 6);
    }

    #[test]
    fn removing_a_level_renumbers_the_rest() {
        let state = TournamentState::new();
        let levels = without_level(&state.blind_levels, 2);
        let numbers: Vec<u32> = levels.iter().map(|l| l.level).collect();
        assert_eq!(numbers, (1..=9).collect::<Vec<_>>());
        assert_eq!(levels[2].small_blind, 100);
    }

    #[test]
    fn appending_a_level_numbers_it_last() {
        let state = TournamentState::new();
        let levels = with_level_appended(&state.blind_levels, level(800, 1600, 15));
        assert_eq!(levels.last().map(|l| l.level), Some(11));
    }

    #[test]
    fn tournament_tick_is_ignored_in_cash_game_mode() {
        let state = reduce(&TournamentState::new(), Action::SetGameMode(GameMode::CashGame));
        let state = reduce(&state, Action::Start);
        let state = reduce(&state, Action::Tick);
        assert_eq!(state.time_remaining, 900);
        assert_eq!(state.cash_game_time, 1);
    }
}
