//! Open-ended cash-game session: active time per player and what they bought.

use crate::{CashGamePlayer, CashPlayerId, Purchase, PurchaseId, TournamentState};
use chrono::{DateTime, Utc};
use log::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CashGameSummary {
    pub players: usize,
    pub active: usize,
    pub total_money: f64,
}

impl CashGameSummary {
    pub fn of(players: &[CashGamePlayer]) -> Self {
        Self {
            players: players.len(),
            active: players.iter().filter(|p| p.is_active).count(),
            total_money: players.iter().map(|p| p.amount_spent).sum(),
        }
    }
}

/// One second of session time, credited to every active player at once.
pub(crate) fn tick(state: &mut TournamentState) {
    if !state.is_running {
        return;
    }
    state.cash_game_time += 1;
    for player in state.cash_game_players.iter_mut().filter(|p| p.is_active) {
        player.seconds_in += 1;
    }
}

fn record_purchase(state: &mut TournamentState, index: usize, amount: f64, at: DateTime<Utc>) {
    let id = PurchaseId(state.allocate_id());
    let player = &mut state.cash_game_players[index];
    player.purchases.push(Purchase { id, amount, timestamp: at });
    player.amount_spent += amount;
}

fn position(state: &TournamentState, id: CashPlayerId) -> Option<usize> {
    state.cash_game_players.iter().position(|p| p.id == id)
}

pub(crate) fn add_player(state: &mut TournamentState, name: &str, initial_amount: f64, at: DateTime<Utc>) {
    let name = name.trim();
    if name.is_empty() {
        debug!("ignoring cash-game player with an empty name");
        return;
    }
    let id = CashPlayerId(state.allocate_id());
    state.cash_game_players.push(CashGamePlayer {
        id,
        name: name.to_string(),
        amount_spent: 0.0,
        seconds_in: 0,
        is_active: true,
        purchases: Vec::new(),
    });
    if initial_amount.is_finite() && initial_amount > 0.0 {
        let index = state.cash_game_players.len() - 1;
        record_purchase(state, index, initial_amount, at);
    }
}

pub(crate) fn add_purchase(state: &mut TournamentState, id: CashPlayerId, amount: f64, at: DateTime<Utc>) {
    if !amount.is_finite() || amount <= 0.0 {
        debug!("ignoring non-positive purchase of {amount} for {id}");
        return;
    }
    match position(state, id) {
        Some(index) => record_purchase(state, index, amount, at),
        None => debug!("purchase for unknown cash-game player {id}"),
    }
}

/// Rename and/or set a new running total. A total change is booked as an
/// adjustment purchase so the history still adds up.
pub(crate) fn update_player(
    state: &mut TournamentState,
    id: CashPlayerId,
    name: Option<&str>,
    amount_spent: Option<f64>,
    at: DateTime<Utc>,
) {
    let Some(index) = position(state, id) else {
        debug!("update for unknown cash-game player {id}");
        return;
    };
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        state.cash_game_players[index].name = name.to_string();
    }
    if let Some(target) = amount_spent.filter(|a| a.is_finite()) {
        let delta = target.max(0.0) - state.cash_game_players[index].amount_spent;
        if delta != 0.0 {
            record_purchase(state, index, delta, at);
        }
    }
}

pub(crate) fn toggle_player(state: &mut TournamentState, id: CashPlayerId) {
    if let Some(player) = state.cash_game_players.iter_mut().find(|p| p.id == id) {
        player.is_active = !player.is_active;
    }
}

pub(crate) fn remove_player(state: &mut TournamentState, id: CashPlayerId) {
    state.cash_game_players.retain(|p| p.id != id);
}

pub(crate) fn set_entry_fee(state: &mut TournamentState, fee: f64) {
    state.cash_game_entry_fee = fee.max(0.0);
}

/// Clears the clock and everyone's time, benches everyone. Money stays.
pub(crate) fn reset_session(state: &mut TournamentState) {
    state.cash_game_time = 0;
    state.is_running = false;
    state.is_paused = false;
    for player in &mut state.cash_game_players {
        player.seconds_in = 0;
        player.is_active = false;
    }
}
