//! Tournament entrants and the prize pool derived from what they paid.

use crate::{NewPlayer, Player, PlayerField, PlayerId, TournamentState};
use log::debug;

/// Buy-ins, rebuys and add-ons across the whole field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub players: usize,
    pub buy_ins: u64,
    pub rebuys: u64,
    pub addons: u64,
}

impl LedgerSummary {
    pub fn of(players: &[Player]) -> Self {
        players.iter().fold(
            Self { players: players.len(), ..Self::default() },
            |acc, p| Self {
                buy_ins: acc.buy_ins.saturating_add(u64::from(p.buy_ins)),
                rebuys: acc.rebuys.saturating_add(u64::from(p.rebuys)),
                addons: acc.addons.saturating_add(u64::from(p.addons)),
                ..acc
            },
        )
    }
}

pub fn player_total(
    buy_ins: u32,
    rebuys: u32,
    addons: u32,
    buy_in_amount: f64,
    rebuy_amount: f64,
    addon_amount: f64,
) -> f64 {
    f64::from(buy_ins) * buy_in_amount
        + f64::from(rebuys) * rebuy_amount
        + f64::from(addons) * addon_amount
}

fn refresh_total(player: &mut Player, buy_in: f64, rebuy: f64, addon: f64) {
    player.total_spent =
        player_total(player.buy_ins, player.rebuys, player.addons, buy_in, rebuy, addon);
}

/// Recompute every player's spend from the current prices, then the pool.
pub(crate) fn recompute(state: &mut TournamentState) {
    let (buy_in, rebuy, addon) = (state.buy_in_amount, state.rebuy_amount, state.addon_amount);
    for player in &mut state.players {
        refresh_total(player, buy_in, rebuy, addon);
    }
    recompute_pool(state);
}

pub(crate) fn recompute_pool(state: &mut TournamentState) {
    state.total_prize_pool = state.players.iter().map(|p| p.total_spent).sum();
}

pub(crate) fn add_player(state: &mut TournamentState, new_player: NewPlayer) {
    let name = new_player.name.trim();
    if name.is_empty() {
        debug!("ignoring player with an empty name");
        return;
    }
    let id = PlayerId(state.allocate_id());
    let mut player = Player {
        id,
        name: name.to_string(),
        buy_ins: new_player.buy_ins,
        rebuys: new_player.rebuys,
        addons: new_player.addons,
        total_spent: 0.0,
    };
    refresh_total(&mut player, state.buy_in_amount, state.rebuy_amount, state.addon_amount);
    state.players.push(player);
    recompute_pool(state);
}

pub(crate) fn update_player(state: &mut TournamentState, id: PlayerId, field: PlayerField, value: i64) {
    let (buy_in, rebuy, addon) = (state.buy_in_amount, state.rebuy_amount, state.addon_amount);
    let Some(player) = state.players.iter_mut().find(|p| p.id == id) else {
        debug!("update for unknown player {id}");
        return;
    };
    let count = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
    match field {
        PlayerField::BuyIns => player.buy_ins = count,
        PlayerField::Rebuys => player.rebuys = count,
        PlayerField::Addons => player.addons = count,
    }
    refresh_total(player, buy_in, rebuy, addon);
    recompute_pool(state);
}

pub(crate) fn remove_player(state: &mut TournamentState, id: PlayerId) {
    state.players.retain(|p| p.id != id);
    recompute_pool(state);
}

pub(crate) fn set_buy_in_amount(state: &mut TournamentState, amount: f64) {
    state.buy_in_amount = amount.max(0.0);
    recompute(state);
}

pub(crate) fn set_rebuy_amount(state: &mut TournamentState, amount: f64) {
    state.rebuy_amount = amount.max(0.0);
    recompute(state);
}

pub(crate) fn set_addon_amount(state: &mut TournamentState, amount: f64) {
    state.addon_amount = amount.max(0.0);
    recompute(state);
}
