//! Serialized owner of the state snapshot.
//!
//! Every intent goes through [`Store::dispatch`], one at a time. On top of the
//! plain reducer the store watches for a tournament level running out and asks
//! its host for two side effects: an alert and a delayed advance to the next
//! level. The advance is token-checked so a stale or duplicate firing is
//! ignored.

use crate::{Action, TournamentState, reduce};
use log::{debug, info};
use std::time::Duration;

/// Gap between a level hitting zero and the clock moving on.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_secs(1);

/// Identifies one scheduled auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceToken(u64);

/// Work the host must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Play the level-end alert.
    Alert,
    /// Call [`Store::fire_auto_advance`] with this token after [`AUTO_ADVANCE_DELAY`].
    ScheduleAdvance(AdvanceToken),
    /// The scheduled advance is obsolete; the host may drop its timer.
    CancelAdvance(AdvanceToken),
}

#[derive(Debug, Default)]
pub struct Store {
    state: TournamentState,
    pending_advance: Option<AdvanceToken>,
    next_token: u64,
}

impl Store {
    pub fn new(state: TournamentState) -> Self {
        Self { state, pending_advance: None, next_token: 0 }
    }

    pub fn state(&self) -> &TournamentState {
        &self.state
    }

    pub fn pending_advance(&self) -> Option<AdvanceToken> {
        self.pending_advance
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        if !action.is_tick() {
            debug!("dispatch {action:?}");
        }
        let was_expired = self.state.is_expired();
        let previous_level = self.state.current_level;
        self.state = reduce(&self.state, action);

        let mut effects = Vec::new();
        if let Some(token) = self.pending_advance
            && (!self.state.is_expired() || self.state.current_level != previous_level)
        {
            debug!("cancelling auto-advance {token:?}");
            self.pending_advance = None;
            effects.push(Effect::CancelAdvance(token));
        }

        if self.state.is_expired() && !was_expired && self.pending_advance.is_none() {
            info!("level {} is over", self.state.current_level + 1);
            if self.state.sound_enabled {
                effects.push(Effect::Alert);
            }
            let token = AdvanceToken(self.next_token);
            self.next_token += 1;
            self.pending_advance = Some(token);
            effects.push(Effect::ScheduleAdvance(token));
        }
        effects
    }

    /// Run the advance scheduled under `token`, if it still applies.
    pub fn fire_auto_advance(&mut self, token: AdvanceToken) -> Vec<Effect> {
        if self.pending_advance != Some(token) || !self.state.is_expired() {
            debug!("ignoring stale auto-advance {token:?}");
            return Vec::new();
        }
        self.pending_advance = None;
        info!("advancing past level {}", self.state.current_level + 1);
        self.dispatch(Action::NextLevel)
    }
}
