//! The state arena — every piece of behavior runtime state, in one place.
//!
//! # Why this exists
//!
//! Behavior configuration is long-lived and shared; per-contact activation
//! state is ephemeral and churns every frame.  Embedding the latter inside
//! the former hides mutation behind config handles and makes scenario resets
//! awkward.  The arena inverts that: the engine owns one `StateArena`, and
//! behaviors are passed their entry explicitly each frame.

use rustc_hash::FxHashMap;

use gb_core::{BehaviorId, ContactId};

use crate::actions::ActionState;

// ── ActivationState ───────────────────────────────────────────────────────────

/// Activation state of one `(behavior, contact)` pair.
///
/// Absence from the arena means Inactive.  Using a single enum per key makes
/// the "never simultaneously pending-settle and active" invariant structural
/// rather than something the machine has to police.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationState {
    /// Counting down the settle delay; no hook has fired yet.
    Settling { remaining: u32 },

    /// Activated; `data` carries the action variant's per-contact state.
    Active { data: ActionState },

    /// Settle was aborted by a condition failure.  The pair stays inert for
    /// the rest of this contact occurrence; activation requires a fresh
    /// Began.
    Suppressed,
}

// ── StateArena ────────────────────────────────────────────────────────────────

/// All mutable behavior state, owned by the engine.
///
/// `contacts` holds per-(behavior, contact) activation state; `cooldowns`
/// holds contact-independent countdowns keyed by behavior alone, ticked by
/// the engine every frame so they can finish while nothing is on the
/// surface.
#[derive(Default)]
pub struct StateArena {
    pub contacts:  FxHashMap<(BehaviorId, ContactId), ActivationState>,
    pub cooldowns: FxHashMap<BehaviorId, u32>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is the pair currently active?
    pub fn is_active(&self, behavior: BehaviorId, contact: ContactId) -> bool {
        matches!(
            self.contacts.get(&(behavior, contact)),
            Some(ActivationState::Active { .. })
        )
    }

    /// Is the pair currently waiting out its settle delay?
    pub fn is_settling(&self, behavior: BehaviorId, contact: ContactId) -> bool {
        matches!(
            self.contacts.get(&(behavior, contact)),
            Some(ActivationState::Settling { .. })
        )
    }

    /// Number of currently active `(behavior, contact)` pairs.
    pub fn active_count(&self) -> usize {
        self.contacts
            .values()
            .filter(|state| matches!(state, ActivationState::Active { .. }))
            .count()
    }

    /// Remove every entry for `contact`, returning how many were still
    /// `Active`.
    ///
    /// This is the tracker's cleanup backstop when a piece is destroyed; on
    /// the normal path the machine has already removed all entries during
    /// terminal-phase dispatch, so a nonzero return means some behavior's
    /// teardown was skipped (its deactivate hook faulted, or it stopped
    /// matching mid-contact).
    pub fn purge_contact(&mut self, contact: ContactId) -> usize {
        let mut leftover_active = 0;
        self.contacts.retain(|&(_, c), state| {
            if c != contact {
                return true;
            }
            if matches!(state, ActivationState::Active { .. }) {
                leftover_active += 1;
            }
            false
        });
        leftover_active
    }

    /// Drop all state (piece-set switch).
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.cooldowns.clear();
    }
}
