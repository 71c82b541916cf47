//! The shared settle/activate/update/deactivate state machine.
//!
//! Every behavior variant runs the same per-frame transition function over
//! its `(behavior, contact)` arena entry; only the hooks differ.  States:
//!
//! ```text
//! Inactive ──Began──▶ Settling ──countdown──▶ Active ──terminal──▶ Inactive
//!     │                  │                       │
//!     │            conditions fail         conditions fail
//!     │                  ▼                       ▼
//!     │              Suppressed              Inactive (deactivate hook)
//!     └──in-progress, settling off/expired──▶ Active
//! ```
//!
//! `Suppressed` is terminal for the contact occurrence: an aborted settle
//! never activates, even if conditions recover — a fresh Began is required.
//! A behavior deactivated *after* activation, by contrast, re-activates
//! through the in-progress path as soon as its conditions pass again.

use gb_core::{BehaviorId, ContactId, SettleSettings};
use gb_input::ContactPhase;
use gb_piece::Instantiator;

use crate::{actions, ActivationState, Behavior, BehaviorResult, HookContext, StateArena};

/// Run one frame of the state machine for one `(behavior, contact)` pair.
///
/// `meets_global` is the definition's global-condition result, evaluated
/// once per definition by the dispatcher; `meets_local` is the conjunction
/// of this behavior's own conditions.  Settle settings are resolved from the
/// behavior override or `global_settle` here, freshly each call.
///
/// Errors come only from hooks; by the time one is returned the arena is
/// already consistent (state transitions commit before their hooks run), so
/// the dispatcher can log and move on safely.
pub fn process_contact<I: Instantiator>(
    behavior:      &Behavior,
    id:            BehaviorId,
    meets_global:  bool,
    meets_local:   bool,
    global_settle: SettleSettings,
    arena:         &mut StateArena,
    cx:            &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    let key = (id, cx.contact.id);

    // Condition gates come first, every frame, in every state.
    let gates_pass = (meets_global || behavior.override_global_conditions) && meets_local;
    if !gates_pass {
        return force_inactive(behavior, key, arena, cx);
    }

    let settle = behavior.settle(global_settle);

    match cx.contact.phase {
        ContactPhase::Began => {
            if arena.contacts.contains_key(&key) {
                // Spurious repeat Began; the entry already tracks this contact.
                return Ok(());
            }
            if settle.use_settling {
                arena.contacts.insert(
                    key,
                    ActivationState::Settling { remaining: settle.settling_frames },
                );
                Ok(())
            } else {
                // No settle delay: place and activate on the Began frame.
                // The update hook first fires next frame.
                activate(behavior, id, key, true, arena, cx)
            }
        }

        ContactPhase::Moved | ContactPhase::Stationary => {
            match peek(arena, key) {
                Entry::Settling(remaining) if settle.use_settling => {
                    let remaining = remaining.saturating_sub(1);
                    if remaining > 0 {
                        arena
                            .contacts
                            .insert(key, ActivationState::Settling { remaining });
                        return Ok(());
                    }
                    // Settled: place and activate; update first fires next
                    // frame.
                    arena.contacts.remove(&key);
                    activate(behavior, id, key, true, arena, cx)
                }

                Entry::Settling(_) => {
                    // Settling was disabled mid-settle by a runtime settings
                    // change; activate immediately (no placed hook — the
                    // settle never completed) and update this same frame.
                    arena.contacts.remove(&key);
                    activate(behavior, id, key, false, arena, cx)?;
                    update(behavior, key, arena, cx)
                }

                Entry::Active => update(behavior, key, arena, cx),

                Entry::Suppressed => Ok(()),

                Entry::Absent => {
                    // Re-entry: previously deactivated (or never gated in on
                    // its Began frame); activate and update this same frame.
                    activate(behavior, id, key, false, arena, cx)?;
                    update(behavior, key, arena, cx)
                }
            }
        }

        ContactPhase::Ended | ContactPhase::Canceled | ContactPhase::None => {
            match arena.contacts.remove(&key) {
                Some(ActivationState::Active { data }) => {
                    actions::run_deactivate(behavior, data, cx)?;
                    actions::run_removed(behavior, cx)
                }
                // A pending settle or suppressed entry just evaporates; it
                // never activated, so no hook fires.
                _ => Ok(()),
            }
        }
    }
}

// ── Transition helpers ────────────────────────────────────────────────────────

/// Borrow-free snapshot of an arena entry, so the transition arms below can
/// mutate the arena without fighting a held `get_mut` borrow.
enum Entry {
    Settling(u32),
    Active,
    Suppressed,
    Absent,
}

fn peek(arena: &StateArena, key: (BehaviorId, ContactId)) -> Entry {
    match arena.contacts.get(&key) {
        Some(ActivationState::Settling { remaining }) => Entry::Settling(*remaining),
        Some(ActivationState::Active { .. }) => Entry::Active,
        Some(ActivationState::Suppressed) => Entry::Suppressed,
        None => Entry::Absent,
    }
}

/// Mark the pair active and run `placed` (optionally) then `activate`.
///
/// The hooks run before the entry is inserted, so a faulting activate leaves
/// the pair Inactive and it retries on the next in-progress frame.
fn activate<I: Instantiator>(
    behavior:    &Behavior,
    id:          BehaviorId,
    key:         (BehaviorId, ContactId),
    with_placed: bool,
    arena:       &mut StateArena,
    cx:          &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    if with_placed {
        actions::run_placed(behavior, id, &mut arena.cooldowns, cx)?;
    }
    let data = actions::run_activate(behavior, id, &mut arena.cooldowns, cx)?;
    arena.contacts.insert(key, ActivationState::Active { data });
    Ok(())
}

fn update<I: Instantiator>(
    behavior: &Behavior,
    key:      (BehaviorId, ContactId),
    arena:    &mut StateArena,
    cx:       &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    let Some(ActivationState::Active { data }) = arena.contacts.get_mut(&key) else {
        return Ok(());
    };
    actions::run_update(behavior, data, cx)
}

/// Condition gates failed: whatever state the pair is in collapses toward
/// Inactive.  An active pair deactivates (entry removed *before* the hook
/// runs, so a faulting hook cannot leave it stuck active); a settling pair
/// is suppressed for the rest of the contact; anything else is untouched.
fn force_inactive<I: Instantiator>(
    behavior: &Behavior,
    key:      (BehaviorId, ContactId),
    arena:    &mut StateArena,
    cx:       &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    match peek(arena, key) {
        Entry::Active => {
            let Some(ActivationState::Active { data }) = arena.contacts.remove(&key) else {
                return Ok(());
            };
            actions::run_deactivate(behavior, data, cx)
        }
        Entry::Settling(_) => {
            arena.contacts.insert(key, ActivationState::Suppressed);
            Ok(())
        }
        Entry::Suppressed | Entry::Absent => Ok(()),
    }
}
