//! Per-variant hook implementations.
//!
//! The machine in [`machine`][crate::machine] decides *when* a hook fires;
//! this module decides *what* each [`BehaviorAction`] variant does when it
//! does.  Hooks receive the mutable effect targets through a
//! [`HookContext`] and report faults as `Err` — never panic.

use rustc_hash::FxHashMap;

use gb_core::{BehaviorId, Frame, Pose, ProxyId, ScreenPoint, VarId};
use gb_data::VariableStore;
use gb_piece::Instantiator;

use crate::{Behavior, BehaviorAction, BehaviorResult, HookContext};

// ── ActionState ───────────────────────────────────────────────────────────────

/// Variant-specific per-contact state, created at activation and carried in
/// the arena until deactivation.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionState {
    /// The variant keeps no per-contact state.
    None,

    /// Periodic spawner: frame of the most recent spawn opportunity.
    Spawn { last_spawn: Frame },

    /// Attached proxy handle, if the spawn succeeded.
    Proxy { instance: Option<ProxyId> },

    /// Orientation tracking: last observed orientation in degrees.
    Orientation { last_degrees: f32 },
}

// ── Hook dispatch ─────────────────────────────────────────────────────────────

/// The "placed" hook: fires once when a new contact finishes settling (or
/// immediately on Began with settling disabled), before "activate".
pub(crate) fn run_placed<I: Instantiator>(
    behavior:  &Behavior,
    id:        BehaviorId,
    cooldowns: &mut FxHashMap<BehaviorId, u32>,
    cx:        &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    if let BehaviorAction::Cooldown {
        frames,
        on_place: true,
        remaining_var,
        active_var,
        ..
    } = &behavior.action
    {
        start_cooldown(id, *frames, *remaining_var, *active_var, cooldowns, cx.vars);
    }
    Ok(())
}

/// The "activate" hook: fires when the behavior becomes active for this
/// contact.  Returns the per-contact state to carry while active.
pub(crate) fn run_activate<I: Instantiator>(
    behavior:  &Behavior,
    id:        BehaviorId,
    cooldowns: &mut FxHashMap<BehaviorId, u32>,
    cx:        &mut HookContext<'_, I>,
) -> BehaviorResult<ActionState> {
    match &behavior.action {
        BehaviorAction::AttachProxy { template } => {
            let proxy = cx.instantiator.spawn(template, cx.piece.anchor)?;
            cx.piece.attach_proxy(proxy);
            Ok(ActionState::Proxy { instance: Some(proxy) })
        }

        BehaviorAction::SpawnObject {
            template,
            offset,
            on_activate,
            ..
        } => {
            if *on_activate {
                spawn_at_contact(template, *offset, cx)?;
            }
            Ok(ActionState::Spawn { last_spawn: cx.frame })
        }

        BehaviorAction::Cooldown {
            frames,
            on_activate,
            remaining_var,
            active_var,
            ..
        } => {
            if *on_activate {
                start_cooldown(id, *frames, *remaining_var, *active_var, cooldowns, cx.vars);
            }
            Ok(ActionState::None)
        }

        BehaviorAction::SyncPose {
            position,
            rotation,
            offset_degrees,
            snap_step_degrees,
        } => {
            apply_pose(*position, *rotation, *offset_degrees, *snap_step_degrees, cx);
            Ok(ActionState::None)
        }

        BehaviorAction::StoreOrientation { .. } => Ok(ActionState::Orientation {
            last_degrees: cx.contact.orientation.to_degrees(),
        }),

        BehaviorAction::SetVariable {
            variable,
            active_value,
            ..
        } => {
            cx.vars.set(*variable, *active_value);
            Ok(ActionState::None)
        }
    }
}

/// The "update" hook: fires every in-progress frame while active.
pub(crate) fn run_update<I: Instantiator>(
    behavior: &Behavior,
    data:     &mut ActionState,
    cx:       &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    match (&behavior.action, data) {
        (
            BehaviorAction::SpawnObject {
                template,
                offset,
                frequency_frames,
                during_update,
                ..
            },
            ActionState::Spawn { last_spawn },
        ) => {
            if cx.frame.since(*last_spawn) < *frequency_frames {
                return Ok(());
            }
            // The timer resets on every elapsed interval, spawn or not.
            *last_spawn = cx.frame;
            if *during_update {
                spawn_at_contact(template, *offset, cx)?;
            }
            Ok(())
        }

        (
            BehaviorAction::SyncPose {
                position,
                rotation,
                offset_degrees,
                snap_step_degrees,
            },
            _,
        ) => {
            // Only chase actual movement; a stationary piece keeps its pose.
            if cx.contact.phase == gb_input::ContactPhase::Moved {
                apply_pose(*position, *rotation, *offset_degrees, *snap_step_degrees, cx);
            }
            Ok(())
        }

        (
            BehaviorAction::StoreOrientation {
                orientation_var,
                delta_var,
            },
            ActionState::Orientation { last_degrees },
        ) => {
            let degrees = cx.contact.orientation.to_degrees();
            if let Some(var) = orientation_var {
                cx.vars.set(*var, degrees as f64);
            }
            if let Some(var) = delta_var {
                // Wrap across the 0/360 line so the delta is always in [0, 360).
                let delta = (degrees - *last_degrees).rem_euclid(360.0);
                cx.vars.set(*var, delta as f64);
            }
            *last_degrees = degrees;
            Ok(())
        }

        _ => Ok(()),
    }
}

/// The "deactivate" hook: fires when an active behavior stops being active,
/// consuming the per-contact state.
pub(crate) fn run_deactivate<I: Instantiator>(
    behavior: &Behavior,
    data:     ActionState,
    cx:       &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    match (&behavior.action, data) {
        (BehaviorAction::AttachProxy { .. }, ActionState::Proxy { instance }) => {
            if let Some(proxy) = instance {
                cx.piece.detach_proxy(proxy);
                cx.instantiator.despawn(proxy);
            }
            Ok(())
        }

        (
            BehaviorAction::SpawnObject {
                template,
                offset,
                on_deactivate: true,
                ..
            },
            _,
        ) => spawn_at_contact(template, *offset, cx),

        (
            BehaviorAction::SetVariable {
                variable,
                inactive_value,
                ..
            },
            _,
        ) => {
            cx.vars.set(*variable, *inactive_value);
            Ok(())
        }

        _ => Ok(()),
    }
}

/// The "removed" hook: fires once, strictly after a deactivate, when the
/// contact truly ends.  No built-in variant needs it today; the slot exists
/// for the lifecycle contract and for downstream variants.
pub(crate) fn run_removed<I: Instantiator>(
    _behavior: &Behavior,
    _cx:       &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    Ok(())
}

// ── Shared effect helpers ─────────────────────────────────────────────────────

fn spawn_at_contact<I: Instantiator>(
    template: &str,
    offset:   ScreenPoint,
    cx:       &mut HookContext<'_, I>,
) -> BehaviorResult<()> {
    let position = ScreenPoint::new(
        cx.contact.position.x + offset.x,
        cx.contact.position.y + offset.y,
    );
    cx.instantiator
        .spawn(template, Pose::new(position, cx.contact.orientation))?;
    Ok(())
}

fn apply_pose<I: Instantiator>(
    position:          bool,
    rotation:          bool,
    offset_degrees:    f32,
    snap_step_degrees: u32,
    cx:                &mut HookContext<'_, I>,
) {
    if position {
        cx.piece.anchor.position = cx.contact.position;
    }
    if rotation {
        let mut degrees = cx.contact.orientation.to_degrees() + offset_degrees;
        if snap_step_degrees > 0 {
            let step = snap_step_degrees as f32;
            degrees = (degrees / step).round() * step;
        }
        cx.piece.anchor.orientation = degrees.to_radians();
    }
}

fn start_cooldown(
    id:            BehaviorId,
    frames:        u32,
    remaining_var: Option<VarId>,
    active_var:    Option<VarId>,
    cooldowns:     &mut FxHashMap<BehaviorId, u32>,
    vars:          &mut VariableStore,
) {
    // A running cooldown is never restarted; a zero-length one never starts.
    if frames == 0 || cooldowns.contains_key(&id) {
        return;
    }
    cooldowns.insert(id, frames);
    if let Some(var) = remaining_var {
        vars.set(var, frames as i64);
    }
    if let Some(var) = active_var {
        vars.set(var, true);
    }
}
