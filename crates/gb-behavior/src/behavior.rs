//! Behavior configuration — what a behavior *is*, never what it is doing.

use gb_core::{ScreenPoint, SettleSettings, VarId};
use gb_data::Value;

use crate::Condition;

/// One unit of activation logic bound to a glyph via its definition.
///
/// `Behavior` is pure, immutable configuration: per-contact runtime state
/// lives in the [`StateArena`][crate::StateArena], keyed by this behavior's
/// id.  Instances are produced by piece-set compilation and shared read-only
/// for the lifetime of the set.
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    /// Authored name, used in diagnostics.
    pub name: String,

    /// What this behavior does when its hooks fire.
    pub action: BehaviorAction,

    /// Local conditions; all must pass (each individually negatable) for the
    /// behavior to be or stay active.  Empty list passes vacuously.
    pub conditions: Vec<Condition>,

    /// Lower numbers execute first within a definition's behavior list.
    pub execution_order: i32,

    /// When `true`, the definition's global conditions are ignored and only
    /// this behavior's own conditions gate it.
    pub override_global_conditions: bool,

    /// Per-behavior settle override; `None` falls back to the engine-global
    /// settings.
    pub settle_override: Option<SettleSettings>,
}

impl Behavior {
    /// Resolve the settle settings in effect for this behavior right now.
    ///
    /// Called freshly every frame so runtime changes to either layer take
    /// effect immediately.
    #[inline]
    pub fn settle(&self, global: SettleSettings) -> SettleSettings {
        self.settle_override.unwrap_or(global)
    }
}

// ── BehaviorAction ────────────────────────────────────────────────────────────

/// The closed set of behavior variants.
///
/// Each variant implements the five lifecycle hooks in
/// [`actions`][crate::actions]; the surrounding settle/activate machinery is
/// shared and lives in [`machine`][crate::machine].
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorAction {
    /// Spawn a visual proxy on activation, attach it to the piece, and
    /// despawn it on deactivation.
    AttachProxy {
        /// Template name in the host's asset registry.
        template: String,
    },

    /// Spawn objects from the piece's position: on configured hook edges and
    /// at most once per `frequency_frames` while active.
    SpawnObject {
        template:         String,
        /// Offset from the contact position at which to spawn.
        offset:           ScreenPoint,
        /// Minimum frames between periodic spawns.  Zero spawns every frame.
        frequency_frames: u64,
        on_activate:      bool,
        during_update:    bool,
        on_deactivate:    bool,
    },

    /// Start a frame-counted cooldown on place and/or activation.
    ///
    /// The countdown is ticked by the engine once per frame regardless of
    /// contact phase, so a cooldown finishes even while the behavior is
    /// inactive or the piece is off the surface.  A running cooldown is
    /// never restarted.
    Cooldown {
        frames:      u32,
        on_place:    bool,
        on_activate: bool,
        /// Optional variable mirroring the remaining frame count.
        remaining_var: Option<VarId>,
        /// Optional variable mirroring whether the cooldown is running.
        active_var:    Option<VarId>,
    },

    /// Mirror the contact's pose onto the piece anchor on activation and on
    /// every `Moved` update.
    SyncPose {
        /// Mirror the position component.
        position: bool,
        /// Mirror the orientation component.
        rotation: bool,
        /// Degrees added to the contact orientation before applying.
        offset_degrees: f32,
        /// If nonzero, snap the applied orientation to increments of this
        /// many degrees.
        snap_step_degrees: u32,
    },

    /// Write the contact's orientation in degrees (and the wrapped 0–360
    /// per-frame delta) into variables on every update.
    StoreOrientation {
        orientation_var: Option<VarId>,
        delta_var:       Option<VarId>,
    },

    /// Write `active_value` on activation and `inactive_value` on
    /// deactivation.  The inactive value is also written once at engine
    /// build time so the cell starts in a known state.
    SetVariable {
        variable:       VarId,
        active_value:   Value,
        inactive_value: Value,
    },
}
