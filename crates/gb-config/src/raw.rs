//! serde mirror of the JSON piece-set asset format.
//!
//! Everything here references other entities by *name*; compilation
//! ([`compile`][crate::compile]) resolves names to typed ids.  Defaults
//! follow the authored-asset conventions: flags off, orders zero, settle
//! inherited from the engine-global settings.

use serde::Deserialize;

use gb_core::{ScreenPoint, SettleSettings};
use gb_data::Value;

/// Top-level piece-set asset.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPieceSet {
    pub name: String,

    /// Reusable behavior groups referenced by definitions.  Sets do not nest.
    #[serde(default)]
    pub behavior_sets: Vec<RawBehaviorSet>,

    #[serde(default)]
    pub definitions: Vec<RawDefinition>,
}

/// A named group of behaviors applied together by any referencing definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBehaviorSet {
    pub name:      String,
    pub behaviors: Vec<RawBehavior>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDefinition {
    pub name: String,

    /// Glyph ids this definition matches.
    pub glyphs: Vec<u16>,

    /// Names of behavior sets whose behaviors apply, in order.
    #[serde(default)]
    pub behavior_sets: Vec<String>,

    /// Behaviors applied in addition to the set contributions.
    #[serde(default)]
    pub behaviors: Vec<RawBehavior>,

    /// Conditions gating every behavior in this definition.
    #[serde(default)]
    pub global_conditions: Vec<RawCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBehavior {
    pub name: String,

    pub action: RawAction,

    #[serde(default)]
    pub conditions: Vec<RawCondition>,

    /// Lower numbers execute first.
    #[serde(default)]
    pub execution_order: i32,

    #[serde(default)]
    pub override_global_conditions: bool,

    /// Per-behavior settle override; absent inherits the engine settings.
    #[serde(default)]
    pub settle_override: Option<SettleSettings>,
}

// ── Conditions ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    #[serde(default)]
    pub negate: bool,

    #[serde(flatten)]
    pub kind: RawConditionKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawConditionKind {
    Touched,
    PieceOnSurface { definition: String },
    PieceTouched { definition: String },
    PieceInRange { definition: String, radius: f32 },
    VariableEquals { variable: String, value: Value },
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawAction {
    AttachProxy {
        template: String,
    },

    SpawnObject {
        template: String,
        #[serde(default)]
        offset: ScreenPoint,
        #[serde(default = "default_frequency")]
        frequency_frames: u64,
        #[serde(default)]
        on_activate: bool,
        #[serde(default = "default_true")]
        during_update: bool,
        #[serde(default)]
        on_deactivate: bool,
    },

    Cooldown {
        frames: u32,
        #[serde(default)]
        on_place: bool,
        #[serde(default)]
        on_activate: bool,
        #[serde(default)]
        remaining_var: Option<String>,
        #[serde(default)]
        active_var: Option<String>,
    },

    SyncPose {
        #[serde(default = "default_true")]
        position: bool,
        #[serde(default = "default_true")]
        rotation: bool,
        #[serde(default)]
        offset_degrees: f32,
        #[serde(default)]
        snap_step_degrees: u32,
    },

    StoreOrientation {
        #[serde(default)]
        orientation_var: Option<String>,
        #[serde(default)]
        delta_var: Option<String>,
    },

    SetVariable {
        variable:       String,
        active_value:   Value,
        inactive_value: Value,
    },
}

fn default_true() -> bool {
    true
}

/// One second at a 60 Hz sensing rate.
fn default_frequency() -> u64 {
    60
}
