//! Compilation: raw (name-referenced) config → immutable runtime model.
//!
//! Resolution rules:
//!
//! - definition and behavior-set names must be unique within the set, and a
//!   referenced behavior set must exist — violations are [`ConfigError`]s;
//! - a dependent condition naming an unknown definition is *not* an error:
//!   it compiles to an unresolved target that fails closed at runtime, with
//!   one warning here (the asset may legitimately ship ahead of the
//!   definition it references);
//! - variable names are interned into the store exactly once, here, never
//!   per frame.

use std::collections::HashMap;

use gb_behavior::{Behavior, BehaviorAction, Condition, ConditionKind, DependentTarget};
use gb_core::{BehaviorId, DefinitionId, GlyphId};
use gb_data::VariableStore;

use crate::error::ConfigError;
use crate::model::{Definition, PieceSet};
use crate::raw::{RawAction, RawBehavior, RawCondition, RawConditionKind, RawPieceSet};

/// Compile a deserialized piece set, interning its variables into `vars`.
pub fn compile_piece_set(
    raw:  RawPieceSet,
    vars: &mut VariableStore,
) -> Result<PieceSet, ConfigError> {
    // ── Pass 1: definition name/glyph table ───────────────────────────────
    //
    // Dependent conditions may reference any definition, including ones
    // declared later, so the full table is built before any condition is
    // compiled.
    let mut def_ids: HashMap<&str, DefinitionId> = HashMap::new();
    let mut def_glyphs: Vec<Vec<GlyphId>> = Vec::with_capacity(raw.definitions.len());

    for (i, def) in raw.definitions.iter().enumerate() {
        let id = DefinitionId(i as u32);
        if def_ids.insert(&def.name, id).is_some() {
            return Err(ConfigError::DuplicateDefinition(def.name.clone()));
        }
        def_glyphs.push(def.glyphs.iter().map(|&g| GlyphId(g)).collect());
    }

    let mut resolver = Resolver {
        set_name: &raw.name,
        def_ids:  &def_ids,
        def_glyphs: &def_glyphs,
        vars,
    };

    // ── Pass 2: behavior sets → registry prefix ───────────────────────────
    let mut behaviors: Vec<Behavior> = Vec::new();
    let mut set_members: HashMap<&str, Vec<BehaviorId>> = HashMap::new();

    for set in &raw.behavior_sets {
        if set_members.contains_key(set.name.as_str()) {
            return Err(ConfigError::DuplicateBehaviorSet(set.name.clone()));
        }
        let members = set
            .behaviors
            .iter()
            .map(|b| push_behavior(&mut behaviors, resolver.behavior(b)))
            .collect();
        set_members.insert(&set.name, members);
    }

    // ── Pass 3: definitions ───────────────────────────────────────────────
    let mut definitions: Vec<Definition> = Vec::with_capacity(raw.definitions.len());

    for (i, def) in raw.definitions.iter().enumerate() {
        // Set contributions first, then direct behaviors, matching the
        // authored processing order before the execution-order sort.
        let mut ids: Vec<BehaviorId> = Vec::new();
        for set_name in &def.behavior_sets {
            let members = set_members.get(set_name.as_str()).ok_or_else(|| {
                ConfigError::UnknownBehaviorSet {
                    definition: def.name.clone(),
                    set:        set_name.clone(),
                }
            })?;
            ids.extend_from_slice(members);
        }
        for b in &def.behaviors {
            ids.push(push_behavior(&mut behaviors, resolver.behavior(b)));
        }

        // Stable sort: ties keep the concatenation order above.
        ids.sort_by_key(|&id| behaviors[id.index()].execution_order);

        definitions.push(Definition {
            id:   DefinitionId(i as u32),
            name: def.name.clone(),
            glyphs: def_glyphs[i].clone(),
            global_conditions: def
                .global_conditions
                .iter()
                .map(|c| resolver.condition(c))
                .collect(),
            behaviors: ids,
        });
    }

    Ok(PieceSet {
        name: raw.name,
        definitions,
        behaviors,
    })
}

fn push_behavior(registry: &mut Vec<Behavior>, behavior: Behavior) -> BehaviorId {
    let id = BehaviorId(registry.len() as u32);
    registry.push(behavior);
    id
}

// ── Name resolution ───────────────────────────────────────────────────────────

struct Resolver<'a> {
    set_name:   &'a str,
    def_ids:    &'a HashMap<&'a str, DefinitionId>,
    def_glyphs: &'a [Vec<GlyphId>],
    vars:       &'a mut VariableStore,
}

impl Resolver<'_> {
    fn behavior(&mut self, raw: &RawBehavior) -> Behavior {
        Behavior {
            name: raw.name.clone(),
            action: self.action(&raw.action),
            conditions: raw.conditions.iter().map(|c| self.condition(c)).collect(),
            execution_order: raw.execution_order,
            override_global_conditions: raw.override_global_conditions,
            settle_override: raw.settle_override,
        }
    }

    fn condition(&mut self, raw: &RawCondition) -> Condition {
        let kind = match &raw.kind {
            RawConditionKind::Touched => ConditionKind::Touched,

            RawConditionKind::PieceOnSurface { definition } => ConditionKind::PieceOnSurface {
                target: self.target(definition),
            },

            RawConditionKind::PieceTouched { definition } => ConditionKind::PieceTouched {
                target: self.target(definition),
            },

            RawConditionKind::PieceInRange { definition, radius } => {
                ConditionKind::PieceInRange {
                    target: self.target(definition),
                    radius: *radius,
                }
            }

            RawConditionKind::VariableEquals { variable, value } => {
                ConditionKind::VariableEquals {
                    variable: self.vars.intern(variable),
                    value:    *value,
                }
            }
        };
        Condition { kind, negate: raw.negate }
    }

    /// Resolve a dependent-definition reference, copying its glyph set so
    /// runtime evaluation never needs the full piece set.
    fn target(&self, definition: &str) -> Option<DependentTarget> {
        match self.def_ids.get(definition) {
            Some(&id) => Some(DependentTarget {
                definition: id,
                name:       definition.to_owned(),
                glyphs:     self.def_glyphs[id.index()].clone(),
            }),
            None => {
                log::warn!(
                    "piece set {:?}: dependent definition {definition:?} not found; \
                     the condition will fail closed",
                    self.set_name
                );
                None
            }
        }
    }

    fn action(&mut self, raw: &RawAction) -> BehaviorAction {
        match raw {
            RawAction::AttachProxy { template } => BehaviorAction::AttachProxy {
                template: template.clone(),
            },

            RawAction::SpawnObject {
                template,
                offset,
                frequency_frames,
                on_activate,
                during_update,
                on_deactivate,
            } => BehaviorAction::SpawnObject {
                template:         template.clone(),
                offset:           *offset,
                frequency_frames: *frequency_frames,
                on_activate:      *on_activate,
                during_update:    *during_update,
                on_deactivate:    *on_deactivate,
            },

            RawAction::Cooldown {
                frames,
                on_place,
                on_activate,
                remaining_var,
                active_var,
            } => BehaviorAction::Cooldown {
                frames:        *frames,
                on_place:      *on_place,
                on_activate:   *on_activate,
                remaining_var: remaining_var.as_deref().map(|v| self.vars.intern(v)),
                active_var:    active_var.as_deref().map(|v| self.vars.intern(v)),
            },

            RawAction::SyncPose {
                position,
                rotation,
                offset_degrees,
                snap_step_degrees,
            } => BehaviorAction::SyncPose {
                position:          *position,
                rotation:          *rotation,
                offset_degrees:    *offset_degrees,
                snap_step_degrees: *snap_step_degrees,
            },

            RawAction::StoreOrientation {
                orientation_var,
                delta_var,
            } => BehaviorAction::StoreOrientation {
                orientation_var: orientation_var.as_deref().map(|v| self.vars.intern(v)),
                delta_var:       delta_var.as_deref().map(|v| self.vars.intern(v)),
            },

            RawAction::SetVariable {
                variable,
                active_value,
                inactive_value,
            } => BehaviorAction::SetVariable {
                variable:       self.vars.intern(variable),
                active_value:   *active_value,
                inactive_value: *inactive_value,
            },
        }
    }
}
