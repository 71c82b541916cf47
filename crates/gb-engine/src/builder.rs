//! Fluent builder for constructing an [`Engine`].

use std::sync::Arc;

use gb_behavior::{BehaviorAction, ConditionKind, StateArena};
use gb_config::PieceSet;
use gb_core::{FrameClock, SettleSettings, VarId};
use gb_data::VariableStore;
use gb_input::ContactSource;
use gb_piece::{Instantiator, PieceIndex};

use crate::{Engine, EngineError, EngineResult};

/// Fluent builder for [`Engine<S, I>`].
///
/// # Required inputs
///
/// - `S: ContactSource` — the sensing feed
/// - `I: Instantiator` — the visual backend
/// - at least one compiled [`PieceSet`] (the first becomes active)
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.variables(v)` | empty store (sets must use none) |
/// | `.settle(s)`    | `SettleSettings::default()`      |
///
/// The variable store must be the one the sets were compiled against —
/// compilation interns every referenced name into it, and `build` verifies
/// the ids are in range.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(source, NullInstantiator::default())
///     .piece_set(set)
///     .variables(vars)
///     .settle(SettleSettings { use_settling: true, settling_frames: 2 })
///     .build()?;
/// engine.run_frames(60, &mut NoopObserver);
/// ```
pub struct EngineBuilder<S: ContactSource, I: Instantiator> {
    source:       S,
    instantiator: I,
    sets:         Vec<PieceSet>,
    vars:         Option<VariableStore>,
    settle:       SettleSettings,
}

impl<S: ContactSource, I: Instantiator> EngineBuilder<S, I> {
    pub fn new(source: S, instantiator: I) -> Self {
        Self {
            source,
            instantiator,
            sets:   Vec::new(),
            vars:   None,
            settle: SettleSettings::default(),
        }
    }

    /// Add one piece set.  The first set added is active at startup.
    pub fn piece_set(mut self, set: PieceSet) -> Self {
        self.sets.push(set);
        self
    }

    /// Add several piece sets at once.
    pub fn piece_sets(mut self, sets: impl IntoIterator<Item = PieceSet>) -> Self {
        self.sets.extend(sets);
        self
    }

    /// Supply the variable store the sets were compiled against.
    pub fn variables(mut self, vars: VariableStore) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Engine-global settle settings (changeable later via
    /// [`Engine::set_settle`]).
    pub fn settle(mut self, settle: SettleSettings) -> Self {
        self.settle = settle;
        self
    }

    /// Validate inputs and return a ready-to-run [`Engine`].
    ///
    /// Errors on an empty set list, duplicate set names, or a variable store
    /// that doesn't cover the ids the sets reference.  Also writes every
    /// `SetVariable` behavior's inactive value so those cells start in a
    /// known state.
    pub fn build(self) -> EngineResult<Engine<S, I>> {
        if self.sets.is_empty() {
            return Err(EngineError::NoPieceSets);
        }
        for (i, set) in self.sets.iter().enumerate() {
            if self.sets[..i].iter().any(|other| other.name == set.name) {
                return Err(EngineError::DuplicatePieceSet(set.name.clone()));
            }
        }

        let mut vars = self.vars.unwrap_or_default();

        // ── Verify the store covers every referenced variable ─────────────
        for set in &self.sets {
            if let Some(max) = max_var_id(set) {
                if max.index() >= vars.len() {
                    return Err(EngineError::VariableStoreMismatch {
                        set: set.name.clone(),
                    });
                }
            }
        }

        // ── Seed SetVariable cells with their inactive values ─────────────
        for set in &self.sets {
            for behavior in &set.behaviors {
                if let BehaviorAction::SetVariable {
                    variable,
                    inactive_value,
                    ..
                } = &behavior.action
                {
                    vars.set(*variable, *inactive_value);
                }
            }
        }

        Ok(Engine {
            clock:              FrameClock::new(),
            source:             self.source,
            instantiator:       self.instantiator,
            settle:             self.settle,
            vars,
            sets:               self.sets.into_iter().map(Arc::new).collect(),
            active:             0,
            pieces:             PieceIndex::new(),
            arena:              StateArena::new(),
            contact_buf:        Vec::new(),
            anomalies:          0,
            // The initial set counts as a change: the observer hears about
            // it on the first frame.
            set_change_pending: true,
        })
    }
}

/// Highest `VarId` referenced anywhere in `set`, if any.
fn max_var_id(set: &PieceSet) -> Option<VarId> {
    let mut max: Option<VarId> = None;
    let mut see = |id: VarId| {
        if max.is_none_or(|m| id > m) {
            max = Some(id);
        }
    };

    let conditions = set
        .behaviors
        .iter()
        .flat_map(|b| &b.conditions)
        .chain(set.definitions.iter().flat_map(|d| &d.global_conditions));
    for condition in conditions {
        if let ConditionKind::VariableEquals { variable, .. } = &condition.kind {
            see(*variable);
        }
    }

    for behavior in &set.behaviors {
        match &behavior.action {
            BehaviorAction::Cooldown {
                remaining_var,
                active_var,
                ..
            } => {
                if let Some(v) = remaining_var {
                    see(*v);
                }
                if let Some(v) = active_var {
                    see(*v);
                }
            }
            BehaviorAction::StoreOrientation {
                orientation_var,
                delta_var,
            } => {
                if let Some(v) = orientation_var {
                    see(*v);
                }
                if let Some(v) = delta_var {
                    see(*v);
                }
            }
            BehaviorAction::SetVariable { variable, .. } => see(*variable),
            _ => {}
        }
    }

    max
}
