//! Boolean predicates gating behavior activation.

use gb_core::{DefinitionId, GlyphId, VarId};
use gb_data::Value;

use crate::EvalContext;

/// A single predicate with post-evaluation negation:
/// `result = negate ? !raw : raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub kind:   ConditionKind,
    pub negate: bool,
}

impl Condition {
    pub fn new(kind: ConditionKind) -> Self {
        Self { kind, negate: false }
    }

    pub fn negated(kind: ConditionKind) -> Self {
        Self { kind, negate: true }
    }

    /// Evaluate against the current frame's context.
    pub fn evaluate(&self, cx: &EvalContext<'_>) -> bool {
        let raw = self.kind.evaluate(cx);
        if self.negate { !raw } else { raw }
    }
}

/// Conjunction over a condition list, short-circuiting on the first failure.
/// An empty list is vacuously true.
pub fn all_met(conditions: &[Condition], cx: &EvalContext<'_>) -> bool {
    conditions.iter().all(|condition| condition.evaluate(cx))
}

// ── ConditionKind ─────────────────────────────────────────────────────────────

/// The closed set of predicate variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    /// The active contact currently reports being touched.
    Touched,

    /// Any live piece matches the dependent definition's glyph set.
    PieceOnSurface { target: Option<DependentTarget> },

    /// Any live piece matching the dependent definition is touched.
    PieceTouched { target: Option<DependentTarget> },

    /// Any live piece matching the dependent definition is within `radius`
    /// screen units of the active contact's position.
    PieceInRange {
        target: Option<DependentTarget>,
        radius: f32,
    },

    /// The named variable cell currently holds exactly `value`.
    /// A never-written cell never matches.
    VariableEquals { variable: VarId, value: Value },
}

impl ConditionKind {
    fn evaluate(&self, cx: &EvalContext<'_>) -> bool {
        match self {
            ConditionKind::Touched => cx.contact.is_touched,

            ConditionKind::PieceOnSurface { target } => match resolved(target) {
                None => false,
                Some(t) => cx.pieces.any_matching(&t.glyphs),
            },

            ConditionKind::PieceTouched { target } => match resolved(target) {
                None => false,
                Some(t) => cx.pieces.any_touched(&t.glyphs),
            },

            ConditionKind::PieceInRange { target, radius } => match resolved(target) {
                None => false,
                Some(t) => cx
                    .pieces
                    .any_in_range(&t.glyphs, cx.contact.position, *radius),
            },

            ConditionKind::VariableEquals { variable, value } => {
                cx.vars.get(*variable) == Some(*value)
            }
        }
    }
}

/// Fail-closed unwrap for dependent targets: an unresolved reference
/// evaluates `false` rather than panicking.  The loud warning happened at
/// compile time; here we only leave a trace.
fn resolved(target: &Option<DependentTarget>) -> Option<&DependentTarget> {
    if target.is_none() {
        log::debug!("dependent condition has no resolved definition; evaluating false");
    }
    target.as_ref()
}

// ── DependentTarget ───────────────────────────────────────────────────────────

/// A resolved reference to another definition, captured at piece-set compile
/// time.  The glyph set is copied out of the definition so evaluation needs
/// no access to the full piece set.
#[derive(Debug, Clone, PartialEq)]
pub struct DependentTarget {
    /// The referenced definition, for diagnostics.
    pub definition: DefinitionId,

    /// Its authored name.
    pub name: String,

    /// Its glyph set — what "a piece matching the definition" means.
    pub glyphs: Vec<GlyphId>,
}
