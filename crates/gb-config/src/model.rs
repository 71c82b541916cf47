//! The compiled, immutable runtime form of a piece set.

use gb_behavior::{Behavior, Condition};
use gb_core::{BehaviorId, DefinitionId, GlyphId};

/// One behavior definition: which glyphs it matches, which behaviors apply,
/// and the global conditions gating all of them.
///
/// Read-only at runtime; selected by the active piece set.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Index of this definition within its piece set, in declaration order.
    pub id: DefinitionId,

    /// Authored name, unique within the set (dependent conditions refer to
    /// definitions by this name).
    pub name: String,

    /// Contacts whose glyph is in this list match the definition.  Multiple
    /// definitions may match the same glyph; all are processed.
    pub glyphs: Vec<GlyphId>,

    /// Conditions gating every behavior in this definition (unless a
    /// behavior overrides them).  Evaluated once per contact per frame.
    pub global_conditions: Vec<Condition>,

    /// The definition's behaviors: behavior-set contributions concatenated
    /// before direct behaviors, then stable-sorted by ascending execution
    /// order at compile time.  Ids index the set's behavior registry.
    pub behaviors: Vec<BehaviorId>,
}

impl Definition {
    /// Does this definition match `glyph`?
    #[inline]
    pub fn matches(&self, glyph: GlyphId) -> bool {
        self.glyphs.contains(&glyph)
    }
}

// ── PieceSet ──────────────────────────────────────────────────────────────────

/// A compiled piece set: every definition plus the flat behavior registry
/// they index into.
///
/// Behaviors contributed by a shared behavior set appear once in the
/// registry and keep one [`BehaviorId`] across every referencing definition,
/// so their per-contact state is shared the way a shared asset's would be.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceSet {
    pub name: String,

    /// Definitions in declaration order (`DefinitionId` is the index).
    pub definitions: Vec<Definition>,

    /// Flat behavior registry (`BehaviorId` is the index).
    pub behaviors: Vec<Behavior>,
}

impl PieceSet {
    #[inline]
    pub fn definition(&self, id: DefinitionId) -> &Definition {
        &self.definitions[id.index()]
    }

    #[inline]
    pub fn behavior(&self, id: BehaviorId) -> &Behavior {
        &self.behaviors[id.index()]
    }

    /// Look up a definition by its authored name.
    pub fn find_definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|def| def.name == name)
    }

    /// All definitions matching `glyph`, in declaration order.
    pub fn matching_definitions(&self, glyph: GlyphId) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter(move |def| def.matches(glyph))
    }
}
