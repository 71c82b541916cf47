//! The live-piece index.

use rustc_hash::FxHashMap;

use gb_core::{ContactId, GlyphId, ScreenPoint};

use crate::VirtualPiece;

/// Owns every live [`VirtualPiece`], keyed by contact id.
///
/// The glyph queries scan linearly: a sensing surface holds at most a few
/// dozen pieces at once, so an index per glyph would cost more to maintain
/// than it saves.
#[derive(Default)]
pub struct PieceIndex {
    pieces: FxHashMap<ContactId, VirtualPiece>,
}

impl PieceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly created piece.  Returns the previous piece if the id
    /// was somehow already occupied (the tracker treats that as a bug).
    pub fn insert(&mut self, piece: VirtualPiece) -> Option<VirtualPiece> {
        self.pieces.insert(piece.contact_id, piece)
    }

    /// Remove the piece bound to `id`.  Removing an unknown id is a no-op,
    /// keeping destruction idempotent per contact id.
    pub fn remove(&mut self, id: ContactId) -> Option<VirtualPiece> {
        self.pieces.remove(&id)
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.pieces.contains_key(&id)
    }

    pub fn get(&self, id: ContactId) -> Option<&VirtualPiece> {
        self.pieces.get(&id)
    }

    pub fn get_mut(&mut self, id: ContactId) -> Option<&mut VirtualPiece> {
        self.pieces.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// All live pieces, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &VirtualPiece> {
        self.pieces.values()
    }

    /// Drain every piece (piece-set switch teardown).
    pub fn drain(&mut self) -> impl Iterator<Item = VirtualPiece> + '_ {
        self.pieces.drain().map(|(_, piece)| piece)
    }

    // ── Glyph queries ─────────────────────────────────────────────────────

    /// Live pieces whose glyph is in `glyphs`.
    ///
    /// The glyph slice only needs to outlive the iterator, not the returned
    /// pieces — callers may pass a temporary.
    pub fn matching<'a, 'g>(
        &'a self,
        glyphs: &'g [GlyphId],
    ) -> impl Iterator<Item = &'a VirtualPiece> + use<'a, 'g> {
        self.pieces
            .values()
            .filter(move |piece| glyphs.contains(&piece.glyph))
    }

    /// Is any piece with a matching glyph on the surface?
    pub fn any_matching(&self, glyphs: &[GlyphId]) -> bool {
        self.matching(glyphs).next().is_some()
    }

    /// Is any matching piece currently touched?
    pub fn any_touched(&self, glyphs: &[GlyphId]) -> bool {
        self.matching(glyphs).any(|piece| piece.is_touched)
    }

    /// Is any matching piece within `radius` screen units of `origin`?
    pub fn any_in_range(&self, glyphs: &[GlyphId], origin: ScreenPoint, radius: f32) -> bool {
        self.matching(glyphs)
            .any(|piece| piece.position.distance(origin) <= radius)
    }
}
