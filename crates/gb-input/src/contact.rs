//! The per-frame contact record reported by the sensing source.

use gb_core::{ContactId, GlyphId, ScreenPoint};

// ── ContactPhase ──────────────────────────────────────────────────────────────

/// Lifecycle phase of a contact within its session.
///
/// Valid transitions are `Began → {Moved|Stationary}* → {Ended|Canceled}`;
/// the source never reuses a `ContactId` while its previous session is still
/// pending cleanup.  `Canceled` is handled identically to `Ended` everywhere
/// in the engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ContactPhase {
    /// No contact data this frame.
    #[default]
    None,
    /// First frame of a new contact session.
    Began,
    /// Contact position or orientation changed since last frame.
    Moved,
    /// Contact persists without movement.
    Stationary,
    /// Contact lifted off the surface.
    Ended,
    /// Contact tracking was lost or aborted by the source.
    Canceled,
}

impl ContactPhase {
    /// `true` for the ongoing phases `Moved` and `Stationary`.
    #[inline]
    pub fn is_in_progress(self) -> bool {
        matches!(self, ContactPhase::Moved | ContactPhase::Stationary)
    }

    /// `true` for `None`, `Ended`, and `Canceled` — the phases after which
    /// the contact's virtual piece is destroyed.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ContactPhase::None | ContactPhase::Ended | ContactPhase::Canceled
        )
    }
}

// ── Contact ───────────────────────────────────────────────────────────────────

/// One physical contact as reported by the sensing source for one frame.
///
/// Consumed read-only by the engine.  `glyph` is only meaningful for
/// glyph-type contacts, which are the only kind the engine polls for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    /// Stable id for this touch-down-to-lift-off session.
    pub id: ContactId,

    /// Decoded glyph identity of the physical piece.
    pub glyph: GlyphId,

    /// Lifecycle phase this frame.
    pub phase: ContactPhase,

    /// Position on the sensing surface.
    pub position: ScreenPoint,

    /// Orientation in radians.
    pub orientation: f32,

    /// Whether the piece is currently pressed/touched.
    pub is_touched: bool,
}

impl Contact {
    /// A contact with the given identity and phase at the surface origin.
    /// Tests and scripted sources refine it with the `with_*` helpers.
    pub fn new(id: ContactId, glyph: GlyphId, phase: ContactPhase) -> Self {
        Self {
            id,
            glyph,
            phase,
            position:    ScreenPoint::default(),
            orientation: 0.0,
            is_touched:  false,
        }
    }

    pub fn with_position(mut self, position: ScreenPoint) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, radians: f32) -> Self {
        self.orientation = radians;
        self
    }

    pub fn touched(mut self) -> Self {
        self.is_touched = true;
        self
    }
}
