//! The in-application state of one physical piece on the surface.

use gb_core::{ContactId, GlyphId, Pose, ProxyId, ScreenPoint};
use gb_input::{Contact, ContactPhase};

/// Virtual counterpart of one live contact.
///
/// Owned exclusively by the [`PieceIndex`][crate::PieceIndex]; created the
/// frame its contact begins and destroyed the frame the contact goes
/// terminal, so its lifetime is always contained in the contact session's.
///
/// Two kinds of pose live here:
///
/// - the **observed** contact state (`phase`, `position`, `orientation`,
///   `is_touched`), refreshed from the sensing snapshot before each dispatch
///   and read by dependent conditions;
/// - the **anchor** pose, which behaviors (pose sync) drive and spawned
///   proxies follow.  It starts at the observed position and only changes
///   when a behavior writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualPiece {
    /// The contact session this piece is bound to.
    pub contact_id: ContactId,

    /// Glyph identity of the physical piece.
    pub glyph: GlyphId,

    /// Last-observed contact phase.
    pub phase: ContactPhase,

    /// Last-observed position on the sensing surface.
    pub position: ScreenPoint,

    /// Last-observed orientation in radians.
    pub orientation: f32,

    /// Whether the contact currently reports being touched.
    pub is_touched: bool,

    /// The digital pose behaviors drive.  Starts at the observed position.
    pub anchor: Pose,

    /// Handles of visual representations currently attached to this piece.
    proxies: Vec<ProxyId>,
}

impl VirtualPiece {
    /// Create a piece from the contact that began it.
    pub fn new(contact: &Contact) -> Self {
        Self {
            contact_id:  contact.id,
            glyph:       contact.glyph,
            phase:       contact.phase,
            position:    contact.position,
            orientation: contact.orientation,
            is_touched:  contact.is_touched,
            anchor:      Pose::new(contact.position, contact.orientation),
            proxies:     Vec::new(),
        }
    }

    /// Refresh the observed contact state from this frame's snapshot.
    pub fn refresh_from(&mut self, contact: &Contact) {
        debug_assert_eq!(self.contact_id, contact.id);
        self.phase = contact.phase;
        self.position = contact.position;
        self.orientation = contact.orientation;
        self.is_touched = contact.is_touched;
    }

    /// Attach a spawned visual representation.
    pub fn attach_proxy(&mut self, proxy: ProxyId) {
        self.proxies.push(proxy);
    }

    /// Detach a visual representation; no-op if it was never attached.
    pub fn detach_proxy(&mut self, proxy: ProxyId) {
        self.proxies.retain(|&p| p != proxy);
    }

    /// Currently attached visual representations.
    pub fn proxies(&self) -> &[ProxyId] {
        &self.proxies
    }

    /// Remove and return all attached proxies, for destruction.
    pub fn take_proxies(&mut self) -> Vec<ProxyId> {
        std::mem::take(&mut self.proxies)
    }
}
