//! The contact-source seam and a scripted implementation.

use gb_core::{ContactId, Frame, GlyphId, ScreenPoint};

use crate::{Contact, ContactPhase};

// ── ContactSource ─────────────────────────────────────────────────────────────

/// Where contacts come from.
///
/// The engine calls [`poll`][Self::poll] exactly once per frame, before any
/// contact processing, and works off that snapshot for the whole pass — the
/// source is never consulted mid-frame.  Implementations bridge the real
/// sensing hardware; [`ScriptedSource`] replays a pre-authored sequence.
pub trait ContactSource {
    /// Append all contacts active at `frame` to `out`.
    ///
    /// `out` is cleared by the engine before the call.  Contacts may be
    /// reported in any order; processing order within a frame follows the
    /// reported order.
    fn poll(&mut self, frame: Frame, out: &mut Vec<Contact>);
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

/// A [`ContactSource`] that replays a fixed per-frame script.
///
/// Frame `n` of the script is returned for engine frame `n`; frames beyond
/// the end of the script report no contacts.  Build one either from raw
/// per-frame vectors or with the [`place`][Self::place] /
/// [`hold`][Self::hold] / [`lift`][Self::lift] helpers, which append one
/// frame per call for a single contact:
///
/// ```rust,ignore
/// let mut src = ScriptedSource::new();
/// src.place(ContactId(7), GlyphId(2));     // frame 0: Began
/// src.hold(ContactId(7), GlyphId(2), 4);   // frames 1–4: Stationary
/// src.lift(ContactId(7), GlyphId(2));      // frame 5: Ended
/// ```
#[derive(Default)]
pub struct ScriptedSource {
    frames: Vec<Vec<Contact>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build directly from per-frame contact vectors.
    pub fn from_frames(frames: Vec<Vec<Contact>>) -> Self {
        Self { frames }
    }

    /// Number of scripted frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Append `contact` to frame `frame`, growing the script as needed.
    ///
    /// Use this to overlay several concurrent contacts onto the same frames.
    pub fn push_at(&mut self, frame: Frame, contact: Contact) {
        let idx = frame.index();
        if self.frames.len() <= idx {
            self.frames.resize_with(idx + 1, Vec::new);
        }
        self.frames[idx].push(contact);
    }

    // ── Single-contact script helpers ─────────────────────────────────────
    //
    // Each helper appends whole frames at the end of the script, so they
    // compose sequentially for one contact.  For concurrent contacts, use
    // `push_at` with explicit frames.

    /// Append one frame in which `id` begins at `position`.
    pub fn place_at(&mut self, id: ContactId, glyph: GlyphId, position: ScreenPoint) {
        self.frames.push(vec![
            Contact::new(id, glyph, ContactPhase::Began).with_position(position),
        ]);
    }

    /// Append one frame in which `id` begins at the origin.
    pub fn place(&mut self, id: ContactId, glyph: GlyphId) {
        self.place_at(id, glyph, ScreenPoint::default());
    }

    /// Append `frames` frames in which `id` reports `Stationary`.
    pub fn hold(&mut self, id: ContactId, glyph: GlyphId, frames: usize) {
        for _ in 0..frames {
            self.frames
                .push(vec![Contact::new(id, glyph, ContactPhase::Stationary)]);
        }
    }

    /// Append one frame in which `id` reports `Moved` at `position`.
    pub fn move_to(&mut self, id: ContactId, glyph: GlyphId, position: ScreenPoint) {
        self.frames.push(vec![
            Contact::new(id, glyph, ContactPhase::Moved).with_position(position),
        ]);
    }

    /// Append one frame in which `id` reports `Ended`.
    pub fn lift(&mut self, id: ContactId, glyph: GlyphId) {
        self.frames
            .push(vec![Contact::new(id, glyph, ContactPhase::Ended)]);
    }
}

impl ContactSource for ScriptedSource {
    fn poll(&mut self, frame: Frame, out: &mut Vec<Contact>) {
        if let Some(contacts) = self.frames.get(frame.index()) {
            out.extend_from_slice(contacts);
        }
    }
}
