//! Unit tests for gb-input.

use gb_core::{ContactId, Frame, GlyphId, ScreenPoint};

use crate::{Contact, ContactPhase, ContactSource, ScriptedSource};

// ── ContactPhase ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod phase_tests {
    use super::*;

    #[test]
    fn in_progress_phases() {
        assert!(ContactPhase::Moved.is_in_progress());
        assert!(ContactPhase::Stationary.is_in_progress());
        assert!(!ContactPhase::Began.is_in_progress());
        assert!(!ContactPhase::Ended.is_in_progress());
    }

    #[test]
    fn terminal_phases() {
        assert!(ContactPhase::None.is_terminal());
        assert!(ContactPhase::Ended.is_terminal());
        assert!(ContactPhase::Canceled.is_terminal());
        assert!(!ContactPhase::Began.is_terminal());
        assert!(!ContactPhase::Stationary.is_terminal());
    }
}

// ── Contact builders ──────────────────────────────────────────────────────────

#[cfg(test)]
mod contact_tests {
    use super::*;

    #[test]
    fn builder_helpers_set_fields() {
        let c = Contact::new(ContactId(1), GlyphId(4), ContactPhase::Began)
            .with_position(ScreenPoint::new(10.0, 20.0))
            .with_orientation(1.5)
            .touched();
        assert_eq!(c.id, ContactId(1));
        assert_eq!(c.glyph, GlyphId(4));
        assert_eq!(c.position, ScreenPoint::new(10.0, 20.0));
        assert_eq!(c.orientation, 1.5);
        assert!(c.is_touched);
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

#[cfg(test)]
mod scripted_tests {
    use super::*;

    #[test]
    fn sequential_helpers_append_one_frame_each() {
        let mut src = ScriptedSource::new();
        src.place(ContactId(7), GlyphId(2));
        src.hold(ContactId(7), GlyphId(2), 2);
        src.lift(ContactId(7), GlyphId(2));
        assert_eq!(src.len(), 4);

        let mut out = Vec::new();
        src.poll(Frame(0), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].phase, ContactPhase::Began);

        out.clear();
        src.poll(Frame(2), &mut out);
        assert_eq!(out[0].phase, ContactPhase::Stationary);

        out.clear();
        src.poll(Frame(3), &mut out);
        assert_eq!(out[0].phase, ContactPhase::Ended);
    }

    #[test]
    fn poll_past_script_end_reports_nothing() {
        let mut src = ScriptedSource::new();
        src.place(ContactId(1), GlyphId(1));
        let mut out = Vec::new();
        src.poll(Frame(99), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn push_at_overlays_concurrent_contacts() {
        let mut src = ScriptedSource::new();
        src.push_at(Frame(0), Contact::new(ContactId(1), GlyphId(1), ContactPhase::Began));
        src.push_at(Frame(0), Contact::new(ContactId(2), GlyphId(1), ContactPhase::Began));
        src.push_at(Frame(2), Contact::new(ContactId(2), GlyphId(1), ContactPhase::Ended));

        let mut out = Vec::new();
        src.poll(Frame(0), &mut out);
        assert_eq!(out.len(), 2);

        // Frame 1 exists (grown by resize) but holds no contacts.
        out.clear();
        src.poll(Frame(1), &mut out);
        assert!(out.is_empty());

        out.clear();
        src.poll(Frame(2), &mut out);
        assert_eq!(out[0].id, ContactId(2));
    }
}
