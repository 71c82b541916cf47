//! The `Engine` struct and its frame loop.

use std::sync::Arc;

use gb_behavior::{BehaviorAction, StateArena};
use gb_config::PieceSet;
use gb_core::{Frame, FrameClock, GlyphId, SettleSettings};
use gb_data::VariableStore;
use gb_input::{Contact, ContactPhase, ContactSource};
use gb_piece::{Instantiator, PieceIndex, VirtualPiece};

use crate::dispatch::dispatch_contact;
use crate::{EngineError, EngineObserver, EngineResult};

/// The piece behavior engine.
///
/// `Engine<S, I>` owns all runtime state — the frame clock, the live piece
/// index, the behavior state arena, and the variable store — and drives the
/// per-frame pipeline described at the [crate root][crate].  Create one via
/// [`EngineBuilder`][crate::EngineBuilder].
///
/// Everything runs on the caller's thread; one call to
/// [`run_frames`][Self::run_frames] processes frames back to back with no
/// overlap between them.
pub struct Engine<S: ContactSource, I: Instantiator> {
    /// Frame clock — advanced at the end of each pass.
    pub(crate) clock: FrameClock,

    /// Where contact snapshots come from, polled once per frame.
    pub(crate) source: S,

    /// Backend creating/destroying visual representations.
    pub(crate) instantiator: I,

    /// Engine-global settle settings (behaviors may override per-behavior).
    pub(crate) settle: SettleSettings,

    /// Named variable cells shared by behaviors, conditions, and the host.
    pub(crate) vars: VariableStore,

    /// Every piece set supplied at build time; `active` indexes into it.
    pub(crate) sets: Vec<Arc<PieceSet>>,
    pub(crate) active: usize,

    /// Live virtual pieces, keyed by contact id.
    pub(crate) pieces: PieceIndex,

    /// All per-(behavior, contact) activation state plus cooldowns.
    pub(crate) arena: StateArena,

    /// Reused per-frame contact snapshot buffer.
    pub(crate) contact_buf: Vec<Contact>,

    /// Count of contacts dropped as lifecycle anomalies (unknown id with an
    /// in-progress phase).
    pub(crate) anomalies: u64,

    /// Set when the active piece set changed; delivered to the observer at
    /// the next frame boundary.
    pub(crate) set_change_pending: bool,
}

impl<S: ContactSource, I: Instantiator> Engine<S, I> {
    // ── Public API ────────────────────────────────────────────────────────

    /// The frame the next pass will process.
    #[inline]
    pub fn frame(&self) -> Frame {
        self.clock.current_frame
    }

    /// The currently active piece set.
    pub fn active_piece_set(&self) -> &Arc<PieceSet> {
        &self.sets[self.active]
    }

    /// Run `n` frames, invoking observer hooks at each boundary.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need
    /// callbacks.  Per-item faults inside a frame are contained and logged;
    /// nothing here returns an error or panics.
    pub fn run_frames<O: EngineObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.process_frame(observer);
        }
    }

    /// Run a single frame without callbacks.  Convenience for tests and
    /// hosts that drive the engine from their own loop.
    pub fn step(&mut self) {
        self.process_frame(&mut crate::NoopObserver);
    }

    /// Switch the active piece set by name.
    ///
    /// Rejected (before any state mutation) if `name` is unknown.  Switching
    /// is *destructive*: every live piece is destroyed, attached proxies are
    /// despawned, and all behavior state — including pending settles, active
    /// flags, and cooldowns — is dropped without deactivate hooks running.
    /// Avoid switching while pieces are on the surface; contact ids must not
    /// be assumed valid across a switch.
    ///
    /// The observer is notified at the next frame boundary.  Switching to
    /// the already-active set is a no-op.
    pub fn change_piece_set(&mut self, name: &str) -> EngineResult<()> {
        let index = self
            .sets
            .iter()
            .position(|set| set.name == name)
            .ok_or_else(|| EngineError::UnknownPieceSet(name.to_owned()))?;
        if index == self.active {
            return Ok(());
        }

        let invalidated = self.pieces.len();
        let pieces: Vec<VirtualPiece> = self.pieces.drain().collect();
        for mut piece in pieces {
            for proxy in piece.take_proxies() {
                self.instantiator.despawn(proxy);
            }
        }
        self.arena.clear();
        self.active = index;
        self.set_change_pending = true;
        log::info!("piece set changed to {name:?}; {invalidated} live piece(s) invalidated");
        Ok(())
    }

    // ── Host query API ────────────────────────────────────────────────────

    /// Is any piece with `glyph` currently on the surface?
    pub fn is_on_surface(&self, glyph: GlyphId) -> bool {
        self.pieces.any_matching(std::slice::from_ref(&glyph))
    }

    /// Is any piece with `glyph` currently touched?
    pub fn is_touched(&self, glyph: GlyphId) -> bool {
        self.pieces.any_touched(std::slice::from_ref(&glyph))
    }

    /// Live pieces carrying `glyph`.
    pub fn pieces_with_glyph(&self, glyph: GlyphId) -> Vec<&VirtualPiece> {
        self.pieces
            .matching(std::slice::from_ref(&glyph))
            .collect()
    }

    /// Live pieces matching the named definition of the active set.
    /// An unknown name matches nothing.
    pub fn pieces_matching_definition(&self, name: &str) -> Vec<&VirtualPiece> {
        match self.sets[self.active].find_definition(name) {
            Some(def) => self.pieces.matching(&def.glyphs).collect(),
            None => Vec::new(),
        }
    }

    /// The live piece index.
    pub fn pieces(&self) -> &PieceIndex {
        &self.pieces
    }

    /// The variable store (host-side reads).
    pub fn vars(&self) -> &VariableStore {
        &self.vars
    }

    /// The variable store (host-side writes between frames).
    pub fn vars_mut(&mut self) -> &mut VariableStore {
        &mut self.vars
    }

    /// The instantiation backend.
    pub fn instantiator(&self) -> &I {
        &self.instantiator
    }

    /// Engine-global settle settings currently in effect.
    pub fn settle(&self) -> SettleSettings {
        self.settle
    }

    /// Replace the engine-global settle settings.  Takes effect on the next
    /// frame — settings are resolved freshly every frame, never cached.
    pub fn set_settle(&mut self, settle: SettleSettings) {
        self.settle = settle;
    }

    /// Contacts dropped so far as lifecycle anomalies.
    pub fn anomalies(&self) -> u64 {
        self.anomalies
    }

    // ── Frame processing ──────────────────────────────────────────────────

    fn process_frame<O: EngineObserver>(&mut self, observer: &mut O) {
        let frame = self.clock.current_frame;

        if self.set_change_pending {
            self.set_change_pending = false;
            let set = Arc::clone(&self.sets[self.active]);
            observer.on_piece_set_changed(&set);
        }

        observer.on_frame_start(frame);

        // ── ① Cooldowns tick independent of any contact ───────────────────
        self.tick_cooldowns();

        // ── ② One snapshot per frame ──────────────────────────────────────
        let mut contacts = std::mem::take(&mut self.contact_buf);
        contacts.clear();
        self.source.poll(frame, &mut contacts);

        // ── ③–⑤ Track, dispatch, destroy, per contact ────────────────────
        for contact in &contacts {
            self.process_contact(contact, frame, observer);
        }

        let reported = contacts.len();
        self.contact_buf = contacts;

        observer.on_frame_end(frame, reported);
        self.clock.advance();
    }

    /// The piece tracker: contact lifecycle around one dispatch.
    fn process_contact<O: EngineObserver>(
        &mut self,
        contact:  &Contact,
        frame:    Frame,
        observer: &mut O,
    ) {
        if contact.phase == ContactPhase::None {
            return;
        }

        // ── Resolve or create the bound virtual piece ─────────────────────
        if let Some(piece) = self.pieces.get_mut(contact.id) {
            piece.refresh_from(contact);
        } else if contact.phase.is_terminal() {
            // Began and ended within the same frame; there is nothing to
            // track and nothing to tear down.
            return;
        } else if contact.phase == ContactPhase::Began {
            log::info!(
                "creating virtual piece for contact {} glyph {}",
                contact.id,
                contact.glyph
            );
            let piece = VirtualPiece::new(contact);
            observer.on_piece_created(&piece);
            self.pieces.insert(piece);
        } else {
            // An unknown id reporting Moved/Stationary has no state to
            // resume from; synthesizing one would invent a Began that never
            // happened.  Drop it and keep the frame going.
            log::error!(
                "contact {} glyph {} reported {:?} with no virtual piece; \
                 dropping for this frame",
                contact.id,
                contact.glyph,
                contact.phase
            );
            self.anomalies += 1;
            return;
        }

        // ── Dispatch to matching behaviors ────────────────────────────────
        let set = Arc::clone(&self.sets[self.active]);
        dispatch_contact(
            &set,
            contact,
            frame,
            self.settle,
            &mut self.pieces,
            &mut self.arena,
            &mut self.vars,
            &mut self.instantiator,
        );

        // ── Destroy on terminal phase, after the final dispatch ───────────
        if contact.phase.is_terminal() {
            if let Some(mut piece) = self.pieces.remove(contact.id) {
                let leftover = self.arena.purge_contact(contact.id);
                if leftover > 0 {
                    log::warn!(
                        "contact {}: {leftover} behavior(s) still active at piece \
                         destruction; state dropped",
                        contact.id
                    );
                }
                for proxy in piece.take_proxies() {
                    self.instantiator.despawn(proxy);
                }
                log::info!(
                    "destroying virtual piece for contact {} glyph {}",
                    contact.id,
                    contact.glyph
                );
                observer.on_piece_removed(&piece);
            }
        }
    }

    /// Decrement every running cooldown and mirror its variables.
    ///
    /// Runs at frame start so a cooldown started during frame F first ticks
    /// at F+1 and finishes while the behavior is inactive if need be.
    fn tick_cooldowns(&mut self) {
        if self.arena.cooldowns.is_empty() {
            return;
        }
        let set = Arc::clone(&self.sets[self.active]);
        let vars = &mut self.vars;
        self.arena.cooldowns.retain(|&id, remaining| {
            *remaining -= 1;
            if let BehaviorAction::Cooldown {
                remaining_var,
                active_var,
                ..
            } = &set.behavior(id).action
            {
                if let Some(var) = remaining_var {
                    vars.set(*var, *remaining as i64);
                }
                if let Some(var) = active_var {
                    vars.set(*var, *remaining > 0);
                }
            }
            *remaining > 0
        });
    }
}
