//! Unit tests for gb-behavior: condition evaluation and the state machine.

use gb_core::{BehaviorId, ContactId, DefinitionId, Frame, GlyphId, Pose, ProxyId, ScreenPoint,
              SettleSettings};
use gb_data::{Value, VariableStore};
use gb_input::{Contact, ContactPhase};
use gb_piece::{InstantiateError, Instantiator, PieceIndex, RecordingInstantiator, VirtualPiece};

use crate::{
    all_met, machine, ActivationState, Behavior, BehaviorAction, Condition, ConditionKind,
    DependentTarget, EvalContext, HookContext, StateArena,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const BID: BehaviorId = BehaviorId(0);
const CID: ContactId = ContactId(7);
const GLYPH: GlyphId = GlyphId(2);

fn behavior(action: BehaviorAction) -> Behavior {
    Behavior {
        name: "test".to_owned(),
        action,
        conditions: vec![],
        execution_order: 0,
        override_global_conditions: false,
        settle_override: None,
    }
}

fn proxy_behavior() -> Behavior {
    behavior(BehaviorAction::AttachProxy { template: "proxy".to_owned() })
}

fn contact(phase: ContactPhase) -> Contact {
    Contact::new(CID, GLYPH, phase)
}

fn settle(frames: u32) -> SettleSettings {
    SettleSettings { use_settling: true, settling_frames: frames }
}

/// Everything one behavior needs to run frames of the state machine.
struct Rig {
    arena: StateArena,
    piece: VirtualPiece,
    vars:  VariableStore,
    inst:  RecordingInstantiator,
}

impl Rig {
    fn new() -> Self {
        Self {
            arena: StateArena::new(),
            piece: VirtualPiece::new(&contact(ContactPhase::Began)),
            vars:  VariableStore::new(),
            inst:  RecordingInstantiator::new(),
        }
    }

    fn run(
        &mut self,
        b:       &Behavior,
        c:       &Contact,
        frame:   u64,
        global:  bool,
        local:   bool,
        settings: SettleSettings,
    ) -> crate::BehaviorResult<()> {
        self.piece.refresh_from(c);
        let mut cx = HookContext {
            frame:        Frame(frame),
            contact:      c,
            piece:        &mut self.piece,
            vars:         &mut self.vars,
            instantiator: &mut self.inst,
        };
        machine::process_contact(b, BID, global, local, settings, &mut self.arena, &mut cx)
    }

    /// Run a frame with both gates passing.
    fn pass(&mut self, b: &Behavior, c: &Contact, frame: u64, s: SettleSettings) {
        self.run(b, c, frame, true, true, s).unwrap();
    }
}

// ── Condition evaluation ──────────────────────────────────────────────────────

#[cfg(test)]
mod condition_tests {
    use super::*;

    fn eval_with(
        cond:    &Condition,
        c:       &Contact,
        pieces:  &PieceIndex,
        vars:    &VariableStore,
    ) -> bool {
        let cx = EvalContext { frame: Frame(0), contact: c, pieces, vars };
        cond.evaluate(&cx)
    }

    fn eval(cond: &Condition, c: &Contact) -> bool {
        eval_with(cond, c, &PieceIndex::new(), &VariableStore::new())
    }

    #[test]
    fn negation_truth_table() {
        let touched = contact(ContactPhase::Stationary).touched();
        let untouched = contact(ContactPhase::Stationary);

        let plain = Condition::new(ConditionKind::Touched);
        assert!(eval(&plain, &touched));
        assert!(!eval(&plain, &untouched));

        let negated = Condition::negated(ConditionKind::Touched);
        assert!(!eval(&negated, &touched));
        assert!(eval(&negated, &untouched));
    }

    #[test]
    fn empty_condition_list_is_vacuously_true() {
        let cx = EvalContext {
            frame:   Frame(0),
            contact: &contact(ContactPhase::Began),
            pieces:  &PieceIndex::new(),
            vars:    &VariableStore::new(),
        };
        assert!(all_met(&[], &cx));
    }

    #[test]
    fn conjunction_requires_every_condition() {
        let c = contact(ContactPhase::Stationary).touched();
        let cx = EvalContext {
            frame:   Frame(0),
            contact: &c,
            pieces:  &PieceIndex::new(),
            vars:    &VariableStore::new(),
        };
        let pass = Condition::new(ConditionKind::Touched);
        let fail = Condition::negated(ConditionKind::Touched);
        assert!(all_met(std::slice::from_ref(&pass), &cx));
        assert!(!all_met(&[pass, fail], &cx));
    }

    #[test]
    fn unresolved_dependent_definition_fails_closed() {
        let cond = Condition::new(ConditionKind::PieceOnSurface { target: None });
        assert!(!eval(&cond, &contact(ContactPhase::Stationary)));
        // Negation applies after the fail-closed result.
        let cond = Condition::negated(ConditionKind::PieceTouched { target: None });
        assert!(eval(&cond, &contact(ContactPhase::Stationary)));
    }

    fn target(glyphs: Vec<GlyphId>) -> Option<DependentTarget> {
        Some(DependentTarget {
            definition: DefinitionId(0),
            name:       "dep".to_owned(),
            glyphs,
        })
    }

    #[test]
    fn piece_on_surface_consults_the_index() {
        let mut pieces = PieceIndex::new();
        let cond = Condition::new(ConditionKind::PieceOnSurface {
            target: target(vec![GlyphId(9)]),
        });
        let c = contact(ContactPhase::Stationary);
        let vars = VariableStore::new();
        assert!(!eval_with(&cond, &c, &pieces, &vars));

        let dep = Contact::new(ContactId(3), GlyphId(9), ContactPhase::Began);
        pieces.insert(VirtualPiece::new(&dep));
        assert!(eval_with(&cond, &c, &pieces, &vars));
    }

    #[test]
    fn piece_in_range_uses_screen_distance() {
        let mut pieces = PieceIndex::new();
        let dep = Contact::new(ContactId(3), GlyphId(9), ContactPhase::Began)
            .with_position(ScreenPoint::new(6.0, 8.0)); // 10 units from origin
        pieces.insert(VirtualPiece::new(&dep));
        let vars = VariableStore::new();
        let c = contact(ContactPhase::Stationary); // at origin

        let near = Condition::new(ConditionKind::PieceInRange {
            target: target(vec![GlyphId(9)]),
            radius: 10.0,
        });
        let far = Condition::new(ConditionKind::PieceInRange {
            target: target(vec![GlyphId(9)]),
            radius: 9.0,
        });
        assert!(eval_with(&near, &c, &pieces, &vars));
        assert!(!eval_with(&far, &c, &pieces, &vars));
    }

    #[test]
    fn variable_equals_matches_exact_value_only() {
        let mut vars = VariableStore::new();
        let id = vars.intern("mode");
        let cond = Condition::new(ConditionKind::VariableEquals {
            variable: id,
            value:    Value::Int(2),
        });
        let c = contact(ContactPhase::Stationary);
        let pieces = PieceIndex::new();

        // Unset cell never matches.
        assert!(!eval_with(&cond, &c, &pieces, &vars));
        vars.set(id, 1_i64);
        assert!(!eval_with(&cond, &c, &pieces, &vars));
        vars.set(id, 2_i64);
        assert!(eval_with(&cond, &c, &pieces, &vars));
    }
}

// ── Settle state machine ──────────────────────────────────────────────────────

#[cfg(test)]
mod settle_tests {
    use super::*;

    #[test]
    fn activation_waits_out_the_settle_delay() {
        let b = proxy_behavior();
        let mut rig = Rig::new();

        rig.pass(&b, &contact(ContactPhase::Began), 0, settle(2));
        assert!(rig.arena.is_settling(BID, CID));
        assert!(rig.inst.spawned.is_empty());

        rig.pass(&b, &contact(ContactPhase::Stationary), 1, settle(2));
        assert!(rig.inst.spawned.is_empty(), "no activation before frame T+N");

        rig.pass(&b, &contact(ContactPhase::Stationary), 2, settle(2));
        assert_eq!(rig.inst.spawned.len(), 1, "activation lands exactly at frame T+N");
        assert!(rig.arena.is_active(BID, CID));
    }

    #[test]
    fn settling_disabled_activates_on_began_frame() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        rig.pass(&b, &contact(ContactPhase::Began), 0, SettleSettings::disabled());
        assert!(rig.arena.is_active(BID, CID));
        assert_eq!(rig.inst.spawned.len(), 1);
    }

    #[test]
    fn behavior_override_beats_global_settings() {
        let mut b = proxy_behavior();
        b.settle_override = Some(SettleSettings::disabled());
        let mut rig = Rig::new();
        // Global says settle for 5 frames; the override wins.
        rig.pass(&b, &contact(ContactPhase::Began), 0, settle(5));
        assert!(rig.arena.is_active(BID, CID));
    }

    #[test]
    fn condition_loss_mid_settle_suppresses_for_the_whole_contact() {
        let b = proxy_behavior();
        let mut rig = Rig::new();

        rig.pass(&b, &contact(ContactPhase::Began), 0, settle(3));
        // Frame 1: a gating condition flips false.
        rig.run(&b, &contact(ContactPhase::Stationary), 1, true, false, settle(3))
            .unwrap();
        assert_eq!(
            rig.arena.contacts.get(&(BID, CID)),
            Some(&ActivationState::Suppressed)
        );

        // Conditions recover, but activation requires a fresh Began.
        for frame in 2..10 {
            rig.pass(&b, &contact(ContactPhase::Stationary), frame, settle(3));
        }
        assert!(rig.inst.spawned.is_empty(), "aborted settle never activates");

        // Contact ends: the suppressed entry evaporates without hooks.
        rig.pass(&b, &contact(ContactPhase::Ended), 10, settle(3));
        assert!(rig.arena.contacts.is_empty());
        assert!(rig.inst.despawned.is_empty());
    }

    #[test]
    fn fresh_began_after_suppression_settles_anew() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        rig.pass(&b, &contact(ContactPhase::Began), 0, settle(2));
        rig.run(&b, &contact(ContactPhase::Stationary), 1, true, false, settle(2))
            .unwrap();
        rig.pass(&b, &contact(ContactPhase::Ended), 2, settle(2));

        // The id comes back in a new session (legal after release).
        rig.pass(&b, &contact(ContactPhase::Began), 10, settle(2));
        rig.pass(&b, &contact(ContactPhase::Stationary), 11, settle(2));
        rig.pass(&b, &contact(ContactPhase::Stationary), 12, settle(2));
        assert_eq!(rig.inst.spawned.len(), 1);
    }

    #[test]
    fn settle_entry_dropped_silently_when_contact_ends() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        rig.pass(&b, &contact(ContactPhase::Began), 0, settle(5));
        rig.pass(&b, &contact(ContactPhase::Ended), 1, settle(5));
        assert!(rig.arena.contacts.is_empty());
        assert!(rig.inst.spawned.is_empty());
        assert!(rig.inst.despawned.is_empty());
    }

    #[test]
    fn settling_toggled_off_mid_settle_activates_immediately() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        rig.pass(&b, &contact(ContactPhase::Began), 0, settle(10));
        // Global settings change at runtime; resolved freshly, so the
        // pending entry activates on the next in-progress frame.
        rig.pass(&b, &contact(ContactPhase::Stationary), 1, SettleSettings::disabled());
        assert!(rig.arena.is_active(BID, CID));
    }
}

// ── Activation lifecycle ──────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn deactivate_fires_once_and_never_without_activate() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();

        // Conditions false from the start: nothing to deactivate.
        rig.run(&b, &contact(ContactPhase::Began), 0, true, false, off).unwrap();
        assert!(rig.inst.despawned.is_empty());

        // Activate, then lose conditions twice: one deactivate only.
        rig.pass(&b, &contact(ContactPhase::Stationary), 1, off);
        assert_eq!(rig.inst.spawned.len(), 1);
        rig.run(&b, &contact(ContactPhase::Stationary), 2, true, false, off).unwrap();
        rig.run(&b, &contact(ContactPhase::Stationary), 3, true, false, off).unwrap();
        assert_eq!(rig.inst.despawned.len(), 1);
    }

    #[test]
    fn reactivates_when_conditions_recover_after_deactivation() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();

        rig.pass(&b, &contact(ContactPhase::Began), 0, off);
        rig.run(&b, &contact(ContactPhase::Stationary), 1, true, false, off).unwrap();
        rig.pass(&b, &contact(ContactPhase::Stationary), 2, off);

        assert_eq!(rig.inst.spawned.len(), 2, "activate/deactivate can cycle per contact");
        assert_eq!(rig.inst.despawned.len(), 1);
        assert!(rig.arena.is_active(BID, CID));
    }

    #[test]
    fn terminal_phase_deactivates_and_clears() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();

        rig.pass(&b, &contact(ContactPhase::Began), 0, off);
        rig.pass(&b, &contact(ContactPhase::Stationary), 1, off);
        rig.pass(&b, &contact(ContactPhase::Ended), 2, off);

        assert_eq!(rig.inst.despawned.len(), 1);
        assert!(rig.arena.contacts.is_empty());
        assert!(rig.piece.proxies().is_empty());
    }

    #[test]
    fn canceled_is_handled_like_ended() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();
        rig.pass(&b, &contact(ContactPhase::Began), 0, off);
        rig.pass(&b, &contact(ContactPhase::Canceled), 1, off);
        assert_eq!(rig.inst.despawned.len(), 1);
        assert!(rig.arena.contacts.is_empty());
    }

    #[test]
    fn global_conditions_ignored_when_overridden() {
        let mut b = proxy_behavior();
        b.override_global_conditions = true;
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();

        // Global conditions fail the whole time; the behavior activates and
        // stays active on its own (empty → vacuously true) conditions.
        rig.run(&b, &contact(ContactPhase::Began), 0, false, true, off).unwrap();
        assert!(rig.arena.is_active(BID, CID));
        rig.run(&b, &contact(ContactPhase::Stationary), 1, false, true, off).unwrap();
        assert!(rig.arena.is_active(BID, CID));
        assert!(rig.inst.despawned.is_empty());
    }

    #[test]
    fn without_override_global_failure_deactivates() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();
        rig.pass(&b, &contact(ContactPhase::Began), 0, off);
        rig.run(&b, &contact(ContactPhase::Stationary), 1, false, true, off).unwrap();
        assert!(!rig.arena.is_active(BID, CID));
        assert_eq!(rig.inst.despawned.len(), 1);
    }
}

// ── Action variants ───────────────────────────────────────────────────────────

#[cfg(test)]
mod action_tests {
    use super::*;

    #[test]
    fn spawn_object_respects_frequency() {
        let b = behavior(BehaviorAction::SpawnObject {
            template:         "sparkle".to_owned(),
            offset:           ScreenPoint::new(1.0, 0.0),
            frequency_frames: 2,
            on_activate:      false,
            during_update:    true,
            on_deactivate:    false,
        });
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();

        rig.pass(&b, &contact(ContactPhase::Began), 0, off); // activates, no spawn
        for frame in 1..=6 {
            rig.pass(&b, &contact(ContactPhase::Stationary), frame, off);
        }
        // Timer seeded at activation (frame 0); intervals elapse at 2, 4, 6.
        assert_eq!(rig.inst.spawned.len(), 3);
    }

    #[test]
    fn spawn_object_edge_flags() {
        let b = behavior(BehaviorAction::SpawnObject {
            template:         "burst".to_owned(),
            offset:           ScreenPoint::default(),
            frequency_frames: 1000,
            on_activate:      true,
            during_update:    false,
            on_deactivate:    true,
        });
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();
        rig.pass(&b, &contact(ContactPhase::Began), 0, off);
        rig.pass(&b, &contact(ContactPhase::Stationary), 1, off);
        rig.pass(&b, &contact(ContactPhase::Ended), 2, off);
        // One spawn per edge, none from updates.
        assert_eq!(rig.inst.spawned.len(), 2);
    }

    #[test]
    fn attach_proxy_spawns_at_anchor_and_cleans_up() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();
        rig.pass(&b, &contact(ContactPhase::Began), 0, off);
        assert_eq!(rig.piece.proxies().len(), 1);
        let proxy = rig.piece.proxies()[0];
        rig.pass(&b, &contact(ContactPhase::Ended), 1, off);
        assert_eq!(rig.inst.despawned, vec![proxy]);
        assert!(rig.piece.proxies().is_empty());
    }

    #[test]
    fn cooldown_on_place_starts_once() {
        let mut rig = Rig::new();
        let remaining = rig.vars.intern("cd_remaining");
        let active = rig.vars.intern("cd_active");
        let b = behavior(BehaviorAction::Cooldown {
            frames:        10,
            on_place:      true,
            on_activate:   false,
            remaining_var: Some(remaining),
            active_var:    Some(active),
        });

        // Settle completes → placed fires → cooldown starts.
        rig.pass(&b, &contact(ContactPhase::Began), 0, settle(1));
        assert!(rig.arena.cooldowns.is_empty(), "not started until placed");
        rig.pass(&b, &contact(ContactPhase::Stationary), 1, settle(1));
        assert_eq!(rig.arena.cooldowns.get(&BID), Some(&10));
        assert_eq!(rig.vars.try_get::<bool>(active), Some(true));
        assert_eq!(rig.vars.try_get::<i64>(remaining), Some(10));

        // A running cooldown is never restarted by later cycles.
        rig.arena.cooldowns.insert(BID, 4);
        rig.pass(&b, &contact(ContactPhase::Ended), 2, settle(1));
        rig.pass(&b, &contact(ContactPhase::Began), 3, settle(1));
        rig.pass(&b, &contact(ContactPhase::Stationary), 4, settle(1));
        assert_eq!(rig.arena.cooldowns.get(&BID), Some(&4));
    }

    #[test]
    fn sync_pose_applies_on_activate_and_moved_only() {
        let b = behavior(BehaviorAction::SyncPose {
            position:          true,
            rotation:          true,
            offset_degrees:    0.0,
            snap_step_degrees: 0,
        });
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();

        let began = contact(ContactPhase::Began).with_position(ScreenPoint::new(1.0, 1.0));
        rig.pass(&b, &began, 0, off);
        assert_eq!(rig.piece.anchor.position, ScreenPoint::new(1.0, 1.0));

        // Stationary frames do not chase the contact.
        let stationary =
            contact(ContactPhase::Stationary).with_position(ScreenPoint::new(5.0, 5.0));
        rig.pass(&b, &stationary, 1, off);
        assert_eq!(rig.piece.anchor.position, ScreenPoint::new(1.0, 1.0));

        let moved = contact(ContactPhase::Moved).with_position(ScreenPoint::new(5.0, 5.0));
        rig.pass(&b, &moved, 2, off);
        assert_eq!(rig.piece.anchor.position, ScreenPoint::new(5.0, 5.0));
    }

    #[test]
    fn sync_pose_snaps_rotation() {
        let b = behavior(BehaviorAction::SyncPose {
            position:          false,
            rotation:          true,
            offset_degrees:    0.0,
            snap_step_degrees: 90,
        });
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();
        // 100° snaps to 90°.
        let began = contact(ContactPhase::Began).with_orientation(100.0_f32.to_radians());
        rig.pass(&b, &began, 0, off);
        let applied = rig.piece.anchor.orientation.to_degrees();
        assert!((applied - 90.0).abs() < 1e-3, "got {applied}");
    }

    #[test]
    fn store_orientation_writes_degrees_and_wrapped_delta() {
        let mut rig = Rig::new();
        let orientation = rig.vars.intern("orientation");
        let delta = rig.vars.intern("delta");
        let b = behavior(BehaviorAction::StoreOrientation {
            orientation_var: Some(orientation),
            delta_var:       Some(delta),
        });
        let off = SettleSettings::disabled();

        rig.pass(&b, &contact(ContactPhase::Began).with_orientation(350.0_f32.to_radians()), 0, off);
        rig.pass(
            &b,
            &contact(ContactPhase::Moved).with_orientation(10.0_f32.to_radians()),
            1,
            off,
        );

        let stored = rig.vars.try_get::<f64>(orientation).unwrap();
        assert!((stored - 10.0).abs() < 1e-3, "got {stored}");
        // 350° → 10° crosses the 0/360 line: delta is 20°, not -340°.
        let stored_delta = rig.vars.try_get::<f64>(delta).unwrap();
        assert!((stored_delta - 20.0).abs() < 1e-3, "got {stored_delta}");
    }

    #[test]
    fn set_variable_writes_active_and_inactive_values() {
        let mut rig = Rig::new();
        let var = rig.vars.intern("dragon_present");
        let b = behavior(BehaviorAction::SetVariable {
            variable:       var,
            active_value:   Value::Bool(true),
            inactive_value: Value::Bool(false),
        });
        let off = SettleSettings::disabled();

        rig.pass(&b, &contact(ContactPhase::Began), 0, off);
        assert_eq!(rig.vars.try_get::<bool>(var), Some(true));
        rig.pass(&b, &contact(ContactPhase::Ended), 1, off);
        assert_eq!(rig.vars.try_get::<bool>(var), Some(false));
    }
}

// ── Hook fault containment ────────────────────────────────────────────────────

#[cfg(test)]
mod fault_tests {
    use super::*;

    /// Instantiator that fails every spawn while `failing` is set.
    #[derive(Default)]
    struct FlakyInstantiator {
        failing: bool,
        next:    u32,
        spawned: usize,
    }

    impl Instantiator for FlakyInstantiator {
        fn spawn(&mut self, template: &str, _pose: Pose) -> Result<ProxyId, InstantiateError> {
            if self.failing {
                return Err(InstantiateError::UnknownTemplate(template.to_owned()));
            }
            let id = ProxyId(self.next);
            self.next += 1;
            self.spawned += 1;
            Ok(id)
        }

        fn despawn(&mut self, _proxy: ProxyId) {}
    }

    #[test]
    fn failed_activate_leaves_pair_inactive_and_retries_next_frame() {
        let b = proxy_behavior();
        let mut arena = StateArena::new();
        let mut piece = VirtualPiece::new(&contact(ContactPhase::Began));
        let mut vars = VariableStore::new();
        let mut inst = FlakyInstantiator { failing: true, ..Default::default() };
        let off = SettleSettings::disabled();

        let began = contact(ContactPhase::Began);
        let mut cx = HookContext {
            frame:        Frame(0),
            contact:      &began,
            piece:        &mut piece,
            vars:         &mut vars,
            instantiator: &mut inst,
        };
        let result = machine::process_contact(&b, BID, true, true, off, &mut arena, &mut cx);
        assert!(result.is_err());
        assert!(!arena.is_active(BID, CID), "fault must not half-activate");

        // Next frame the backend recovers; re-entry activates from scratch.
        inst.failing = false;
        let moved = contact(ContactPhase::Moved);
        let mut cx = HookContext {
            frame:        Frame(1),
            contact:      &moved,
            piece:        &mut piece,
            vars:         &mut vars,
            instantiator: &mut inst,
        };
        machine::process_contact(&b, BID, true, true, off, &mut arena, &mut cx).unwrap();
        assert!(arena.is_active(BID, CID));
        assert_eq!(inst.spawned, 1);
    }
}

// ── Arena invariants ──────────────────────────────────────────────────────────

#[cfg(test)]
mod arena_tests {
    use super::*;

    #[test]
    fn purge_contact_reports_leftover_active_entries() {
        let mut arena = StateArena::new();
        arena.contacts.insert(
            (BehaviorId(0), CID),
            ActivationState::Active { data: crate::actions::ActionState::None },
        );
        arena
            .contacts
            .insert((BehaviorId(1), CID), ActivationState::Suppressed);
        arena.contacts.insert(
            (BehaviorId(0), ContactId(99)),
            ActivationState::Settling { remaining: 2 },
        );

        assert_eq!(arena.purge_contact(CID), 1);
        // Other contacts' entries are untouched.
        assert_eq!(arena.contacts.len(), 1);
        assert!(arena.is_settling(BehaviorId(0), ContactId(99)));
    }

    #[test]
    fn one_behavior_tracks_concurrent_contacts_independently() {
        let b = proxy_behavior();
        let mut rig = Rig::new();
        let off = SettleSettings::disabled();
        rig.pass(&b, &contact(ContactPhase::Began), 0, off);

        // A second identical token (same behavior, different contact id).
        let other = Contact::new(ContactId(8), GLYPH, ContactPhase::Began);
        let mut other_piece = VirtualPiece::new(&other);
        let mut cx = HookContext {
            frame:        Frame(0),
            contact:      &other,
            piece:        &mut other_piece,
            vars:         &mut rig.vars,
            instantiator: &mut rig.inst,
        };
        machine::process_contact(&b, BID, true, true, off, &mut rig.arena, &mut cx).unwrap();

        assert!(rig.arena.is_active(BID, CID));
        assert!(rig.arena.is_active(BID, ContactId(8)));
        assert_eq!(rig.arena.active_count(), 2);

        // Ending one leaves the other active.
        let ended = Contact::new(ContactId(8), GLYPH, ContactPhase::Ended);
        let mut cx = HookContext {
            frame:        Frame(1),
            contact:      &ended,
            piece:        &mut other_piece,
            vars:         &mut rig.vars,
            instantiator: &mut rig.inst,
        };
        machine::process_contact(&b, BID, true, true, off, &mut rig.arena, &mut cx).unwrap();
        assert!(rig.arena.is_active(BID, CID));
        assert!(!rig.arena.is_active(BID, ContactId(8)));
    }
}
