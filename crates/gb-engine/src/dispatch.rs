//! Per-contact behavior dispatch.

use gb_behavior::{all_met, machine, EvalContext, HookContext, StateArena};
use gb_config::PieceSet;
use gb_core::{Frame, SettleSettings};
use gb_data::VariableStore;
use gb_input::Contact;
use gb_piece::{Instantiator, PieceIndex};

/// Fan one contact out to every matching definition's behaviors.
///
/// Definitions are visited in declaration order; within a definition,
/// behaviors run in the pre-sorted ascending execution order.  Global
/// conditions are evaluated once per definition.  A behavior hook fault is
/// logged with its identity and dispatch continues with the next behavior —
/// no behavior can block its successors (it re-runs next frame from its
/// last-known arena state).
///
/// Evaluation and mutation are phased per behavior: conditions read through
/// a short-lived [`EvalContext`] over the piece index, then the state
/// machine mutates through a [`HookContext`] holding the bound piece.
pub(crate) fn dispatch_contact<I: Instantiator>(
    set:           &PieceSet,
    contact:       &Contact,
    frame:         Frame,
    global_settle: SettleSettings,
    pieces:        &mut PieceIndex,
    arena:         &mut StateArena,
    vars:          &mut VariableStore,
    instantiator:  &mut I,
) {
    for def in set.matching_definitions(contact.glyph) {
        let meets_global = {
            let cx = EvalContext { frame, contact, pieces, vars };
            all_met(&def.global_conditions, &cx)
        };

        for &id in &def.behaviors {
            let behavior = set.behavior(id);

            let meets_local = {
                let cx = EvalContext { frame, contact, pieces, vars };
                all_met(&behavior.conditions, &cx)
            };

            let Some(piece) = pieces.get_mut(contact.id) else {
                // The tracker creates the piece before dispatch; hitting this
                // means a tracker bug, not a recoverable input condition.
                log::error!("no virtual piece for contact {} during dispatch", contact.id);
                return;
            };

            // Explicit reborrows: a struct literal would move the `&mut`
            // parameters out of the loop on the first iteration.
            let mut cx = HookContext {
                frame,
                contact,
                piece,
                vars: &mut *vars,
                instantiator: &mut *instantiator,
            };
            if let Err(e) = machine::process_contact(
                behavior,
                id,
                meets_global,
                meets_local,
                global_settle,
                arena,
                &mut cx,
            ) {
                log::error!(
                    "definition {:?}: behavior {:?} ({id}) hook fault on contact {}: {e}; \
                     continuing with next behavior",
                    def.name,
                    behavior.name,
                    contact.id
                );
            }
        }
    }
}
