//! The two context structs handed to conditions and hooks.
//!
//! Evaluation and mutation are strictly phased within a behavior pass: first
//! conditions read through an [`EvalContext`], then — once every read borrow
//! has ended — hooks mutate through a [`HookContext`].  The split keeps each
//! phase's access honest at the type level.

use gb_core::Frame;
use gb_data::VariableStore;
use gb_input::Contact;
use gb_piece::{Instantiator, PieceIndex, VirtualPiece};

/// Read-only view for condition evaluation, rebuilt per behavior pass.
pub struct EvalContext<'a> {
    /// Current engine frame.
    pub frame: Frame,

    /// The contact being processed.
    pub contact: &'a Contact,

    /// Every live piece, for dependent-piece conditions.
    pub pieces: &'a PieceIndex,

    /// The named variable cells.
    pub vars: &'a VariableStore,
}

/// Mutable effect targets for behavior hooks.
///
/// Borrows are disjoint by construction: the piece is the one bound to
/// `contact`, taken out of the index by the dispatcher; the variable store
/// and instantiator are engine-owned singletons.
pub struct HookContext<'a, I: Instantiator> {
    /// Current engine frame.
    pub frame: Frame,

    /// The contact being processed.
    pub contact: &'a Contact,

    /// The virtual piece bound to `contact`.
    pub piece: &'a mut VirtualPiece,

    /// The named variable cells.
    pub vars: &'a mut VariableStore,

    /// The instantiation backend for proxy/spawn effects.
    pub instantiator: &'a mut I,
}
