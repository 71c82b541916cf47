//! `gb-behavior` — behaviors, conditions, and the activation state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`behavior`]  | `Behavior` (pure config), `BehaviorAction` variants           |
//! | [`condition`] | `Condition`, `ConditionKind`, conjunction evaluation          |
//! | [`context`]   | `EvalContext` (read-only), `HookContext` (mutable effects)    |
//! | [`arena`]     | `StateArena` — all per-contact activation state               |
//! | [`machine`]   | the shared settle/activate/update/deactivate state machine    |
//! | [`actions`]   | per-variant hook implementations                              |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! A `Behavior` is immutable configuration; everything that changes at
//! runtime lives in the [`StateArena`], keyed by `(BehaviorId, ContactId)`.
//! One behavior therefore tracks any number of concurrent contacts (two
//! identical tokens placed at once) without its instances interfering.
//!
//! The state machine in [`machine`] is shared by every action variant; a
//! variant only contributes its five hooks (placed / activate / update /
//! deactivate / removed), dispatched by `match` in [`actions`].  Hook
//! failures are returned to the dispatcher, never panicked.

pub mod actions;
pub mod arena;
pub mod behavior;
pub mod condition;
pub mod context;
pub mod error;
pub mod machine;

#[cfg(test)]
mod tests;

pub use actions::ActionState;
pub use arena::{ActivationState, StateArena};
pub use behavior::{Behavior, BehaviorAction};
pub use condition::{all_met, Condition, ConditionKind, DependentTarget};
pub use context::{EvalContext, HookContext};
pub use error::{BehaviorError, BehaviorResult};
