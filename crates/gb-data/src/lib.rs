//! `gb-data` — the named data provider.
//!
//! A [`VariableStore`] holds named, externally-mutable state cells shared
//! between behaviors, conditions, and the host application: a behavior can
//! write a value on activation, a condition can gate on it, and the host can
//! flip it between frames.
//!
//! # Crate layout
//!
//! | Module    | Contents                                           |
//! |-----------|----------------------------------------------------|
//! | [`value`] | `Value` — the Bool/Int/Float cell payload          |
//! | [`store`] | `VariableStore` — intern-once named cell registry  |
//!
//! Names resolve to [`VarId`][gb_core::VarId]s exactly once, at piece-set
//! compile time; per-frame access is an index into the cell vector.  There is
//! no change-event mechanism — consumers read the current value when they
//! need it.

pub mod store;
pub mod value;


pub use store::{TryFromValue, VariableStore};
pub use value::Value;
