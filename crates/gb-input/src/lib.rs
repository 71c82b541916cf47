//! `gb-input` — the sensing-surface input seam.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`contact`] | `Contact` record, `ContactPhase` lifecycle enum            |
//! | [`source`]  | `ContactSource` trait, `ScriptedSource` frame-indexed feed |
//!
//! The engine consumes contacts read-only, one snapshot per frame.  The real
//! sensing hardware lives behind [`ContactSource`]; tests and demos drive the
//! engine with a [`ScriptedSource`].

pub mod contact;
pub mod source;

#[cfg(test)]
mod tests;

pub use contact::{Contact, ContactPhase};
pub use source::{ContactSource, ScriptedSource};
