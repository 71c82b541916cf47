//! `gb-piece` — virtual pieces and their live index.
//!
//! A [`VirtualPiece`] is the in-application object bound 1:1 to a currently
//! live contact id; the [`PieceIndex`] owns every live piece and answers the
//! glyph queries that conditions and the host application ask ("is glyph X on
//! the surface", "is any matching piece touched", "is one within range").
//!
//! # Crate layout
//!
//! | Module          | Contents                                            |
//! |-----------------|-----------------------------------------------------|
//! | [`piece`]       | `VirtualPiece`                                      |
//! | [`index`]       | `PieceIndex` — contact-id → piece map + queries     |
//! | [`instantiate`] | `Instantiator` trait, `Null`/`Recording` doubles    |

pub mod index;
pub mod instantiate;
pub mod piece;


pub use index::PieceIndex;
pub use instantiate::{InstantiateError, Instantiator, NullInstantiator, RecordingInstantiator};
pub use piece::VirtualPiece;
