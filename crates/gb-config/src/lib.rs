//! `gb-config` — externally authored piece-set configuration.
//!
//! A *piece set* maps glyph ids to the behaviors and conditions that apply
//! while matching tokens are on the sensing surface.  Sets are authored as
//! JSON, deserialized into the [`raw`] model, and *compiled* into the
//! immutable runtime form: names become typed ids, behavior-set references
//! are flattened, execution order is pre-sorted, and variables are interned
//! into the store.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`raw`]     | serde mirror of the JSON asset format                     |
//! | [`model`]   | compiled `PieceSet` / `Definition`                        |
//! | [`compile`] | name resolution and flattening                            |
//! | [`loader`]  | JSON loading from paths, readers, and strings             |
//! | [`error`]   | `ConfigError`                                             |
//!
//! # Asset format
//!
//! ```json
//! {
//!   "name": "demo",
//!   "behavior_sets": [
//!     { "name": "common", "behaviors": [
//!       { "name": "proxy", "action": { "type": "attach_proxy", "template": "marker" } }
//!     ] }
//!   ],
//!   "definitions": [
//!     { "name": "dragon", "glyphs": [2],
//!       "behavior_sets": ["common"],
//!       "behaviors": [
//!         { "name": "roar", "execution_order": 5,
//!           "action": { "type": "spawn_object", "template": "fire" },
//!           "conditions": [ { "kind": "touched" } ] }
//!       ],
//!       "global_conditions": [ { "kind": "variable_equals",
//!                                "variable": "round_active", "value": true } ] }
//!   ]
//! }
//! ```

pub mod compile;
pub mod error;
pub mod loader;
pub mod model;
pub mod raw;


pub use compile::compile_piece_set;
pub use error::ConfigError;
pub use loader::{load_piece_set, load_piece_set_reader, load_piece_set_str};
pub use model::{Definition, PieceSet};
pub use raw::RawPieceSet;
