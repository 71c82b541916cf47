//! `gb-engine` — the frame loop orchestrator for glyphboard.
//!
//! # Per-frame pipeline
//!
//! ```text
//! for each frame:
//!   ① Cooldowns — tick every running cooldown (independent of contacts).
//!   ② Poll      — read this frame's contact snapshot from the source.
//!   ③ Track     — per contact: create the virtual piece on Began, refresh
//!                 observed state, drop unknown in-progress ids (anomaly).
//!   ④ Dispatch  — per contact: match definitions by glyph, evaluate global
//!                 conditions once, run each behavior's state machine in
//!                 ascending execution order.  Hook faults are logged and
//!                 contained per behavior.
//!   ⑤ Destroy   — per terminal contact: purge arena state, despawn
//!                 attached proxies, remove the piece.
//! ```
//!
//! Single-threaded and frame-synchronous: all processing for a frame
//! completes before the next snapshot is read, and nothing blocks — delayed
//! effects are frame-counted (settle, cooldown).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gb_config::load_piece_set;
//! use gb_data::VariableStore;
//! use gb_engine::{EngineBuilder, NoopObserver};
//! use gb_piece::NullInstantiator;
//!
//! let mut vars = VariableStore::new();
//! let set = load_piece_set(path, &mut vars)?;
//! let mut engine = EngineBuilder::new(source, NullInstantiator::default())
//!     .piece_set(set)
//!     .variables(vars)
//!     .build()?;
//! engine.run_frames(600, &mut NoopObserver);
//! assert!(engine.is_on_surface(GlyphId(2)));
//! ```

pub mod builder;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod observer;


pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
