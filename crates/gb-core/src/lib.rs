//! `gb-core` — foundational types for the `glyphboard` piece engine.
//!
//! This crate is a dependency of every other `gb-*` crate.  It intentionally
//! has no `gb-*` dependencies and minimal external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `ContactId`, `GlyphId`, `DefinitionId`, `BehaviorId`, … |
//! | [`frame`]    | `Frame`, `FrameClock`                                   |
//! | [`geom`]     | `ScreenPoint`, `Pose`                                   |
//! | [`settings`] | `SettleSettings`                                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |
//!           | Required by `gb-config`.                            |

pub mod frame;
pub mod geom;
pub mod ids;
pub mod settings;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use frame::{Frame, FrameClock};
pub use geom::{Pose, ScreenPoint};
pub use ids::{BehaviorId, ContactId, DefinitionId, GlyphId, ProxyId, VarId};
pub use settings::SettleSettings;
