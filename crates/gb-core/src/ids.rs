//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into registry `Vec`s via `id.0 as usize`, but callers
//! should prefer the `.index()` helpers for clarity.
//!
//! `ContactId` values come from the sensing source and are stable for one
//! touch-down-to-lift-off session; every other ID is assigned at piece-set
//! compile time or by the instantiation backend.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Identifier of one continuous physical contact session on the sensing
    /// surface.  Assigned by the contact source; unique while the contact is
    /// live, reusable after release.
    pub struct ContactId(u32);
}

typed_id! {
    /// Decoded identity of the printed glyph on a physical piece.
    /// `u16` keeps glyph sets compact (max 65,535 distinct glyph patterns).
    pub struct GlyphId(u16);
}

typed_id! {
    /// Index of a behavior definition within the active piece set, in
    /// declaration order.
    pub struct DefinitionId(u32);
}

typed_id! {
    /// Index of a behavior in the piece set's flat behavior registry.
    /// Behaviors contributed by a shared behavior set keep one ID across
    /// every definition that references the set.
    pub struct BehaviorId(u32);
}

typed_id! {
    /// Index of a named variable cell in the variable store.
    pub struct VarId(u32);
}

typed_id! {
    /// Handle to a spawned visual representation, assigned by the
    /// instantiation backend.
    pub struct ProxyId(u32);
}
