//! The named variable cell registry.

use rustc_hash::FxHashMap;

use gb_core::VarId;

use crate::Value;

/// Named, externally-mutable state cells.
///
/// Cells are created by interning a name — typically during piece-set
/// compilation — and addressed by [`VarId`] from then on.  A cell starts
/// unset and holds whatever [`Value`] was last written; there is no static
/// type per cell, but in practice each cell only ever sees one payload type.
///
/// The store is owned by the engine and mutated only between or during
/// frames on the engine's thread.
#[derive(Default)]
pub struct VariableStore {
    ids:   FxHashMap<String, VarId>,
    names: Vec<String>,
    cells: Vec<Option<Value>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` to its id, creating an unset cell on first sight.
    pub fn intern(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = VarId(self.cells.len() as u32);
        self.ids.insert(name.to_owned(), id);
        self.names.push(name.to_owned());
        self.cells.push(None);
        id
    }

    /// Look up an already-interned name.
    pub fn resolve(&self, name: &str) -> Option<VarId> {
        self.ids.get(name).copied()
    }

    /// The name a cell was interned under.
    pub fn name(&self, id: VarId) -> &str {
        &self.names[id.index()]
    }

    /// Current value of the cell, `None` if never written.
    #[inline]
    pub fn get(&self, id: VarId) -> Option<Value> {
        self.cells[id.index()]
    }

    /// Typed read: `None` if the cell is unset or holds a different type.
    ///
    /// A type mismatch is logged once per read at debug level — it almost
    /// always means two config entries disagree about a cell's payload.
    pub fn try_get<T>(&self, id: VarId) -> Option<T>
    where
        T: TryFromValue,
    {
        let value = self.get(id)?;
        let extracted = T::try_from_value(value);
        if extracted.is_none() {
            log::debug!(
                "variable {:?} holds {value}, not the requested type",
                self.name(id)
            );
        }
        extracted
    }

    /// Write a value.
    #[inline]
    pub fn set(&mut self, id: VarId, value: impl Into<Value>) {
        self.cells[id.index()] = Some(value.into());
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ── Typed extraction ──────────────────────────────────────────────────────────

/// Primitive types extractable from a [`Value`], for
/// [`VariableStore::try_get`].
pub trait TryFromValue: Sized {
    fn try_from_value(value: Value) -> Option<Self>;
}

impl TryFromValue for bool {
    fn try_from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl TryFromValue for i64 {
    fn try_from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
}

impl TryFromValue for f64 {
    fn try_from_value(value: Value) -> Option<Self> {
        value.as_float()
    }
}
