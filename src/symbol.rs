use std::{fmt, sync::Arc};

use lasso::{Key, Spur, ThreadedRodeo};

/// Identifier of a string interned in a [`SymbolTable`].
///
/// Ids are only meaningful together with the table that produced them; two
/// tables fed the same strings may hand out different ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(Spur);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0.into_usize()
    }
}

/// Append-only string interner scoped to one compilation unit.
///
/// Cloning the table clones the handle, not the contents: every clone sees
/// the same symbols. Guarantees:
/// - Same string always produces the same id within one table
/// - An id can always be resolved by the table that produced it
/// - Entries are never removed
#[derive(Clone, Default)]
pub struct SymbolTable {
    rodeo: Arc<ThreadedRodeo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its id. Returns the existing id if the
    /// string was already interned in this table.
    pub fn intern(&self, text: &str) -> SymbolId {
        SymbolId(self.rodeo.get_or_intern(text))
    }

    /// Intern a string and bundle the id with this table so it can be
    /// resolved later without the caller holding on to the table.
    pub fn symbol(&self, text: &str) -> Symbol {
        Symbol {
            id: self.intern(text),
            table: self.clone(),
        }
    }

    /// Resolve an id back to its string. Returns `None` for ids that were not
    /// produced by this table.
    pub fn resolve(&self, id: SymbolId) -> Option<&str> {
        self.rodeo.try_resolve(&id.0)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.rodeo.contains(text)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }

    fn same_table(&self, other: &SymbolTable) -> bool {
        Arc::ptr_eq(&self.rodeo, &other.rodeo)
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("len", &self.len())
            .finish()
    }
}

/// An interned string: the id plus the table able to resolve it.
///
/// Equality compares the resolved text, so symbols from independent tables
/// compare equal whenever they spell the same string.
#[derive(Clone)]
pub struct Symbol {
    id: SymbolId,
    table: SymbolTable,
}

impl Symbol {
    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn as_str(&self) -> &str {
        // The id was produced by `table`, and tables never drop entries.
        self.table.rodeo.resolve(&self.id.0)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        if self.table.same_table(&other.table) {
            return self.id == other.id;
        }
        self.as_str() == other.as_str()
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.as_str(), self.id.index())
    }
}
