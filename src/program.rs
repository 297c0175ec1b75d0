use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{Clause, Relation};
use crate::report::{DebugReport, ErrorReport};
use crate::symbol::SymbolTable;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgramError {
    #[error("Redefinition of relation {0}")]
    DuplicateRelation(String),
}

/// Stable name of a clause inside the [`Program`] that issued it.
///
/// Handles grow monotonically and are never reused, so ordering by handle is
/// insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseHandle(u64);

/// Root of the AST: declared relations plus the clauses over them.
///
/// Relations keep their insertion order (names are unique); clauses live in
/// an arena keyed by [`ClauseHandle`].
#[derive(Clone, Debug, Default)]
pub struct Program {
    relations: Vec<Relation>,
    clauses: BTreeMap<ClauseHandle, Clause>,
    next_handle: u64,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a relation. A relation of the same name is never replaced; the
    /// call fails and the program is left as it was.
    pub fn append_relation(&mut self, relation: Relation) -> Result<(), ProgramError> {
        if self.relation(&relation.name).is_some() {
            debug!(relation = %relation.name, "duplicate_relation_rejected");
            return Err(ProgramError::DuplicateRelation(relation.name));
        }
        trace!(relation = %relation.name, "append_relation");
        self.relations.push(relation);
        Ok(())
    }

    /// Removes and returns the relation called `name`, if there is one.
    pub fn remove_relation(&mut self, name: &str) -> Option<Relation> {
        let index = self.relations.iter().position(|r| r.name == name)?;
        trace!(relation = name, "remove_relation");
        Some(self.relations.remove(index))
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn append_clause(&mut self, clause: Clause) -> ClauseHandle {
        let handle = ClauseHandle(self.next_handle);
        self.next_handle += 1;
        trace!(head = %clause.head.name, handle = handle.0, "append_clause");
        self.clauses.insert(handle, clause);
        handle
    }

    /// Removes the first clause structurally equal to `clause`.
    pub fn remove_clause(&mut self, clause: &Clause) -> Option<Clause> {
        let handle = self.find_clause(clause)?;
        self.remove_clause_by_handle(handle)
    }

    pub fn remove_clause_by_handle(&mut self, handle: ClauseHandle) -> Option<Clause> {
        let removed = self.clauses.remove(&handle);
        if removed.is_some() {
            trace!(handle = handle.0, "remove_clause");
        }
        removed
    }

    /// Handle of the first clause structurally equal to `clause`.
    pub fn find_clause(&self, clause: &Clause) -> Option<ClauseHandle> {
        self.clauses
            .iter()
            .find(|(_, candidate)| *candidate == clause)
            .map(|(handle, _)| *handle)
    }

    pub fn clause(&self, handle: ClauseHandle) -> Option<&Clause> {
        self.clauses.get(&handle)
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.values()
    }

    pub fn clauses_with_handles(&self) -> impl Iterator<Item = (ClauseHandle, &Clause)> {
        self.clauses.iter().map(|(handle, clause)| (*handle, clause))
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty() && self.clauses.is_empty()
    }
}

/// Relations compare as a set keyed by name, clauses as a sequence. Handles
/// are not part of a program's meaning.
impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.relations.len() == other.relations.len()
            && self
                .relations
                .iter()
                .all(|relation| other.relation(&relation.name) == Some(relation))
            && self.clauses.len() == other.clauses.len()
            && self.clauses().eq(other.clauses())
    }
}

impl Eq for Program {}

/// Output of one parse: the program together with the symbol table and the
/// reports produced alongside it.
#[derive(Debug)]
pub struct TranslationUnit {
    program: Program,
    symbols: SymbolTable,
    errors: ErrorReport,
    debug: DebugReport,
}

impl TranslationUnit {
    pub fn new(
        program: Program,
        symbols: SymbolTable,
        errors: ErrorReport,
        debug: DebugReport,
    ) -> Self {
        Self {
            program,
            symbols,
            errors,
            debug,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn errors(&self) -> &ErrorReport {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorReport {
        &mut self.errors
    }

    pub fn debug_report(&self) -> &DebugReport {
        &self.debug
    }

    pub fn debug_report_mut(&mut self) -> &mut DebugReport {
        &mut self.debug
    }
}
