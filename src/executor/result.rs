//! Result types for query execution

use crate::dataset::Table;

/// Result of query execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Output rows in result order
    pub table: Table,
    /// Rows produced by the join path, before filtering
    pub scanned_count: usize,
    /// Rows that passed every predicate
    pub matched_count: usize,
    /// Whether limit dropped any rows
    pub limit_applied: bool,
}

impl ExecutionResult {
    /// Returns true if the result has no rows
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of result rows
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}
