//! Column binding
//!
//! Resolves every `ColumnRef` in a definition to a (slot, column index)
//! pair before any row is touched. A slot is a table's position in the
//! join path: 0 for the base table, 1.. for each join.

use std::collections::HashSet;

use serde_json::Value;

use crate::catalog::{ColumnRef, QueryDefinition, Selection};
use crate::dataset::{Dataset, Table, TableName};

use super::errors::{QueryError, QueryResult};

/// A resolved column position within a joined row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundColumn {
    pub slot: usize,
    pub index: usize,
}

impl BoundColumn {
    /// Reads this column from a joined row
    pub fn value<'d>(&self, tables: &[&'d Table], row: &[usize]) -> &'d Value {
        &tables[self.slot].rows()[row[self.slot]][self.index]
    }
}

/// Tables in join-path order, plus lookups against them.
///
/// Every table held here is rectangular, so bound columns index safely.
pub struct Binder<'d> {
    slots: Vec<TableName>,
    tables: Vec<&'d Table>,
}

impl<'d> Binder<'d> {
    /// Checks the join path and output names of `definition`
    pub fn new(definition: &QueryDefinition, dataset: &'d Dataset) -> QueryResult<Self> {
        let slots = definition.tables_in_scope();

        let mut seen = HashSet::new();
        for table in &slots {
            if !seen.insert(*table) {
                return Err(QueryError::invalid_definition(format!(
                    "Table '{}' appears more than once in the join path",
                    table
                )));
            }
        }

        validate_selection(definition)?;

        let tables: Vec<&Table> = slots.iter().map(|name| dataset.table(*name)).collect();
        for (name, table) in slots.iter().zip(&tables) {
            if let Some((row, width)) = table.ragged_row() {
                return Err(QueryError::invalid_definition(format!(
                    "Table '{}' row {} has {} cells, expected {}",
                    name,
                    row + 1,
                    width,
                    table.columns().len()
                )));
            }
        }

        Ok(Self { slots, tables })
    }

    pub fn tables(&self) -> &[&'d Table] {
        &self.tables
    }

    /// Resolves a column reference to its slot and index
    pub fn bind(&self, column: &ColumnRef) -> QueryResult<BoundColumn> {
        let slot = self
            .slots
            .iter()
            .position(|t| *t == column.table)
            .ok_or_else(|| {
                QueryError::invalid_definition(format!(
                    "Column '{}' refers to a table outside the join path",
                    column
                ))
            })?;

        self.bind_in_slot(slot, &column.column)
    }

    /// Resolves a column name within a known slot
    pub fn bind_in_slot(&self, slot: usize, column: &str) -> QueryResult<BoundColumn> {
        let table = self.tables[slot];
        let index = table
            .column_index(column)
            .ok_or_else(|| QueryError::unknown_column(self.slots[slot], column))?;

        Ok(BoundColumn { slot, index })
    }
}

fn validate_selection(definition: &QueryDefinition) -> QueryResult<()> {
    match &definition.select {
        Selection::Projection(columns) if columns.is_empty() => {
            return Err(QueryError::invalid_definition("Projection has no columns"));
        }
        Selection::Aggregate {
            group_by,
            aggregates,
        } if group_by.is_empty() && aggregates.is_empty() => {
            return Err(QueryError::invalid_definition(
                "Aggregate has neither group keys nor aggregates",
            ));
        }
        _ => {}
    }

    let names = definition.select.output_names();
    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(*name) {
            return Err(QueryError::invalid_definition(format!(
                "Output column '{}' is defined more than once",
                name
            )));
        }
    }

    if let Some(sort) = &definition.sort {
        if !names.contains(&sort.alias.as_str()) {
            return Err(QueryError::invalid_definition(format!(
                "Sort column '{}' is not an output column",
                sort.alias
            )));
        }
    }

    Ok(())
}
