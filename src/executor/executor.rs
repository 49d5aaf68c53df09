//! Query executor for feedline
//!
//! Runs a query definition against a loaded dataset, producing a
//! deterministic result table.
//!
//! Execution flow (strict order):
//! 1. Bind every column reference (fails before any row is read)
//! 2. Scan the base table
//! 3. Apply inner joins in order
//! 4. Filter joined rows by every predicate
//! 5. Project, or group and aggregate
//! 6. Apply sort (if specified), ties broken by group keys ascending
//! 7. Apply limit
//! 8. Return the result table

use std::collections::HashMap;

use serde_json::Value;

use crate::catalog::{AggregateSpec, CatalogEntry, OutputColumn, QueryDefinition, Selection};
use crate::dataset::{Dataset, Table};

use super::aggregate::Accumulator;
use super::binder::{Binder, BoundColumn};
use super::errors::{QueryError, QueryResult};
use super::filters::PredicateFilter;
use super::join::{apply_joins, base_rows, JoinedRow};
use super::result::ExecutionResult;
use super::sorter::ResultSorter;

/// Name given to results of anonymous definitions
pub const ANONYMOUS_RESULT: &str = "result";

/// Query executor over one immutable dataset
pub struct QueryExecutor<'a> {
    dataset: &'a Dataset,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new executor
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Executes a definition and returns its result table.
    ///
    /// Same definition + same dataset = same table.
    pub fn execute(&self, definition: &QueryDefinition) -> QueryResult<Table> {
        self.execute_with_stats(ANONYMOUS_RESULT, definition)
            .map(ExecutionResult::into_table)
    }

    /// Executes a catalog entry; the result table carries the entry's label
    pub fn execute_entry(&self, entry: &CatalogEntry) -> QueryResult<Table> {
        self.execute_with_stats(entry.label(), entry.definition())
            .map(ExecutionResult::into_table)
    }

    /// Executes a definition, keeping row counts from each stage
    pub fn execute_with_stats(
        &self,
        name: &str,
        definition: &QueryDefinition,
    ) -> QueryResult<ExecutionResult> {
        // Step 1: Bind
        let binder = Binder::new(definition, self.dataset)?;
        let predicates = definition
            .predicates
            .iter()
            .map(|p| binder.bind(&p.column).map(|column| (column, &p.op)))
            .collect::<QueryResult<Vec<_>>>()?;
        let plan = OutputPlan::bind(&binder, &definition.select)?;

        // Steps 2-3: Scan and join
        let rows = apply_joins(&binder, &definition.joins, base_rows(&binder))?;
        let scanned_count = rows.len();

        // Step 4: Filter
        let tables = binder.tables();
        let matched: Vec<JoinedRow> = rows
            .into_iter()
            .filter(|row| {
                predicates
                    .iter()
                    .all(|(column, op)| PredicateFilter::matches(column.value(tables, row), op))
            })
            .collect();
        let matched_count = matched.len();

        // Step 5: Project or aggregate
        let mut output: Vec<Vec<Value>> = match &plan {
            OutputPlan::Projection(columns) => matched
                .iter()
                .map(|row| columns.iter().map(|c| c.value(tables, row).clone()).collect())
                .collect(),
            OutputPlan::Aggregate { keys, aggregates } => {
                aggregate_rows(tables, &matched, keys, aggregates)?
            }
        };

        // Step 6: Sort
        let names = definition.select.output_names();
        if let Some(sort) = &definition.sort {
            let column = names
                .iter()
                .position(|n| *n == sort.alias)
                .ok_or_else(|| {
                    QueryError::invalid_definition(format!(
                        "Sort column '{}' is not an output column",
                        sort.alias
                    ))
                })?;
            let tie_break: Vec<usize> = (0..plan.key_count()).collect();
            ResultSorter::sort(&mut output, column, sort.direction, &tie_break);
        }

        // Step 7: Limit
        let mut limit_applied = false;
        if let Some(limit) = definition.limit {
            limit_applied = output.len() > limit;
            output.truncate(limit);
        }

        // Step 8: Result
        Ok(ExecutionResult {
            table: Table::with_rows(name, names, output),
            scanned_count,
            matched_count,
            limit_applied,
        })
    }
}

/// Bound form of a selection
enum OutputPlan<'s> {
    Projection(Vec<BoundColumn>),
    Aggregate {
        keys: Vec<BoundColumn>,
        aggregates: Vec<(&'s AggregateSpec, Option<BoundColumn>)>,
    },
}

impl<'s> OutputPlan<'s> {
    fn bind(binder: &Binder<'_>, select: &'s Selection) -> QueryResult<Self> {
        let bind_all = |columns: &[OutputColumn]| {
            columns
                .iter()
                .map(|c| binder.bind(&c.source))
                .collect::<QueryResult<Vec<_>>>()
        };

        match select {
            Selection::Projection(columns) => Ok(OutputPlan::Projection(bind_all(columns)?)),
            Selection::Aggregate {
                group_by,
                aggregates,
            } => {
                let keys = bind_all(group_by)?;
                let aggregates = aggregates
                    .iter()
                    .map(|spec| {
                        spec.function
                            .column()
                            .map(|c| binder.bind(c))
                            .transpose()
                            .map(|column| (spec, column))
                    })
                    .collect::<QueryResult<Vec<_>>>()?;
                Ok(OutputPlan::Aggregate { keys, aggregates })
            }
        }
    }

    /// Number of leading group-key columns in the output
    fn key_count(&self) -> usize {
        match self {
            OutputPlan::Projection(_) => 0,
            OutputPlan::Aggregate { keys, .. } => keys.len(),
        }
    }
}

/// Groups rows by key, in first-appearance order, and folds each aggregate.
///
/// No input rows means no groups, even without group keys.
fn aggregate_rows(
    tables: &[&Table],
    rows: &[JoinedRow],
    keys: &[BoundColumn],
    aggregates: &[(&AggregateSpec, Option<BoundColumn>)],
) -> QueryResult<Vec<Vec<Value>>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Vec<Value>, Vec<Accumulator>)> = Vec::new();

    for row in rows {
        let key: Vec<Value> = keys.iter().map(|k| k.value(tables, row).clone()).collect();
        let fingerprint = Value::Array(key.clone()).to_string();

        let position = *positions.entry(fingerprint).or_insert_with(|| {
            let fresh = aggregates
                .iter()
                .map(|(spec, _)| Accumulator::new(&spec.function))
                .collect();
            groups.push((key, fresh));
            groups.len() - 1
        });

        let accumulators = &mut groups[position].1;
        for ((spec, column), acc) in aggregates.iter().zip(accumulators.iter_mut()) {
            let value = column.map(|c| c.value(tables, row));
            let name = spec.function.column().map_or("", |c| c.column.as_str());
            acc.update(value, name)?;
        }
    }

    let total = rows.len() as u64;
    Ok(groups
        .into_iter()
        .map(|(mut key, accumulators)| {
            key.extend(accumulators.into_iter().map(|acc| acc.finish(total)));
            key
        })
        .collect())
}
