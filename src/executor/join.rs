//! Inner joins over the join path
//!
//! A joined row is one row index per slot. Each join hashes the right
//! table on its key column, then extends every surviving row with each
//! match. Rows without a match are dropped; null keys never match.

use std::collections::HashMap;

use serde_json::Value;

use crate::catalog::Join;

use super::binder::{Binder, BoundColumn};
use super::errors::{QueryError, QueryResult};

/// Row indices into each slot's table
pub type JoinedRow = Vec<usize>;

/// Hashable join key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum JoinKey {
    Int(i64),
    Text(String),
}

impl JoinKey {
    /// `None` for null; error for values that cannot be join keys
    fn from_value(value: &Value, column: &str) -> QueryResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(JoinKey::Text(s.clone()))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Some(JoinKey::Int(i))),
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Ok(Some(JoinKey::Int(f as i64))),
                    _ => Err(QueryError::type_mismatch(format!(
                        "Join key '{}' holds non-integer number {}",
                        column, n
                    ))),
                },
            },
            other => Err(QueryError::type_mismatch(format!(
                "Join key '{}' holds unsupported value {}",
                column, other
            ))),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            JoinKey::Int(_) => "integer",
            JoinKey::Text(_) => "text",
        }
    }
}

/// Every row of the base table, unjoined
pub fn base_rows(binder: &Binder<'_>) -> Vec<JoinedRow> {
    (0..binder.tables()[0].len()).map(|i| vec![i]).collect()
}

/// Applies each join in order
pub fn apply_joins(
    binder: &Binder<'_>,
    joins: &[Join],
    mut rows: Vec<JoinedRow>,
) -> QueryResult<Vec<JoinedRow>> {
    for (offset, join) in joins.iter().enumerate() {
        let slot = offset + 1;
        let left = binder.bind(&join.left)?;
        if left.slot >= slot {
            return Err(QueryError::invalid_definition(format!(
                "Join on '{}' references a table joined later",
                join.left
            )));
        }
        let right = binder.bind_in_slot(slot, &join.right_column)?;

        rows = join_one(binder, left, right, &join.left.column, rows)?;
    }
    Ok(rows)
}

fn join_one(
    binder: &Binder<'_>,
    left: BoundColumn,
    right: BoundColumn,
    column: &str,
    rows: Vec<JoinedRow>,
) -> QueryResult<Vec<JoinedRow>> {
    let right_table = binder.tables()[right.slot];

    let mut index: HashMap<JoinKey, Vec<usize>> = HashMap::new();
    let mut right_kind = None;
    for (i, row) in right_table.rows().iter().enumerate() {
        if let Some(key) = JoinKey::from_value(&row[right.index], column)? {
            check_kind(&mut right_kind, &key, column)?;
            index.entry(key).or_default().push(i);
        }
    }

    let mut joined = Vec::with_capacity(rows.len());
    for row in rows {
        let key = match JoinKey::from_value(left.value(binder.tables(), &row), column)? {
            Some(key) => key,
            None => continue,
        };
        if let Some(kind) = right_kind {
            if kind != key.kind() {
                return Err(QueryError::type_mismatch(format!(
                    "Join on '{}' compares {} with {}",
                    column,
                    key.kind(),
                    kind
                )));
            }
        }
        if let Some(matches) = index.get(&key) {
            for &m in matches {
                let mut extended = row.clone();
                extended.push(m);
                joined.push(extended);
            }
        }
    }

    Ok(joined)
}

fn check_kind(seen: &mut Option<&'static str>, key: &JoinKey, column: &str) -> QueryResult<()> {
    match *seen {
        Some(kind) if kind != key.kind() => Err(QueryError::type_mismatch(format!(
            "Join column '{}' mixes {} and {} keys",
            column,
            kind,
            key.kind()
        ))),
        Some(_) => Ok(()),
        None => {
            *seen = Some(key.kind());
            Ok(())
        }
    }
}
