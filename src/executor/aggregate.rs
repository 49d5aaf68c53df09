//! Aggregate accumulators
//!
//! One accumulator per (group, aggregate). Nulls are skipped by every
//! column aggregate; `Count` and `Percentage` count rows.

use serde_json::Value;

use crate::catalog::AggregateFunction;

use super::errors::{QueryError, QueryResult};

/// Rounds half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running state of one aggregate within one group
#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    Count(u64),
    CountOf(u64),
    Sum(NumericSum),
    Avg { sum: f64, count: u64 },
    Percentage(u64),
}

/// Sum that stays an exact integer until a float (or overflow) appears
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericSum {
    Empty,
    Int(i64),
    Float(f64),
}

impl NumericSum {
    fn add(self, n: &serde_json::Number) -> Self {
        match (self, n.as_i64()) {
            (NumericSum::Empty, Some(i)) => NumericSum::Int(i),
            (NumericSum::Int(acc), Some(i)) => match acc.checked_add(i) {
                Some(total) => NumericSum::Int(total),
                None => NumericSum::Float(acc as f64 + i as f64),
            },
            (current, _) => {
                let f = n.as_f64().unwrap_or(0.0);
                match current {
                    NumericSum::Empty => NumericSum::Float(f),
                    NumericSum::Int(acc) => NumericSum::Float(acc as f64 + f),
                    NumericSum::Float(acc) => NumericSum::Float(acc + f),
                }
            }
        }
    }

    fn into_value(self) -> Value {
        match self {
            NumericSum::Empty => Value::Null,
            NumericSum::Int(i) => Value::from(i),
            NumericSum::Float(f) => Value::from(f),
        }
    }
}

impl Accumulator {
    /// Fresh state for `function`
    pub fn new(function: &AggregateFunction) -> Self {
        match function {
            AggregateFunction::Count => Accumulator::Count(0),
            AggregateFunction::CountOf(_) => Accumulator::CountOf(0),
            AggregateFunction::Sum(_) => Accumulator::Sum(NumericSum::Empty),
            AggregateFunction::Avg(_) => Accumulator::Avg { sum: 0.0, count: 0 },
            AggregateFunction::Percentage => Accumulator::Percentage(0),
        }
    }

    /// Folds one row in. `value` is the aggregate's column value, if it has one.
    pub fn update(&mut self, value: Option<&Value>, column: &str) -> QueryResult<()> {
        match self {
            Accumulator::Count(n) | Accumulator::Percentage(n) => *n += 1,
            Accumulator::CountOf(n) => {
                if value.is_some_and(|v| !v.is_null()) {
                    *n += 1;
                }
            }
            Accumulator::Sum(sum) => {
                if let Some(n) = numeric(value, column)? {
                    *sum = sum.add(n);
                }
            }
            Accumulator::Avg { sum, count } => {
                if let Some(n) = numeric(value, column)? {
                    *sum += n.as_f64().unwrap_or(0.0);
                    *count += 1;
                }
            }
        }
        Ok(())
    }

    /// Final cell value. `total_rows` is the input row count across all groups.
    pub fn finish(self, total_rows: u64) -> Value {
        match self {
            Accumulator::Count(n) | Accumulator::CountOf(n) => Value::from(n),
            Accumulator::Sum(sum) => sum.into_value(),
            Accumulator::Avg { count: 0, .. } => Value::Null,
            Accumulator::Avg { sum, count } => Value::from(round2(sum / count as f64)),
            Accumulator::Percentage(_) if total_rows == 0 => Value::Null,
            Accumulator::Percentage(n) => {
                Value::from(round2(n as f64 * 100.0 / total_rows as f64))
            }
        }
    }
}

/// Numeric view of a cell: `None` for null, error for anything non-numeric
fn numeric<'v>(
    value: Option<&'v Value>,
    column: &str,
) -> QueryResult<Option<&'v serde_json::Number>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n)),
        Some(other) => Err(QueryError::type_mismatch(format!(
            "Column '{}' holds non-numeric value {}",
            column, other
        ))),
    }
}
