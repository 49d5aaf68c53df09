//! Result sorting for query execution
//!
//! Sorts output rows by one column, then by the tie-break columns
//! ascending. The sort is stable, so rows equal on every key keep their
//! first-appearance order.

use std::cmp::Ordering;

use serde_json::Value;

use crate::catalog::SortDirection;

/// Sorts output rows
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts `rows` by `column` in `direction`, breaking ties on `tie_break`
    /// columns in ascending order.
    pub fn sort(
        rows: &mut [Vec<Value>],
        column: usize,
        direction: SortDirection,
        tie_break: &[usize],
    ) {
        rows.sort_by(|a, b| {
            let primary = Self::compare_values(&a[column], &b[column]);
            let primary = match direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };

            tie_break.iter().fold(primary, |ordering, &i| {
                ordering.then_with(|| Self::compare_values(&a[i], &b[i]))
            })
        });
    }

    /// Compares two JSON values for sorting.
    ///
    /// Ordering rules:
    /// - null < bool < number < string
    /// - For same types, natural ordering
    pub fn compare_values(a: &Value, b: &Value) -> Ordering {
        let type_order = |v: &Value| -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Number(_) => 2,
                Value::String(_) => 3,
                Value::Array(_) => 4,
                Value::Object(_) => 5,
            }
        };

        let a_type = type_order(a);
        let b_type = type_order(b);
        if a_type != b_type {
            return a_type.cmp(&b_type);
        }

        match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
                (Some(xi), Some(yi)) => xi.cmp(&yi),
                _ => {
                    let xf = x.as_f64().unwrap_or(0.0);
                    let yf = y.as_f64().unwrap_or(0.0);
                    xf.partial_cmp(&yf).unwrap_or(Ordering::Equal)
                }
            },
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Vec<Value>> {
        vec![
            vec![json!("Chicago"), json!(2)],
            vec![json!("Austin"), json!(1)],
            vec![json!("Boston"), json!(2)],
        ]
    }

    #[test]
    fn test_sort_descending_with_tie_break() {
        let mut rows = rows();
        ResultSorter::sort(&mut rows, 1, SortDirection::Desc, &[0]);

        assert_eq!(rows[0][0], json!("Boston"));
        assert_eq!(rows[1][0], json!("Chicago"));
        assert_eq!(rows[2][0], json!("Austin"));
    }

    #[test]
    fn test_sort_ascending() {
        let mut rows = rows();
        ResultSorter::sort(&mut rows, 1, SortDirection::Asc, &[0]);

        assert_eq!(rows[0][0], json!("Austin"));
        assert_eq!(rows[1][0], json!("Boston"));
    }

    #[test]
    fn test_sort_stable_without_tie_break() {
        let mut rows = rows();
        ResultSorter::sort(&mut rows, 1, SortDirection::Desc, &[]);

        // Chicago appeared before Boston
        assert_eq!(rows[0][0], json!("Chicago"));
        assert_eq!(rows[1][0], json!("Boston"));
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(ResultSorter::compare_values(&Value::Null, &json!(0)), Ordering::Less);
        assert_eq!(ResultSorter::compare_values(&json!(1), &json!("1")), Ordering::Less);
    }

    #[test]
    fn test_mixed_numbers() {
        assert_eq!(ResultSorter::compare_values(&json!(2), &json!(1.5)), Ordering::Greater);
        assert_eq!(ResultSorter::compare_values(&json!(10), &json!(10)), Ordering::Equal);
    }
}
