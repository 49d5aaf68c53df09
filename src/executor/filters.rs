//! Predicate filtering for query execution
//!
//! Missing or null values never match. Numbers compare numerically
//! (integer and float alike), strings lexicographically, and nothing is
//! coerced across kinds.

use std::cmp::Ordering;

use serde_json::Value;

use crate::catalog::FilterOp;

/// Evaluates predicates against cell values
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks a single value against a filter operation
    pub fn matches(value: &Value, op: &FilterOp) -> bool {
        if value.is_null() {
            return false;
        }

        match op {
            FilterOp::Eq(expected) => Self::compare(value, expected) == Some(Ordering::Equal),
            FilterOp::Gte(bound) => matches!(
                Self::compare(value, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Gt(bound) => Self::compare(value, bound) == Some(Ordering::Greater),
            FilterOp::Lte(bound) => matches!(
                Self::compare(value, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Lt(bound) => Self::compare(value, bound) == Some(Ordering::Less),
        }
    }

    /// Orders two values of the same kind; `None` across kinds
    fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
        match (actual, expected) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                    return Some(ai.cmp(&bi));
                }
                a.as_f64()?.partial_cmp(&b.as_f64()?)
            }
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equality_match() {
        assert!(PredicateFilter::matches(&json!("Completed"), &FilterOp::Eq(json!("Completed"))));
        assert!(!PredicateFilter::matches(&json!("Pending"), &FilterOp::Eq(json!("Completed"))));
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert!(!PredicateFilter::matches(&json!("completed"), &FilterOp::Eq(json!("Completed"))));
    }

    #[test]
    fn test_no_type_coercion() {
        assert!(!PredicateFilter::matches(&json!(123), &FilterOp::Eq(json!("123"))));
        assert!(PredicateFilter::matches(&json!(123), &FilterOp::Eq(json!(123))));
    }

    #[test]
    fn test_int_and_float_compare_numerically() {
        assert!(PredicateFilter::matches(&json!(10), &FilterOp::Eq(json!(10.0))));
        assert!(PredicateFilter::matches(&json!(2.5), &FilterOp::Gt(json!(2))));
    }

    #[test]
    fn test_range_predicates() {
        let value = json!(25);
        assert!(PredicateFilter::matches(&value, &FilterOp::Gte(json!(18))));
        assert!(PredicateFilter::matches(&value, &FilterOp::Lte(json!(30))));
        assert!(!PredicateFilter::matches(&value, &FilterOp::Gt(json!(25))));
        assert!(!PredicateFilter::matches(&value, &FilterOp::Lt(json!(25))));
    }

    #[test]
    fn test_string_range() {
        let op = FilterOp::Gte(json!("2024-03-01"));
        assert!(PredicateFilter::matches(&json!("2024-03-10"), &op));
    }

    #[test]
    fn test_null_value_no_match() {
        assert!(!PredicateFilter::matches(&Value::Null, &FilterOp::Eq(Value::Null)));
        assert!(!PredicateFilter::matches(&Value::Null, &FilterOp::Eq(json!("Alice"))));
    }
}
