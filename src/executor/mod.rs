//! Query Executor subsystem for feedline
//!
//! The executor interprets query definitions against a loaded dataset.
//! Every catalog entry runs through the same path; there is no per-query
//! code.
//!
//! # Execution Flow (strict order)
//!
//! 1. Bind every column reference
//! 2. Scan the base table
//! 3. Apply inner joins in order
//! 4. Filter joined rows by every predicate
//! 5. Project, or group and aggregate
//! 6. Apply sort (if specified)
//! 7. Apply limit
//! 8. Return the result table
//!
//! # Guarantees
//!
//! - Deterministic output for a given dataset and definition
//! - The dataset is never mutated
//! - A failed query leaves the session usable

mod aggregate;
mod binder;
mod errors;
mod executor;
mod filters;
mod join;
mod result;
mod sorter;

pub use aggregate::round2;
pub use errors::{QueryError, QueryErrorCode, QueryResult};
pub use executor::{QueryExecutor, ANONYMOUS_RESULT};
pub use filters::PredicateFilter;
pub use result::ExecutionResult;
pub use sorter::ResultSorter;
