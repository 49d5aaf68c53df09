//! Query Catalog subsystem for feedline
//!
//! Each catalog entry is a typed definition, not query text:
//!
//! - base table and inner-join path
//! - filters
//! - group keys and aggregates, or a plain projection
//! - sort (ties broken by group keys ascending) and limit
//!
//! The catalog is built once and never mutated.

mod ast;
mod catalog;

pub use ast::{
    AggregateFunction, AggregateSpec, ColumnRef, FilterOp, Join, OutputColumn, Predicate,
    QueryDefinition, Selection, SortDirection, SortSpec,
};
pub use catalog::{CatalogEntry, QueryCatalog};
