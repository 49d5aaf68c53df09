//! feedline - Food donation analytics over flat-file datasets
//!
//! Loads providers, receivers, food listings, and claims once per session
//! and answers a fixed catalog of analytical queries over them.

pub mod catalog;
pub mod cli;
pub mod dataset;
pub mod executor;
pub mod observability;
