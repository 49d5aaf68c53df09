//! CLI module for feedline
//!
//! Provides command-line interface for:
//! - summary: Row counts of the loaded dataset
//! - queries: List catalog entries
//! - run: Run one catalog entry
//! - run-all: Run every catalog entry
//! - show: Dump one raw table

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    catalog_for, list_queries, run, run_all, run_command, run_query, show, summary, EntryOutcome,
    QueryListing, QueryOutput,
};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{error_envelope, ok_envelope, write_error, write_response};
