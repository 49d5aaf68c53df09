//! CLI argument definitions using clap
//!
//! Commands:
//! - feedline summary
//! - feedline queries [--database]
//! - feedline run <selector> [--database]
//! - feedline run-all [--database]
//! - feedline show <table>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// feedline - Food donation analytics over flat-file datasets
#[derive(Parser, Debug)]
#[command(name = "feedline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the four data files (overrides the config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show row counts of the loaded dataset
    Summary,

    /// List the available queries
    Queries {
        /// Use the seven-query database catalog
        #[arg(long)]
        database: bool,
    },

    /// Run one query by label or 1-based position
    Run {
        /// Query label (case-insensitive) or position
        selector: String,

        /// Use the seven-query database catalog
        #[arg(long)]
        database: bool,
    },

    /// Run every query of the catalog in order
    RunAll {
        /// Use the seven-query database catalog
        #[arg(long)]
        database: bool,
    },

    /// Dump one raw table
    Show {
        /// providers, receivers, food_listings or claims
        table: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
