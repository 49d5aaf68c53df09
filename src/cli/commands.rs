//! CLI command implementations
//!
//! Every command builds one session over the configured source. Commands
//! that need data load it once through the session; `queries` never
//! touches the files.
//!
//! A dataset failure ends the command. A query failure ends `run`, but
//! `run-all` reports it inline and moves on to the next entry.

use std::io::Write;

use serde::Serialize;

use crate::catalog::{CatalogEntry, QueryCatalog};
use crate::dataset::{DatasetSource, Session, Table, TableName};
use crate::executor::QueryExecutor;
use crate::observability::{init_logging, log_event, log_failure, Event};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{stdout, write_error, write_response};

/// One catalog line of `queries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryListing {
    pub position: usize,
    pub label: &'static str,
}

/// Result of `run`
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub position: usize,
    pub label: &'static str,
    pub table: Table,
}

/// Per-entry result of `run-all`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Ok {
        position: usize,
        label: &'static str,
        table: Table,
    },
    Error {
        position: usize,
        label: &'static str,
        code: &'static str,
        message: String,
    },
}

impl EntryOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, EntryOutcome::Ok { .. })
    }
}

/// Entry point: parse arguments, run, and report failures as JSON
pub fn run() -> CliResult<()> {
    init_logging();
    let cli = Cli::parse_args();

    let mut out = stdout();
    let result = run_command(&cli, &mut out);
    if let Err(e) = &result {
        write_error(&mut out, e.code(), &e.message())?;
    }
    result
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    let config = Config::resolve(cli.config.as_deref())?;
    log_event(
        Event::ConfigLoaded,
        &cli.config
            .as_ref()
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
    );

    let mut session = Session::new(config.csv_source(cli.data_dir.as_deref())?);

    match &cli.command {
        Command::Summary => summary(&mut session, out),
        Command::Queries { database } => list_queries(&catalog_for(*database), out),
        Command::Run { selector, database } => {
            run_query(&mut session, &catalog_for(*database), selector, out)
        }
        Command::RunAll { database } => run_all(&mut session, &catalog_for(*database), out),
        Command::Show { table } => show(&mut session, table, out),
    }
}

/// The full catalog, or the database subset
pub fn catalog_for(database: bool) -> QueryCatalog {
    if database {
        QueryCatalog::database_subset()
    } else {
        QueryCatalog::canonical()
    }
}

/// Writes the four row counts
pub fn summary<S: DatasetSource, W: Write>(
    session: &mut Session<S>,
    out: &mut W,
) -> CliResult<()> {
    let dataset = session.load()?;
    write_response(out, &dataset.summary())
}

/// Writes catalog labels with their 1-based positions
pub fn list_queries<W: Write>(catalog: &QueryCatalog, out: &mut W) -> CliResult<()> {
    let listing: Vec<QueryListing> = catalog
        .labels()
        .enumerate()
        .map(|(i, label)| QueryListing {
            position: i + 1,
            label,
        })
        .collect();
    write_response(out, &listing)
}

/// Runs one entry selected by label or position
pub fn run_query<S: DatasetSource, W: Write>(
    session: &mut Session<S>,
    catalog: &QueryCatalog,
    selector: &str,
    out: &mut W,
) -> CliResult<()> {
    let (position, entry) = catalog
        .resolve(selector)
        .ok_or_else(|| CliError::UnknownQuery(selector.trim().to_string()))?;

    let dataset = session.load()?;
    let executor = QueryExecutor::new(dataset);
    let table = execute_logged(&executor, entry)?;

    write_response(
        out,
        &QueryOutput {
            position,
            label: entry.label(),
            table,
        },
    )
}

/// Runs every entry in catalog order, isolating query failures
pub fn run_all<S: DatasetSource, W: Write>(
    session: &mut Session<S>,
    catalog: &QueryCatalog,
    out: &mut W,
) -> CliResult<()> {
    let dataset = session.load()?;
    let executor = QueryExecutor::new(dataset);

    let outcomes: Vec<EntryOutcome> = catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let position = i + 1;
            let label = entry.label();
            match execute_logged(&executor, entry) {
                Ok(table) => EntryOutcome::Ok {
                    position,
                    label,
                    table,
                },
                Err(e) => EntryOutcome::Error {
                    position,
                    label,
                    code: e.code().code(),
                    message: e.message().to_string(),
                },
            }
        })
        .collect();

    write_response(out, &outcomes)
}

/// Dumps one raw table
pub fn show<S: DatasetSource, W: Write>(
    session: &mut Session<S>,
    table: &str,
    out: &mut W,
) -> CliResult<()> {
    let name: TableName = table.parse()?;
    let dataset = session.load()?;
    log_event(Event::TableViewed, name.as_str());
    write_response(out, dataset.table(name))
}

fn execute_logged(
    executor: &QueryExecutor<'_>,
    entry: &CatalogEntry,
) -> Result<Table, crate::executor::QueryError> {
    log_event(Event::QueryReceived, entry.label());
    match executor.execute_entry(entry) {
        Ok(table) => {
            log_event(Event::QueryExecuted, entry.label());
            Ok(table)
        }
        Err(e) => {
            log_failure(Event::QueryRejected, entry.label(), e.message());
            Err(e)
        }
    }
}
