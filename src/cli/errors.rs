//! CLI error types
//!
//! Wraps the domain errors and adds the failures only the command layer
//! can hit: configuration, selectors, and output I/O.

use thiserror::Error;

use crate::dataset::{DatasetError, UnknownTableError};
use crate::executor::QueryError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file unreadable or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Selector matched no catalog entry
    #[error("Unknown query '{0}'")]
    UnknownQuery(String),

    /// Table name matched none of the four tables
    #[error("{0}")]
    UnknownTable(#[from] UnknownTableError),

    /// Dataset could not be loaded
    #[error("{0}")]
    Dataset(#[from] DatasetError),

    /// Query failed
    #[error("{0}")]
    Query(#[from] QueryError),

    /// stdout write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "FEED_CLI_CONFIG_ERROR",
            CliError::UnknownQuery(_) => "FEED_CLI_UNKNOWN_QUERY",
            CliError::UnknownTable(_) => "FEED_CLI_UNKNOWN_TABLE",
            CliError::Dataset(e) => e.code().code(),
            CliError::Query(e) => e.code().code(),
            CliError::Io(_) => "FEED_CLI_IO_ERROR",
            CliError::Json(_) => "FEED_CLI_IO_ERROR",
        }
    }

    /// Message without the code prefix, for JSON responses
    pub fn message(&self) -> String {
        match self {
            CliError::Dataset(e) => e.message().to_string(),
            CliError::Query(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TableName;

    #[test]
    fn test_codes() {
        assert_eq!(CliError::Config("x".into()).code(), "FEED_CLI_CONFIG_ERROR");
        assert_eq!(CliError::UnknownQuery("x".into()).code(), "FEED_CLI_UNKNOWN_QUERY");

        let err: CliError = QueryError::unknown_column("claims", "weight").into();
        assert_eq!(err.code(), "FEED_QUERY_UNKNOWN_COLUMN");
        assert!(err.message().contains("weight"));
        assert!(!err.message().contains("FEED_QUERY"));
    }

    #[test]
    fn test_unknown_table_conversion() {
        let parse_err = "donors".parse::<TableName>().unwrap_err();
        let err: CliError = parse_err.into();
        assert_eq!(err.code(), "FEED_CLI_UNKNOWN_TABLE");
        assert!(err.to_string().contains("donors"));
    }
}
