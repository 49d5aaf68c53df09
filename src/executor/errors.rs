//! Executor error types
//!
//! Error codes:
//! - FEED_QUERY_UNKNOWN_COLUMN (ERROR)
//! - FEED_QUERY_TYPE_MISMATCH (ERROR)
//! - FEED_QUERY_INVALID_DEFINITION (ERROR)
//!
//! A query error is local to one invocation: the loaded dataset is
//! untouched and the next query runs normally.

use std::fmt;

use crate::observability::Severity;

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Column not present in the referenced table
    UnknownColumn,
    /// Join key kinds differ, or a numeric aggregate saw text
    TypeMismatch,
    /// Definition is structurally unusable
    InvalidDefinition,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::UnknownColumn => "FEED_QUERY_UNKNOWN_COLUMN",
            QueryErrorCode::TypeMismatch => "FEED_QUERY_TYPE_MISMATCH",
            QueryErrorCode::InvalidDefinition => "FEED_QUERY_INVALID_DEFINITION",
        }
    }

    /// Query errors never end the session
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error with a human-readable cause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
}

impl QueryError {
    /// Column missing from a table
    pub fn unknown_column(table: impl fmt::Display, column: &str) -> Self {
        Self {
            code: QueryErrorCode::UnknownColumn,
            message: format!("Table '{}' has no column '{}'", table, column),
        }
    }

    /// Incompatible value kinds
    pub fn type_mismatch(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::TypeMismatch,
            message: reason.into(),
        }
    }

    /// Structurally unusable definition
    pub fn invalid_definition(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::InvalidDefinition,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for QueryError {}

/// Result type for executor operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(QueryErrorCode::UnknownColumn.code(), "FEED_QUERY_UNKNOWN_COLUMN");
        assert_eq!(QueryErrorCode::TypeMismatch.code(), "FEED_QUERY_TYPE_MISMATCH");
        assert_eq!(
            QueryErrorCode::InvalidDefinition.code(),
            "FEED_QUERY_INVALID_DEFINITION"
        );
    }

    #[test]
    fn test_query_error_severity() {
        let err = QueryError::unknown_column("claims", "weight");
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn test_error_display() {
        let err = QueryError::unknown_column("claims", "weight");
        let display = format!("{}", err);
        assert!(display.contains("ERROR"));
        assert!(display.contains("FEED_QUERY_UNKNOWN_COLUMN"));
        assert!(display.contains("weight"));
    }
}
