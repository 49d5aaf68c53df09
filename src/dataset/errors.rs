//! Dataset error types
//!
//! Error codes:
//! - FEED_DATA_UNAVAILABLE (FATAL)
//!
//! Every way a source can fail to produce the four tables collapses into
//! one code. The message names the file and, when known, the record.

use std::fmt;
use std::path::Path;

use crate::observability::Severity;

/// Dataset error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetErrorCode {
    /// Source missing, unreadable, or malformed
    FeedDataUnavailable,
}

impl DatasetErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DatasetErrorCode::FeedDataUnavailable => "FEED_DATA_UNAVAILABLE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for DatasetErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Dataset error with full context
#[derive(Debug, Clone)]
pub struct DatasetError {
    code: DatasetErrorCode,
    message: String,
    /// 1-based line in the source file, if the failure is tied to a record
    line: Option<u64>,
}

impl DatasetError {
    fn unavailable(message: String, line: Option<u64>) -> Self {
        Self {
            code: DatasetErrorCode::FeedDataUnavailable,
            message,
            line,
        }
    }

    /// Source file does not exist
    pub fn missing_source(path: &Path) -> Self {
        Self::unavailable(format!("Source file not found: {}", path.display()), None)
    }

    /// Source file exists but could not be read
    pub fn unreadable(path: &Path, reason: impl fmt::Display) -> Self {
        Self::unavailable(
            format!("Failed to read {}: {}", path.display(), reason),
            None,
        )
    }

    /// Header row missing or lacking a required column
    pub fn malformed_header(path: &Path, reason: impl Into<String>) -> Self {
        Self::unavailable(
            format!("Malformed header in {}: {}", path.display(), reason.into()),
            None,
        )
    }

    /// A record failed to parse or validate
    pub fn malformed_record(path: &Path, line: u64, reason: impl Into<String>) -> Self {
        Self::unavailable(
            format!(
                "Malformed record in {} at line {}: {}",
                path.display(),
                line,
                reason.into()
            ),
            Some(line),
        )
    }

    /// Two records share an identity
    pub fn duplicate_identity(path: &Path, line: u64, column: &str, id: i64) -> Self {
        Self::unavailable(
            format!(
                "Duplicate {} {} in {} at line {}",
                column,
                id,
                path.display(),
                line
            ),
            Some(line),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> DatasetErrorCode {
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

    /// Returns the offending line if applicable
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Dataset errors always end the session
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for DatasetError {
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

impl std::error::Error for DatasetError {}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
