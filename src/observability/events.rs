//! Observable events for feedline
//!
//! Every lifecycle step of a session (load, query, table view) emits one
//! of these. Events are explicit and typed; the string form is what lands
//! in the `event` field of the log line.

use std::fmt;

use super::Severity;

/// Observable events in feedline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration resolved (file or defaults)
    ConfigLoaded,
    /// Session constructed
    SessionOpened,

    // Dataset
    /// Source read begins
    DatasetLoadBegin,
    /// All four tables loaded
    DatasetLoaded,
    /// Snapshot reused without touching the source
    DatasetReused,
    /// Source could not produce all four tables (FATAL)
    DatasetUnavailable,

    // Query
    /// Catalog entry selected
    QueryReceived,
    /// Query evaluated successfully
    QueryExecuted,
    /// Query definition could not be evaluated
    QueryRejected,

    // Browsing
    /// Raw table dumped
    TableViewed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SessionOpened => "SESSION_OPENED",

            Event::DatasetLoadBegin => "DATASET_LOAD_BEGIN",
            Event::DatasetLoaded => "DATASET_LOAD_COMPLETE",
            Event::DatasetReused => "DATASET_REUSED",
            Event::DatasetUnavailable => "DATASET_UNAVAILABLE",

            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",

            Event::TableViewed => "TABLE_VIEWED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DatasetUnavailable => Severity::Fatal,
            Event::QueryRejected => Severity::Error,
            Event::DatasetReused => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::SessionOpened,
            Event::DatasetLoadBegin,
            Event::DatasetLoaded,
            Event::DatasetReused,
            Event::DatasetUnavailable,
            Event::QueryReceived,
            Event::QueryExecuted,
            Event::QueryRejected,
            Event::TableViewed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severities() {
        assert_eq!(Event::DatasetUnavailable.severity(), Severity::Fatal);
        assert_eq!(Event::QueryRejected.severity(), Severity::Error);
        assert_eq!(Event::DatasetLoaded.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::QueryExecuted), "QUERY_COMPLETE");
        assert_eq!(format!("{}", Event::DatasetLoadBegin), "DATASET_LOAD_BEGIN");
    }
}
