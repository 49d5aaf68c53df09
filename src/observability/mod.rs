//! Observability subsystem for feedline
//!
//! Structured logging through `tracing`:
//! - Typed lifecycle events (`Event`)
//! - Begin/complete scopes with elapsed time (`ObservationScope`)
//! - One subscriber, installed once per process, writing to stderr
//!
//! stdout is reserved for command output, so nothing here ever writes to it.
//!
//! # Usage
//!
//! ```ignore
//! use feedline::observability::{init_logging, log_event, Event, ObservationScope};
//!
//! init_logging();
//! log_event(Event::ConfigLoaded, "defaults");
//!
//! let scope = ObservationScope::new("DATASET_READ", "providers");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod scope;

pub use events::Event;
pub use scope::{ObservationScope, Timer};

use std::fmt;

use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::{fmt as subscriber_fmt, EnvFilter};

/// Severity levels shared by events and error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failed, session continues
    Error = 3,
    /// Session cannot continue
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Install the global subscriber.
///
/// Filter comes from `RUST_LOG`, falling back to `info`. A second call is a
/// no-op, so tests and embedders may call it freely.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = subscriber_fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a lifecycle event about a subject (table, query label, path)
pub fn log_event(event: Event, subject: &str) {
    let name = event.as_str();
    match event.severity() {
        Severity::Trace => trace!(event = name, subject),
        Severity::Info => info!(event = name, subject),
        Severity::Warn => warn!(event = name, subject),
        Severity::Error => error!(event = name, subject),
        Severity::Fatal => error!(event = name, subject, fatal = true),
    }
}

/// Log a lifecycle event carrying a failure reason
pub fn log_failure(event: Event, subject: &str, reason: &str) {
    let name = event.as_str();
    match event.severity() {
        Severity::Fatal => error!(event = name, subject, reason, fatal = true),
        Severity::Error => error!(event = name, subject, reason),
        _ => debug!(event = name, subject, reason),
    }
}
