//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` with elapsed time on `complete()`
//! - Logs `{name}_FAILED` on `fail()`
//! - Logs `{name}_INCOMPLETE` if dropped without either

use std::time::Instant;

use tracing::{error, info, warn};

/// A scope that automatically logs begin and complete events
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::new("DATASET_READ", "providers");
/// // ... do work ...
/// scope.complete(); // logs DATASET_READ_COMPLETE
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    subject: String,
    timer: Timer,
    completed: bool,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    ///
    /// Logs `{name}_BEGIN` immediately.
    pub fn new(name: &'a str, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        info!(event = %format!("{}_BEGIN", name), subject = %subject);

        Self {
            name,
            subject,
            timer: Timer::new(),
            completed: false,
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(mut self) {
        self.completed = true;
        info!(
            event = %format!("{}_COMPLETE", self.name),
            subject = %self.subject,
            elapsed_ms = self.timer.elapsed_ms(),
        );
    }

    /// Mark the scope as completed, attaching a row count
    pub fn complete_with_rows(mut self, rows: usize) {
        self.completed = true;
        info!(
            event = %format!("{}_COMPLETE", self.name),
            subject = %self.subject,
            rows,
            elapsed_ms = self.timer.elapsed_ms(),
        );
    }

    /// Mark the scope as failed with a reason
    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        error!(
            event = %format!("{}_FAILED", self.name),
            subject = %self.subject,
            reason,
            elapsed_ms = self.timer.elapsed_ms(),
        );
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            warn!(
                event = %format!("{}_INCOMPLETE", self.name),
                subject = %self.subject,
                reason = "scope dropped without completion",
            );
        }
    }
}

/// A simple duration timer for logging elapsed time
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds since construction
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_creation() {
        let scope = ObservationScope::new("TEST", "subject");
        assert!(!scope.is_completed());
        scope.complete();
    }

    #[test]
    fn test_scope_complete_with_rows() {
        let scope = ObservationScope::new("TEST", "subject");
        scope.complete_with_rows(42);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST", "subject");
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        // Logs a warning, never panics
        let scope = ObservationScope::new("TEST", "subject");
        drop(scope);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 10);
    }
}
