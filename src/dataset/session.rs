//! Session: one owned, load-once dataset snapshot
//!
//! Lifecycle: construct → `load()` once → read many → drop.
//!
//! - The first `load()` reads the source; later calls return the same
//!   snapshot without touching it
//! - `reload()` is the only way to re-read, and replaces the snapshot only
//!   on success
//! - Loading takes `&mut self`, so one session has at most one loader at a
//!   time; separate sessions never share a snapshot

use uuid::Uuid;

use crate::observability::{log_event, log_failure, Event};

use super::errors::DatasetResult;
use super::loader::DatasetSource;
use super::types::Dataset;

/// An explicitly owned dataset session
pub struct Session<S: DatasetSource> {
    id: Uuid,
    source: S,
    snapshot: Option<Dataset>,
}

impl<S: DatasetSource> Session<S> {
    /// Opens a session over `source`. Performs no I/O.
    pub fn new(source: S) -> Self {
        let id = Uuid::new_v4();
        log_event(Event::SessionOpened, &id.to_string());

        Self {
            id,
            source,
            snapshot: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns true once a snapshot is held
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The held snapshot, if any, without loading
    pub fn snapshot(&self) -> Option<&Dataset> {
        self.snapshot.as_ref()
    }

    /// Returns the snapshot, reading the source on first use only.
    ///
    /// A failure leaves the session unloaded; nothing partial is kept.
    pub fn load(&mut self) -> DatasetResult<&Dataset> {
        let dataset = match self.snapshot.take() {
            Some(dataset) => {
                log_event(Event::DatasetReused, &self.source.describe());
                dataset
            }
            None => self.read_source()?,
        };

        Ok(&*self.snapshot.insert(dataset))
    }

    /// Forces a re-read of the source.
    ///
    /// On failure the previous snapshot, if any, stays in place.
    pub fn reload(&mut self) -> DatasetResult<&Dataset> {
        let dataset = self.read_source()?;
        Ok(&*self.snapshot.insert(dataset))
    }

    fn read_source(&self) -> DatasetResult<Dataset> {
        let subject = self.source.describe();
        log_event(Event::DatasetLoadBegin, &subject);

        match self.source.read() {
            Ok(dataset) => {
                log_event(Event::DatasetLoaded, &subject);
                Ok(dataset)
            }
            Err(err) => {
                log_failure(Event::DatasetUnavailable, &subject, err.message());
                Err(err)
            }
        }
    }
}
