//! Append-only, fixed-capacity event log.
//!
//! One writer (the queue consumer) appends; snapshots read the whole log.
//! The `RwLock` wrapper makes that coordination explicit: appends take the
//! write lock per entry, snapshots hold the read lock for the duration of
//! serialization and therefore never observe a partially appended entry.

use std::sync::Arc;

use tokio::sync::RwLock;

use tradewire_types::{AuditEvent, Result, TwError};

use crate::xml;

/// Ordered audit store. Position order equals append order.
#[derive(Debug)]
pub struct EventLog {
    entries: Vec<AuditEvent>,
    capacity: usize,
}

impl EventLog {
    /// Create a log that will accept exactly `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event at the next free position and return that position.
    ///
    /// # Errors
    /// Returns [`TwError::LogOverflow`] once the log is full. The log never
    /// overwrites or wraps; a full log stays full.
    pub fn append(&mut self, event: AuditEvent) -> Result<usize> {
        if self.entries.len() >= self.capacity {
            return Err(TwError::LogOverflow {
                capacity: self.capacity,
            });
        }
        self.entries.push(event);
        Ok(self.entries.len() - 1)
    }

    /// The event at a given log position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&AuditEvent> {
        self.entries.get(position)
    }

    /// All entries in position order.
    #[must_use]
    pub fn entries(&self) -> &[AuditEvent] {
        &self.entries
    }

    /// Serialize the full log to the XML dump schema.
    #[must_use]
    pub fn render_xml(&self) -> String {
        xml::render_log(&self.entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The log as shared between the writer task and snapshot requests.
pub type SharedEventLog = Arc<RwLock<EventLog>>;

/// Convenience constructor for the shared form.
#[must_use]
pub fn shared(capacity: usize) -> SharedEventLog {
    Arc::new(RwLock::new(EventLog::new(capacity)))
}
