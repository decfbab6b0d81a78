//! In-memory handler
//!
//! Keeps a clone of every entry it sees, which makes it the handler of
//! choice for tests.

use crate::core::{Handler, LogEntry, Result};
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct MemoryHandler {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Take the captured entries, leaving the handler empty.
    pub fn drain(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
