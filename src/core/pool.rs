//! Reusable entry buffers
//!
//! Dispatch borrows a [`LogEntry`] from an [`EntryPool`] and gives it back
//! when the returned [`PooledEntry`] guard drops, whatever path the dispatch
//! takes out (success, handler error, panic).

use super::log_entry::LogEntry;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Default number of idle entries kept for reuse.
pub const DEFAULT_POOL_CAPACITY: usize = 32;

/// Bounded free list of entries.
#[derive(Debug)]
pub struct EntryPool {
    free: Mutex<Vec<LogEntry>>,
    capacity: usize,
}

impl EntryPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Take an entry, reusing an idle one if available.
    pub fn acquire(&self) -> PooledEntry<'_> {
        let entry = self.free.lock().pop().unwrap_or_default();
        PooledEntry { pool: self, entry }
    }

    /// Number of idle entries.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn release(&self, mut entry: LogEntry) {
        entry.reset();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(entry);
        }
    }
}

impl Default for EntryPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

/// An entry on loan from an [`EntryPool`]. Returned to the pool on drop.
pub struct PooledEntry<'a> {
    pool: &'a EntryPool,
    entry: LogEntry,
}

impl Deref for PooledEntry<'_> {
    type Target = LogEntry;

    fn deref(&self) -> &LogEntry {
        &self.entry
    }
}

impl DerefMut for PooledEntry<'_> {
    fn deref_mut(&mut self) -> &mut LogEntry {
        &mut self.entry
    }
}

impl Drop for PooledEntry<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.entry));
    }
}
