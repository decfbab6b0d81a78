//! Logger metrics for observability
//!
//! Counters describing what happened to entries that passed the logger's
//! minimum level. Entries rejected by the level check are not counted; that
//! path is kept to a single comparison.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use logg_core::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_handler_error();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.handler_errors(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries finalized and handed to the handler
    dispatched: AtomicU64,

    /// Handler calls that failed with a real error
    handler_errors: AtomicU64,

    /// Handler calls that returned the stop sentinel
    stopped: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            handler_errors: AtomicU64::new(0),
            stopped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_errors(&self) -> u64 {
        self.handler_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stopped(&self) -> u64 {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Record a dispatched entry. Returns the previous count.
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a handler failure. Returns the previous count.
    #[inline]
    pub fn record_handler_error(&self) -> u64 {
        self.handler_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_stopped(&self) -> u64 {
        self.stopped.fetch_add(1, Ordering::Relaxed)
    }

    /// Get handler error rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been dispatched.
    pub fn error_rate(&self) -> f64 {
        let dispatched = self.dispatched() as f64;
        if dispatched == 0.0 {
            0.0
        } else {
            (self.handler_errors() as f64 / dispatched) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.handler_errors.store(0, Ordering::Relaxed);
        self.stopped.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            handler_errors: AtomicU64::new(self.handler_errors()),
            stopped: AtomicU64::new(self.stopped()),
        }
    }
}
