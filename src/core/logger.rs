//! Main logger implementation

use super::{
    clock::{Clock, SystemClock},
    error::{LoggerError, Result},
    finalize,
    handler::Handler,
    log_context::LogContext,
    log_level::LogLevel,
    message::LogMessage,
    metrics::LoggerMetrics,
    pool::{EntryPool, DEFAULT_POOL_CAPACITY},
};
use crate::handlers::MultiHandler;
use std::fmt;
use std::sync::Arc;

/// Callback receiving handler failures in place of the stderr report.
pub type HandlerErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Configuration used to create a [`Logger`].
pub struct LoggerConfig {
    /// Minimum level to log at. Defaults to [`LogLevel::Info`].
    pub min_level: LogLevel,

    /// Where entries go. Required.
    pub handler: Option<Box<dyn Handler>>,

    /// Time source for entry timestamps. Defaults to [`SystemClock`].
    pub clock: Option<Arc<dyn Clock>>,

    /// Receives handler errors. When unset they are printed to stderr.
    pub on_handler_error: Option<HandlerErrorCallback>,

    /// Idle entries kept for reuse.
    pub pool_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            handler: None,
            clock: None,
            on_handler_error: None,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

/// Root of every log chain.
///
/// Holds the minimum level, the handler and the clock, all fixed at
/// construction. The minimum level is the single authority on whether an
/// entry is observable. A log call only starts through [`Logger::with_level`];
/// there is no implicit current level.
pub struct Logger {
    min_level: LogLevel,
    handler: Box<dyn Handler>,
    clock: Arc<dyn Clock>,
    pool: EntryPool,
    /// Metrics for observability (dispatched, handler errors, stops)
    metrics: LoggerMetrics,
    on_handler_error: Option<HandlerErrorCallback>,
}

impl Logger {
    /// Create a logger.
    ///
    /// Fails with [`LoggerError::InvalidConfiguration`] when no handler is
    /// given or the minimum level is [`LogLevel::Invalid`].
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let handler = config
            .handler
            .ok_or_else(|| LoggerError::config("Logger", "a handler is required"))?;

        if !config.min_level.is_valid() {
            return Err(LoggerError::config(
                "Logger",
                format!("log level is out of range: {}", config.min_level),
            ));
        }

        Ok(Self {
            min_level: config.min_level,
            handler,
            clock: config.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            pool: EntryPool::new(config.pool_capacity),
            metrics: LoggerMetrics::new(),
            on_handler_error: config.on_handler_error,
        })
    }

    /// Logger with default clock and pool. `min_level` must be valid.
    pub(crate) fn with_handler(min_level: LogLevel, handler: Box<dyn Handler>) -> Self {
        debug_assert!(min_level.is_valid());
        Self {
            min_level,
            handler,
            clock: Arc::new(SystemClock),
            pool: EntryPool::new(DEFAULT_POOL_CAPACITY),
            metrics: LoggerMetrics::new(),
            on_handler_error: None,
        }
    }

    /// Start a log chain at `level`.
    #[inline]
    pub fn with_level(&self, level: LogLevel) -> LogContext<'_> {
        LogContext::new(self, level)
    }

    #[inline]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether entries at `level` would be dispatched.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.handler.flush()
    }

    /// Finalize `ctx` into a pooled entry and hand it to the handler.
    ///
    /// The message is rendered here and only here. The entry goes back to
    /// the pool when this returns, whatever the handler did.
    pub(crate) fn dispatch(&self, ctx: &LogContext<'_>, message: &dyn LogMessage) {
        if ctx.level() < self.min_level {
            return;
        }

        let mut entry = self.pool.acquire();
        entry.timestamp = self.clock.now();
        entry.level = ctx.level();
        message.write_to(&mut entry.message);
        finalize::distinct_into(ctx.fields(), &mut entry.fields);

        self.metrics.record_dispatched();
        match self.handler.handle(&mut entry) {
            Ok(()) => {}
            Err(e) if e.is_stop() => {
                self.metrics.record_stopped();
            }
            Err(e) => {
                self.metrics.record_handler_error();
                self.report(&e);
            }
        }
    }

    fn report(&self, err: &LoggerError) {
        match self.on_handler_error {
            Some(ref callback) => callback(err),
            None => eprintln!(
                "[LOGGER ERROR] Handler '{}' failed: {}",
                self.handler.name(),
                err
            ),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("handler", &self.handler.name())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Builder for Logger with fluent configuration
///
/// Adding more than one handler fans entries out to all of them in order.
///
/// # Example
/// ```
/// use logg_core::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .handler(MemoryHandler::new())
///     .on_handler_error(Arc::new(|err: &LoggerError| {
///         eprintln!("ALERT: {}", err);
///     }))
///     .build()
///     .expect("handler configured");
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    handlers: Vec<Box<dyn Handler>>,
    clock: Option<Arc<dyn Clock>>,
    on_handler_error: Option<HandlerErrorCallback>,
    pool_capacity: usize,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            handlers: Vec::new(),
            clock: None,
            on_handler_error: None,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add a handler
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Set the time source
    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Set a callback for handler failures
    ///
    /// Replaces the default stderr report. The stop sentinel is never
    /// passed to it.
    #[must_use = "builder methods return a new value"]
    pub fn on_handler_error(mut self, callback: HandlerErrorCallback) -> Self {
        self.on_handler_error = Some(callback);
        self
    }

    /// Set how many idle entries are kept for reuse
    #[must_use = "builder methods return a new value"]
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let mut handlers = self.handlers;
        let handler: Option<Box<dyn Handler>> = match handlers.len() {
            0 => None,
            1 => handlers.pop(),
            _ => Some(Box::new(MultiHandler::new(handlers))),
        };

        Logger::new(LoggerConfig {
            min_level: self.min_level,
            handler,
            clock: self.clock,
            on_handler_error: self.on_handler_error,
            pool_capacity: self.pool_capacity,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{handler_fn, lazy, FixedClock, LogEntry};
    use crate::handlers::{DiscardHandler, MemoryHandler};
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_missing_handler_fails() {
        let err = Logger::new(LoggerConfig::default()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(Logger::builder().build().is_err());
    }

    #[test]
    fn test_invalid_level_fails() {
        let err = Logger::builder()
            .min_level(LogLevel::Invalid)
            .handler(DiscardHandler)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_defaults() {
        let logger = Logger::builder().handler(DiscardHandler).build().unwrap();
        assert_eq!(logger.min_level(), LogLevel::Info);
        assert!(!logger.is_enabled(LogLevel::Debug));
        assert!(logger.is_enabled(LogLevel::Info));
    }

    #[test]
    fn test_dispatch_stamps_entry() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid datetime");
        let memory = Arc::new(MemoryHandler::new());
        let logger = Logger::builder()
            .handler(Arc::clone(&memory))
            .clock(FixedClock::new(at))
            .build()
            .unwrap();

        logger.with_level(LogLevel::Warn).with_field("id", 7).log("disk almost full");

        let entries = memory.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, at);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "disk almost full");
        assert_eq!(entries[0].field("id").and_then(|v| v.as_i64()), Some(7));
        assert_eq!(logger.metrics().dispatched(), 1);
    }

    #[test]
    fn test_disabled_level_never_renders() {
        let memory = Arc::new(MemoryHandler::new());
        let logger = Logger::builder()
            .min_level(LogLevel::Error)
            .handler(Arc::clone(&memory))
            .build()
            .unwrap();

        logger
            .with_level(LogLevel::Info)
            .log(lazy(|| panic!("message rendered for a disabled level")));

        assert!(memory.is_empty());
        assert_eq!(logger.metrics().dispatched(), 0);
    }

    #[test]
    fn test_handler_error_goes_to_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let logger = Logger::builder()
            .handler(handler_fn(|_: &mut LogEntry| Err(LoggerError::other("disk gone"))))
            .on_handler_error(Arc::new(move |err: &LoggerError| sink.lock().push(err.to_string())))
            .build()
            .unwrap();

        logger.with_level(LogLevel::Info).log("first");
        logger.with_level(LogLevel::Info).log("second");

        assert_eq!(*seen.lock(), vec!["disk gone".to_string(), "disk gone".to_string()]);
        assert_eq!(logger.metrics().handler_errors(), 2);
    }

    #[test]
    fn test_stop_sentinel_is_silent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let logger = Logger::builder()
            .handler(handler_fn(|_: &mut LogEntry| Err(LoggerError::StopPropagation)))
            .on_handler_error(Arc::new(move |_: &LoggerError| {
                c.fetch_add(1, Ordering::SeqCst);
            }))
            .build()
            .unwrap();

        logger.with_level(LogLevel::Error).log("stop here");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(logger.metrics().stopped(), 1);
    }

    #[test]
    fn test_entry_returned_to_pool_after_error() {
        let logger = Logger::builder()
            .handler(handler_fn(|_: &mut LogEntry| Err(LoggerError::other("fail"))))
            .on_handler_error(Arc::new(|_: &LoggerError| {}))
            .build()
            .unwrap();

        logger.with_level(LogLevel::Info).log("x");
        assert_eq!(logger.pool.idle(), 1);
        logger.with_level(LogLevel::Info).log("y");
        assert_eq!(logger.pool.idle(), 1);
    }

    #[test]
    fn test_multiple_handlers_fan_out() {
        let a = Arc::new(MemoryHandler::new());
        let b = Arc::new(MemoryHandler::new());
        let logger = Logger::builder()
            .handler(Arc::clone(&a))
            .handler(Arc::clone(&b))
            .build()
            .unwrap();

        logger.with_level(LogLevel::Info).log("both");
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }
}
