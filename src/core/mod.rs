//! Core logger types and traits

pub mod clock;
pub mod error;
pub mod field;
pub mod finalize;
pub mod handler;
pub mod log_context;
pub mod log_entry;
pub mod log_error;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod pool;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue, Fielder, Fields};
pub use finalize::distinct_fields;
pub use handler::{handler_fn, Handler, HandlerFunc};
pub use log_context::{LogContext, COMPACT_THRESHOLD};
pub use log_entry::LogEntry;
pub use log_error::{LogError, StackFrame, TracedError};
pub use log_level::{parse_level, LogLevel};
pub use logger::{HandlerErrorCallback, Logger, LoggerBuilder, LoggerConfig};
pub use message::{lazy, LogMessage, StringFunc};
pub use metrics::LoggerMetrics;
pub use pool::{EntryPool, PooledEntry};
pub use timestamp::TimestampFormat;
