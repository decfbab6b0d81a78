//! # logg_core
//!
//! Structured, leveled logging with copy-on-write contexts and pluggable
//! handlers.
//!
//! ## Features
//!
//! - **Cheap when disabled**: a log call below the logger's minimum level
//!   does one comparison and allocates nothing; messages are only rendered
//!   for entries that are dispatched
//! - **Immutable contexts**: every `with_*` call returns a new context, so
//!   a context can be shared across threads and branched freely
//! - **Last value wins**: repeated field names collapse to one field in the
//!   dispatched entry
//! - **Composable handlers**: text, JSON and colored console output plus
//!   fan-out, level filtering and in-memory capture
//!
//! ## Example
//!
//! ```
//! use logg_core::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryHandler::new());
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Info)
//!     .handler(Arc::clone(&memory))
//!     .build()
//!     .unwrap();
//!
//! let ctx = logger.with_level(LogLevel::Info).with_field("user", "tj");
//! ctx.with_field("id", 123).log("upload complete");
//! ctx.with_level(LogLevel::Debug).log(lazy(|| expensive_dump()));
//!
//! assert_eq!(memory.len(), 1);
//! # fn expensive_dump() -> String { unreachable!() }
//! ```

pub mod core;
pub mod global;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        handler_fn, lazy, Clock, Field, FieldValue, Fielder, Fields, FixedClock, Handler,
        LogContext, LogEntry, LogError, LogLevel, LogMessage, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, Result, StackFrame, TracedError,
    };
    #[cfg(feature = "console")]
    pub use crate::handlers::ConsoleHandler;
    pub use crate::handlers::{
        DiscardHandler, JsonHandler, LevelHandler, MemoryHandler, MultiHandler, TextHandler,
        TextOptions,
    };
}

pub use crate::core::{
    distinct_fields, handler_fn, lazy, parse_level, Clock, Field, FieldValue, Fielder, Fields,
    FixedClock, Handler, LogContext, LogEntry, LogError, LogLevel, LogMessage, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, StackFrame, SystemClock,
    TimestampFormat, TracedError,
};
