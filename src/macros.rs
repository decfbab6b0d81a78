//! Logging macros for ergonomic message formatting.
//!
//! The macros capture their arguments with `format_args!`, so nothing is
//! formatted unless the entry is dispatched. They accept either a
//! [`Logger`](crate::Logger) or a [`LogContext`](crate::LogContext); with a
//! context the entry keeps the context's fields.
//!
//! # Examples
//!
//! ```
//! use logg_core::prelude::*;
//! use logg_core::info;
//!
//! let logger = Logger::builder().handler(DiscardHandler).build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Keep the fields of a context
//! let request = logger.with_level(LogLevel::Info).with_field("request_id", 42);
//! info!(request, "handled in {}ms", 12);
//! ```

/// Log pre-formatted arguments on a context at its own level.
///
/// ```
/// # use logg_core::prelude::*;
/// # let logger = Logger::builder().handler(DiscardHandler).build().unwrap();
/// use logg_core::logf;
/// let ctx = logger.with_level(LogLevel::Warn).with_field("attempt", 3);
/// logf!(ctx, "retrying in {}s", 5);
/// ```
#[macro_export]
macro_rules! logf {
    ($ctx:expr, $($arg:tt)+) => {
        $ctx.logf(::std::format_args!($($arg)+))
    };
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logg_core::prelude::*;
/// # let logger = Logger::builder().handler(DiscardHandler).build().unwrap();
/// use logg_core::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.with_level($level).logf(::std::format_args!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// ```
/// # use logg_core::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::Trace).handler(DiscardHandler).build().unwrap();
/// use logg_core::trace;
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use logg_core::prelude::*;
/// # let logger = Logger::builder().handler(DiscardHandler).build().unwrap();
/// use logg_core::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
