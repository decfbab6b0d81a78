//! Process-wide logger
//!
//! [`init`] installs a logger once. Anything that logs through [`logger`]
//! before `init` runs gets the default logger (info level, text to stderr),
//! and from then on the global logger can no longer be replaced.

use crate::core::{LogContext, LogLevel, Logger, LoggerConfig, LoggerError, Result};
use crate::handlers::TextHandler;
use once_cell::sync::OnceCell;

static GLOBAL: OnceCell<Logger> = OnceCell::new();

fn default_logger() -> Logger {
    Logger::with_handler(LogLevel::Info, Box::new(TextHandler::stderr()))
}

/// Install the global logger.
///
/// Fails with [`LoggerError::AlreadyInitialized`] if a logger is already
/// installed, including the default one installed by an earlier [`logger`]
/// call. Configuration errors from [`Logger::new`] are returned as is.
pub fn init(config: LoggerConfig) -> Result<()> {
    let logger = Logger::new(config)?;
    GLOBAL
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The global logger, installing the default one on first use.
pub fn logger() -> &'static Logger {
    GLOBAL.get_or_init(default_logger)
}

/// The global logger if one has been installed.
pub fn try_logger() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Start a log chain on the global logger.
#[inline]
pub fn with_level(level: LogLevel) -> LogContext<'static> {
    logger().with_level(level)
}
