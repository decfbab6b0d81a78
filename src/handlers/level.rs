//! Level filter handler

use crate::core::{Handler, LogEntry, LogLevel, Result};

/// Drops entries below a handler-local threshold before they reach `inner`.
pub struct LevelHandler<H> {
    level: LogLevel,
    inner: H,
}

impl<H: Handler> LevelHandler<H> {
    pub fn new(inner: H, level: LogLevel) -> Self {
        Self { level, inner }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

impl<H: Handler> Handler for LevelHandler<H> {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        if entry.level < self.level {
            return Ok(());
        }
        self.inner.handle(entry)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
