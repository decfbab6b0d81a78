//! Fan-out handler

use crate::core::{Handler, LogEntry, Result};

/// Invokes a list of handlers in order against the same entry.
///
/// Each handler sees the entry as modified by the ones before it. The first
/// error, including [`LoggerError::StopPropagation`](crate::LoggerError::StopPropagation),
/// ends the walk and is returned as is.
pub struct MultiHandler {
    handlers: Vec<Box<dyn Handler>>,
}

impl MultiHandler {
    pub fn new(handlers: Vec<Box<dyn Handler>>) -> Self {
        Self { handlers }
    }

    /// Append a handler to the end of the chain.
    #[must_use]
    pub fn with<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Handler for MultiHandler {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        for handler in &self.handlers {
            handler.handle(entry)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        for handler in &self.handlers {
            handler.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "multi"
    }
}
