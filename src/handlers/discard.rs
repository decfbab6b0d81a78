//! Handler that drops everything

use crate::core::{Handler, LogEntry, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandler;

impl Handler for DiscardHandler {
    #[inline]
    fn handle(&self, _entry: &mut LogEntry) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}
