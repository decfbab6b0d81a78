//! Handler trait for log output destinations

use super::{error::Result, log_entry::LogEntry};
use std::sync::Arc;

/// Consumer of finalized entries.
///
/// The entry is only valid for the duration of the call; clone it to keep
/// it. A handler may modify the entry (add a derived field, redact a value)
/// before passing it on to a downstream handler.
///
/// Returning [`LoggerError::StopPropagation`](super::LoggerError::StopPropagation)
/// stops later handlers in a chain from seeing the entry. Any other error is
/// reported by the logger on its diagnostic channel and never reaches the
/// call site.
///
/// Handlers are shared between threads and do their own locking.
pub trait Handler: Send + Sync {
    fn handle(&self, entry: &mut LogEntry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "handler"
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        (**self).handle(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        (**self).handle(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<H: Handler + ?Sized> Handler for &H {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        (**self).handle(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapter turning a closure into a [`Handler`].
pub struct HandlerFunc<F>(F);

impl<F> Handler for HandlerFunc<F>
where
    F: Fn(&mut LogEntry) -> Result<()> + Send + Sync,
{
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        (self.0)(entry)
    }

    fn name(&self) -> &str {
        "func"
    }
}

/// Build a handler from a closure.
///
/// ```
/// use logg_core::core::{handler_fn, Handler, LogEntry, LogLevel};
///
/// let redact = handler_fn(|entry: &mut LogEntry| {
///     entry.fields.retain(|f| f.name != "password");
///     Ok(())
/// });
///
/// let mut entry = LogEntry::new(LogLevel::Info, "login").with_field("password", "hunter2");
/// redact.handle(&mut entry).unwrap();
/// assert!(entry.fields.is_empty());
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFunc<F>
where
    F: Fn(&mut LogEntry) -> Result<()> + Send + Sync,
{
    HandlerFunc(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LoggerError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_handler_fn_can_mutate() {
        let h = handler_fn(|entry: &mut LogEntry| {
            entry.message.make_ascii_uppercase();
            Ok(())
        });
        let mut entry = LogEntry::new(LogLevel::Info, "quiet");
        h.handle(&mut entry).unwrap();
        assert_eq!(entry.message, "QUIET");
        assert_eq!(h.name(), "func");
    }

    #[test]
    fn test_wrappers_delegate() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let h: Arc<dyn Handler> = Arc::new(handler_fn(move |_: &mut LogEntry| {
            c.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::StopPropagation)
        }));

        let boxed: Box<dyn Handler> = Box::new(Arc::clone(&h));
        let mut entry = LogEntry::new(LogLevel::Warn, "x");
        assert!(boxed.handle(&mut entry).unwrap_err().is_stop());
        assert!((&*h).handle(&mut entry).is_err());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
