//! Chainable logging context
//!
//! A [`LogContext`] carries a level and the fields accumulated so far. Every
//! `with_*` call returns a new context and leaves the receiver untouched, so
//! a context can be shared, cloned and handed to other threads while
//! different branches keep adding their own fields.
//!
//! A context borrows its [`Logger`], so it can move into scoped threads
//! (`std::thread::scope`) but not into `std::thread::spawn` or an async
//! task unless the logger is `'static`, such as the one in
//! [`global`](crate::global) or a leaked `Box<Logger>`.
//!
//! When the context's level is below the logger's minimum the context is
//! *disarmed*: `with_*` calls return it as is without building any field and
//! `log` returns without producing the message.

use super::field::{Field, FieldValue, Fielder};
use super::finalize;
use super::log_error::LogError;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::message::LogMessage;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Accumulated field count that triggers an early deduplication pass.
pub const COMPACT_THRESHOLD: usize = 100;

/// Immutable builder of a log call.
///
/// Obtained from [`Logger::with_level`]. Cloning is cheap: the field list
/// is shared and never written to after creation.
#[derive(Clone)]
pub struct LogContext<'a> {
    logger: &'a Logger,
    level: LogLevel,
    fields: Option<Arc<[Field]>>,
    /// Length above which the next append compacts duplicate names.
    compact_at: usize,
}

impl<'a> LogContext<'a> {
    pub(crate) fn new(logger: &'a Logger, level: LogLevel) -> Self {
        Self {
            logger,
            level,
            fields: None,
            compact_at: COMPACT_THRESHOLD,
        }
    }

    /// The logger this context dispatches to.
    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether the level passes the logger's minimum.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.level >= self.logger.min_level()
    }

    /// Fields in insertion order, duplicates included.
    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or(&[])
    }

    /// Fields as they will appear in the dispatched entry.
    pub fn distinct_fields(&self) -> Vec<Field> {
        finalize::distinct_fields(self.fields())
    }

    /// Same fields, different level.
    #[must_use]
    pub fn with_level(&self, level: LogLevel) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    /// Add one field. No-op when disarmed.
    ///
    /// Names are not escaped; avoid spaces and `=` in them.
    #[must_use]
    pub fn with_field<K, V>(&self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        if !self.is_enabled() {
            return self.clone();
        }
        self.append(std::iter::once(Field::new(name, value)))
    }

    /// Add every field produced by `fielder`. No-op when disarmed.
    #[must_use]
    pub fn with_fields<F: Fielder>(&self, fielder: F) -> Self {
        if !self.is_enabled() {
            return self.clone();
        }
        let mut added = Vec::with_capacity(fielder.size_hint());
        fielder.extend_into(&mut added);
        self.append(added)
    }

    /// Set `duration` to `d` in whole milliseconds. No-op when disarmed.
    #[must_use]
    pub fn with_duration(&self, d: Duration) -> Self {
        let millis = i64::try_from(d.as_millis()).unwrap_or(i64::MAX);
        self.with_field("duration", millis)
    }

    /// Attach an error. No-op when `err` is `None` or the context is disarmed.
    ///
    /// Adds `error` with the error's display text, then `source` when the
    /// error knows its stack frame, then the error's own fields.
    ///
    /// [`LogError`] is implemented for common std errors and for
    /// `dyn std::error::Error`. Any other error type can be passed as
    /// `Some(&err as &dyn std::error::Error)`, or through
    /// [`with_std_error`](Self::with_std_error).
    #[must_use]
    pub fn with_error<E>(&self, err: Option<&E>) -> Self
    where
        E: LogError + ?Sized,
    {
        let Some(err) = err else {
            return self.clone();
        };
        if !self.is_enabled() {
            return self.clone();
        }

        let mut extra = vec![Field::new("error", FieldValue::Error(err.to_string()))];
        if let Some(frame) = err.stack_frame() {
            extra.push(Field::new("source", frame.to_string()));
        }
        if let Some(fields) = err.error_fields() {
            extra.extend(fields);
        }
        self.append(extra)
    }

    /// Attach any `std::error::Error`. Adds only the `error` field.
    #[must_use]
    pub fn with_std_error(&self, err: &(dyn std::error::Error + '_)) -> Self {
        self.with_error(Some(err))
    }

    /// Log `message` at this context's level.
    ///
    /// When disarmed the message is never rendered; pass a
    /// [`lazy`](super::lazy) closure or `format_args!` to keep expensive
    /// formatting off the disabled path.
    pub fn log<M: LogMessage>(&self, message: M) {
        if !self.is_enabled() {
            return;
        }
        self.logger.dispatch(self, &message);
    }

    /// Log pre-captured format arguments. Formatting only happens if the
    /// entry is dispatched. See also the [`logf!`](crate::logf) macro.
    pub fn logf(&self, args: fmt::Arguments<'_>) {
        self.log(args);
    }

    /// Copy the current fields plus `extra` into a new backing slice.
    ///
    /// The slice is collected straight into the `Arc`, one allocation per
    /// append. Compaction goes through a `Vec` and copies once more.
    fn append<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = Field>,
        I::IntoIter: ExactSizeIterator,
    {
        let existing = self.fields();
        let extra = extra.into_iter();
        let len = existing.len() + extra.len();

        if len == 0 {
            return self.clone();
        }

        if len > self.compact_at {
            let mut fields = Vec::with_capacity(len);
            fields.extend_from_slice(existing);
            fields.extend(extra);
            let fields = finalize::distinct_fields(&fields);
            return Self {
                logger: self.logger,
                level: self.level,
                compact_at: COMPACT_THRESHOLD.max(fields.len() * 2),
                fields: Some(Arc::from(fields)),
            };
        }

        Self {
            logger: self.logger,
            level: self.level,
            fields: Some(existing.iter().cloned().chain(extra).collect()),
            compact_at: self.compact_at,
        }
    }
}

impl fmt::Debug for LogContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("level", &self.level)
            .field("enabled", &self.is_enabled())
            .field("fields", &self.fields())
            .finish()
    }
}
