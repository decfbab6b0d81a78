//! Errors attached to log contexts
//!
//! [`LogContext::with_error`](super::LogContext::with_error) accepts any
//! [`LogError`]. Besides its display text an error may expose the frame it
//! originated from (rendered as a `source` field) and extra fields of its own.

use super::error::LoggerError;
use super::field::Fields;
use std::fmt;
use std::panic::Location;

/// Top frame of an error's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl StackFrame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}:{}", self.function, self.file, self.line)
    }
}

/// An error that can be attached to a log context.
///
/// Only the display text is required. Implement `stack_frame` to get a
/// `source` field and `error_fields` to merge additional fields.
pub trait LogError: fmt::Display {
    fn stack_frame(&self) -> Option<StackFrame> {
        None
    }

    fn error_fields(&self) -> Option<Fields> {
        None
    }
}

impl LogError for dyn std::error::Error + '_ {}
impl LogError for dyn std::error::Error + Send + Sync + '_ {}
impl LogError for Box<dyn std::error::Error + Send + Sync> {}
impl LogError for std::io::Error {}
impl LogError for std::fmt::Error {}
impl LogError for std::num::ParseIntError {}
impl LogError for std::num::ParseFloatError {}
impl LogError for serde_json::Error {}
impl LogError for LoggerError {}
impl LogError for String {}
impl LogError for str {}

impl<T: LogError + ?Sized> LogError for &T {
    fn stack_frame(&self) -> Option<StackFrame> {
        (**self).stack_frame()
    }

    fn error_fields(&self) -> Option<Fields> {
        (**self).error_fields()
    }
}

/// Wraps an error together with the location it was raised at.
#[derive(Debug)]
pub struct TracedError<E> {
    inner: E,
    frame: StackFrame,
}

impl<E> TracedError<E> {
    /// Record the caller's file and line. The function name is left as
    /// `"?"`; use [`traced!`](crate::traced) to fill it with the module path.
    #[track_caller]
    pub fn new(inner: E) -> Self {
        let location = Location::caller();
        Self {
            inner,
            frame: StackFrame::new("?", location.file(), location.line()),
        }
    }

    pub fn with_frame(inner: E, frame: StackFrame) -> Self {
        Self { inner, frame }
    }

    pub fn frame(&self) -> &StackFrame {
        &self.frame
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: fmt::Display> fmt::Display for TracedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for TracedError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl<E: LogError> LogError for TracedError<E> {
    fn stack_frame(&self) -> Option<StackFrame> {
        Some(self.frame.clone())
    }

    fn error_fields(&self) -> Option<Fields> {
        self.inner.error_fields()
    }
}

/// Wrap an error in a [`TracedError`] naming the current module, file and line.
///
/// ```
/// use logg_core::traced;
///
/// let err = traced!(std::io::Error::other("disk full"));
/// assert_eq!(err.frame().line, line!() - 1);
/// ```
#[macro_export]
macro_rules! traced {
    ($err:expr) => {
        $crate::core::TracedError::with_frame(
            $err,
            $crate::core::StackFrame::new(module_path!(), file!(), line!()),
        )
    };
}
