//! Message producers
//!
//! Every log call takes a [`LogMessage`]. The text is only produced when the
//! entry is actually dispatched, so expensive formatting behind a disabled
//! level never runs.

use std::borrow::Cow;
use std::fmt::{self, Write};

/// Produces the display text of a log message on demand.
pub trait LogMessage {
    /// Write the message text into `out`.
    fn write_to(&self, out: &mut String);

    /// Render into a fresh string.
    fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

impl LogMessage for str {
    fn write_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl LogMessage for String {
    fn write_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl LogMessage for Cow<'_, str> {
    fn write_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

/// `format_args!` output. Formatting happens in `write_to`, not before.
impl LogMessage for fmt::Arguments<'_> {
    fn write_to(&self, out: &mut String) {
        match self.as_str() {
            Some(s) => out.push_str(s),
            None => {
                // Writing into a String cannot fail.
                let _ = out.write_fmt(*self);
            }
        }
    }
}

impl<T: LogMessage + ?Sized> LogMessage for &T {
    fn write_to(&self, out: &mut String) {
        (**self).write_to(out)
    }
}

/// A closure-backed message, invoked at most once per dispatch.
#[derive(Clone, Copy)]
pub struct StringFunc<F>(F);

impl<F> StringFunc<F>
where
    F: Fn() -> String,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> LogMessage for StringFunc<F>
where
    F: Fn() -> String,
{
    fn write_to(&self, out: &mut String) {
        out.push_str(&(self.0)());
    }
}

impl<F> fmt::Debug for StringFunc<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StringFunc(..)")
    }
}

/// Wrap a closure so it is only called when the entry is dispatched.
///
/// ```
/// use logg_core::lazy;
/// use logg_core::core::LogMessage;
///
/// let msg = lazy(|| format!("{} items", 3));
/// assert_eq!(msg.render(), "3 items");
/// ```
pub fn lazy<F>(f: F) -> StringFunc<F>
where
    F: Fn() -> String,
{
    StringFunc::new(f)
}
