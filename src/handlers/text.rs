//! Plain text handler
//!
//! One line per entry: `LEVEL message name=value name=value`, optionally
//! preceded by a timestamp. Works with any `io::Write` (stderr, a file, a
//! `Vec<u8>` in tests).

use super::escape::{escape_control, escape_value};
use crate::core::{Handler, LogEntry, Result, TimestampFormat};
use parking_lot::Mutex;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Options for [`TextHandler`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Placed between level, message and each field. Default `" "`.
    pub separator: String,
    /// Print the timestamp first, in this format. Default: no timestamp.
    pub timestamp: Option<TimestampFormat>,
    /// Escape `\n`, `\r` and `\t` in the message and in field names and
    /// values so one entry stays one line. Default `true`.
    pub escape_control: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            timestamp: None,
            escape_control: true,
        }
    }
}

pub struct TextHandler<W> {
    writer: Mutex<W>,
    options: TextOptions,
}

impl TextHandler<io::Stderr> {
    /// Text handler writing to stderr with default options.
    pub fn stderr() -> Self {
        Self::new(io::stderr(), TextOptions::default())
    }
}

impl<W: Write + Send> TextHandler<W> {
    pub fn new(writer: W, options: TextOptions) -> Self {
        Self {
            writer: Mutex::new(writer),
            options,
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Run `f` against the writer, e.g. to inspect a buffer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.writer.lock())
    }

    /// Render one entry without the trailing newline.
    pub fn format(&self, entry: &LogEntry) -> String {
        let sep = &self.options.separator;
        let mut line = String::with_capacity(64);

        if let Some(ref format) = self.options.timestamp {
            line.push_str(&format.format(&entry.timestamp));
            line.push_str(sep);
        }

        line.push_str(entry.level.to_upper());
        line.push_str(sep);
        if !self.options.escape_control {
            line.push_str(&entry.message);
            for field in &entry.fields {
                line.push_str(sep);
                // Writing into a String cannot fail.
                let _ = write!(line, "{}={}", field.name, field.value);
            }
            return line;
        }

        line.push_str(&escape_control(&entry.message));
        for field in &entry.fields {
            line.push_str(sep);
            line.push_str(&escape_control(&field.name));
            line.push('=');
            line.push_str(&escape_value(&field.value));
        }

        line
    }
}

impl<W: Write + Send> Handler for TextHandler<W> {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        let line = self.format(entry);
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "text"
    }
}
