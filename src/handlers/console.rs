//! Colored console handler for command-line tools
//!
//! Prints `   • message                   name=value` to stderr, colored by
//! level. The `source` field is left out to keep lines short. Control
//! characters in the message and fields are escaped.

use super::escape::{escape_control, escape_value};
use crate::core::{Handler, LogEntry, LogLevel, Result};
use colored::Colorize;
use parking_lot::Mutex;
use std::fmt::Write as _;
use std::io::{self, Write};

pub struct ConsoleHandler {
    lock: Mutex<()>,
    use_colors: bool,
    padding: usize,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            use_colors: true,
            padding: 3,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Width of the column holding the level symbol, minus one.
    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    fn symbol(level: LogLevel) -> &'static str {
        match level {
            LogLevel::Error => "⨯",
            _ => "•",
        }
    }

    /// Render one entry without the trailing newline.
    pub fn format(&self, entry: &LogEntry) -> String {
        let symbol = format!("{:>width$}", Self::symbol(entry.level), width = self.padding + 1);
        let message = format!("{:<25}", escape_control(&entry.message));
        let color = entry.level.color_code();

        let mut line = if self.use_colors {
            format!("{} {}", symbol.bold().color(color), message.color(color))
        } else {
            format!("{} {}", symbol, message)
        };

        for field in entry.fields.iter().filter(|f| f.name != "source") {
            let name = escape_control(&field.name);
            let value = escape_value(&field.value);
            // Writing into a String cannot fail.
            let _ = if self.use_colors {
                write!(line, " {}={}", name.color(color), value)
            } else {
                write!(line, " {}={}", name, value)
            };
        }

        line
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        let line = self.format(entry);
        let _guard = self.lock.lock();
        writeln!(io::stderr().lock(), "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
