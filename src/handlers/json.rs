//! JSON handler for structured logging

use crate::core::{Handler, LogEntry, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes each entry as a single-line JSON object (JSONL format):
/// `{"level":"info","timestamp":"...","message":"...","fields":{...}}`.
///
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonHandler<W> {
    writer: Mutex<W>,
    pretty: bool,
}

impl JsonHandler<BufWriter<File>> {
    /// Append to the file at `path`, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            pretty: false,
        }
    }

    /// Multi-line, indented output. Meant for humans, not for JSONL readers.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Run `f` against the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.writer.lock())
    }
}

impl<W: Write + Send> Handler for JsonHandler<W> {
    fn handle(&self, entry: &mut LogEntry) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&*entry)?
        } else {
            serde_json::to_string(&*entry)?
        };

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
