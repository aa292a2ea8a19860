//! Append-only file sink

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{render_line, FailureAction, Sink};
use crate::format::{Formatter, TextFormatter};
use crate::types::LogRecord;
use crate::{LogWeaveError, Result};

/// Appends one text line per record to a file
///
/// A write failure detaches the sink; it never reopens the file.
pub struct FileSink {
    path: PathBuf,
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
    formatter: Box<dyn Formatter>,
}

impl FileSink {
    /// Open `path` in append mode with the standard text layout
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_formatter(path, TextFormatter::new())
    }

    /// Open `path` in append mode with a custom formatter
    pub fn with_formatter<P: AsRef<Path>>(path: P, formatter: impl Formatter + 'static) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(path, BufWriter::new(file), formatter))
    }

    /// Wrap an already opened writer; `path` is only used in diagnostics
    pub fn from_writer<P: Into<PathBuf>>(
        path: P,
        writer: impl Write + Send + 'static,
        formatter: impl Formatter + 'static,
    ) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path.display()),
            path,
            writer: Mutex::new(Box::new(writer)),
            formatter: Box::new(formatter),
        }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, record: &LogRecord) -> Result<()> {
        let line = render_line(&*self.formatter, record);
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn on_write_error(&self, error: &LogWeaveError) -> FailureAction {
        FailureAction::Detach(format!(
            "Error writing log file `{}': {}",
            self.path.display(),
            error
        ))
    }
}
