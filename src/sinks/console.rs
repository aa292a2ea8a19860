//! Console sink

use parking_lot::Mutex;
use std::io::{self, Write};

use super::{render_line, FailureAction, Sink};
use crate::config::ConsoleFormat;
use crate::format::{AnsiColorFormatter, Formatter, SystemdFormatter, TextFormatter};
use crate::types::LogRecord;
use crate::{LogWeaveError, Result};

/// Writes formatted lines to the standard error stream or any other writer
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
    formatter: Box<dyn Formatter>,
}

impl ConsoleSink {
    /// Console sink on stderr
    pub fn stderr(formatter: impl Formatter + 'static) -> Self {
        Self::with_writer(io::stderr(), formatter)
    }

    /// Console sink on an arbitrary writer
    pub fn with_writer(writer: impl Write + Send + 'static, formatter: impl Formatter + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            formatter: Box::new(formatter),
        }
    }

    /// Formatter stack for a configured console framing
    pub fn formatter_for(format: ConsoleFormat) -> Box<dyn Formatter> {
        match format {
            ConsoleFormat::Colored => Box::new(AnsiColorFormatter::new(TextFormatter::new())),
            ConsoleFormat::Systemd => {
                Box::new(SystemdFormatter::new(TextFormatter::without_timestamp()))
            }
            ConsoleFormat::Plain => Box::new(TextFormatter::new()),
        }
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
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

    fn on_write_error(&self, _error: &LogWeaveError) -> FailureAction {
        // A broken terminal has nowhere left to report to.
        FailureAction::Ignore
    }
}
