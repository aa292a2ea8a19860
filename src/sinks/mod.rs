//! Output destinations for log records

pub mod console;
pub mod file;
pub mod journald;
pub mod syslog;

use crate::types::LogRecord;
use crate::{LogWeaveError, Result};

pub use console::ConsoleSink;
pub use file::FileSink;
pub use journald::JournaldSink;
pub use self::syslog::SyslogSink;

/// What the dispatcher does after a sink failed to write a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureAction {
    /// Keep the sink registered and drop the failure
    Ignore,
    /// Unregister the sink, then report the contained diagnostic through the
    /// sinks that remain
    Detach(String),
}

/// An independent consumer of log records
///
/// Sinks are owned by a [`Dispatcher`](crate::dispatch::Dispatcher) and may be
/// written to from several threads at once; each implementation serializes
/// its own output so that records reach it in submission order.
pub trait Sink: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Format and write one record.
    fn write(&self, record: &LogRecord) -> Result<()>;

    /// Flush buffered output.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Decide how a failed [`Sink::write`] is handled. Sinks detach by
    /// default.
    fn on_write_error(&self, error: &LogWeaveError) -> FailureAction {
        FailureAction::Detach(format!("Error writing to {} sink: {}", self.name(), error))
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn write(&self, record: &LogRecord) -> Result<()> {
        (**self).write(record)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn on_write_error(&self, error: &LogWeaveError) -> FailureAction {
        (**self).on_write_error(error)
    }
}

/// Render `record` with `formatter` as one newline-terminated line.
pub(crate) fn render_line(formatter: &dyn crate::format::Formatter, record: &LogRecord) -> String {
    let mut line = formatter.render(record);
    line.push('\n');
    line
}
