//! Record formatting
//!
//! A [`Formatter`] renders a [`LogRecord`] into text. Decorating formatters
//! ([`AnsiColorFormatter`], [`SystemdFormatter`]) wrap an inner formatter and
//! only add bytes around its output, so they compose in any order.

pub mod color;
pub mod systemd;
pub mod text;

use crate::types::LogRecord;
use std::sync::Arc;

pub use color::{strip_ansi, AnsiColorFormatter};
pub use systemd::SystemdFormatter;
pub use text::{MessageFormatter, TextFormatter, TIMESTAMP_FORMAT};

/// Pure mapping from a record to text
pub trait Formatter: Send + Sync {
    /// Append the rendering of `record` to `out`.
    fn format(&self, record: &LogRecord, out: &mut String);

    /// Render `record` into a fresh string.
    fn render(&self, record: &LogRecord) -> String {
        let mut out = String::with_capacity(128);
        self.format(record, &mut out);
        out
    }
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn format(&self, record: &LogRecord, out: &mut String) {
        (**self).format(record, out)
    }
}

impl<F: Formatter + ?Sized> Formatter for Arc<F> {
    fn format(&self, record: &LogRecord, out: &mut String) {
        (**self).format(record, out)
    }
}

impl<F: Formatter + ?Sized> Formatter for &F {
    fn format(&self, record: &LogRecord, out: &mut String) {
        (**self).format(record, out)
    }
}
