//! systemd console framing
//!
//! Services running under systemd may prefix each stderr line with
//! `<N>`, where `N` is the syslog priority; journald then records the line
//! with that priority.

use std::fmt::Write;

use super::Formatter;
use crate::types::LogRecord;

/// Prefixes the inner formatter's output with the record's `<priority>` token
#[derive(Debug, Clone)]
pub struct SystemdFormatter<F> {
    inner: F,
}

impl<F: Formatter> SystemdFormatter<F> {
    /// Decorate `inner`
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for SystemdFormatter<F> {
    fn format(&self, record: &LogRecord, out: &mut String) {
        let _ = write!(out, "<{}>", record.severity().priority().code());
        self.inner.format(record, out);
    }
}
