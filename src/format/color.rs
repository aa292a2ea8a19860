//! ANSI color decoration

use super::Formatter;
use crate::types::severity::ANSI_RESET;
use crate::types::LogRecord;

/// Wraps an inner formatter's output in the severity's ANSI color.
///
/// Every rendered line ends with the reset sequence, whatever color it
/// started with.
#[derive(Debug, Clone)]
pub struct AnsiColorFormatter<F> {
    inner: F,
}

impl<F: Formatter> AnsiColorFormatter<F> {
    /// Decorate `inner`
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    /// The wrapped formatter
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: Formatter> Formatter for AnsiColorFormatter<F> {
    fn format(&self, record: &LogRecord, out: &mut String) {
        out.push_str(record.severity().ansi_color());
        self.inner.format(record, out);
        out.push_str(ANSI_RESET);
    }
}

/// Remove ANSI CSI escape sequences (`ESC [ ... final-byte`) from `text`.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameter and intermediate bytes run until a final byte in '@'..='~'.
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}
