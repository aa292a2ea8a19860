//! Plain text layouts

use std::fmt::Write;

use super::Formatter;
use crate::types::LogRecord;

/// Timestamp pattern of the text layout, at microsecond resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// `[timestamp] [LEVEL] [node] message`, the layout of console and file output
///
/// Each record renders as exactly one line: line breaks inside the message
/// are written as the escapes `\n` and `\r`.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    timestamp: bool,
}

impl TextFormatter {
    /// Full layout including the timestamp
    pub const fn new() -> Self {
        Self { timestamp: true }
    }

    /// Layout without the leading timestamp, for destinations that stamp
    /// records themselves (journald).
    pub const fn without_timestamp() -> Self {
        Self { timestamp: false }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &LogRecord, out: &mut String) {
        // Writing into a String cannot fail.
        if self.timestamp {
            let _ = write!(out, "[{}] ", record.timestamp().format(TIMESTAMP_FORMAT));
        }
        let _ = write!(
            out,
            "[{:>5}] [{}] ",
            record.severity().label(),
            record.node().unwrap_or_default(),
        );
        push_escaped_line_breaks(out, record.message());
    }
}

fn push_escaped_line_breaks(out: &mut String, message: &str) {
    for c in message.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

/// Bare message text, for transports that carry severity and origin out of band
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl Formatter for MessageFormatter {
    fn format(&self, record: &LogRecord, out: &mut String) {
        out.push_str(record.message());
    }
}
