//! Log record produced at a call site

use chrono::{DateTime, Local};
use std::fmt;

use super::Severity;

/// Source location of a call site
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// Source file
    pub file: String,
    /// Line within `file`
    pub line: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single log record
///
/// Records are assembled with the builder-style methods below and then handed
/// to a [`Dispatcher`](crate::dispatch::Dispatcher) by value. Sinks only ever
/// see shared references, so a record is never modified once dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    timestamp: DateTime<Local>,
    severity: Severity,
    node: Option<String>,
    message: String,
    location: Option<Location>,
}

impl LogRecord {
    /// Create a record timestamped now, without node or location
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            node: None,
            message: message.into(),
            location: None,
        }
    }

    /// Attach the source location of the call site
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(Location {
            file: file.into(),
            line,
        });
        self
    }

    /// Set the node name explicitly instead of taking the dispatcher's
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Override the creation timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Fill in the node name unless the call site already set one.
    pub(crate) fn stamped(mut self, node: Option<&str>) -> Self {
        if self.node.is_none() {
            self.node = node.map(str::to_owned);
        }
        self
    }

    /// Creation time
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Severity level
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Emitting node, if stamped
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source location, if known
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}
