//! Severity levels and their per-destination projections

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::LogWeaveError;

/// Label rendered for severity codes outside the defined set.
pub const UNKNOWN_LABEL: &str = "?????";

/// Name rendered for severity codes outside the defined set.
pub const UNKNOWN_NAME: &str = "unknown";

/// ANSI sequence that resets all terminal attributes.
pub const ANSI_RESET: &str = "\x1b[0m";

/// Log severity, ordered from least to most important
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Diagnostic chatter
    Debug = 0,
    /// Normal operation
    #[default]
    Info = 1,
    /// Something completed successfully
    Success = 2,
    /// Unexpected but recoverable
    Warning = 3,
    /// An operation failed
    Error = 4,
    /// The process cannot continue
    Fatal = 5,
}

/// Priority scale used by syslog and the systemd console framing (RFC 5424).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// System is unusable
    Emergency = 0,
    /// Action must be taken immediately
    Alert = 1,
    /// Critical conditions
    Critical = 2,
    /// Error conditions
    Error = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational messages
    Info = 6,
    /// Debug-level messages
    Debug = 7,
}

impl Priority {
    /// Numeric priority code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl Severity {
    /// Every level, in ascending order.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Numeric code of the level
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Look up a level by numeric code
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Severity::Debug),
            1 => Some(Severity::Info),
            2 => Some(Severity::Success),
            3 => Some(Severity::Warning),
            4 => Some(Severity::Error),
            5 => Some(Severity::Fatal),
            _ => None,
        }
    }

    /// Short upper-case label used by the human-facing text layout.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Success => "GOOD",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Lower-case name, as accepted in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Label for a raw code, degrading to [`UNKNOWN_LABEL`].
    pub const fn label_for_code(code: u8) -> &'static str {
        match Severity::from_u8(code) {
            Some(severity) => severity.label(),
            None => UNKNOWN_LABEL,
        }
    }

    /// Name for a raw code, degrading to [`UNKNOWN_NAME`].
    pub const fn name_for_code(code: u8) -> &'static str {
        match Severity::from_u8(code) {
            Some(severity) => severity.name(),
            None => UNKNOWN_NAME,
        }
    }

    /// ANSI escape sequence that introduces a line of this level.
    ///
    /// `Info` uses the reset sequence, so the terminal's own colors apply.
    pub const fn ansi_color(self) -> &'static str {
        match self {
            Severity::Debug => "\x1b[1;30m",
            Severity::Info => ANSI_RESET,
            Severity::Success => "\x1b[32m",
            Severity::Warning => "\x1b[33m",
            Severity::Error => "\x1b[31m",
            Severity::Fatal => "\x1b[1;31m",
        }
    }

    /// Syslog priority. There is no syslog notion of success, so it shares
    /// `Info` with the info level.
    pub const fn priority(self) -> Priority {
        match self {
            Severity::Debug => Priority::Debug,
            Severity::Info => Priority::Info,
            Severity::Success => Priority::Info,
            Severity::Warning => Priority::Warning,
            Severity::Error => Priority::Error,
            Severity::Fatal => Priority::Critical,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Severity {
    type Err = LogWeaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "success" | "good" => Ok(Severity::Success),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" | "critical" => Ok(Severity::Fatal),
            other => Err(LogWeaveError::Config(format!(
                "Unknown severity level: {}",
                other
            ))),
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = LogWeaveError;

    fn try_from(code: u8) -> Result<Self, LogWeaveError> {
        Severity::from_u8(code)
            .ok_or_else(|| LogWeaveError::Config(format!("Unknown severity code: {}", code)))
    }
}
