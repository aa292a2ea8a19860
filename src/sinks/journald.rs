//! Journald sink
//!
//! Sends records straight to the systemd journal as an alternative to the
//! `<priority>`-prefixed console framing.

use crate::config::JournaldSettings;
use crate::{LogWeaveError, Result};

#[cfg(feature = "journald")]
use libsystemd::logging::{self, Priority as JournalPriority};
#[cfg(feature = "journald")]
use std::path::Path;

#[cfg(feature = "journald")]
use crate::format::{Formatter, MessageFormatter};
#[cfg(feature = "journald")]
use crate::types::{LogRecord, Priority};

/// Native protocol socket of the journal daemon
#[cfg(feature = "journald")]
const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

/// Journald sink for direct logging to the systemd journal
#[cfg(feature = "journald")]
pub struct JournaldSink {
    identifier: String,
    node: String,
    formatter: Box<dyn Formatter>,
}

#[cfg(feature = "journald")]
impl JournaldSink {
    /// Connect to the journal. The syslog identifier defaults to `node`.
    pub fn connect(settings: &JournaldSettings, node: &str) -> Result<Self> {
        if !Self::is_available() {
            return Err(LogWeaveError::Journald(format!(
                "Failed to initialize journald: {} not found",
                JOURNAL_SOCKET
            )));
        }

        Ok(Self {
            identifier: settings
                .identifier
                .clone()
                .unwrap_or_else(|| node.to_string()),
            node: node.to_string(),
            formatter: Box::new(MessageFormatter),
        })
    }

    /// Check if journald is available on the system
    pub fn is_available() -> bool {
        Path::new(JOURNAL_SOCKET).exists()
    }

    /// Structured fields sent along with the message
    fn fields(&self, record: &LogRecord) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("SYSLOG_IDENTIFIER", self.identifier.clone()),
            ("NODE", record.node().unwrap_or(&self.node).to_string()),
        ];
        if let Some(location) = record.location() {
            fields.push(("CODE_FILE", location.file.clone()));
            fields.push(("CODE_LINE", location.line.to_string()));
        }
        fields
    }
}

/// Journal priority for a record's syslog priority
#[cfg(feature = "journald")]
fn journal_priority(priority: Priority) -> JournalPriority {
    match priority {
        Priority::Emergency => JournalPriority::Emergency,
        Priority::Alert => JournalPriority::Alert,
        Priority::Critical => JournalPriority::Critical,
        Priority::Error => JournalPriority::Error,
        Priority::Warning => JournalPriority::Warning,
        Priority::Notice => JournalPriority::Notice,
        Priority::Info => JournalPriority::Info,
        Priority::Debug => JournalPriority::Debug,
    }
}

#[cfg(feature = "journald")]
impl crate::sinks::Sink for JournaldSink {
    fn name(&self) -> &str {
        "journald"
    }

    fn write(&self, record: &LogRecord) -> Result<()> {
        let message = self.formatter.render(record);
        let fields = self.fields(record);
        logging::journal_send(
            journal_priority(record.severity().priority()),
            &message,
            fields.iter().map(|(key, value)| (*key, value.as_str())),
        )
        .map_err(|e| LogWeaveError::Journald(e.to_string()))
    }
}

/// Fallback implementation when journald feature is not enabled
#[cfg(not(feature = "journald"))]
pub struct JournaldSink;

#[cfg(not(feature = "journald"))]
impl JournaldSink {
    /// Always fails: the `journald` feature is disabled.
    pub fn connect(_settings: &JournaldSettings, _node: &str) -> Result<Self> {
        Err(LogWeaveError::Journald(
            "Journald support not compiled in. Enable 'journald' feature.".to_string(),
        ))
    }

    /// Always false without the `journald` feature
    pub fn is_available() -> bool {
        false
    }
}

#[cfg(not(feature = "journald"))]
impl crate::sinks::Sink for JournaldSink {
    fn name(&self) -> &str {
        "journald"
    }

    fn write(&self, _record: &crate::types::LogRecord) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journald_not_available_without_feature() {
        #[cfg(not(feature = "journald"))]
        {
            assert!(!JournaldSink::is_available());
            let result = JournaldSink::connect(&JournaldSettings::default(), "test-daemon");
            match result {
                Err(LogWeaveError::Journald(msg)) => {
                    assert!(msg.contains("Journald support not compiled in"));
                }
                _ => panic!("Expected Journald error"),
            }
        }
    }

    #[test]
    #[cfg(feature = "journald")]
    fn test_priority_follows_severity() {
        use crate::types::Severity;

        for severity in Severity::ALL {
            let priority = severity.priority();
            assert_eq!(journal_priority(priority) as u8, priority.code());
        }

        let error = journal_priority(Severity::Error.priority()) as u8;
        let fatal = journal_priority(Severity::Fatal.priority()) as u8;
        assert_ne!(error, fatal);
        assert_eq!(fatal, 2);
    }

    #[test]
    #[cfg(feature = "journald")]
    fn test_fields() {
        use crate::types::Severity;

        let sink = JournaldSink {
            identifier: "worker".to_string(),
            node: "worker-1".to_string(),
            formatter: Box::new(MessageFormatter),
        };

        let plain = sink.fields(&LogRecord::new(Severity::Info, "x"));
        assert_eq!(
            plain,
            vec![
                ("SYSLOG_IDENTIFIER", "worker".to_string()),
                ("NODE", "worker-1".to_string()),
            ]
        );

        let located = sink.fields(
            &LogRecord::new(Severity::Fatal, "x")
                .with_node("other")
                .at("src/main.rs", 17),
        );
        assert!(located.contains(&("NODE", "other".to_string())));
        assert!(located.contains(&("CODE_FILE", "src/main.rs".to_string())));
        assert!(located.contains(&("CODE_LINE", "17".to_string())));
    }

    #[test]
    #[cfg(feature = "journald")]
    fn test_journald_sink_creation() {
        use crate::sinks::Sink;
        use crate::types::Severity;

        // Only meaningful where a journal daemon is running.
        if JournaldSink::is_available() {
            let sink = JournaldSink::connect(&JournaldSettings::default(), "test-daemon").unwrap();
            assert_eq!(sink.node, "test-daemon");
            for severity in Severity::ALL {
                assert!(sink.write(&LogRecord::new(severity, "journald test")).is_ok());
            }
        } else {
            assert!(JournaldSink::connect(&JournaldSettings::default(), "test-daemon").is_err());
        }
    }
}
