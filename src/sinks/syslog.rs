//! Syslog sink over the local unix socket

use crate::config::SyslogSettings;
use crate::{LogWeaveError, Result};

#[cfg(feature = "syslog-backend")]
pub use backend::SyslogSink;

#[cfg(feature = "syslog-backend")]
mod backend {
    use parking_lot::Mutex;
    use ::syslog::{Facility, Formatter3164, Logger, LoggerBackend};

    use super::*;
    use crate::config::SyslogFacility;
    use crate::format::{Formatter, MessageFormatter};
    use crate::sinks::Sink;
    use crate::types::{LogRecord, Priority};

    /// Sends each record's message to syslog with its mapped priority
    pub struct SyslogSink {
        logger: Mutex<Logger<LoggerBackend, Formatter3164>>,
        formatter: Box<dyn Formatter>,
    }

    impl SyslogSink {
        /// Connect to the local syslog daemon. The process name defaults to
        /// `node`.
        pub fn connect(settings: &SyslogSettings, node: &str) -> Result<Self> {
            let formatter = Formatter3164 {
                facility: facility(settings.facility),
                hostname: None,
                process: settings
                    .identifier
                    .clone()
                    .unwrap_or_else(|| node.to_string()),
                pid: std::process::id() as _,
            };

            let logger = ::syslog::unix(formatter)
                .map_err(|e| LogWeaveError::Syslog(format!("Failed to connect: {}", e)))?;

            Ok(Self {
                logger: Mutex::new(logger),
                formatter: Box::new(MessageFormatter),
            })
        }
    }

    fn facility(facility: SyslogFacility) -> Facility {
        match facility {
            SyslogFacility::User => Facility::LOG_USER,
            SyslogFacility::Daemon => Facility::LOG_DAEMON,
            SyslogFacility::Local0 => Facility::LOG_LOCAL0,
            SyslogFacility::Local1 => Facility::LOG_LOCAL1,
            SyslogFacility::Local2 => Facility::LOG_LOCAL2,
            SyslogFacility::Local3 => Facility::LOG_LOCAL3,
            SyslogFacility::Local4 => Facility::LOG_LOCAL4,
            SyslogFacility::Local5 => Facility::LOG_LOCAL5,
            SyslogFacility::Local6 => Facility::LOG_LOCAL6,
            SyslogFacility::Local7 => Facility::LOG_LOCAL7,
        }
    }

    impl Sink for SyslogSink {
        fn name(&self) -> &str {
            "syslog"
        }

        fn write(&self, record: &LogRecord) -> Result<()> {
            let message = self.formatter.render(record);
            let mut logger = self.logger.lock();
            let sent = match record.severity().priority() {
                Priority::Emergency => logger.emerg(message),
                Priority::Alert => logger.alert(message),
                Priority::Critical => logger.crit(message),
                Priority::Error => logger.err(message),
                Priority::Warning => logger.warning(message),
                Priority::Notice => logger.notice(message),
                Priority::Info => logger.info(message),
                Priority::Debug => logger.debug(message),
            };
            sent.map_err(|e| LogWeaveError::Syslog(e.to_string()))
        }
    }
}

/// Fallback implementation when the syslog backend is not compiled in
#[cfg(not(feature = "syslog-backend"))]
pub struct SyslogSink;

#[cfg(not(feature = "syslog-backend"))]
impl SyslogSink {
    /// Always fails: the `syslog-backend` feature is disabled.
    pub fn connect(_settings: &SyslogSettings, _node: &str) -> Result<Self> {
        Err(LogWeaveError::Syslog(
            "Syslog support not compiled in. Enable 'syslog-backend' feature.".to_string(),
        ))
    }
}

#[cfg(not(feature = "syslog-backend"))]
impl crate::sinks::Sink for SyslogSink {
    fn name(&self) -> &str {
        "syslog"
    }

    fn write(&self, _record: &crate::types::LogRecord) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{FailureAction, Sink};

    #[test]
    fn test_connect_or_report() {
        // Containers frequently lack /dev/log; both outcomes are valid.
        match SyslogSink::connect(&SyslogSettings::default(), "test-node") {
            Ok(sink) => {
                assert_eq!(sink.name(), "syslog");
                let error = LogWeaveError::Syslog("gone".to_string());
                assert!(matches!(sink.on_write_error(&error), FailureAction::Detach(_)));
            }
            Err(LogWeaveError::Syslog(message)) => assert!(!message.is_empty()),
            Err(other) => panic!("Expected Syslog error, got {}", other),
        }
    }
}
