//! Bridge from the `log` facade

use std::sync::Arc;

use super::LegacyBridge;
use crate::dispatch::Dispatcher;
use crate::types::Severity;
use crate::{LogWeaveError, Result};

/// `log::Log` implementation forwarding every record to a dispatcher
pub struct LogBridge {
    inner: LegacyBridge,
}

impl LogBridge {
    /// Bridge into `dispatcher`
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            inner: LegacyBridge::new(dispatcher, "the `log` facade"),
        }
    }

    /// Enable or disable the migration warning
    pub fn warn_on_use(self, warn: bool) -> Self {
        Self {
            inner: self.inner.warn_on_use(warn),
        }
    }
}

/// Map a `log` level onto a [`Severity`]
pub fn severity_from_log(level: log::Level) -> Severity {
    match level {
        log::Level::Trace | log::Level::Debug => Severity::Debug,
        log::Level::Info => Severity::Info,
        log::Level::Warn => Severity::Warning,
        log::Level::Error => Severity::Error,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        severity_from_log(metadata.level()) >= self.inner.dispatcher().min_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.inner.forward(
            severity_from_log(record.level()),
            record.args().to_string(),
            record.file(),
            record.line(),
        );
    }

    fn flush(&self) {
        self.inner.dispatcher().flush();
    }
}

/// Install a [`LogBridge`] as the `log` facade's global logger.
///
/// The facade accepts one logger per process; a second registration fails
/// with [`LogWeaveError::Bridge`].
pub fn register_log_bridge(dispatcher: Arc<Dispatcher>, warn: bool) -> Result<()> {
    let bridge = LogBridge::new(dispatcher).warn_on_use(warn);
    log::set_boxed_logger(Box::new(bridge))
        .map_err(|e| LogWeaveError::Bridge(format!("Failed to install log bridge: {}", e)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
