//! Bridges re-emitting other logging frameworks' events through a dispatcher

pub mod log_bridge;
#[cfg(feature = "tracing-bridge")]
pub mod tracing_bridge;

use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::types::{LogRecord, Severity};

pub use log_bridge::{register_log_bridge, LogBridge};
#[cfg(feature = "tracing-bridge")]
pub use tracing_bridge::TracingBridge;

/// Map a foreign level name onto a [`Severity`]. Unknown names map to
/// [`Severity::Info`].
pub fn map_external_level(level: &str) -> Severity {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" | "debug" | "fine" | "finer" | "finest" => Severity::Debug,
        "info" | "notice" => Severity::Info,
        "warn" | "warning" => Severity::Warning,
        "error" | "err" => Severity::Error,
        "fatal" | "critical" | "crit" | "alert" | "emerg" | "emergency" => Severity::Fatal,
        _ => Severity::Info,
    }
}

/// Framework-independent half of a bridge: turns one foreign event into a
/// record, plus an optional warning that the call site still uses the
/// foreign framework.
#[derive(Clone)]
pub struct LegacyBridge {
    dispatcher: Arc<Dispatcher>,
    framework: &'static str,
    warn: bool,
}

impl LegacyBridge {
    /// Bridge events from `framework` into `dispatcher`. Warnings follow the
    /// dispatcher's `bridge_warnings` setting.
    pub fn new(dispatcher: Arc<Dispatcher>, framework: &'static str) -> Self {
        let warn = dispatcher.bridge_warnings();
        Self {
            dispatcher,
            framework,
            warn,
        }
    }

    /// Enable or disable the migration warning
    pub fn warn_on_use(mut self, warn: bool) -> Self {
        self.warn = warn;
        self
    }

    /// Target dispatcher
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Emit one foreign event.
    pub fn forward(&self, severity: Severity, message: String, file: Option<&str>, line: Option<u32>) {
        self.dispatcher
            .emit(locate(LogRecord::new(severity, message), file, line));

        if self.warn {
            let hint = format!(
                "Message received via {}. Did you forget to switch to the native logging macros?",
                self.framework
            );
            self.dispatcher
                .emit(locate(LogRecord::new(Severity::Warning, hint), file, line));
        }
    }

    /// Emit one foreign event whose level is only known by name.
    pub fn forward_named(&self, level: &str, message: String, file: Option<&str>, line: Option<u32>) {
        self.forward(map_external_level(level), message, file, line);
    }
}

fn locate(record: LogRecord, file: Option<&str>, line: Option<u32>) -> LogRecord {
    match file {
        Some(file) => record.at(file, line.unwrap_or(0)),
        None => record,
    }
}
