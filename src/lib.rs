//! # logweave - process-wide logging core
//!
//! logweave fans a single stream of severity-tagged records out to several
//! destinations, each with its own formatting and failure handling.
//!
//! ## Features
//!
//! - **Multiple Sinks**: colored or systemd-framed console, append-only file,
//!   syslog, journald
//! - **Failure Isolation**: a sink that fails to write detaches itself and
//!   reports once through the sinks that still work
//! - **Throttling**: per-call-site rate limiting that drops records before
//!   they are formatted
//! - **Bridges**: records from the `log` and `tracing` facades are re-emitted
//!   through the same core
//!
//! ## Quick Start
//!
//! ```no_run
//! use logweave::global::setup_logging;
//!
//! setup_logging("/var/log/worker.log", "worker-1");
//!
//! logweave::info!("started with {} threads", 4);
//! logweave::warn!("disk at {}%", 90);
//!
//! for _ in 0..1000 {
//!     // At most two of these reach the sinks per second.
//!     logweave::debug_throttle!(2.0, "polling");
//! }
//! ```
//!
//! ## Explicit dispatcher
//!
//! ```
//! use logweave::config::{ConsoleFormat, LoggingConfig};
//! use logweave::dispatch::Dispatcher;
//!
//! let mut config = LoggingConfig::new("", "worker-1");
//! config.syslog.enabled = false;
//! config.console.format = ConsoleFormat::Plain;
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.initialize(&config);
//! logweave::emit_to!(dispatcher, logweave::Severity::Success, "ready");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod format;
pub mod global;
pub mod sinks;
pub mod types;

mod macros;

/// Common error types used throughout logweave
pub mod error {
    use std::fmt;

    /// logweave error types
    #[derive(Debug)]
    pub enum LogWeaveError {
        /// I/O operation failed
        Io(std::io::Error),
        /// Configuration error
        Config(String),
        /// Syslog transport error
        Syslog(String),
        /// Journald transport error
        Journald(String),
        /// Bridge registration error
        Bridge(String),
        /// The dispatcher was already initialized
        AlreadyInitialized,
    }

    impl fmt::Display for LogWeaveError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                LogWeaveError::Io(e) => write!(f, "I/O error: {}", e),
                LogWeaveError::Config(e) => write!(f, "Configuration error: {}", e),
                LogWeaveError::Syslog(e) => write!(f, "Syslog error: {}", e),
                LogWeaveError::Journald(e) => write!(f, "Journald error: {}", e),
                LogWeaveError::Bridge(e) => write!(f, "Bridge error: {}", e),
                LogWeaveError::AlreadyInitialized => {
                    write!(f, "Logging has already been initialized")
                }
            }
        }
    }

    impl std::error::Error for LogWeaveError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                LogWeaveError::Io(e) => Some(e),
                _ => None,
            }
        }
    }

    impl From<std::io::Error> for LogWeaveError {
        fn from(err: std::io::Error) -> Self {
            LogWeaveError::Io(err)
        }
    }

    /// Result type alias for logweave operations
    pub type Result<T> = std::result::Result<T, LogWeaveError>;
}

pub use error::{LogWeaveError, Result};
pub use types::{Location, LogRecord, Priority, Severity, TimedAction};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConsoleFormat, LoggingConfig};
    pub use crate::dispatch::{Dispatcher, RateLimiter, SinkId};
    pub use crate::format::{AnsiColorFormatter, Formatter, SystemdFormatter, TextFormatter};
    pub use crate::sinks::{ConsoleSink, FailureAction, FileSink, Sink};
    pub use crate::types::{LogRecord, Severity, TimedAction};
    pub use crate::{LogWeaveError, Result};
}
