//! Core value types: severity levels, log records and timed actions

pub mod record;
pub mod severity;
pub mod timed_action;

pub use record::{Location, LogRecord};
pub use severity::{Priority, Severity};
pub use timed_action::TimedAction;
