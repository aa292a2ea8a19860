//! Configuration management for logweave

pub mod settings;

pub use settings::{
    ConsoleFormat, ConsoleSettings, JournaldSettings, LoggingConfig, SyslogFacility,
    SyslogSettings,
};
