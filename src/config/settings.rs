//! Configuration structures for logweave

use crate::types::Severity;
use crate::{LogWeaveError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables read by [`LoggingConfig::from_env`].
pub const ENV_PREFIX: &str = "LOG";

/// Top-level logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Node name attached to every record
    pub node: String,
    /// Append-mode log file; `None` disables the file sink
    pub log_file: Option<PathBuf>,
    /// Records below this level are discarded
    pub min_level: Severity,
    /// Whether bridges flag records that bypass the native macros
    pub bridge_warnings: bool,
    /// Console sink settings
    pub console: ConsoleSettings,
    /// Syslog sink settings
    pub syslog: SyslogSettings,
    /// Journald sink settings
    pub journald: JournaldSettings,
}

/// Console sink settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Enable the console sink
    pub enabled: bool,
    /// Line framing
    pub format: ConsoleFormat,
}

/// Console line framing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    /// Text layout wrapped in severity colors
    #[default]
    Colored,
    /// `<priority>`-prefixed lines for services running under systemd
    Systemd,
    /// Text layout without colors
    Plain,
}

/// Syslog sink settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyslogSettings {
    /// Enable the syslog sink
    pub enabled: bool,
    /// Syslog facility
    pub facility: SyslogFacility,
    /// Process name reported to syslog; defaults to the node name
    pub identifier: Option<String>,
}

/// Syslog facilities available to applications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum SyslogFacility {
    #[default]
    User,
    Daemon,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

/// Journald sink settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournaldSettings {
    /// Enable the journald sink
    pub enabled: bool,
    /// `SYSLOG_IDENTIFIER` field; defaults to the node name
    pub identifier: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            node: gethostname::gethostname().to_string_lossy().to_string(),
            log_file: None,
            min_level: Severity::Debug,
            bridge_warnings: true,
            console: ConsoleSettings::default(),
            syslog: SyslogSettings::default(),
            journald: JournaldSettings::default(),
        }
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            format: ConsoleFormat::Colored,
        }
    }
}

impl Default for SyslogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            facility: SyslogFacility::User,
            identifier: None,
        }
    }
}

impl LoggingConfig {
    /// Defaults for the given log file and node name. An empty `log_file`
    /// disables the file sink.
    pub fn new(log_file: &str, node: &str) -> Self {
        Self {
            node: node.to_string(),
            log_file: (!log_file.is_empty()).then(|| PathBuf::from(log_file)),
            ..Default::default()
        }
    }

    /// Like [`LoggingConfig::new`], with sink switches taken from the
    /// `LOG_USE_CONSOLE`, `LOG_CONSOLE_FORMAT` and `LOG_USE_SYSLOG`
    /// environment variables.
    pub fn from_env(log_file: &str, node: &str) -> Result<Self> {
        Self::from_environment(
            ::config::Environment::with_prefix(ENV_PREFIX),
            log_file,
            node,
        )
    }

    pub(crate) fn from_environment(
        source: ::config::Environment,
        log_file: &str,
        node: &str,
    ) -> Result<Self> {
        let env = ::config::Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| LogWeaveError::Config(format!("Failed to read environment: {}", e)))?;

        let mut config = Self::new(log_file, node);
        config.console.enabled = flag_enabled(env.get_string("use_console").ok().as_deref());
        config.syslog.enabled = flag_enabled(env.get_string("use_syslog").ok().as_deref());
        if env.get_string("console_format").ok().as_deref() == Some("systemd") {
            config.console.format = ConsoleFormat::Systemd;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LogWeaveError::Config(format!("Failed to read config file: {}", e)))?;

        let config: LoggingConfig = toml::from_str(&content)
            .map_err(|e| LogWeaveError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.node.is_empty() {
            return Err(LogWeaveError::Config("Node name cannot be empty".to_string()));
        }
        if self.node.contains(['\n', '\r']) {
            return Err(LogWeaveError::Config(
                "Node name cannot contain line breaks".to_string(),
            ));
        }
        Ok(())
    }
}

/// A switch is on unless explicitly set to `"0"`.
fn flag_enabled(value: Option<&str>) -> bool {
    value != Some("0")
}
