//! logweave demo binary
//!
//! Sets up process-wide logging, then emits one record per severity, a
//! throttled burst and one record through each framework bridge.

use clap::Parser;
use logweave::config::LoggingConfig;
use logweave::{global, Severity};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_NODE: &str = "demo";

#[derive(Parser)]
#[command(name = "logweave-demo")]
#[command(about = "Emit sample records through logweave")]
#[command(version)]
struct Args {
    /// Configuration file path (TOML); the environment is used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append records to this file
    #[arg(short, long, default_value = "")]
    log_file: String,

    /// Node name stamped on every record; overrides the configuration file
    /// [default: demo]
    #[arg(short, long)]
    node: Option<String>,

    /// Number of calls in the throttled burst
    #[arg(long, default_value = "20")]
    burst: u32,

    /// Maximum records per second accepted from the burst
    #[arg(long, default_value = "5")]
    rate: f64,

    /// Do not warn after records arriving through a bridge
    #[arg(long)]
    no_bridge_warnings: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(&args)?;

    let dispatcher = global::init(&config);
    logweave::bridge::register_log_bridge(Arc::clone(&dispatcher), config.bridge_warnings)?;
    #[cfg(feature = "tracing-bridge")]
    install_tracing(&dispatcher)?;

    for severity in Severity::ALL {
        logweave::emit!(severity, "{} record from {}", severity, config.node);
    }

    for i in 0..args.burst {
        logweave::info_throttle!(args.rate, "burst call {} of {}", i + 1, args.burst);
        std::thread::sleep(Duration::from_millis(50));
    }

    log::info!("record through the log facade");
    #[cfg(feature = "tracing-bridge")]
    tracing::warn!(component = "demo", "record through tracing");

    logweave::success!("demo finished");
    global::shutdown();
    Ok(())
}

/// Configuration from `--config` or the environment, with command line
/// overrides applied on top.
fn load_config(args: &Args) -> logweave::Result<LoggingConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = LoggingConfig::from_file(path)?;
            if !args.log_file.is_empty() {
                config.log_file = Some(PathBuf::from(&args.log_file));
            }
            if let Some(node) = &args.node {
                config.node = node.clone();
            }
            config
        }
        None => LoggingConfig::from_env(
            &args.log_file,
            args.node.as_deref().unwrap_or(DEFAULT_NODE),
        )?,
    };
    if args.no_bridge_warnings {
        config.bridge_warnings = false;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "tracing-bridge")]
fn install_tracing(
    dispatcher: &Arc<logweave::dispatch::Dispatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    use logweave::bridge::TracingBridge;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(TracingBridge::new(Arc::clone(dispatcher)));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
