//! Process-wide dispatcher
//!
//! The logging macros emit through the dispatcher installed here. Code that
//! prefers explicit wiring can create its own [`Dispatcher`] and use
//! [`emit_to!`](crate::emit_to) instead.

use arc_swap::ArcSwapOption;
use std::sync::Arc;

use crate::config::LoggingConfig;
use crate::dispatch::Dispatcher;

static GLOBAL: ArcSwapOption<Dispatcher> = ArcSwapOption::const_empty();

/// The process-wide dispatcher, if one has been installed
pub fn dispatcher() -> Option<Arc<Dispatcher>> {
    GLOBAL.load_full()
}

/// Set up process-wide logging for `node`, appending to `log_file` unless it
/// is empty. Console and syslog switches come from the environment (see
/// [`LoggingConfig::from_env`]).
///
/// A second call leaves the existing setup untouched and reports an error
/// through it.
pub fn setup_logging(log_file: &str, node: &str) -> Arc<Dispatcher> {
    let config = LoggingConfig::from_env(log_file, node).unwrap_or_else(|e| {
        eprintln!("logweave: {}; using default sink selection", e);
        LoggingConfig::new(log_file, node)
    });
    init(&config)
}

/// Install the process-wide dispatcher (if needed) and initialize it with
/// `config`.
pub fn init(config: &LoggingConfig) -> Arc<Dispatcher> {
    let dispatcher = install();
    dispatcher.initialize(config);
    dispatcher
}

/// Install `dispatcher` as the process-wide dispatcher unless one exists.
/// Returns the dispatcher that ends up installed.
pub fn install_with(dispatcher: Dispatcher) -> Arc<Dispatcher> {
    let candidate = Some(Arc::new(dispatcher));
    let mut installed = None;
    let previous = GLOBAL.rcu(|current| match current {
        Some(existing) => Some(Arc::clone(existing)),
        None => {
            installed = candidate.clone();
            candidate.clone()
        }
    });
    previous.or(installed).unwrap_or_default()
}

fn install() -> Arc<Dispatcher> {
    match dispatcher() {
        Some(existing) => existing,
        None => install_with(Dispatcher::new()),
    }
}

/// Flush and uninstall the process-wide dispatcher. Later macro calls are
/// discarded until logging is set up again.
pub fn shutdown() -> Option<Arc<Dispatcher>> {
    let previous = GLOBAL.swap(None);
    if let Some(dispatcher) = &previous {
        dispatcher.flush();
    }
    previous
}
