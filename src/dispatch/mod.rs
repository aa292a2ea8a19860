//! The dispatcher: owns the sinks and fans records out to them

pub mod guard;
pub mod throttle;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::config::LoggingConfig;
use crate::sinks::{ConsoleSink, FailureAction, FileSink, JournaldSink, Sink, SyslogSink};
use crate::types::{LogRecord, Severity};
use crate::{LogWeaveError, Result};

pub use guard::InitGuard;
pub use throttle::RateLimiter;

/// Handle of a registered sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

#[derive(Clone)]
struct SinkEntry {
    id: SinkId,
    sink: Arc<dyn Sink>,
}

/// Routes records to every registered sink
///
/// `emit` runs on the caller's thread and returns once every sink has been
/// written to. The sink list is replaced copy-on-write, so emitting threads
/// never block each other or a concurrent registration. A sink whose write
/// fails may ask to be detached; the dispatcher removes it by id after the
/// fan-out completes and reports the failure through the remaining sinks.
pub struct Dispatcher {
    sinks: ArcSwap<Vec<SinkEntry>>,
    next_id: AtomicU64,
    guard: InitGuard,
    node: OnceLock<String>,
    min_level: AtomicU8,
    bridge_warnings: AtomicBool,
    limiter: RateLimiter,
    console_writer: Mutex<Option<Box<dyn Write + Send>>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// An uninitialized dispatcher without sinks
    pub fn new() -> Self {
        Self {
            sinks: ArcSwap::from_pointee(Vec::new()),
            next_id: AtomicU64::new(0),
            guard: InitGuard::new(),
            node: OnceLock::new(),
            min_level: AtomicU8::new(Severity::Debug.as_u8()),
            bridge_warnings: AtomicBool::new(true),
            limiter: RateLimiter::new(),
            console_writer: Mutex::new(None),
        }
    }

    /// Like [`Dispatcher::new`], but the console sink created by
    /// [`Dispatcher::initialize`] writes to `writer` instead of stderr.
    pub fn with_console_writer(writer: impl Write + Send + 'static) -> Self {
        let dispatcher = Self::new();
        *dispatcher.console_writer.lock() = Some(Box::new(writer));
        dispatcher
    }

    /// Configure node name, level filter and the sinks enabled in `config`.
    ///
    /// Only the first call has any effect; later calls report an error through
    /// the existing sinks (or stderr when there are none) and return `false`.
    /// Sinks that cannot be opened are reported the same way and skipped.
    pub fn initialize(&self, config: &LoggingConfig) -> bool {
        self.try_initialize(config).is_ok()
    }

    /// Like [`Dispatcher::initialize`], but a rejected call also returns
    /// [`LogWeaveError::AlreadyInitialized`].
    pub fn try_initialize(&self, config: &LoggingConfig) -> Result<()> {
        if !self.guard.claim() {
            self.report(format!(
                "Logging is already initialized; ignoring setup for node `{}'",
                config.node
            ));
            return Err(LogWeaveError::AlreadyInitialized);
        }

        let _ = self.node.set(config.node.clone());
        self.min_level
            .store(config.min_level.as_u8(), Ordering::Relaxed);
        self.bridge_warnings
            .store(config.bridge_warnings, Ordering::Relaxed);

        if config.console.enabled {
            let formatter = ConsoleSink::formatter_for(config.console.format);
            let sink = match self.console_writer.lock().take() {
                Some(writer) => ConsoleSink::with_writer(writer, formatter),
                None => ConsoleSink::stderr(formatter),
            };
            self.add_sink(sink);
        }

        if config.syslog.enabled {
            match SyslogSink::connect(&config.syslog, &config.node) {
                Ok(sink) => {
                    self.add_sink(sink);
                }
                Err(e) => self.report(format!("Failed to open syslog: {}", e)),
            }
        }

        if config.journald.enabled {
            match JournaldSink::connect(&config.journald, &config.node) {
                Ok(sink) => {
                    self.add_sink(sink);
                }
                Err(e) => self.report(format!("Failed to open journald: {}", e)),
            }
        }

        if let Some(path) = &config.log_file {
            match FileSink::open(path) {
                Ok(sink) => {
                    self.add_sink(sink);
                }
                Err(e) => self.report(format!(
                    "Failed to create log file `{}': {}",
                    path.display(),
                    e
                )),
            }
        }

        Ok(())
    }

    /// Whether [`Dispatcher::initialize`] has run
    pub fn is_initialized(&self) -> bool {
        self.guard.is_claimed()
    }

    /// Node name stamped onto records, once initialized
    pub fn node(&self) -> Option<&str> {
        self.node.get().map(String::as_str)
    }

    /// Records below this level are discarded
    pub fn min_level(&self) -> Severity {
        Severity::from_u8(self.min_level.load(Ordering::Relaxed)).unwrap_or(Severity::Debug)
    }

    /// Whether bridges should flag records that bypass the native macros
    pub fn bridge_warnings(&self) -> bool {
        self.bridge_warnings.load(Ordering::Relaxed)
    }

    /// Per-call-site limiter used by [`Dispatcher::emit_throttled`]
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Register a sink
    pub fn add_sink(&self, sink: impl Sink + 'static) -> SinkId {
        let entry = SinkEntry {
            id: SinkId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            sink: Arc::new(sink),
        };
        let id = entry.id;
        self.sinks.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push(entry.clone());
            next
        });
        id
    }

    /// Unregister a sink. Returns `true` only if this call removed it.
    pub fn remove_sink(&self, id: SinkId) -> bool {
        let mut removed = false;
        self.sinks.rcu(|current| {
            let mut next = Vec::clone(current);
            let before = next.len();
            next.retain(|entry| entry.id != id);
            removed = next.len() != before;
            next
        });
        removed
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.load().len()
    }

    /// Diagnostic names of the registered sinks, in registration order
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks
            .load()
            .iter()
            .map(|entry| entry.sink.name().to_string())
            .collect()
    }

    /// Stamp `record` with the node name and write it to every sink.
    ///
    /// Never fails: sink errors are handled by each sink's
    /// [`FailureAction`].
    pub fn emit(&self, record: LogRecord) {
        if record.severity() < self.min_level() {
            return;
        }
        self.deliver(record);
    }

    /// Emit a `severity` record built by `make` unless the level filter or
    /// the limiter rejects a call at `site`. Rejected calls never build the
    /// record, and calls below the minimum level leave the site's window
    /// untouched. Returns whether a record was emitted.
    pub fn emit_throttled<F>(&self, site: &str, max_rate: f64, severity: Severity, make: F) -> bool
    where
        F: FnOnce(Severity) -> LogRecord,
    {
        if severity < self.min_level() {
            return false;
        }
        if !self.limiter.should_emit(site, Instant::now(), max_rate) {
            return false;
        }
        self.emit(make(severity));
        true
    }

    /// Flush every sink, ignoring failures.
    pub fn flush(&self) {
        for entry in self.sinks.load().iter() {
            let _ = entry.sink.flush();
        }
    }

    fn deliver(&self, record: LogRecord) {
        let record = record.stamped(self.node());

        let mut detached = Vec::new();
        {
            let sinks = self.sinks.load();
            for entry in sinks.iter() {
                if let Err(error) = entry.sink.write(&record) {
                    if let FailureAction::Detach(diagnostic) = entry.sink.on_write_error(&error) {
                        detached.push((entry.id, diagnostic));
                    }
                }
            }
        }

        for (id, diagnostic) in detached {
            if self.remove_sink(id) {
                self.deliver(LogRecord::new(Severity::Error, diagnostic));
            }
        }
    }

    /// Report a problem of the logging core itself.
    fn report(&self, message: String) {
        if self.sinks.load().is_empty() {
            eprintln!("logweave: {}", message);
        } else {
            self.deliver(LogRecord::new(Severity::Error, message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Formatter, TextFormatter};
    use std::io;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    /// Records every message it receives
    #[derive(Default)]
    struct MemorySink {
        name: String,
        lines: Mutex<Vec<String>>,
    }

    impl MemorySink {
        fn named(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                lines: Mutex::new(Vec::new()),
            })
        }

        fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }
    }

    impl Sink for Arc<MemorySink> {
        fn name(&self) -> &str {
            &self.name
        }

        fn write(&self, record: &LogRecord) -> Result<()> {
            let line = TextFormatter::without_timestamp().render(record);
            self.lines.lock().push(line);
            Ok(())
        }
    }

    /// Fails every write after the first `ok` writes
    struct BrokenSink {
        ok: usize,
        writes: AtomicUsize,
        policy: FailureAction,
    }

    impl Sink for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        fn write(&self, _record: &LogRecord) -> Result<()> {
            if self.writes.fetch_add(1, Ordering::SeqCst) < self.ok {
                Ok(())
            } else {
                Err(LogWeaveError::Io(io::Error::new(io::ErrorKind::Other, "device gone")))
            }
        }

        fn on_write_error(&self, error: &LogWeaveError) -> FailureAction {
            match &self.policy {
                FailureAction::Detach(prefix) => FailureAction::Detach(format!("{}: {}", prefix, error)),
                FailureAction::Ignore => FailureAction::Ignore,
            }
        }
    }

    fn quiet_config(node: &str) -> LoggingConfig {
        let mut config = LoggingConfig::new("", node);
        config.console.enabled = false;
        config.syslog.enabled = false;
        config
    }

    #[test]
    fn test_emit_reaches_every_sink_in_order() {
        let dispatcher = Dispatcher::new();
        dispatcher.initialize(&quiet_config("worker-1"));
        let first = MemorySink::named("first");
        let second = MemorySink::named("second");
        dispatcher.add_sink(Arc::clone(&first));
        dispatcher.add_sink(Arc::clone(&second));

        for i in 0..3 {
            dispatcher.emit(LogRecord::new(Severity::Info, format!("message {}", i)));
        }

        let expected: Vec<String> = (0..3)
            .map(|i| format!("[ INFO] [worker-1] message {}", i))
            .collect();
        assert_eq!(first.lines(), expected);
        assert_eq!(second.lines(), expected);
    }

    #[test]
    fn test_node_stamping() {
        let dispatcher = Dispatcher::new();
        let sink = MemorySink::named("mem");
        dispatcher.add_sink(Arc::clone(&sink));

        dispatcher.emit(LogRecord::new(Severity::Info, "before"));
        dispatcher.initialize(&quiet_config("node-a"));
        dispatcher.emit(LogRecord::new(Severity::Info, "after"));
        dispatcher.emit(LogRecord::new(Severity::Info, "own").with_node("node-b"));

        assert_eq!(
            sink.lines(),
            vec![
                "[ INFO] [] before",
                "[ INFO] [node-a] after",
                "[ INFO] [node-b] own",
            ]
        );
    }

    #[test]
    fn test_second_initialize_is_rejected() {
        let dispatcher = Dispatcher::new();
        let sink = MemorySink::named("mem");
        assert!(dispatcher.initialize(&quiet_config("first")));
        dispatcher.add_sink(Arc::clone(&sink));
        let names = dispatcher.sink_names();

        let mut second = LoggingConfig::new("/tmp/never-created.log", "second");
        second.syslog.enabled = false;
        assert!(!dispatcher.initialize(&second));

        assert_eq!(dispatcher.sink_names(), names);
        assert_eq!(dispatcher.node(), Some("first"));
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[ERROR] [first]"));
        assert!(lines[0].contains("already initialized"));
    }

    #[test]
    fn test_second_initialize_without_sinks_does_not_panic() {
        let dispatcher = Dispatcher::new();
        assert!(dispatcher.initialize(&quiet_config("n")));
        assert!(matches!(
            dispatcher.try_initialize(&quiet_config("n")),
            Err(LogWeaveError::AlreadyInitialized)
        ));
        assert_eq!(dispatcher.sink_count(), 0);
    }

    #[test]
    fn test_concurrent_initialize_has_one_winner() {
        let dispatcher = Arc::new(Dispatcher::new());
        let winners: usize = (0..8)
            .map(|i| {
                let dispatcher = Arc::clone(&dispatcher);
                thread::spawn(move || dispatcher.initialize(&quiet_config(&format!("node-{}", i))))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap() as usize)
            .sum();

        assert_eq!(winners, 1);
        assert!(dispatcher.node().unwrap().starts_with("node-"));
    }

    #[test]
    fn test_failing_sink_detaches_once() {
        let dispatcher = Dispatcher::new();
        dispatcher.initialize(&quiet_config("n"));
        let healthy = MemorySink::named("healthy");
        dispatcher.add_sink(Arc::clone(&healthy));
        dispatcher.add_sink(BrokenSink {
            ok: 1,
            writes: AtomicUsize::new(0),
            policy: FailureAction::Detach("broken sink failed".to_string()),
        });

        for i in 0..4 {
            dispatcher.emit(LogRecord::new(Severity::Info, format!("m{}", i)));
        }

        assert_eq!(dispatcher.sink_names(), vec!["healthy"]);
        let lines = healthy.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "[ INFO] [n] m0");
        assert_eq!(lines[1], "[ INFO] [n] m1");
        assert!(lines[2].starts_with("[ERROR] [n] broken sink failed"));
        assert!(lines[2].contains("device gone"));
        assert_eq!(lines[3], "[ INFO] [n] m2");
        assert_eq!(lines[4], "[ INFO] [n] m3");
    }

    #[test]
    fn test_ignored_failure_keeps_sink() {
        let dispatcher = Dispatcher::new();
        dispatcher.add_sink(BrokenSink {
            ok: 0,
            writes: AtomicUsize::new(0),
            policy: FailureAction::Ignore,
        });
        dispatcher.emit(LogRecord::new(Severity::Info, "x"));
        dispatcher.emit(LogRecord::new(Severity::Info, "y"));
        assert_eq!(dispatcher.sink_count(), 1);
    }

    #[test]
    fn test_remove_sink_reports_single_removal() {
        let dispatcher = Dispatcher::new();
        let id = dispatcher.add_sink(MemorySink::named("mem"));
        assert!(dispatcher.remove_sink(id));
        assert!(!dispatcher.remove_sink(id));
        assert_eq!(dispatcher.sink_count(), 0);
    }

    #[test]
    fn test_min_level_filter() {
        let dispatcher = Dispatcher::new();
        let mut config = quiet_config("n");
        config.min_level = Severity::Warning;
        dispatcher.initialize(&config);
        let sink = MemorySink::named("mem");
        dispatcher.add_sink(Arc::clone(&sink));

        for severity in Severity::ALL {
            dispatcher.emit(LogRecord::new(severity, severity.name()));
        }

        assert_eq!(
            sink.lines(),
            vec!["[ WARN] [n] warning", "[ERROR] [n] error", "[FATAL] [n] fatal"]
        );
    }

    #[test]
    fn test_throttled_emit_skips_record_construction() {
        let dispatcher = Dispatcher::new();
        let sink = MemorySink::named("mem");
        dispatcher.add_sink(Arc::clone(&sink));
        let built = AtomicUsize::new(0);

        let accepted = (0..5)
            .filter(|_| {
                dispatcher.emit_throttled("site", 0.001, Severity::Info, |severity| {
                    built.fetch_add(1, Ordering::SeqCst);
                    LogRecord::new(severity, "burst")
                })
            })
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(built.load(Ordering::SeqCst), 1);
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_filtered_throttled_call_keeps_window() {
        let dispatcher = Dispatcher::new();
        let sink = MemorySink::named("mem");
        dispatcher.add_sink(Arc::clone(&sink));
        let mut config = quiet_config("n");
        config.min_level = Severity::Warning;
        assert!(dispatcher.initialize(&config));

        let hidden = dispatcher.emit_throttled("site", 0.001, Severity::Debug, |severity| {
            LogRecord::new(severity, "hidden")
        });
        assert!(!hidden);
        assert!(dispatcher.limiter().is_empty());

        let shown = dispatcher.emit_throttled("site", 0.001, Severity::Error, |severity| {
            LogRecord::new(severity, "shown")
        });
        assert!(shown);
        assert_eq!(sink.lines(), vec!["[ERROR] [n] shown"]);
    }

    #[test]
    fn test_console_writer_used_by_initialize() {
        #[derive(Clone, Default)]
        struct SharedBuf(Arc<Mutex<Vec<u8>>>);

        impl Write for SharedBuf {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buf = SharedBuf::default();
        let dispatcher = Dispatcher::with_console_writer(buf.clone());
        let mut config = LoggingConfig::new("", "worker-1");
        config.syslog.enabled = false;
        config.console.format = crate::config::ConsoleFormat::Plain;
        dispatcher.initialize(&config);

        dispatcher.emit(LogRecord::new(Severity::Success, "ready"));
        let text = String::from_utf8(buf.0.lock().clone()).unwrap();
        assert!(text.ends_with("[ GOOD] [worker-1] ready\n"));
        assert_eq!(dispatcher.sink_names(), vec!["console"]);
    }
}
