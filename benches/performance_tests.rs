//! Performance benchmarks for logweave

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logweave::dispatch::{Dispatcher, RateLimiter};
use logweave::format::{AnsiColorFormatter, Formatter, SystemdFormatter, TextFormatter};
use logweave::sinks::ConsoleSink;
use logweave::{emit_throttle_to, LogRecord, Severity};
use std::io;
use std::time::{Duration, Instant};

fn discarding_dispatcher(sinks: usize) -> Dispatcher {
    let dispatcher = Dispatcher::new();
    for _ in 0..sinks {
        dispatcher.add_sink(ConsoleSink::with_writer(io::sink(), TextFormatter::new()));
    }
    dispatcher
}

/// Benchmark the text layouts
fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");

    let record = LogRecord::new(Severity::Warning, "disk at 90% on /var")
        .with_node("server-01.example.com")
        .at("src/storage.rs", 42);

    let text = TextFormatter::new();
    let colored = AnsiColorFormatter::new(TextFormatter::new());
    let systemd = SystemdFormatter::new(TextFormatter::without_timestamp());

    group.bench_function("text", |b| b.iter(|| text.render(black_box(&record))));
    group.bench_function("colored", |b| b.iter(|| colored.render(black_box(&record))));
    group.bench_function("systemd", |b| b.iter(|| systemd.render(black_box(&record))));

    group.finish();
}

/// Benchmark synchronous fan-out by sink count
fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    group.throughput(Throughput::Elements(1));

    for sinks in [1usize, 2, 4, 8].iter() {
        let dispatcher = discarding_dispatcher(*sinks);
        group.bench_with_input(BenchmarkId::from_parameter(sinks), sinks, |b, _| {
            b.iter(|| dispatcher.emit(LogRecord::new(Severity::Info, "request served")))
        });
    }

    group.finish();
}

/// Benchmark records rejected by the level filter against accepted ones
fn bench_log_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_levels");

    let dispatcher = discarding_dispatcher(1);
    let mut config = logweave::config::LoggingConfig::new("", "bench");
    config.console.enabled = false;
    config.syslog.enabled = false;
    config.min_level = Severity::Warning;
    dispatcher.initialize(&config);

    for severity in [Severity::Debug, Severity::Info, Severity::Warning, Severity::Error] {
        group.bench_function(severity.name(), |b| {
            b.iter(|| dispatcher.emit(LogRecord::new(severity, "level check")))
        });
    }

    group.finish();
}

/// Benchmark throttle decisions
fn bench_throttle(c: &mut Criterion) {
    let mut group = c.benchmark_group("throttle");

    let limiter = RateLimiter::new();
    let now = Instant::now();
    limiter.should_emit("hot-site", now, 1.0);
    group.bench_function("rejected", |b| {
        b.iter(|| limiter.should_emit(black_box("hot-site"), now, 1.0))
    });

    let sites: Vec<String> = (0..1024).map(|i| format!("src/worker.rs:{}:9", i)).collect();
    let spread = RateLimiter::new();
    let mut clock = now;
    let mut next = 0;
    group.bench_function("many_sites", |b| {
        b.iter(|| {
            clock += Duration::from_millis(1);
            next = (next + 1) % sites.len();
            spread.should_emit(&sites[next], clock, 100.0)
        })
    });

    // A suppressed macro call must not pay for formatting.
    let dispatcher = discarding_dispatcher(1);
    group.bench_function("macro_suppressed", |b| {
        b.iter(|| emit_throttle_to!(dispatcher, 0.001, Severity::Info, "value {}", black_box(42)))
    });

    group.finish();
}

/// Benchmark large message handling
fn bench_large_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_messages");
    let dispatcher = discarding_dispatcher(2);

    for size in [1024usize, 16384, 65536].iter() {
        let message = "x".repeat(*size);
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| dispatcher.emit(LogRecord::new(Severity::Info, message.as_str())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_formatters,
    bench_fan_out,
    bench_log_levels,
    bench_throttle,
    bench_large_messages
);
criterion_main!(benches);
