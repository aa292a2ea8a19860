//! Leveled logging macros.
//!
//! All macros take `format!`-style arguments and record the call site's file
//! and line. The plain forms emit through the process-wide dispatcher (see
//! [`global`](crate::global)) and do nothing before it is set up; the `_to`
//! forms take a dispatcher explicitly.
//!
//! The `_throttle` forms take a maximum rate in records per second first.
//! Each macro invocation is its own call site, keyed by file, line and
//! column; calls over the rate are dropped before the message is formatted.

// ============================================================================
// 1. GENERIC MACROS
// ============================================================================

/// Emit a record at an explicit source location.
#[macro_export]
macro_rules! log_at {
    ($severity:expr, $file:expr, $line:expr, $($arg:tt)+) => {{
        if let ::std::option::Option::Some(__dispatcher) = $crate::global::dispatcher() {
            __dispatcher.emit(
                $crate::LogRecord::new($severity, ::std::format!($($arg)+)).at($file, $line),
            );
        }
    }};
}

/// Emit a record with the given severity.
#[macro_export]
macro_rules! emit {
    ($severity:expr, $($arg:tt)+) => {
        $crate::log_at!($severity, ::std::file!(), ::std::line!(), $($arg)+)
    };
}

/// Emit a record through an explicitly passed dispatcher.
#[macro_export]
macro_rules! emit_to {
    ($dispatcher:expr, $severity:expr, $($arg:tt)+) => {
        $dispatcher.emit(
            $crate::LogRecord::new($severity, ::std::format!($($arg)+))
                .at(::std::file!(), ::std::line!()),
        )
    };
}

/// Emit a record unless this call site exceeded `rate` records per second.
#[macro_export]
macro_rules! emit_throttle {
    ($rate:expr, $severity:expr, $($arg:tt)+) => {{
        if let ::std::option::Option::Some(__dispatcher) = $crate::global::dispatcher() {
            $crate::emit_throttle_to!(__dispatcher, $rate, $severity, $($arg)+);
        }
    }};
}

/// Throttled emission through an explicitly passed dispatcher. Evaluates to
/// whether a record was emitted.
#[macro_export]
macro_rules! emit_throttle_to {
    ($dispatcher:expr, $rate:expr, $severity:expr, $($arg:tt)+) => {
        $dispatcher.emit_throttled(
            ::std::concat!(::std::file!(), ":", ::std::line!(), ":", ::std::column!()),
            ($rate) as f64,
            $severity,
            |__severity| {
                $crate::LogRecord::new(__severity, ::std::format!($($arg)+))
                    .at(::std::file!(), ::std::line!())
            },
        )
    };
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS
// ============================================================================

/// Emit a debug record.
#[macro_export]
macro_rules! debug   { ($($arg:tt)+) => { $crate::emit!($crate::Severity::Debug, $($arg)+) } }
/// Emit an info record.
#[macro_export]
macro_rules! info    { ($($arg:tt)+) => { $crate::emit!($crate::Severity::Info, $($arg)+) } }
/// Emit a success record.
#[macro_export]
macro_rules! success { ($($arg:tt)+) => { $crate::emit!($crate::Severity::Success, $($arg)+) } }
/// Emit a warning record.
#[macro_export]
macro_rules! warn    { ($($arg:tt)+) => { $crate::emit!($crate::Severity::Warning, $($arg)+) } }
/// Emit an error record.
#[macro_export]
macro_rules! error   { ($($arg:tt)+) => { $crate::emit!($crate::Severity::Error, $($arg)+) } }
/// Emit a fatal record.
#[macro_export]
macro_rules! fatal   { ($($arg:tt)+) => { $crate::emit!($crate::Severity::Fatal, $($arg)+) } }

// ---------------------- THROTTLED ----------------------

/// Emit a debug record at most `rate` times per second from this call site.
#[macro_export]
macro_rules! debug_throttle   { ($rate:expr, $($arg:tt)+) => { $crate::emit_throttle!($rate, $crate::Severity::Debug, $($arg)+) } }
/// Emit an info record at most `rate` times per second from this call site.
#[macro_export]
macro_rules! info_throttle    { ($rate:expr, $($arg:tt)+) => { $crate::emit_throttle!($rate, $crate::Severity::Info, $($arg)+) } }
/// Emit a success record at most `rate` times per second from this call site.
#[macro_export]
macro_rules! success_throttle { ($rate:expr, $($arg:tt)+) => { $crate::emit_throttle!($rate, $crate::Severity::Success, $($arg)+) } }
/// Emit a warning record at most `rate` times per second from this call site.
#[macro_export]
macro_rules! warn_throttle    { ($rate:expr, $($arg:tt)+) => { $crate::emit_throttle!($rate, $crate::Severity::Warning, $($arg)+) } }
/// Emit an error record at most `rate` times per second from this call site.
#[macro_export]
macro_rules! error_throttle   { ($rate:expr, $($arg:tt)+) => { $crate::emit_throttle!($rate, $crate::Severity::Error, $($arg)+) } }
/// Emit a fatal record at most `rate` times per second from this call site.
#[macro_export]
macro_rules! fatal_throttle   { ($rate:expr, $($arg:tt)+) => { $crate::emit_throttle!($rate, $crate::Severity::Fatal, $($arg)+) } }
