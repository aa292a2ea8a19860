//! Timing of a single operation together with its outcome

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::{Duration, Instant, SystemTime};

/// Start, duration and outcome of one operation
///
/// The duration is measured on the monotonic clock; the start is also kept as
/// wall-clock time so that actions can be serialized and compared after the
/// fact. An action counts as succeeded once it holds a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct TimedAction<T> {
    value: Option<T>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    reason: String,
    start: Option<SystemTime>,
    duration: Duration,
    #[serde(skip)]
    clock: Option<Instant>,
}

impl<T> Default for TimedAction<T> {
    fn default() -> Self {
        Self {
            value: None,
            reason: String::new(),
            start: None,
            duration: Duration::ZERO,
            clock: None,
        }
    }
}

impl<T> TimedAction<T> {
    /// An action that has not started yet
    pub fn new() -> Self {
        Self::default()
    }

    /// An action started now
    pub fn started() -> Self {
        let mut action = Self::new();
        action.start();
        action
    }

    /// Time `operation`, recording its value or the error's text as the
    /// failure reason.
    pub fn run<E, F>(operation: F) -> Self
    where
        E: Display,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let mut action = Self::started();
        match operation() {
            Ok(value) => action.succeed(value),
            Err(error) => action.fail(error.to_string()),
        }
        action
    }

    /// (Re)start the action, discarding any earlier outcome.
    pub fn start(&mut self) {
        self.value = None;
        self.reason.clear();
        self.start = Some(SystemTime::now());
        self.duration = Duration::ZERO;
        self.clock = Some(Instant::now());
    }

    /// Finish successfully with `value`.
    pub fn succeed(&mut self, value: T) {
        self.finish();
        self.value = Some(value);
        self.reason.clear();
    }

    /// Finish unsuccessfully with `reason`.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.finish();
        self.value = None;
        self.reason = reason.into();
    }

    fn finish(&mut self) {
        if let Some(clock) = self.clock.take() {
            self.duration = clock.elapsed();
        }
    }

    /// Value of a successful action
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether the action holds a value
    pub fn succeeded(&self) -> bool {
        self.value.is_some()
    }

    /// Reason given for a failed action
    pub fn failure_reason(&self) -> Option<&str> {
        (!self.reason.is_empty()).then_some(self.reason.as_str())
    }

    /// Wall-clock start, if the action was started
    pub fn start_time(&self) -> Option<SystemTime> {
        self.start
    }

    /// Wall-clock end: start plus duration
    pub fn end_time(&self) -> Option<SystemTime> {
        self.start.map(|start| start + self.duration)
    }

    /// Time from start to finish
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time from the start of `other` to the end of this action. Zero when
    /// either action never started or this one ended before `other` began.
    pub fn time_since<U>(&self, other: &TimedAction<U>) -> Duration {
        match (self.end_time(), other.start_time()) {
            (Some(end), Some(start)) => end.duration_since(start).unwrap_or(Duration::ZERO),
            _ => Duration::ZERO,
        }
    }
}
