//! Bridge from `tracing` events

use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use super::LegacyBridge;
use crate::dispatch::Dispatcher;
use crate::types::Severity;

/// Subscriber layer forwarding every event to a dispatcher
///
/// The event's `message` becomes the record text; other fields are appended
/// as `name=value`. Spans are ignored.
pub struct TracingBridge {
    inner: LegacyBridge,
}

impl TracingBridge {
    /// Bridge into `dispatcher`
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            inner: LegacyBridge::new(dispatcher, "tracing"),
        }
    }

    /// Enable or disable the migration warning
    pub fn warn_on_use(self, warn: bool) -> Self {
        Self {
            inner: self.inner.warn_on_use(warn),
        }
    }
}

/// Map a `tracing` level onto a [`Severity`]
pub fn severity_from_tracing(level: &Level) -> Severity {
    if *level == Level::ERROR {
        Severity::Error
    } else if *level == Level::WARN {
        Severity::Warning
    } else if *level == Level::INFO {
        Severity::Info
    } else {
        Severity::Debug
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for TracingBridge {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = severity_from_tracing(metadata.level());
        if severity < self.inner.dispatcher().min_level() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let mut message = visitor.message;
        message.push_str(&visitor.fields);

        self.inner
            .forward(severity, message, metadata.file(), metadata.line());
    }
}
