//! Tests for the environment bootstrapper.
//!
//! Responsibilities:
//! - Test the documented override-file scenarios end to end.
//! - Test `.env` discovery relative to the working directory.
//! - Test confirmation logging and the required-key policy.
//!
//! Invariants:
//! - Tests touching the process environment or cwd use `serial_test` and `env_lock()`.
//! - Tests never install a global subscriber; logs are captured per thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::Level;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Minimal in-test tracing subscriber recording `(level, message)` pairs.
#[derive(Clone, Default)]
struct CapturingSubscriber {
    events: Arc<Mutex<Vec<(Level, String)>>>,
    next_id: Arc<AtomicU64>,
}

struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

impl tracing::Subscriber for CapturingSubscriber {
    fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::span::Id::from_u64(id)
    }

    fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        let mut visitor = MessageVisitor { message: None };
        event.record(&mut visitor);
        if let Some(msg) = visitor.message {
            self.events
                .lock()
                .expect("lock poisoned")
                .push((*event.metadata().level(), msg));
        }
    }

    fn enter(&self, _span: &tracing::span::Id) {}

    fn exit(&self, _span: &tracing::span::Id) {}

    fn register_callsite(
        &self,
        _metadata: &'static tracing::Metadata<'static>,
    ) -> tracing::subscriber::Interest {
        tracing::subscriber::Interest::always()
    }
}

/// Run `f` with a thread-local subscriber and return every event at INFO or above.
pub fn capture_logs<F: FnOnce()>(f: F) -> Vec<(Level, String)> {
    let subscriber = CapturingSubscriber::default();
    let dispatch = tracing::Dispatch::new(subscriber.clone());
    tracing::dispatcher::with_default(&dispatch, f);
    let events = std::mem::take(&mut *subscriber.events.lock().expect("lock poisoned"));
    events
        .into_iter()
        .filter(|(level, _)| *level <= Level::INFO)
        .collect()
}
