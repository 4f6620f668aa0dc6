//! Testing utilities for hookwire.
//!
//! # Features
//!
//! - [`RecordingListener`]: A listener that records every payload it receives
//! - [`FailingListener`]: A listener that always fails
//! - [`CountingHandler`]: A route handler that counts invocations

use hookwire_core::{BoxError, Handler, Listener, Message, Params, Request};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records the payloads it receives.
///
/// Clones share their storage, so keep one clone for assertions and hand
/// the other to the bus.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::<String>::new();
/// bus.on_default("save_post", recorder.clone());
/// bus.trigger("save_post", "42".into())?;
/// assert_eq!(recorder.payloads(), vec!["42".to_string()]);
/// ```
pub struct RecordingListener<P> {
    calls: Arc<Mutex<Vec<(P, Vec<P>)>>>,
    replacement: Option<P>,
}

impl<P: Message> RecordingListener<P> {
    /// Creates a recorder that returns its input unchanged.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            replacement: None,
        }
    }

    /// Creates a recorder that returns `value` instead of its input.
    pub fn returning(value: P) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            replacement: Some(value),
        }
    }

    /// Payloads received, in call order.
    pub fn payloads(&self) -> Vec<P> {
        self.calls.lock().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Extra arguments received with each call.
    pub fn args(&self) -> Vec<Vec<P>> {
        self.calls.lock().iter().map(|(_, a)| a.clone()).collect()
    }

    /// Number of calls.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forgets all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl<P: Message> Default for RecordingListener<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Message> Clone for RecordingListener<P> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            replacement: self.replacement.clone(),
        }
    }
}

impl<P: Message> Listener<P> for RecordingListener<P> {
    fn call(&self, value: P, args: &[P]) -> Result<P, BoxError> {
        self.calls.lock().push((value.clone(), args.to_vec()));
        Ok(self.replacement.clone().unwrap_or(value))
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that always returns an error with the given message.
#[derive(Debug, Clone)]
pub struct FailingListener {
    message: String,
    calls: Arc<AtomicUsize>,
}

impl FailingListener {
    /// Creates a listener failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the listener was invoked.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: Message> Listener<P> for FailingListener {
    fn call(&self, _value: P, _args: &[P]) -> Result<P, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A route handler that returns a fixed output and remembers the captures
/// of every call.
///
/// # Example
///
/// ```rust,ignore
/// let handler = CountingHandler::new("post");
/// router.get("/blog/{slug}", handler.clone())?;
/// router.dispatch(Method::Get, "/blog/hello", Value::Null)?;
/// assert_eq!(handler.count(), 1);
/// ```
pub struct CountingHandler<O> {
    output: O,
    captured: Arc<Mutex<Vec<Params>>>,
}

impl<O: Clone> CountingHandler<O> {
    /// Creates a handler returning clones of `output`.
    pub fn new(output: O) -> Self {
        Self {
            output,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of invocations.
    pub fn count(&self) -> usize {
        self.captured.lock().len()
    }

    /// Captures passed to each invocation.
    pub fn captured(&self) -> Vec<Params> {
        self.captured.lock().clone()
    }
}

impl<O: Clone> Clone for CountingHandler<O> {
    fn clone(&self) -> Self {
        Self {
            output: self.output.clone(),
            captured: Arc::clone(&self.captured),
        }
    }
}

impl<O: Clone + Send + Sync + 'static> Handler<O> for CountingHandler<O> {
    fn call(&self, request: &Request<'_>) -> Result<O, BoxError> {
        self.captured.lock().push(request.params().clone());
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bus::EventBus, routing::Router};
    use hookwire_core::Method;
    use serde_json::Value;

    #[test]
    fn test_recording_listener_shares_storage() {
        let bus = EventBus::<String>::new();
        let recorder = RecordingListener::new();
        bus.on_default("save_post", recorder.clone());

        bus.trigger("save_post", "42".into()).unwrap();
        bus.filter("save_post", "7".into(), &["extra".into()]).unwrap();

        assert_eq!(recorder.payloads(), vec!["42".to_string(), "7".to_string()]);
        assert_eq!(recorder.args()[1], vec!["extra".to_string()]);
        recorder.clear();
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_recording_listener_replacement() {
        let bus = EventBus::<i32>::new();
        bus.on_default("e", RecordingListener::returning(99));
        assert_eq!(bus.filter("e", 1, &[]).unwrap(), 99);
    }

    #[test]
    fn test_failing_listener() {
        let bus = EventBus::<i32>::new();
        let failing = FailingListener::new("nope");
        bus.on_default("e", failing.clone());

        let err = bus.trigger("e", 0).unwrap_err();
        assert_eq!(err.source.to_string(), "nope");
        assert_eq!(failing.count(), 1);
    }

    #[test]
    fn test_counting_handler() {
        let router = Router::new();
        let handler = CountingHandler::new("post");
        router.get("/blog/{slug}", handler.clone()).unwrap();

        router.dispatch(Method::Get, "/blog/hello", Value::Null).unwrap();
        router.dispatch(Method::Get, "/blog/world", Value::Null).unwrap();

        assert_eq!(handler.count(), 2);
        assert_eq!(handler.captured()[1].get("slug"), Some("world"));
    }
}
