#![allow(dead_code)]

use hookwire::{BoxError, Listener, Message, Request};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

// ============================================================================
// Order Recording
// ============================================================================

/// Shared log of listener tags, in invocation order.
#[derive(Clone, Default)]
pub struct OrderLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends `tag` when invoked.
    pub fn listener(&self, tag: impl Into<String>) -> Tagged {
        Tagged {
            tag: tag.into(),
            entries: Arc::clone(&self.entries),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Listener that records its tag and passes the value through.
pub struct Tagged {
    tag: String,
    entries: Arc<Mutex<Vec<String>>>,
}

impl<P: Message> Listener<P> for Tagged {
    fn call(&self, value: P, _args: &[P]) -> Result<P, BoxError> {
        self.entries.lock().push(self.tag.clone());
        Ok(value)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// A handler that answers with its tag and the captured params.
pub fn tagged(tag: &'static str) -> impl Fn(&Request<'_>) -> Result<Value, BoxError> + Send + Sync + 'static {
    move |req: &Request<'_>| {
        let params: serde_json::Map<String, Value> = req
            .params()
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect();
        Ok(json!({ "route": tag, "params": params }))
    }
}
