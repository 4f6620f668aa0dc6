//! Logging listener for event observation.

use hookwire_core::{BoxError, Listener, Message};
use std::fmt::Debug;

/// A listener that logs every payload it sees and returns it unchanged.
///
/// Works as an action or as a filter stage. Register it at a low priority
/// to see the input of a filter chain, or a high one to see its output.
#[derive(Debug, Clone)]
pub struct LoggingListener {
    label: String,
}

impl LoggingListener {
    /// Creates a listener that tags its log lines with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// The label used in log lines.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<P: Message + Debug> Listener<P> for LoggingListener {
    fn call(&self, value: P, args: &[P]) -> Result<P, BoxError> {
        tracing::debug!(label = %self.label, payload = ?value, args = ?args, "event observed");
        Ok(value)
    }
}
