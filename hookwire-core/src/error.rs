//! Error types for hookwire.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HookwireError`] - Top-level error type for all hookwire operations
//! - [`ListenerError`] - A listener failed; remaining listeners were skipped
//! - [`PatternError`] - A route pattern was rejected at registration time
//! - [`HandlerError`] - A route handler (or the not-found handler) failed
//! - [`DispatchError`] - Errors while dispatching a request end to end
//!
//! An unmatched route is not an error. It is a normal dispatch outcome.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all hookwire operations.
#[derive(Error, Debug)]
pub enum HookwireError {
    /// A listener failed while an event was dispatched.
    #[error(transparent)]
    Listener(#[from] ListenerError),

    /// A route pattern was rejected.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A request dispatch failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// An HTTP method could not be parsed.
    #[error(transparent)]
    Method(#[from] MethodError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// A listener raised an error during `trigger`, `filter` or a scoped dispatch.
///
/// Dispatch is fail-fast: listeners after the failing one were not invoked.
#[derive(Error, Debug)]
#[error("listener #{listener} failed on event `{event}`")]
pub struct ListenerError {
    /// The event being dispatched.
    pub event: String,
    /// Insertion id of the failing listener.
    pub listener: u64,
    /// The error raised by the listener.
    #[source]
    pub source: BoxError,
}

/// A route pattern could not be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `{` without its `}` (or the reverse), or braces inside a literal segment.
    #[error("unbalanced braces in segment `{segment}` of pattern `{pattern}`")]
    UnbalancedBrace {
        /// The full pattern.
        pattern: String,
        /// The offending segment.
        segment: String,
    },

    /// A placeholder with nothing between the braces.
    #[error("empty placeholder in pattern `{pattern}`")]
    EmptyPlaceholder {
        /// The full pattern.
        pattern: String,
    },

    /// A placeholder name that is not an identifier.
    #[error("invalid placeholder name `{name}` in pattern `{pattern}`")]
    InvalidPlaceholder {
        /// The full pattern.
        pattern: String,
        /// The rejected name.
        name: String,
    },

    /// The same placeholder name appears twice.
    #[error("duplicate placeholder `{name}` in pattern `{pattern}`")]
    DuplicatePlaceholder {
        /// The full pattern.
        pattern: String,
        /// The repeated name.
        name: String,
    },
}

/// A route handler or the not-found handler failed.
#[derive(Error, Debug)]
#[error("handler for {method} {path} failed")]
pub struct HandlerError {
    /// Request method.
    pub method: String,
    /// Normalized request path.
    pub path: String,
    /// The error raised by the handler.
    #[source]
    pub source: BoxError,
}

/// Errors that can occur while dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A lifecycle listener failed.
    #[error("dispatch aborted by listener")]
    Listener(#[from] ListenerError),

    /// The resolved handler failed.
    #[error("dispatch aborted by handler")]
    Handler(#[from] HandlerError),

    /// The request context could not be converted to an event payload.
    #[error("request context could not be encoded: {0}")]
    Payload(#[from] serde_json::Error),
}

/// An HTTP method string was not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown http method `{0}`")]
pub struct MethodError(pub String);

// Convenience conversions
impl From<BoxError> for HookwireError {
    fn from(err: BoxError) -> Self {
        HookwireError::Custom(err)
    }
}
