//! The request as seen by routes and lifecycle listeners.

use crate::method::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// What the front controller knows about one request.
///
/// Built once per dispatch and shared by reference with the handler and
/// with every lifecycle listener (as JSON).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestContext {
    /// Request method.
    pub method: Method,
    /// The URI exactly as received, query string included.
    pub uri: String,
    /// Normalized path used for matching (base path stripped).
    pub path: String,
    /// Deployment prefix, empty when served from the root.
    pub base_path: String,
    /// Decoded query-string parameters. Later duplicates win.
    pub query: BTreeMap<String, String>,
    /// Request payload, `Null` when there is none.
    pub body: Value,
}

impl RequestContext {
    /// Creates a context with no base path, query or body.
    pub fn new(method: Method, uri: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            path: path.into(),
            base_path: String::new(),
            query: BTreeMap::new(),
            body: Value::Null,
        }
    }

    /// Sets the deployment prefix.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Sets the decoded query parameters.
    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Sets the payload.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Looks up a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
