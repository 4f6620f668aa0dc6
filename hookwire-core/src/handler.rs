//! # Router Layer (Handler)
//!
//! The terminal endpoint of a route. A handler receives the captured
//! placeholder values and the request context, and produces the route's
//! output (or an error, which aborts the dispatch).
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|req: &Request<'_>| -> Result<Out, BoxError> { ... }`
//! 2. **Adaptor**: [`handler_fn`] infers the closure signature for you
//! 3. **Struct implementation**: `impl Handler<Out> for MyController`

use crate::{context::RequestContext, error::BoxError, method::Method, params::Params};
use serde_json::Value;

/// The view of a request a handler receives.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    params: &'a Params,
    context: &'a RequestContext,
}

impl<'a> Request<'a> {
    /// Pairs captures with their request context.
    pub const fn new(params: &'a Params, context: &'a RequestContext) -> Self {
        Self { params, context }
    }

    /// A captured placeholder value.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name)
    }

    /// All captured placeholder values.
    pub fn params(&self) -> &'a Params {
        self.params
    }

    /// The full request context.
    pub fn context(&self) -> &'a RequestContext {
        self.context
    }

    /// Request method.
    pub fn method(&self) -> Method {
        self.context.method
    }

    /// Normalized request path.
    pub fn path(&self) -> &'a str {
        &self.context.path
    }

    /// A query-string parameter.
    pub fn query(&self, name: &str) -> Option<&'a str> {
        self.context.query_param(name)
    }

    /// Request payload.
    pub fn body(&self) -> &'a Value {
        &self.context.body
    }
}

/// The endpoint bound to a route.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests producing `{O}`",
    label = "missing `Handler<{O}>` implementation",
    note = "Handlers must implement `call(&Request) -> Result<{O}, BoxError>`; wrap closures with `handler_fn`."
)]
pub trait Handler<O>: Send + Sync + 'static {
    /// Executes the handler.
    fn call(&self, request: &Request<'_>) -> Result<O, BoxError>;
}

// Blanket impl for closures
impl<O, F> Handler<O> for F
where
    F: Fn(&Request<'_>) -> Result<O, BoxError> + Send + Sync + 'static,
{
    fn call(&self, request: &Request<'_>) -> Result<O, BoxError> {
        (self)(request)
    }
}

/// A closure handler, created by [`handler_fn`].
pub struct HandlerFn<F> {
    callback: F,
}

impl<O, F> Handler<O> for HandlerFn<F>
where
    F: Fn(&Request<'_>) -> Result<O, BoxError> + Send + Sync + 'static,
{
    fn call(&self, request: &Request<'_>) -> Result<O, BoxError> {
        (self.callback)(request)
    }
}

/// Wraps a closure so its argument and error types are inferred.
pub fn handler_fn<O, F>(callback: F) -> HandlerFn<F>
where
    F: Fn(&Request<'_>) -> Result<O, BoxError> + Send + Sync + 'static,
{
    HandlerFn { callback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accessors() {
        let params: Params = [("slug", "hello-world")].into_iter().collect();
        let mut query = std::collections::BTreeMap::new();
        query.insert("page".to_string(), "2".to_string());
        let context = RequestContext::new(Method::Get, "/blog/hello-world?page=2", "/blog/hello-world")
            .with_query(query);

        let request = Request::new(&params, &context);
        assert_eq!(request.param("slug"), Some("hello-world"));
        assert_eq!(request.query("page"), Some("2"));
        assert_eq!(request.path(), "/blog/hello-world");
        assert_eq!(request.method(), Method::Get);
        assert!(request.body().is_null());
    }

    #[test]
    fn test_handler_fn_infers_types() {
        let handler = handler_fn(|req: &Request<'_>| Ok(req.param("id").unwrap_or("none").len()));
        let params: Params = [("id", "1234")].into_iter().collect();
        let context = RequestContext::new(Method::Get, "/user/1234", "/user/1234");
        assert_eq!(handler.call(&Request::new(&params, &context)).unwrap(), 4);
    }
}
