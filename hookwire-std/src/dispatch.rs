//! Request dispatch: the router wrapped in lifecycle events.
//!
//! For every request the [`Dispatcher`]:
//!
//! 1. builds the [`RequestContext`] (base path stripped, decoded, normalized,
//!    query parsed);
//! 2. runs the [`events::ROUTE_REQUEST`] filter, seeded with `null`. A listener
//!    returning anything else claims the request and its value becomes the
//!    response body;
//! 3. dispatches through the [`Router`];
//! 4. when nothing matched, runs the [`events::ROUTE_NOT_FOUND`] filter (a
//!    last chance to claim the request) and then
//!    [`events::NOT_FOUND_MESSAGE`] to build the 404 body;
//! 5. runs [`events::POST_DISPATCH`] over the final body.
//!
//! Every lifecycle listener receives the request context, as JSON, as its
//! single extra argument.

use crate::{
    bus::EventBus,
    routing::{RouteResult, Router},
};
use hookwire_core::{DispatchError, Method, RequestContext};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span};

/// Names of the events fired by the dispatcher and the application.
pub mod events {
    /// Filter, seeded with `null`: return a value to claim the request.
    pub const ROUTE_REQUEST: &str = "route_request";
    /// Filter, seeded with `null`, run when no route matched.
    pub const ROUTE_NOT_FOUND: &str = "route_not_found";
    /// Filter over the default 404 body.
    pub const NOT_FOUND_MESSAGE: &str = "404_message";
    /// Filter over every response body.
    pub const POST_DISPATCH: &str = "post_dispatch";
    /// Action fired once all addons are registered.
    pub const APP_INIT: &str = "app_init";
    /// Action fired after [`APP_INIT`].
    pub const APP_READY: &str = "app_ready";
    /// Filter over the body returned by the application.
    pub const APP_OUTPUT: &str = "app_output";
    /// Action fired when the application shuts down.
    pub const APP_SHUTDOWN: &str = "app_shutdown";
}

/// Status and body produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response payload; rendering it is up to the host.
    pub body: Value,
}

impl Response {
    /// A `200` response.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// A `404` response.
    pub fn not_found(body: Value) -> Self {
        Self { status: 404, body }
    }

    /// True for `2xx` statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Runs requests through the router and the request lifecycle events.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    bus: Arc<EventBus<Value>>,
    router: Arc<Router<Value>>,
}

impl Dispatcher {
    /// Wires a bus and a router together.
    pub fn new(bus: Arc<EventBus<Value>>, router: Arc<Router<Value>>) -> Self {
        Self { bus, router }
    }

    /// The event bus.
    pub fn bus(&self) -> &Arc<EventBus<Value>> {
        &self.bus
    }

    /// The router.
    pub fn router(&self) -> &Arc<Router<Value>> {
        &self.router
    }

    /// Dispatches a raw URI.
    ///
    /// # Errors
    ///
    /// Fails if a lifecycle listener or the resolved handler fails. An
    /// unmatched request is not an error: it yields a `404` response.
    pub fn dispatch(&self, method: Method, uri: &str, body: Value) -> Result<Response, DispatchError> {
        let context = self.router.context(method, uri, body);
        let span = info_span!("dispatch", method = %context.method, path = %context.path);
        let _enter = span.enter();
        self.dispatch_context(&context)
    }

    /// Dispatches an already built context.
    pub fn dispatch_context(&self, context: &RequestContext) -> Result<Response, DispatchError> {
        let args = [serde_json::to_value(context)?];

        let claimed = self.bus.filter(events::ROUTE_REQUEST, Value::Null, &args)?;
        let response = if claimed.is_null() {
            self.route(context, &args)?
        } else {
            debug!(path = %context.path, "request claimed by a listener");
            Response::ok(claimed)
        };

        let body = self.bus.filter(events::POST_DISPATCH, response.body, &args)?;
        debug!(status = response.status, "request dispatched");
        Ok(Response {
            status: response.status,
            body,
        })
    }

    fn route(&self, context: &RequestContext, args: &[Value]) -> Result<Response, DispatchError> {
        match self.router.dispatch_context(context)? {
            RouteResult::Matched(body) => Ok(Response::ok(body)),
            RouteResult::Fallback(body) => Ok(Response::not_found(body)),
            RouteResult::NotFound => {
                let claimed = self.bus.filter(events::ROUTE_NOT_FOUND, Value::Null, args)?;
                if !claimed.is_null() {
                    debug!(path = %context.path, "unmatched request claimed by a listener");
                    return Ok(Response::ok(claimed));
                }
                let message = Value::String(format!("404 Not Found: {}", context.path));
                let body = self.bus.filter(events::NOT_FOUND_MESSAGE, message, args)?;
                Ok(Response::not_found(body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingListener, RecordingListener};
    use hookwire_core::{BoxError, Request};
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        let router = Router::new();
        router
            .get("/blog/{slug}", |req: &Request<'_>| -> Result<Value, BoxError> {
                Ok(json!({ "post": req.param("slug") }))
            })
            .unwrap();
        Dispatcher::new(Arc::new(EventBus::new()), Arc::new(router))
    }

    #[test]
    fn test_matched_route() {
        let dispatcher = dispatcher();
        let response = dispatcher.dispatch(Method::Get, "/blog/hello/", Value::Null).unwrap();
        assert_eq!(response, Response::ok(json!({ "post": "hello" })));
    }

    #[test]
    fn test_default_not_found_message() {
        let dispatcher = dispatcher();
        let recorder = RecordingListener::new();
        dispatcher.bus().on_default(events::ROUTE_NOT_FOUND, recorder.clone());

        let response = dispatcher.dispatch(Method::Get, "/nope?x=1", Value::Null).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body, json!("404 Not Found: /nope"));
        assert!(!response.is_success());

        assert_eq!(recorder.count(), 1);
        assert_eq!(recorder.args()[0][0]["path"], json!("/nope"));
        assert_eq!(recorder.args()[0][0]["query"]["x"], json!("1"));
    }

    #[test]
    fn test_not_found_message_filter() {
        let dispatcher = dispatcher();
        dispatcher.bus().add_filter(
            events::NOT_FOUND_MESSAGE,
            |_, args| Ok(json!(format!("Nothing at {}", args[0]["path"].as_str().unwrap_or("?")))),
            10,
        );
        let response = dispatcher.dispatch(Method::Get, "/gone", Value::Null).unwrap();
        assert_eq!(response, Response::not_found(json!("Nothing at /gone")));
    }

    #[test]
    fn test_route_request_claims_before_router() {
        let dispatcher = dispatcher();
        dispatcher.bus().add_filter(
            events::ROUTE_REQUEST,
            |value, args| {
                if args[0]["path"] == json!("/blog/claimed") {
                    Ok(json!("from addon"))
                } else {
                    Ok(value)
                }
            },
            10,
        );

        let claimed = dispatcher.dispatch(Method::Get, "/blog/claimed", Value::Null).unwrap();
        assert_eq!(claimed, Response::ok(json!("from addon")));

        let routed = dispatcher.dispatch(Method::Get, "/blog/other", Value::Null).unwrap();
        assert_eq!(routed.body, json!({ "post": "other" }));
    }

    #[test]
    fn test_route_not_found_can_claim() {
        let dispatcher = dispatcher();
        dispatcher
            .bus()
            .add_filter(events::ROUTE_NOT_FOUND, |_, _| Ok(json!("fallback page")), 10);
        let response = dispatcher.dispatch(Method::Get, "/elsewhere", Value::Null).unwrap();
        assert_eq!(response, Response::ok(json!("fallback page")));
    }

    #[test]
    fn test_router_fallback_is_404() {
        let dispatcher = dispatcher();
        dispatcher
            .router()
            .set_not_found(|_: &Request<'_>| -> Result<Value, BoxError> { Ok(json!("custom 404")) });
        let response = dispatcher.dispatch(Method::Get, "/missing", Value::Null).unwrap();
        assert_eq!(response, Response::not_found(json!("custom 404")));
    }

    #[test]
    fn test_post_dispatch_sees_every_body() {
        let dispatcher = dispatcher();
        dispatcher.bus().add_filter(
            events::POST_DISPATCH,
            |body, _| Ok(json!({ "wrapped": body })),
            10,
        );
        let found = dispatcher.dispatch(Method::Get, "/blog/a", Value::Null).unwrap();
        assert_eq!(found.body, json!({ "wrapped": { "post": "a" } }));
        let missing = dispatcher.dispatch(Method::Get, "/x", Value::Null).unwrap();
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body, json!({ "wrapped": "404 Not Found: /x" }));
    }

    #[test]
    fn test_listener_failure_aborts_dispatch() {
        let dispatcher = dispatcher();
        dispatcher
            .bus()
            .on_default(events::ROUTE_REQUEST, FailingListener::new("denied"));
        let err = dispatcher.dispatch(Method::Get, "/blog/a", Value::Null).unwrap_err();
        assert!(matches!(err, DispatchError::Listener(ref e) if e.event == events::ROUTE_REQUEST));
    }

    #[test]
    fn test_handler_failure_surfaces() {
        let dispatcher = dispatcher();
        dispatcher
            .router()
            .get("/explode", |_: &Request<'_>| -> Result<Value, BoxError> { Err("bad".into()) })
            .unwrap();
        let err = dispatcher.dispatch(Method::Get, "/explode", Value::Null).unwrap_err();
        assert!(matches!(err, DispatchError::Handler(_)));
    }
}
