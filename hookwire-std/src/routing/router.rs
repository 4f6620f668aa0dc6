//! The route table and request resolution.

use super::{
    base_path::BasePath,
    pattern::Pattern,
    uri::{decode_path, normalize_path, parse_query, strip_query},
};
use arc_swap::ArcSwap;
use hookwire_core::{
    Handler, HandlerError, Method, MethodFilter, Params, PatternError, Request, RequestContext,
};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A registered method filter, pattern and handler.
struct Route<O> {
    methods: MethodFilter,
    pattern: Pattern,
    handler: Arc<dyn Handler<O>>,
}

impl<O> Clone for Route<O> {
    fn clone(&self) -> Self {
        Self {
            methods: self.methods,
            pattern: self.pattern.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<O> Route<O> {
    fn info(&self) -> RouteInfo {
        RouteInfo {
            methods: self.methods,
            pattern: self.pattern.as_str().to_string(),
        }
    }
}

/// Diagnostic view of a registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Methods the route answers.
    pub methods: MethodFilter,
    /// The pattern as registered.
    pub pattern: String,
}

/// Outcome of [`Router::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult<O> {
    /// A route matched and its handler produced this output.
    Matched(O),
    /// No route matched; the not-found handler produced this output.
    Fallback(O),
    /// No route matched and no not-found handler is set.
    NotFound,
}

impl<O> RouteResult<O> {
    /// True unless a route matched.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Matched(_))
    }

    /// The produced output, if any.
    pub fn into_output(self) -> Option<O> {
        match self {
            Self::Matched(output) | Self::Fallback(output) => Some(output),
            Self::NotFound => None,
        }
    }
}

/// A computed redirect; the host layer turns it into a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// Value for the `Location` header.
    pub location: String,
    /// HTTP status code.
    pub status: u16,
}

/// An ordered route table.
///
/// Matching scans routes in registration order and stops at the first hit.
/// Every dispatch works on a snapshot of the table taken when it starts, so
/// routes registered by a running handler are seen by later requests only.
///
/// # Example
///
/// ```rust,ignore
/// let router = Router::<String>::new();
/// router.get("/admin/login", |_: &Request<'_>| Ok("login".to_string()))?;
/// router.get("/admin/{page}", |r: &Request<'_>| Ok(r.param("page").unwrap_or_default().to_string()))?;
/// ```
pub struct Router<O> {
    routes: ArcSwap<Vec<Route<O>>>,
    mutation: Mutex<()>,
    not_found: RwLock<Option<Arc<dyn Handler<O>>>>,
    base_path: BasePath,
}

impl<O: 'static> Router<O> {
    /// Creates an empty router served from `/`.
    pub fn new() -> Self {
        Self::with_base_path(BasePath::root())
    }

    /// Creates an empty router served under `base_path`.
    pub fn with_base_path(base_path: BasePath) -> Self {
        Self {
            routes: ArcSwap::from_pointee(Vec::new()),
            mutation: Mutex::new(()),
            not_found: RwLock::new(None),
            base_path,
        }
    }

    /// The deployment prefix.
    pub fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Appends a route. Routes are never reordered or deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is malformed; the route is
    /// not registered.
    pub fn register(
        &self,
        methods: impl Into<MethodFilter>,
        pattern: &str,
        handler: impl Handler<O>,
    ) -> Result<(), PatternError> {
        self.register_shared(methods, pattern, Arc::new(handler))
    }

    /// Appends a route with a shared handler.
    pub fn register_shared(
        &self,
        methods: impl Into<MethodFilter>,
        pattern: &str,
        handler: Arc<dyn Handler<O>>,
    ) -> Result<(), PatternError> {
        let pattern = Pattern::parse(pattern)?;
        let methods = methods.into();
        debug!(methods = %methods, pattern = %pattern, "route registered");

        let _guard = self.mutation.lock();
        let mut routes = Vec::clone(&self.routes.load());
        routes.push(Route {
            methods,
            pattern,
            handler,
        });
        self.routes.store(Arc::new(routes));
        Ok(())
    }

    /// Registers a `GET` route.
    pub fn get(&self, pattern: &str, handler: impl Handler<O>) -> Result<(), PatternError> {
        self.register(Method::Get, pattern, handler)
    }

    /// Registers a `POST` route.
    pub fn post(&self, pattern: &str, handler: impl Handler<O>) -> Result<(), PatternError> {
        self.register(Method::Post, pattern, handler)
    }

    /// Registers a route answering every method.
    pub fn any(&self, pattern: &str, handler: impl Handler<O>) -> Result<(), PatternError> {
        self.register(MethodFilter::ANY, pattern, handler)
    }

    /// Sets the handler invoked when no route matches.
    pub fn set_not_found(&self, handler: impl Handler<O>) {
        *self.not_found.write() = Some(Arc::new(handler));
    }

    /// Removes the not-found handler.
    pub fn clear_not_found(&self) {
        *self.not_found.write() = None;
    }

    /// Finds the first route matching a normalized path.
    pub fn resolve(&self, method: Method, path: &str) -> Option<(RouteInfo, Params)> {
        let routes = self.routes.load();
        find(&routes, method, path).map(|(route, params)| (route.info(), params))
    }

    /// Builds the request context for a raw URI: the query string is
    /// parsed, the path is percent-decoded, stripped of the base path and
    /// normalized.
    pub fn context(&self, method: Method, uri: &str, body: Value) -> RequestContext {
        let decoded = decode_path(strip_query(uri));
        let path = normalize_path(self.base_path.strip(&decoded));
        RequestContext::new(method, uri, path)
            .with_base_path(self.base_path.as_str())
            .with_query(parse_query(uri))
            .with_body(body)
    }

    /// Resolves a raw URI and runs the matching handler.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] if the handler (or the not-found handler)
    /// fails.
    pub fn dispatch(
        &self,
        method: Method,
        uri: &str,
        body: Value,
    ) -> Result<RouteResult<O>, HandlerError> {
        let context = self.context(method, uri, body);
        self.dispatch_context(&context)
    }

    /// Resolves an already built context and runs the matching handler.
    pub fn dispatch_context(&self, context: &RequestContext) -> Result<RouteResult<O>, HandlerError> {
        let routes = self.routes.load_full();
        let fail = |source| HandlerError {
            method: context.method.to_string(),
            path: context.path.clone(),
            source,
        };

        if let Some((route, params)) = find(&routes, context.method, &context.path) {
            debug!(method = %context.method, path = %context.path, pattern = %route.pattern, "route matched");
            let output = route.handler.call(&Request::new(&params, context)).map_err(fail)?;
            return Ok(RouteResult::Matched(output));
        }

        debug!(method = %context.method, path = %context.path, "no route matched");
        let fallback = self.not_found.read().clone();
        match fallback {
            Some(handler) => {
                let params = Params::new();
                let output = handler.call(&Request::new(&params, context)).map_err(fail)?;
                Ok(RouteResult::Fallback(output))
            }
            None => Ok(RouteResult::NotFound),
        }
    }

    /// Prefixes `path` with the base path (at most once).
    pub fn url(&self, path: &str) -> String {
        self.base_path.url(path)
    }

    /// Computes a redirect. Paths starting with a single `/` get the base
    /// path; absolute and protocol-relative URLs are used as given.
    pub fn redirect(&self, location: &str, status: u16) -> Redirect {
        let location = if location.starts_with('/') && !location.starts_with("//") {
            self.url(location)
        } else {
            location.to_string()
        };
        Redirect { location, status }
    }

    /// Registered routes in match order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.routes.load().iter().map(Route::info).collect()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    /// True if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.load().is_empty()
    }
}

impl<O: 'static> Default for Router<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> std::fmt::Debug for Router<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.load().len())
            .field("base_path", &self.base_path)
            .finish()
    }
}

fn find<'r, O>(routes: &'r [Route<O>], method: Method, path: &str) -> Option<(&'r Route<O>, Params)> {
    routes
        .iter()
        .filter(|route| route.methods.accepts(method))
        .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
}
