//! # hookwire
//!
//! The extension core of a content platform: a priority-ordered hook bus
//! that addons and themes attach behavior to, and a first-match router that
//! maps request paths to handlers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookwire::prelude::*;
//!
//! struct Blog;
//!
//! impl Addon for Blog {
//!     fn name(&self) -> &str {
//!         "blog"
//!     }
//!
//!     fn register(&self, app: &mut Bootstrap<'_>) -> Result<(), BoxError> {
//!         app.router().get("/blog/{slug}", |req: &Request<'_>| {
//!             Ok(serde_json::json!({ "slug": req.param("slug") }))
//!         })?;
//!         app.bus().add_filter("app_output", |body, _| Ok(body), 10);
//!         Ok(())
//!     }
//! }
//!
//! let mut app = App::new(Config::default())?;
//! app.bootstrap([Box::new(Blog) as Box<dyn Addon>])?;
//! let response = app.handle(Method::Get, "/blog/hello", Value::Null)?;
//! ```
//!
//! ## Ordering
//!
//! Listeners run by ascending priority (default `10`), ties in registration
//! order. Routes are tried in registration order and the first match wins,
//! so literal routes must be registered before placeholder routes of the
//! same shape.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod app;
#[cfg(feature = "inventory")]
mod registration;

pub use app::{Addon, App, AppError, Bootstrap};
#[cfg(feature = "inventory")]
pub use registration::{AddonRegistration, collected_addons};

pub use hookwire_core::{
    // Errors
    BoxError,
    DispatchError,
    HandlerError,
    HookwireError,
    ListenerError,
    MethodError,
    PatternError,
    // Router
    Handler,
    HandlerFn,
    Method,
    MethodFilter,
    Params,
    Request,
    RequestContext,
    handler_fn,
    // Event bus
    Action,
    FilterFn,
    Listener,
    ListenerId,
    Map,
    Message,
    Scope,
    action,
    filter_fn,
    map,
};

pub use hookwire_std::{
    BasePath, Config, ConfigError, DEFAULT_PRIORITY, Dispatcher, EventBus, ListenerInfo, Pattern,
    Redirect, Response, RouteInfo, RouteResult, Router, events, match_pattern, normalize_uri,
    segments,
};

/// URI helpers.
pub mod uri {
    pub use hookwire_std::routing::uri::{
        decode_path, normalize_path, normalize_uri, parse_query, query_string, segments,
        strip_query,
    };
}

/// Standard listener implementations.
pub mod hooks {
    pub use hookwire_std::hooks::LoggingListener;
}

/// Testing utilities.
pub mod testing {
    pub use hookwire_std::testing::{CountingHandler, FailingListener, RecordingListener};
}

/// Prelude module - common imports for hookwire.
///
/// # Usage
///
/// ```rust,ignore
/// use hookwire::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Addon, App, Bootstrap, BoxError, Config, EventBus, Handler, Listener, Method,
        MethodFilter, Request, Response, RouteResult, Router, Scope, action, events, filter_fn,
        handler_fn, map,
    };
    pub use serde_json::Value;
}

#[cfg(feature = "inventory")]
pub use inventory;
