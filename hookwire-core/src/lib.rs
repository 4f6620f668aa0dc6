//! # hookwire-core
//!
//! Core traits and plain data for the hookwire event bus and router.
//!
//! This crate has minimal dependencies and is meant to be imported by addons
//! and themes that only need to describe listeners and handlers, not the
//! registries that run them (those live in `hookwire-std`).
//!
//! # Two Primitives, One Composition
//!
//! ## Event bus ([`Listener`])
//!
//! Named events carry an ordered list of listeners. A listener receives the
//! running value plus the extra arguments of the dispatch and returns the next
//! value:
//!
//! - **Actions**: return values are discarded, every listener sees the payload
//! - **Filters**: each return value feeds the next listener
//! - **Scoped**: a [`Scope`] predicate restricts when a listener fires
//!
//! ## Router ([`Handler`])
//!
//! Routes bind a [`MethodFilter`] and a `{placeholder}` pattern to a handler.
//! A handler receives a [`Request`]: the captured [`Params`] and the
//! [`RequestContext`] produced by the front controller.
//!
//! ## Dispatch
//!
//! The dispatcher in `hookwire-std` composes both: it runs lifecycle events
//! around the router so addons can observe or short-circuit a request.
//!
//! # Error Types
//!
//! - [`HookwireError`] - Top-level error type
//! - [`ListenerError`] - A listener failed during dispatch
//! - [`PatternError`] - A route pattern was rejected at registration
//! - [`HandlerError`] - A route handler failed
//! - [`DispatchError`] - Any failure while dispatching a request

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod handler;
mod listener;
mod message;
mod method;
mod params;
mod scope;

// Re-exports
pub use context::RequestContext;
pub use error::{
    BoxError, DispatchError, HandlerError, HookwireError, ListenerError, MethodError, PatternError,
};
pub use handler::{Handler, HandlerFn, Request, handler_fn};
pub use listener::{Action, FilterFn, Listener, ListenerId, Map, action, filter_fn, map};
pub use message::Message;
pub use method::{Method, MethodFilter};
pub use params::Params;
pub use scope::Scope;
