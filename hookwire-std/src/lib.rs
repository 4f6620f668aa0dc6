//! # hookwire-std
//!
//! Standard implementations for the hookwire event bus and router.
//!
//! This crate provides:
//! - **Event bus**: [`EventBus`] with actions, filters and scoped dispatch
//! - **Routing**: URI helpers, [`Pattern`] compilation and the first-match [`Router`]
//! - **Dispatch**: [`Dispatcher`], which runs request lifecycle events around the router
//! - **Configuration**: [`Config`] loaded from TOML and the environment
//! - **Standard listeners**: [`hooks::LoggingListener`]
//! - **Testing utilities**: [`testing`]
//!
//! Registries are copy-on-write: dispatch iterates an immutable snapshot, so
//! registering listeners or routes from inside a running listener or handler
//! never disturbs the call in flight.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use hookwire_core;

// Modules
pub mod bus;
pub mod config;
pub mod dispatch;
pub mod hooks;
pub mod routing;
pub mod testing;

pub use bus::{DEFAULT_PRIORITY, EventBus, ListenerInfo};
pub use config::{Config, ConfigError};
pub use dispatch::{Dispatcher, Response, events};
pub use routing::{
    BasePath, Pattern, Redirect, RouteInfo, RouteResult, Router, match_pattern, normalize_uri,
    segments,
};
