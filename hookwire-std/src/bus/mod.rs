//! Event bus: named events with priority-ordered listeners.
//!
//! Listeners run in ascending priority; equal priorities run in registration
//! order. Dispatch is fail-fast: the first listener error aborts the call and
//! is returned to the caller.

mod entry;
mod event_bus;

pub use entry::ListenerInfo;
pub use event_bus::{DEFAULT_PRIORITY, EventBus};
