//! # Event Bus Layer (Listener)
//!
//! A Listener is a callback attached to a named event. The same trait serves
//! both dispatch styles of the bus:
//!
//! - **Action**: the bus hands every listener a copy of the payload and
//!   discards what it returns.
//! - **Filter**: the value returned by one listener is the value passed to
//!   the next; the last return value is the result of the dispatch.
//!
//! Extra arguments given to a filter are passed unchanged to every listener.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|value: String, _args: &[String]| Ok(value)`
//! 2. **Adaptors**: [`action`], [`filter_fn`], [`map`] (closure types are
//!    inferred from the adaptor's signature)
//! 3. **Struct implementation**: `impl Listener<MyPayload> for MyListener`

use crate::{error::BoxError, message::Message};
use std::fmt;

/// A callback registered on the event bus.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener` for `{P}`",
    label = "missing `Listener` implementation",
    note = "Listeners must implement `call(value, args) -> Result<{P}, BoxError>`; wrap closures with `action`, `filter_fn` or `map`."
)]
pub trait Listener<P: Message>: Send + Sync + 'static {
    /// Invoked with the running value and the dispatch's extra arguments.
    ///
    /// Returning an error aborts the dispatch: later listeners are not run
    /// and the error surfaces to the caller of the trigger.
    fn call(&self, value: P, args: &[P]) -> Result<P, BoxError>;
}

// Blanket impl for closures
impl<P, F> Listener<P> for F
where
    P: Message,
    F: Fn(P, &[P]) -> Result<P, BoxError> + Send + Sync + 'static,
{
    fn call(&self, value: P, args: &[P]) -> Result<P, BoxError> {
        (self)(value, args)
    }
}

/// Identifies one registration on the bus.
///
/// Ids are taken from a monotonic counter, so they also encode insertion
/// order, which breaks ties between listeners of equal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wraps a raw insertion index.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw insertion index.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A side-effect-only listener: the value passes through unchanged.
///
/// Created by [`action`].
pub struct Action<F> {
    callback: F,
}

impl<P, F> Listener<P> for Action<F>
where
    P: Message,
    F: Fn(&P) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn call(&self, value: P, _args: &[P]) -> Result<P, BoxError> {
        (self.callback)(&value)?;
        Ok(value)
    }
}

/// Wraps a callback that observes the payload.
pub fn action<P, F>(callback: F) -> Action<F>
where
    P: Message,
    F: Fn(&P) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Action { callback }
}

/// A fallible value transform that also sees the extra arguments.
///
/// Created by [`filter_fn`].
pub struct FilterFn<F> {
    callback: F,
}

impl<P, F> Listener<P> for FilterFn<F>
where
    P: Message,
    F: Fn(P, &[P]) -> Result<P, BoxError> + Send + Sync + 'static,
{
    fn call(&self, value: P, args: &[P]) -> Result<P, BoxError> {
        (self.callback)(value, args)
    }
}

/// Wraps a filter callback.
pub fn filter_fn<P, F>(callback: F) -> FilterFn<F>
where
    P: Message,
    F: Fn(P, &[P]) -> Result<P, BoxError> + Send + Sync + 'static,
{
    FilterFn { callback }
}

/// An infallible value transform.
///
/// Created by [`map`].
pub struct Map<F> {
    mapper: F,
}

impl<P, F> Listener<P> for Map<F>
where
    P: Message,
    F: Fn(P) -> P + Send + Sync + 'static,
{
    fn call(&self, value: P, _args: &[P]) -> Result<P, BoxError> {
        Ok((self.mapper)(value))
    }
}

/// Wraps an infallible transform.
pub fn map<P, F>(mapper: F) -> Map<F>
where
    P: Message,
    F: Fn(P) -> P + Send + Sync + 'static,
{
    Map { mapper }
}
