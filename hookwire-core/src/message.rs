//! Message trait for event payloads.

/// A marker trait for payloads carried through the event bus.
///
/// Payloads must be `Send + Sync + 'static` so registries can be shared
/// across request threads, and `Clone` because an action hands every
/// listener its own copy of the payload.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct PostSaved { id: u64 }
///
/// impl Message for PostSaved {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Clone + Send + Sync + 'static`",
    note = "Event payloads must be cloneable, thread-safe and static."
)]
pub trait Message: Clone + Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for bool {}
impl Message for i32 {}
impl Message for i64 {}
impl Message for u32 {}
impl Message for u64 {}
impl Message for usize {}
impl Message for String {}
impl Message for &'static str {}
impl Message for serde_json::Value {}
impl<T: Message> Message for Box<T> {}
impl<T: Send + Sync + 'static + ?Sized> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
impl<T: Message, E: Message> Message for Result<T, E> {}
