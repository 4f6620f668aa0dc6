use hookwire_core::{Listener, ListenerId, Message, Scope};
use std::sync::Arc;

/// A registered listener plus its ordering and scope metadata.
#[derive(Clone)]
pub(crate) struct ListenerEntry<P: Message> {
    pub(crate) id: ListenerId,
    pub(crate) priority: i32,
    pub(crate) scope: Option<Scope>,
    pub(crate) listener: Arc<dyn Listener<P>>,
}

impl<P: Message> ListenerEntry<P> {
    /// Dispatch order key: priority first, insertion index second.
    pub(crate) fn order_key(&self) -> (i32, ListenerId) {
        (self.priority, self.id)
    }

    /// Whether this listener fires for the given scope context.
    pub(crate) fn accepts(&self, context: &Scope) -> bool {
        self.scope.as_ref().is_none_or(|predicate| predicate.matches(context))
    }

    pub(crate) fn info(&self) -> ListenerInfo {
        ListenerInfo {
            id: self.id,
            priority: self.priority,
            scope: self.scope.clone(),
        }
    }
}

/// Diagnostic view of one registration, as returned by `EventBus::listeners`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerInfo {
    /// Registration id (also the insertion index).
    pub id: ListenerId,
    /// Priority; lower runs first.
    pub priority: i32,
    /// Scope predicate, if the listener was registered with one.
    pub scope: Option<Scope>,
}
