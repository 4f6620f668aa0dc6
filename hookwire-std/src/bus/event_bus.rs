//! The event bus registry.

use super::entry::{ListenerEntry, ListenerInfo};
use arc_swap::ArcSwap;
use hookwire_core::{
    BoxError, Listener, ListenerError, ListenerId, Message, Scope, action, filter_fn,
};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tracing::{debug, trace, warn};

/// Priority used by [`EventBus::on_default`].
pub const DEFAULT_PRIORITY: i32 = 10;

/// Listeners of one event, kept sorted by (priority, insertion id).
type Listeners<P> = Arc<Vec<ListenerEntry<P>>>;
type Table<P> = HashMap<String, Listeners<P>>;

/// A registry of named events and their listeners.
///
/// Reads take an `Arc` snapshot of the table and never block; writes are
/// serialised, copy the affected list, and publish a new table atomically.
/// A dispatch therefore always runs against the listener list as it was
/// when the dispatch started.
///
/// # Example
///
/// ```rust,ignore
/// let bus = EventBus::<String>::new();
/// bus.add_filter("the_title", |title, _| Ok(title.to_uppercase()), 10);
/// assert_eq!(bus.filter("the_title", "hello".into(), &[])?, "HELLO");
/// ```
pub struct EventBus<P: Message> {
    table: ArcSwap<Table<P>>,
    mutation: Mutex<()>,
    sequence: AtomicU64,
    default_priority: i32,
}

impl<P: Message> EventBus<P> {
    /// Creates an empty bus using [`DEFAULT_PRIORITY`].
    pub fn new() -> Self {
        Self::with_default_priority(DEFAULT_PRIORITY)
    }

    /// Creates an empty bus with a custom default priority.
    pub fn with_default_priority(default_priority: i32) -> Self {
        Self {
            table: ArcSwap::from_pointee(HashMap::new()),
            mutation: Mutex::new(()),
            sequence: AtomicU64::new(0),
            default_priority,
        }
    }

    /// The priority used by [`on_default`](Self::on_default).
    pub fn default_priority(&self) -> i32 {
        self.default_priority
    }

    // ============================================================================
    // Registration
    // ============================================================================

    /// Registers a listener. Lower priorities run first.
    ///
    /// There is no uniqueness constraint: the same callback may be
    /// registered several times, under one event or many.
    pub fn on(&self, event: impl Into<String>, listener: impl Listener<P>, priority: i32) -> ListenerId {
        self.insert(event.into(), Arc::new(listener), priority, None)
    }

    /// Registers a listener at the default priority.
    pub fn on_default(&self, event: impl Into<String>, listener: impl Listener<P>) -> ListenerId {
        self.on(event, listener, self.default_priority)
    }

    /// Registers a shared callback, which can later be removed by reference
    /// with [`off_shared`](Self::off_shared).
    pub fn on_shared(
        &self,
        event: impl Into<String>,
        listener: Arc<dyn Listener<P>>,
        priority: i32,
    ) -> ListenerId {
        self.insert(event.into(), listener, priority, None)
    }

    /// Registers a listener that fires only when `scope` matches the context
    /// passed to [`trigger_scoped`](Self::trigger_scoped) or
    /// [`filter_scoped`](Self::filter_scoped).
    pub fn on_scoped(
        &self,
        event: impl Into<String>,
        listener: impl Listener<P>,
        scope: Scope,
        priority: i32,
    ) -> ListenerId {
        self.insert(event.into(), Arc::new(listener), priority, Some(scope))
    }

    /// Registers a side-effect-only callback.
    pub fn add_action<F>(&self, event: impl Into<String>, callback: F, priority: i32) -> ListenerId
    where
        F: Fn(&P) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.on(event, action(callback), priority)
    }

    /// Registers a value-transforming callback.
    pub fn add_filter<F>(&self, event: impl Into<String>, callback: F, priority: i32) -> ListenerId
    where
        F: Fn(P, &[P]) -> Result<P, BoxError> + Send + Sync + 'static,
    {
        self.on(event, filter_fn(callback), priority)
    }

    fn insert(
        &self,
        event: String,
        listener: Arc<dyn Listener<P>>,
        priority: i32,
        scope: Option<Scope>,
    ) -> ListenerId {
        let scoped = scope.is_some();
        let id = self.mutate(|table| {
            let id = ListenerId::new(self.sequence.fetch_add(1, Ordering::Relaxed));
            let entry = ListenerEntry {
                id,
                priority,
                scope,
                listener,
            };
            let slot = table.entry(event.clone()).or_default();
            let mut list = Vec::with_capacity(slot.len() + 1);
            list.extend(slot.iter().cloned());
            let at = list.partition_point(|e| e.order_key() <= entry.order_key());
            list.insert(at, entry);
            *slot = Arc::new(list);
            id
        });
        debug!(event = %event, listener = %id, priority, scoped, "listener registered");
        id
    }

    // ============================================================================
    // Removal
    // ============================================================================

    /// Removes one registration. Returns `false` if it was not registered
    /// under `event`.
    pub fn off(&self, event: &str, id: ListenerId) -> bool {
        let removed = self.mutate(|table| remove_where(table, event, |e| e.id == id));
        if removed > 0 {
            debug!(event, listener = %id, "listener removed");
        }
        removed > 0
    }

    /// Removes every registration of `listener` under `event` and returns
    /// how many were removed. Other events keep their registrations.
    pub fn off_shared(&self, event: &str, listener: &Arc<dyn Listener<P>>) -> usize {
        let target = Arc::as_ptr(listener);
        let removed = self.mutate(|table| {
            remove_where(table, event, |e| {
                std::ptr::addr_eq(Arc::as_ptr(&e.listener), target)
            })
        });
        if removed > 0 {
            debug!(event, removed, "shared listener removed");
        }
        removed
    }

    /// Removes all listeners of `event`, or of every event when `None`.
    pub fn clear(&self, event: Option<&str>) {
        self.mutate(|table| match event {
            Some(name) => {
                table.remove(name);
            }
            None => table.clear(),
        });
        debug!(event = event.unwrap_or("*"), "listeners cleared");
    }

    // ============================================================================
    // Dispatch
    // ============================================================================

    /// Runs every listener of `event` with a copy of `payload`, discarding
    /// their return values.
    ///
    /// Listeners registered with a non-empty scope are skipped; use
    /// [`trigger_scoped`](Self::trigger_scoped) to reach them.
    pub fn trigger(&self, event: &str, payload: P) -> Result<(), ListenerError> {
        self.trigger_scoped(event, payload, &Scope::new())
    }

    /// Like [`trigger`](Self::trigger), but a listener fires only if it has
    /// no scope or every key of its scope matches `context`.
    pub fn trigger_scoped(&self, event: &str, payload: P, context: &Scope) -> Result<(), ListenerError> {
        let Some(listeners) = self.snapshot(event) else {
            return Ok(());
        };
        for entry in listeners.iter().filter(|e| e.accepts(context)) {
            trace!(event, listener = %entry.id, "invoking listener");
            entry
                .listener
                .call(payload.clone(), &[])
                .map_err(|source| failure(event, entry, source))?;
        }
        Ok(())
    }

    /// Threads `value` through the listeners of `event`: each return value
    /// becomes the next listener's input. `args` are passed unchanged to
    /// every listener. With no listeners the input is returned as is.
    pub fn filter(&self, event: &str, value: P, args: &[P]) -> Result<P, ListenerError> {
        self.filter_scoped(event, value, args, &Scope::new())
    }

    /// The scope-restricted variant of [`filter`](Self::filter).
    pub fn filter_scoped(
        &self,
        event: &str,
        value: P,
        args: &[P],
        context: &Scope,
    ) -> Result<P, ListenerError> {
        let Some(listeners) = self.snapshot(event) else {
            return Ok(value);
        };
        listeners
            .iter()
            .filter(|e| e.accepts(context))
            .try_fold(value, |value, entry| {
                trace!(event, listener = %entry.id, "invoking filter");
                entry
                    .listener
                    .call(value, args)
                    .map_err(|source| failure(event, entry, source))
            })
    }

    // ============================================================================
    // Introspection
    // ============================================================================

    /// True if at least one listener is registered for `event`.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.table
            .load()
            .get(event)
            .is_some_and(|listeners| !listeners.is_empty())
    }

    /// Registrations of `event` in dispatch order.
    pub fn listeners(&self, event: &str) -> Vec<ListenerInfo> {
        self.snapshot(event)
            .map(|listeners| listeners.iter().map(ListenerEntry::info).collect())
            .unwrap_or_default()
    }

    /// Names of all events with at least one listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.table.load().keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of registrations across all events.
    pub fn len(&self) -> usize {
        self.table.load().values().map(|l| l.len()).sum()
    }

    /// True if no event has listeners.
    pub fn is_empty(&self) -> bool {
        self.table.load().is_empty()
    }

    fn snapshot(&self, event: &str) -> Option<Listeners<P>> {
        self.table.load().get(event).cloned()
    }

    fn mutate<R>(&self, apply: impl FnOnce(&mut Table<P>) -> R) -> R {
        let _guard = self.mutation.lock();
        let mut table = (**self.table.load()).clone();
        let out = apply(&mut table);
        self.table.store(Arc::new(table));
        out
    }
}

impl<P: Message> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Message> std::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.event_names())
            .field("listeners", &self.len())
            .field("default_priority", &self.default_priority)
            .finish()
    }
}

/// Drops matching entries of one event; an emptied event is removed.
fn remove_where<P: Message>(
    table: &mut Table<P>,
    event: &str,
    doomed: impl Fn(&ListenerEntry<P>) -> bool,
) -> usize {
    let Some(current) = table.get(event) else {
        return 0;
    };
    let kept: Vec<_> = current.iter().filter(|e| !doomed(e)).cloned().collect();
    let removed = current.len() - kept.len();
    if kept.is_empty() {
        table.remove(event);
    } else if removed > 0 {
        table.insert(event.to_string(), Arc::new(kept));
    }
    removed
}

fn failure<P: Message>(event: &str, entry: &ListenerEntry<P>, source: BoxError) -> ListenerError {
    warn!(event, listener = %entry.id, error = %source, "listener failed, aborting dispatch");
    ListenerError {
        event: event.to_string(),
        listener: entry.id.get(),
        source,
    }
}
