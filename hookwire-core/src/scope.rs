//! Scope predicates for restricted dispatch.
//!
//! The same map type plays two roles: attached to a listener it is a
//! predicate (every key must match), passed to a scoped trigger it is the
//! context the predicate is evaluated against.

use serde::Serialize;
use std::collections::BTreeMap;

/// A key/value map used as a listener predicate or a dispatch context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Scope {
    entries: BTreeMap<String, String>,
}

impl Scope {
    /// An empty scope. As a predicate it matches every context.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluates `self` as a predicate: every key must be present in
    /// `context` with an equal value.
    pub fn matches(&self, context: &Scope) -> bool {
        self.entries
            .iter()
            .all(|(k, v)| context.entries.get(k) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Scope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
