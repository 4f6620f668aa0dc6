//! Placeholder captures from a matched route.

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Captured `{name}` values, in pattern order.
///
/// An empty `Params` means "matched with zero captures". A failed match is
/// represented by the absence of `Params` (`None`), never by an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty set of captures.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records a capture. Placeholder names are unique within a pattern, so
    /// an existing name is overwritten rather than duplicated.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a capture by placeholder name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of captures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the pattern had no placeholders.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates captures in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_overwrites() {
        let mut params = Params::new();
        params.insert("year", "2024");
        params.insert("slug", "hello");
        params.insert("year", "2025");

        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("year", "2025"), ("slug", "hello")]);
        assert_eq!(params.get("slug"), Some("hello"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_serializes_as_object() {
        let params: Params = [("id", "123")].into_iter().collect();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "123" }));
    }
}
