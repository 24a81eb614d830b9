//! Insertion-ordered key/value map with order-preserving serialization.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A string-keyed map that remembers insertion order.
///
/// The underlying storage has no inherent order, so the key sequence is
/// tracked separately and serialization walks it rather than the map.
/// Storybook treats first-declared args as the canonical display order,
/// which is why JSON key order must match insertion order exactly.
///
/// `add` is append-only: adding a key that is already present appends the
/// key again, and serialization will then emit it twice. There is no
/// update-in-place and no removal. Interior state is guarded by a mutex so
/// `add` and serialization are mutually exclusive.
#[derive(Debug, Default)]
pub struct OrderedMap {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    keys: Vec<String>,
    values: HashMap<String, Value>,
}

impl OrderedMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` to the insertion order and store `value` under it.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let mut inner = self.inner.lock().expect("ordered map lock poisoned");
        inner.keys.push(key.clone());
        inner.values.insert(key, value);
    }

    /// Number of keys in insertion order (duplicates counted).
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("ordered map lock poisoned").keys.len()
    }

    /// Whether the map holds no entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for OrderedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let inner = self.inner.lock().expect("ordered map lock poisoned");
        let mut map = serializer.serialize_map(Some(inner.keys.len()))?;
        for key in &inner.keys {
            map.serialize_entry(key, &inner.values[key])?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_keys_in_insertion_order() {
        let map = OrderedMap::new();
        map.add("zulu", json!(1));
        map.add("alpha", json!(2));
        map.add("mike", json!(3));

        let out = serde_json::to_string(&map).unwrap();

        assert_eq!(out, r#"{"zulu":1,"alpha":2,"mike":3}"#);
    }

    #[test]
    fn test_duplicate_key_is_appended_and_emitted_twice() {
        let map = OrderedMap::new();
        map.add("name", json!("first"));
        map.add("other", json!(true));
        map.add("name", json!("second"));

        let out = serde_json::to_string(&map).unwrap();

        // The later add wins the stored value, but the key keeps both
        // positions in the order list.
        assert_eq!(out, r#"{"name":"second","other":true,"name":"second"}"#);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_empty_map_serializes_to_empty_object() {
        let map = OrderedMap::new();
        assert!(map.is_empty());
        assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
    }
}
