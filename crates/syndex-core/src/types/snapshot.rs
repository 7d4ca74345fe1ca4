//! Pre-delete property snapshots.
//!
//! When an entity is deleted its live properties are no longer queryable by
//! the time the commit notification is delivered. The store therefore pairs
//! every deletion with a [`PropertySnapshot`]: the entity's complete property
//! map as of just before the delete.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ClassKey, Value, CLASS_KEY_PROPERTY};

/// An entity's properties captured just before its deletion.
///
/// Snapshots are read-only: they are the only source of truth for what a
/// deleted entity looked like, so deletion handling resolves the entity's
/// class from the snapshot first and only falls back to structural metadata
/// when the snapshot carries no class property.
///
/// # Example
///
/// ```
/// use syndex_core::{PropertySnapshot, Value, CLASS_KEY_PROPERTY};
///
/// let snapshot = PropertySnapshot::from_iter([
///     (CLASS_KEY_PROPERTY.to_owned(), Value::from("Person")),
///     ("email".to_owned(), Value::from("a@x.com")),
/// ]);
///
/// assert_eq!(snapshot.class_key().map(|k| k.as_str().to_owned()), Some("Person".into()));
/// assert_eq!(snapshot.get("email").and_then(|v| v.as_str()), Some("a@x.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySnapshot(HashMap<String, Value>);

impl PropertySnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value by key.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The class key recorded in this snapshot, if the reserved class
    /// property was present on the entity before deletion.
    #[must_use]
    pub fn class_key(&self) -> Option<ClassKey> {
        self.get(CLASS_KEY_PROPERTY).and_then(Value::as_str).map(ClassKey::new)
    }

    /// Iterate over the snapshot's properties.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of properties in the snapshot.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the snapshot has no properties.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Value>> for PropertySnapshot {
    fn from(props: HashMap<String, Value>) -> Self {
        Self(props)
    }
}

impl FromIterator<(String, Value)> for PropertySnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_key_from_reserved_property() {
        let snapshot = PropertySnapshot::from_iter([(
            CLASS_KEY_PROPERTY.to_owned(),
            Value::from("Person"),
        )]);
        assert_eq!(snapshot.class_key(), Some(ClassKey::new("Person")));
    }

    #[test]
    fn class_key_absent() {
        let snapshot =
            PropertySnapshot::from_iter([("email".to_owned(), Value::from("a@x.com"))]);
        assert_eq!(snapshot.class_key(), None);
    }

    #[test]
    fn class_key_requires_string_value() {
        // A non-string value under the reserved key does not resolve.
        let snapshot =
            PropertySnapshot::from_iter([(CLASS_KEY_PROPERTY.to_owned(), Value::from(42i64))]);
        assert_eq!(snapshot.class_key(), None);
    }

    #[test]
    fn iteration_and_len() {
        let snapshot = PropertySnapshot::from_iter([
            ("a".to_owned(), Value::from(1i64)),
            ("b".to_owned(), Value::from(2i64)),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.iter().count(), 2);
    }
}
