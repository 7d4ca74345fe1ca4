//! Class keys used to select an indexer for an entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The reserved property holding an entity's logical class name.
///
/// Live entities carry their class as an ordinary property under this key.
/// Once an entity has been deleted the property is no longer queryable from
/// the live handle, so deletion handling reads it from the pre-delete
/// [`PropertySnapshot`](super::PropertySnapshot) instead.
pub const CLASS_KEY_PROPERTY: &str = "_classname";

/// A stable string identifier for an entity's logical type.
///
/// Class keys are the dispatch keys of the index synchronization engine: every
/// indexer is registered under one or more class keys, and each mutated entity
/// is routed to the indexer bound to its resolved class key.
///
/// # Example
///
/// ```
/// use syndex_core::ClassKey;
///
/// let key = ClassKey::new("Person");
/// assert_eq!(key.as_str(), "Person");
///
/// // Also works via From trait
/// let key: ClassKey = "Company".into();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassKey(String);

impl ClassKey {
    /// Create a new class key.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the class key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassKey {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClassKey {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
