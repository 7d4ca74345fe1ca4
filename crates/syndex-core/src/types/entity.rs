//! Entity (node) types for the graph.
//!
//! This module provides the [`Entity`] type, which represents a node in the
//! graph with optional labels and properties.
//!
//! # Example
//!
//! ```
//! use syndex_core::{Entity, EntityId};
//!
//! let entity = Entity::new(EntityId::new(1))
//!     .with_label("Person")
//!     .with_property("name", "Alice")
//!     .with_property("age", 30i64);
//!
//! assert!(entity.has_label("Person"));
//! assert_eq!(entity.get_property("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{EntityId, Value};

/// A label that categorizes an entity.
///
/// Labels group entities into categories like "Person", "Company", or
/// "Product". An entity can have multiple labels; the first one acts as the
/// entity's structural type when no explicit class property is present.
///
/// # Example
///
/// ```
/// use syndex_core::Label;
///
/// let label = Label::new("Person");
/// assert_eq!(label.as_str(), "Person");
///
/// // Also works via From trait
/// let label: Label = "Company".into();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    /// Create a new label.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the label name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An entity (node) in the graph.
///
/// Entities have a unique identifier ([`EntityId`]), zero or more labels for
/// categorization ([`Label`]), and properties as key-value pairs ([`Value`]).
///
/// # Example
///
/// ```
/// use syndex_core::{Entity, EntityId, Value};
///
/// let mut person = Entity::new(EntityId::new(1))
///     .with_label("Person")
///     .with_property("name", "Alice")
///     .with_property("email", "alice@example.com");
///
/// assert!(person.has_label("Person"));
/// assert_eq!(person.get_property("name"), Some(&Value::String("Alice".into())));
///
/// person.set_property("verified", true);
/// assert_eq!(person.get_property("verified"), Some(&Value::Bool(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: EntityId,
    /// Labels that categorize this entity.
    pub labels: Vec<Label>,
    /// Properties stored on this entity.
    pub properties: HashMap<String, Value>,
}

impl Entity {
    /// Create a new entity with the given ID.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self { id, labels: Vec::new(), properties: HashMap::new() }
    }

    /// Add a label to this entity.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Add a property to this entity.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check if this entity has a specific label.
    #[inline]
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == label)
    }

    /// The entity's primary label, if it has any.
    #[inline]
    #[must_use]
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels.first()
    }

    /// Get a property value by key.
    #[inline]
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property value.
    #[inline]
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Remove a property by key, returning the old value if it existed.
    #[inline]
    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }
}
