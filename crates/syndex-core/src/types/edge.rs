//! Edge (relationship) types for the graph.
//!
//! This module provides the [`Edge`] type, which represents a directed
//! relationship between two entities in the graph.
//!
//! # Example
//!
//! ```
//! use syndex_core::{Edge, EdgeId, EntityId};
//!
//! let alice = EntityId::new(1);
//! let bob = EntityId::new(2);
//!
//! // Create an edge from Alice to Bob
//! let follows = Edge::new(EdgeId::new(1), alice, bob, "FOLLOWS")
//!     .with_property("since", "2024-01-01");
//!
//! assert_eq!(follows.edge_type.as_str(), "FOLLOWS");
//! assert_eq!(follows.source, alice);
//! assert_eq!(follows.target, bob);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{EdgeId, EntityId, Value};

/// The type of an edge, describing the relationship.
///
/// Edge types categorize relationships, such as "FOLLOWS", "LIKES", or
/// "WORKS_AT". They are typically written in `SCREAMING_SNAKE_CASE` by
/// convention, and act as a relationship's structural type when no explicit
/// class property is present.
///
/// # Example
///
/// ```
/// use syndex_core::EdgeType;
///
/// let edge_type = EdgeType::new("FOLLOWS");
/// assert_eq!(edge_type.as_str(), "FOLLOWS");
///
/// // Also works via From trait
/// let edge_type: EdgeType = "WORKS_AT".into();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeType(String);

impl EdgeType {
    /// Create a new edge type.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the edge type name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeType {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EdgeType {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An edge (relationship) between two entities in the graph.
///
/// Edges are directed relationships connecting a source entity to a target
/// entity. The target is the edge's *end node*: the endpoint whose class
/// governs index placement for relationship-derived index entries.
///
/// # Example
///
/// ```
/// use syndex_core::{Edge, EdgeId, EntityId, Value};
///
/// let user_id = EntityId::new(1);
/// let product_id = EntityId::new(100);
///
/// let purchased = Edge::new(EdgeId::new(1), user_id, product_id, "PURCHASED")
///     .with_property("quantity", 2i64);
///
/// assert_eq!(purchased.source, user_id);
/// assert_eq!(purchased.end_node(), product_id);
/// assert_eq!(purchased.get_property("quantity"), Some(&Value::Int(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// The source entity ID.
    pub source: EntityId,
    /// The target entity ID.
    pub target: EntityId,
    /// The type of this edge/relationship.
    pub edge_type: EdgeType,
    /// Properties stored on this edge.
    pub properties: HashMap<String, Value>,
}

impl Edge {
    /// Create a new edge with the given ID, endpoints, and type.
    #[must_use]
    pub fn new(
        id: EdgeId,
        source: EntityId,
        target: EntityId,
        edge_type: impl Into<EdgeType>,
    ) -> Self {
        Self { id, source, target, edge_type: edge_type.into(), properties: HashMap::new() }
    }

    /// Add a property to this edge.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The edge's end node: the endpoint whose class governs index placement.
    #[inline]
    #[must_use]
    pub fn end_node(&self) -> EntityId {
        self.target
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
}
