//! Unique identifiers for entities and edges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity (node) in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new `EntityId` from a raw u64 value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an edge (relationship) in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Create a new `EdgeId` from a raw u64 value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity for a graph element, spanning both nodes and relationships.
///
/// Change notifications may hand out several representations of the same
/// underlying element within one commit (a live handle in the created set, a
/// decayed handle paired with a deletion snapshot). `EntityKey` is the identity
/// those representations share, so correlation is done by stable identity and
/// never by pointer equality.
///
/// # Example
///
/// ```
/// use syndex_core::{EntityId, EntityKey};
///
/// let key = EntityKey::Node(EntityId::new(7));
/// assert_eq!(key, EntityKey::Node(EntityId::new(7)));
/// assert_ne!(key, EntityKey::Node(EntityId::new(8)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKey {
    /// Identity of a node.
    Node(EntityId),
    /// Identity of a relationship.
    Relationship(EdgeId),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Node(id) => write!(f, "node:{id}"),
            EntityKey::Relationship(id) => write!(f, "rel:{id}"),
        }
    }
}

impl From<EntityId> for EntityKey {
    fn from(id: EntityId) -> Self {
        EntityKey::Node(id)
    }
}

impl From<EdgeId> for EntityKey {
    fn from(id: EdgeId) -> Self {
        EntityKey::Relationship(id)
    }
}
