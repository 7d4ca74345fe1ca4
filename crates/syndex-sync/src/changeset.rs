//! Per-commit change payloads.
//!
//! The store delivers one [`TransactionChangeSet`] per committed transaction,
//! carrying the complete set of creates, deletes, and property changes that
//! transaction produced. The change-set is read-only from the dispatcher's
//! point of view; it is also the context the relationship correlation logic
//! inspects to suppress redundant relationship-triggered updates.

use syndex_core::{ClassKey, Edge, Entity, EntityId, EntityKey, PropertySnapshot, Value};

/// A mutated graph element as carried by a change event.
///
/// Property changes are reported uniformly for node-owned and
/// relationship-owned properties; this enum lets one handler serve both.
///
/// # Example
///
/// ```
/// use syndex_core::{Entity, EntityId, EntityKey};
/// use syndex_sync::ChangedEntity;
///
/// let entity = ChangedEntity::Node(Entity::new(EntityId::new(1)).with_label("Person"));
/// assert_eq!(entity.key(), EntityKey::Node(EntityId::new(1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ChangedEntity {
    /// A node.
    Node(Entity),
    /// A relationship.
    Relationship(Edge),
}

impl ChangedEntity {
    /// The stable identity of this element.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        match self {
            ChangedEntity::Node(entity) => EntityKey::Node(entity.id),
            ChangedEntity::Relationship(edge) => EntityKey::Relationship(edge.id),
        }
    }

    /// Get a property value by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        match self {
            ChangedEntity::Node(entity) => entity.get_property(key),
            ChangedEntity::Relationship(edge) => edge.get_property(key),
        }
    }

    /// The element's structural type: the primary label for nodes, the edge
    /// type for relationships.
    ///
    /// This is the fallback dispatch key used when the reserved class
    /// property is absent.
    #[must_use]
    pub fn structural_type(&self) -> Option<ClassKey> {
        match self {
            ChangedEntity::Node(entity) => {
                entity.primary_label().map(|label| ClassKey::new(label.as_str()))
            }
            ChangedEntity::Relationship(edge) => {
                Some(ClassKey::new(edge.edge_type.as_str()))
            }
        }
    }
}

impl From<Entity> for ChangedEntity {
    fn from(entity: Entity) -> Self {
        ChangedEntity::Node(entity)
    }
}

impl From<Edge> for ChangedEntity {
    fn from(edge: Edge) -> Self {
        ChangedEntity::Relationship(edge)
    }
}

/// A single property change within a committed transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    /// The element whose property changed.
    pub entity: ChangedEntity,
    /// The property name.
    pub field: String,
    /// The value before the change; `None` when the property was absent.
    pub old_value: Option<Value>,
    /// The value after the change; `None` when the property was removed.
    pub new_value: Option<Value>,
}

/// A deleted node paired with its pre-delete property snapshot.
///
/// The entity handle is decayed: its live metadata is no longer queryable, so
/// deletion handling resolves the class from the snapshot first and treats
/// the handle's labels only as a structural fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedNode {
    /// The deleted node's (decayed) handle.
    pub entity: Entity,
    /// The node's properties as of just before deletion.
    pub snapshot: PropertySnapshot,
}

/// A deleted relationship paired with its pre-delete property snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedRelationship {
    /// The deleted relationship's (decayed) handle.
    pub relationship: Edge,
    /// The relationship's properties as of just before deletion.
    pub snapshot: PropertySnapshot,
}

/// The complete set of changes produced by one committed transaction.
///
/// Delivered atomically to the dispatcher, once per commit. The collections
/// are disjoint change categories; the dispatcher iterates them in a fixed
/// order (property changes, node deletions, relationship creations,
/// relationship deletions).
///
/// # Example
///
/// ```
/// use syndex_core::{Edge, EdgeId, Entity, EntityId};
/// use syndex_sync::TransactionChangeSet;
///
/// let node = Entity::new(EntityId::new(1)).with_label("Person");
/// let rel = Edge::new(EdgeId::new(1), EntityId::new(2), EntityId::new(1), "KNOWS");
///
/// let change_set = TransactionChangeSet::new()
///     .with_created_node(node)
///     .with_created_relationship(rel);
///
/// assert!(change_set.created_node(EntityId::new(1)));
/// assert!(!change_set.deleted_node(EntityId::new(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionChangeSet {
    /// Nodes created in this transaction.
    pub created_nodes: Vec<Entity>,
    /// Nodes deleted in this transaction, with their pre-delete snapshots.
    pub deleted_nodes: Vec<DeletedNode>,
    /// Property changes in this transaction.
    pub property_changes: Vec<PropertyChange>,
    /// Relationships created in this transaction.
    pub created_relationships: Vec<Edge>,
    /// Relationships deleted in this transaction, with their snapshots.
    pub deleted_relationships: Vec<DeletedRelationship>,
}

impl TransactionChangeSet {
    /// Create an empty change-set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a created node.
    #[must_use]
    pub fn with_created_node(mut self, entity: Entity) -> Self {
        self.created_nodes.push(entity);
        self
    }

    /// Record a deleted node with its pre-delete snapshot.
    #[must_use]
    pub fn with_deleted_node(mut self, entity: Entity, snapshot: PropertySnapshot) -> Self {
        self.deleted_nodes.push(DeletedNode { entity, snapshot });
        self
    }

    /// Record a property change.
    #[must_use]
    pub fn with_property_change(
        mut self,
        entity: impl Into<ChangedEntity>,
        field: impl Into<String>,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> Self {
        self.property_changes.push(PropertyChange {
            entity: entity.into(),
            field: field.into(),
            old_value,
            new_value,
        });
        self
    }

    /// Record a created relationship.
    #[must_use]
    pub fn with_created_relationship(mut self, relationship: Edge) -> Self {
        self.created_relationships.push(relationship);
        self
    }

    /// Record a deleted relationship with its pre-delete snapshot.
    #[must_use]
    pub fn with_deleted_relationship(
        mut self,
        relationship: Edge,
        snapshot: PropertySnapshot,
    ) -> Self {
        self.deleted_relationships.push(DeletedRelationship { relationship, snapshot });
        self
    }

    /// Check whether a node with the given identity was created in this
    /// transaction.
    ///
    /// Matching is by stable entity identity, never by handle equality.
    #[must_use]
    pub fn created_node(&self, id: EntityId) -> bool {
        self.created_nodes.iter().any(|entity| entity.id == id)
    }

    /// Check whether a node with the given identity was deleted in this
    /// transaction.
    #[must_use]
    pub fn deleted_node(&self, id: EntityId) -> bool {
        self.deleted_nodes.iter().any(|deleted| deleted.entity.id == id)
    }

    /// Check if the change-set carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created_nodes.is_empty()
            && self.deleted_nodes.is_empty()
            && self.property_changes.is_empty()
            && self.created_relationships.is_empty()
            && self.deleted_relationships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syndex_core::EdgeId;

    #[test]
    fn membership_is_by_identity() {
        let node = Entity::new(EntityId::new(1)).with_label("Person");
        let change_set = TransactionChangeSet::new().with_created_node(node);

        // A distinct handle with the same ID still matches.
        assert!(change_set.created_node(EntityId::new(1)));
        assert!(!change_set.created_node(EntityId::new(2)));
    }

    #[test]
    fn deleted_membership() {
        let node = Entity::new(EntityId::new(3));
        let change_set =
            TransactionChangeSet::new().with_deleted_node(node, PropertySnapshot::new());

        assert!(change_set.deleted_node(EntityId::new(3)));
        assert!(!change_set.created_node(EntityId::new(3)));
    }

    #[test]
    fn structural_type_for_node_and_relationship() {
        let node = ChangedEntity::Node(Entity::new(EntityId::new(1)).with_label("Person"));
        assert_eq!(node.structural_type(), Some(ClassKey::new("Person")));

        let unlabeled = ChangedEntity::Node(Entity::new(EntityId::new(2)));
        assert_eq!(unlabeled.structural_type(), None);

        let rel = ChangedEntity::Relationship(Edge::new(
            EdgeId::new(1),
            EntityId::new(1),
            EntityId::new(2),
            "KNOWS",
        ));
        assert_eq!(rel.structural_type(), Some(ClassKey::new("KNOWS")));
    }

    #[test]
    fn empty_change_set() {
        assert!(TransactionChangeSet::new().is_empty());

        let change_set =
            TransactionChangeSet::new().with_created_node(Entity::new(EntityId::new(1)));
        assert!(!change_set.is_empty());
    }
}
