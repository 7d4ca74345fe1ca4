//! Class key resolution rules.
//!
//! Resolution is a two-step lookup: the reserved class property first, then
//! the element's structural type. Deletions use a snapshot-first variant
//! because a deleted entity's live metadata is no longer queryable.

use syndex_core::{ClassKey, PropertySnapshot, Value, CLASS_KEY_PROPERTY};

use crate::changeset::ChangedEntity;

/// Resolve the class key for a live graph element.
///
/// Reads the reserved `_classname` property first; when absent (or not a
/// string), falls back to the element's structural type: the primary label
/// for nodes, the edge type for relationships. Returns `None` when neither
/// resolves, in which case the element is simply not indexed.
///
/// # Example
///
/// ```
/// use syndex_core::{ClassKey, Entity, EntityId, CLASS_KEY_PROPERTY};
/// use syndex_sync::{resolve_class_key, ChangedEntity};
///
/// // The reserved property wins over the label.
/// let node = ChangedEntity::Node(
///     Entity::new(EntityId::new(1))
///         .with_label("Employee")
///         .with_property(CLASS_KEY_PROPERTY, "Person"),
/// );
/// assert_eq!(resolve_class_key(&node), Some(ClassKey::new("Person")));
///
/// // Without it, the structural type is used.
/// let node = ChangedEntity::Node(Entity::new(EntityId::new(2)).with_label("Employee"));
/// assert_eq!(resolve_class_key(&node), Some(ClassKey::new("Employee")));
/// ```
#[must_use]
pub fn resolve_class_key(entity: &ChangedEntity) -> Option<ClassKey> {
    entity
        .get_property(CLASS_KEY_PROPERTY)
        .and_then(Value::as_str)
        .map(ClassKey::new)
        .or_else(|| entity.structural_type())
}

/// Resolve the class key for a deleted graph element.
///
/// The snapshot-first rule is mandatory: the class is read strictly from the
/// pre-delete snapshot's `_classname` entry when present, never from the
/// (now-invalid) live handle's properties. Only when the snapshot carries no
/// class entry does resolution fall back to the handle's structural type.
#[must_use]
pub fn resolve_deleted_class_key(
    entity: &ChangedEntity,
    snapshot: &PropertySnapshot,
) -> Option<ClassKey> {
    snapshot.class_key().or_else(|| entity.structural_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syndex_core::{Edge, EdgeId, Entity, EntityId};

    #[test]
    fn reserved_property_wins_over_label() {
        let node = ChangedEntity::Node(
            Entity::new(EntityId::new(1))
                .with_label("Employee")
                .with_property(CLASS_KEY_PROPERTY, "Person"),
        );
        assert_eq!(resolve_class_key(&node), Some(ClassKey::new("Person")));
    }

    #[test]
    fn falls_back_to_structural_type() {
        let node = ChangedEntity::Node(Entity::new(EntityId::new(1)).with_label("Employee"));
        assert_eq!(resolve_class_key(&node), Some(ClassKey::new("Employee")));

        let rel = ChangedEntity::Relationship(Edge::new(
            EdgeId::new(1),
            EntityId::new(1),
            EntityId::new(2),
            "WORKS_AT",
        ));
        assert_eq!(resolve_class_key(&rel), Some(ClassKey::new("WORKS_AT")));
    }

    #[test]
    fn unresolvable_yields_none() {
        let node = ChangedEntity::Node(Entity::new(EntityId::new(1)));
        assert_eq!(resolve_class_key(&node), None);
    }

    #[test]
    fn non_string_reserved_property_is_ignored() {
        let node = ChangedEntity::Node(
            Entity::new(EntityId::new(1))
                .with_label("Person")
                .with_property(CLASS_KEY_PROPERTY, 7i64),
        );
        assert_eq!(resolve_class_key(&node), Some(ClassKey::new("Person")));
    }

    #[test]
    fn deletion_prefers_snapshot_over_live_metadata() {
        // The live handle says "Imposter"; the snapshot says "Person".
        // Deletion resolution must trust the snapshot.
        let node = ChangedEntity::Node(
            Entity::new(EntityId::new(1))
                .with_label("Imposter")
                .with_property(CLASS_KEY_PROPERTY, "Imposter"),
        );
        let snapshot = PropertySnapshot::from_iter([(
            CLASS_KEY_PROPERTY.to_owned(),
            Value::from("Person"),
        )]);

        assert_eq!(resolve_deleted_class_key(&node, &snapshot), Some(ClassKey::new("Person")));
    }

    #[test]
    fn deletion_falls_back_to_structural_type() {
        let node = ChangedEntity::Node(Entity::new(EntityId::new(1)).with_label("Person"));
        let snapshot =
            PropertySnapshot::from_iter([("email".to_owned(), Value::from("a@x.com"))]);

        assert_eq!(resolve_deleted_class_key(&node, &snapshot), Some(ClassKey::new("Person")));
    }
}
