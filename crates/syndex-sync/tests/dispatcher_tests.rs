//! Integration tests for commit-time dispatch and relationship correlation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use syndex_core::{
    Edge, EdgeId, Entity, EntityId, EntityKey, PropertySnapshot, Value, CLASS_KEY_PROPERTY,
};
use syndex_sync::{
    attach_index_synchronizer, ChangedEntity, CommitEventBus, ExactIndexer, GraphView,
    IndexSynchronizer, Indexer, IndexerError, IndexerRegistry, SyncError, TransactionChangeSet,
};

/// Records every call so routing and ordering are observable.
#[derive(Default)]
struct RecordingIndexer {
    events: Mutex<Vec<String>>,
}

impl RecordingIndexer {
    fn record(&self, event: String) {
        self.events.lock().expect("events lock").push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }
}

impl Indexer for RecordingIndexer {
    fn update_on_property_change(
        &self,
        entity: &ChangedEntity,
        field: &str,
        _old_value: Option<&Value>,
        _new_value: Option<&Value>,
    ) -> Result<(), IndexerError> {
        self.record(format!("property_change {} {field}", entity.key()));
        Ok(())
    }

    fn remove_entries(
        &self,
        entity: &ChangedEntity,
        _snapshot: &PropertySnapshot,
    ) -> Result<(), IndexerError> {
        self.record(format!("remove_entries {}", entity.key()));
        Ok(())
    }

    fn update_for_new_relationship(&self, relationship: &Edge) -> Result<(), IndexerError> {
        self.record(format!("new_relationship {}", EntityKey::Relationship(relationship.id)));
        Ok(())
    }

    fn update_for_deleted_relationship(&self, relationship: &Edge) -> Result<(), IndexerError> {
        self.record(format!("deleted_relationship {}", EntityKey::Relationship(relationship.id)));
        Ok(())
    }

    fn clear(&self) -> Result<(), IndexerError> {
        self.record("clear".to_owned());
        Ok(())
    }

    fn shutdown(&self) -> Result<(), IndexerError> {
        self.record("shutdown".to_owned());
        Ok(())
    }
}

/// Fails on property changes, for error propagation tests.
struct FailingIndexer;

impl Indexer for FailingIndexer {
    fn update_on_property_change(
        &self,
        _entity: &ChangedEntity,
        _field: &str,
        _old_value: Option<&Value>,
        _new_value: Option<&Value>,
    ) -> Result<(), IndexerError> {
        Err(IndexerError::new("update_on_property_change", "backend unavailable"))
    }

    fn remove_entries(
        &self,
        _entity: &ChangedEntity,
        _snapshot: &PropertySnapshot,
    ) -> Result<(), IndexerError> {
        Ok(())
    }

    fn update_for_new_relationship(&self, _relationship: &Edge) -> Result<(), IndexerError> {
        Ok(())
    }

    fn update_for_deleted_relationship(&self, _relationship: &Edge) -> Result<(), IndexerError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), IndexerError> {
        Ok(())
    }

    fn shutdown(&self) -> Result<(), IndexerError> {
        Ok(())
    }
}

/// A graph view backed by a fixed entity map.
#[derive(Default)]
struct MapGraph {
    entities: HashMap<EntityId, Entity>,
}

impl MapGraph {
    fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.id, entity);
        self
    }
}

impl GraphView for MapGraph {
    fn entity(&self, id: EntityId) -> Option<Entity> {
        self.entities.get(&id).cloned()
    }
}

fn person(id: u64) -> Entity {
    Entity::new(EntityId::new(id)).with_label("Person").with_property(CLASS_KEY_PROPERTY, "Person")
}

fn synchronizer_with(
    registry: Arc<IndexerRegistry>,
    graph: MapGraph,
) -> IndexSynchronizer {
    IndexSynchronizer::new(registry, Arc::new(graph))
}

#[test]
fn property_change_routed_by_reserved_class() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    let humans = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");
    registry.register_with("Human", "Human", humans.clone()).expect("bind");

    // The reserved class property wins over the structural label.
    let node = Entity::new(EntityId::new(1))
        .with_label("Human")
        .with_property(CLASS_KEY_PROPERTY, "Person");
    let change_set = TransactionChangeSet::new().with_property_change(
        node,
        "email",
        None,
        Some(Value::from("a@x.com")),
    );

    let sync = synchronizer_with(registry, MapGraph::default());
    sync.apply(&change_set).expect("apply");

    assert_eq!(people.events(), vec!["property_change node:1 email"]);
    assert!(humans.events().is_empty());
}

#[test]
fn structural_label_is_the_fallback_class() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");

    let node = Entity::new(EntityId::new(1)).with_label("Person");
    let change_set = TransactionChangeSet::new().with_property_change(
        node,
        "email",
        None,
        Some(Value::from("a@x.com")),
    );

    synchronizer_with(registry, MapGraph::default()).apply(&change_set).expect("apply");
    assert_eq!(people.events(), vec!["property_change node:1 email"]);
}

#[test]
fn unregistered_class_is_silently_ignored() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");

    // Every change category targets the unregistered "Visitor" class: a
    // property change and deletion on a Visitor node, plus relationships
    // ending at a pre-existing Visitor node.
    let node = Entity::new(EntityId::new(1)).with_label("Visitor");
    let created_rel = Edge::new(EdgeId::new(7), EntityId::new(3), EntityId::new(2), "VISITED");
    let deleted_rel = Edge::new(EdgeId::new(8), EntityId::new(3), EntityId::new(2), "VISITED");
    let change_set = TransactionChangeSet::new()
        .with_property_change(node.clone(), "email", None, Some(Value::from("a@x.com")))
        .with_deleted_node(node, PropertySnapshot::new())
        .with_created_relationship(created_rel)
        .with_deleted_relationship(deleted_rel, PropertySnapshot::new());

    let graph =
        MapGraph::default().with_entity(Entity::new(EntityId::new(2)).with_label("Visitor"));
    synchronizer_with(registry, graph).apply(&change_set).expect("apply");
    assert!(people.events().is_empty());
}

#[test]
fn relationship_to_unresolvable_end_node_is_ignored() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");

    // The graph cannot produce the end node at all; both relationship
    // callbacks drop the event instead of failing.
    let created_rel = Edge::new(EdgeId::new(7), EntityId::new(1), EntityId::new(99), "KNOWS");
    let deleted_rel = Edge::new(EdgeId::new(8), EntityId::new(1), EntityId::new(99), "KNOWS");
    let change_set = TransactionChangeSet::new()
        .with_created_relationship(created_rel)
        .with_deleted_relationship(deleted_rel, PropertySnapshot::new());

    synchronizer_with(registry, MapGraph::default()).apply(&change_set).expect("apply");
    assert!(people.events().is_empty());
}

#[test]
fn deletion_resolves_class_from_snapshot() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    let imposters = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");
    registry.register_with("Imposter", "Imposter", imposters.clone()).expect("bind");

    // The decayed handle carries a misleading label; the pre-delete snapshot
    // is the authority on what class the node belonged to.
    let handle = Entity::new(EntityId::new(2)).with_label("Imposter");
    let snapshot = PropertySnapshot::from_iter([
        (CLASS_KEY_PROPERTY.to_owned(), Value::from("Person")),
        ("email".to_owned(), Value::from("a@x.com")),
    ]);
    let change_set = TransactionChangeSet::new().with_deleted_node(handle, snapshot);

    synchronizer_with(registry, MapGraph::default()).apply(&change_set).expect("apply");
    assert_eq!(people.events(), vec!["remove_entries node:2"]);
    assert!(imposters.events().is_empty());
}

#[test]
fn deletion_falls_back_to_structural_type() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");

    let handle = Entity::new(EntityId::new(2)).with_label("Person");
    let snapshot = PropertySnapshot::from_iter([("email".to_owned(), Value::from("a@x.com"))]);
    let change_set = TransactionChangeSet::new().with_deleted_node(handle, snapshot);

    synchronizer_with(registry, MapGraph::default()).apply(&change_set).expect("apply");
    assert_eq!(people.events(), vec!["remove_entries node:2"]);
}

#[test]
fn relationship_to_node_created_in_same_transaction_is_suppressed() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");

    let end = person(2);
    let rel = Edge::new(EdgeId::new(7), EntityId::new(1), EntityId::new(2), "KNOWS");
    let change_set = TransactionChangeSet::new()
        .with_created_node(end.clone())
        .with_property_change(end.clone(), "email", None, Some(Value::from("b@x.com")))
        .with_created_relationship(rel);

    let graph = MapGraph::default().with_entity(end);
    synchronizer_with(registry, graph).apply(&change_set).expect("apply");

    // The node's own property handling carries the index effect; the
    // relationship event adds nothing.
    assert_eq!(people.events(), vec!["property_change node:2 email"]);
}

#[test]
fn relationship_to_preexisting_node_is_indexed_once() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");

    let rel = Edge::new(EdgeId::new(7), EntityId::new(1), EntityId::new(2), "KNOWS");
    let change_set = TransactionChangeSet::new().with_created_relationship(rel);

    let graph = MapGraph::default().with_entity(person(2));
    synchronizer_with(registry, graph).apply(&change_set).expect("apply");

    assert_eq!(people.events(), vec!["new_relationship rel:7"]);
}

#[test]
fn deleted_relationship_cleans_its_own_entries_and_skips_deleted_end_node() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    let friendships = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");
    registry.register_with("FRIENDS", "FRIENDS", friendships.clone()).expect("bind");

    let end = person(2);
    let rel = Edge::new(EdgeId::new(9), EntityId::new(1), EntityId::new(2), "FRIENDS");
    let rel_snapshot =
        PropertySnapshot::from_iter([("since".to_owned(), Value::from("2024"))]);
    let change_set = TransactionChangeSet::new()
        .with_deleted_node(end.clone(), PropertySnapshot::new())
        .with_deleted_relationship(rel, rel_snapshot);

    let graph = MapGraph::default().with_entity(end);
    synchronizer_with(registry, graph).apply(&change_set).expect("apply");

    // The relationship's own entries always come out, but the end-node-side
    // update is suppressed since that node's deletion already removes its
    // entries.
    assert_eq!(friendships.events(), vec!["remove_entries rel:9"]);
    assert_eq!(people.events(), vec!["remove_entries node:2"]);
}

#[test]
fn deleted_relationship_updates_surviving_end_node() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    let friendships = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");
    registry.register_with("FRIENDS", "FRIENDS", friendships.clone()).expect("bind");

    let rel = Edge::new(EdgeId::new(9), EntityId::new(1), EntityId::new(2), "FRIENDS");
    let change_set = TransactionChangeSet::new()
        .with_deleted_relationship(rel, PropertySnapshot::new());

    let graph = MapGraph::default().with_entity(person(2));
    synchronizer_with(registry, graph).apply(&change_set).expect("apply");

    assert_eq!(friendships.events(), vec!["remove_entries rel:9"]);
    assert_eq!(people.events(), vec!["deleted_relationship rel:9"]);
}

#[test]
fn change_categories_dispatch_in_fixed_order() {
    let registry = Arc::new(IndexerRegistry::new());
    let recorder = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", recorder.clone()).expect("bind");
    registry.register_with("FRIENDS", "Person", recorder.clone()).expect("alias");

    let created_rel = Edge::new(EdgeId::new(7), EntityId::new(1), EntityId::new(2), "FRIENDS");
    let deleted_rel = Edge::new(EdgeId::new(8), EntityId::new(1), EntityId::new(2), "FRIENDS");
    let change_set = TransactionChangeSet::new()
        .with_deleted_relationship(deleted_rel, PropertySnapshot::new())
        .with_deleted_node(
            Entity::new(EntityId::new(3)).with_label("Person"),
            PropertySnapshot::new(),
        )
        .with_created_relationship(created_rel)
        .with_property_change(
            Entity::new(EntityId::new(1)).with_label("Person"),
            "email",
            None,
            Some(Value::from("a@x.com")),
        );

    let graph = MapGraph::default().with_entity(person(2));
    synchronizer_with(registry, graph).apply(&change_set).expect("apply");

    // Property changes, node deletions, relationship creations, relationship
    // deletions, regardless of the order the change-set was assembled in.
    assert_eq!(
        recorder.events(),
        vec![
            "property_change node:1 email",
            "remove_entries node:3",
            "new_relationship rel:7",
            "remove_entries rel:8",
            "deleted_relationship rel:8",
        ]
    );
}

#[test]
fn exact_backend_end_to_end_over_the_bus() {
    let registry = Arc::new(IndexerRegistry::new());
    let exact = Arc::new(ExactIndexer::new());
    registry.register_with("Person", "Person", exact.clone()).expect("bind");

    let bus = CommitEventBus::new();
    attach_index_synchronizer(&bus, Arc::clone(&registry), Arc::new(MapGraph::default()))
        .expect("attach");

    let alice = person(1);
    let created = TransactionChangeSet::new()
        .with_created_node(alice.clone())
        .with_property_change(alice.clone(), "email", None, Some(Value::from("a@x.com")));
    bus.notify_commit(&created).expect("commit");

    assert_eq!(
        exact.lookup("email", &Value::from("a@x.com")),
        vec![EntityKey::Node(EntityId::new(1))]
    );

    let snapshot = PropertySnapshot::from_iter([
        (CLASS_KEY_PROPERTY.to_owned(), Value::from("Person")),
        ("email".to_owned(), Value::from("a@x.com")),
    ]);
    let deleted = TransactionChangeSet::new().with_deleted_node(alice, snapshot);
    bus.notify_commit(&deleted).expect("commit");

    assert!(exact.lookup("email", &Value::from("a@x.com")).is_empty());
}

#[test]
fn bus_shutdown_reaches_every_indexer() {
    let registry = Arc::new(IndexerRegistry::new());
    let people = Arc::new(RecordingIndexer::default());
    registry.register_with("Person", "Person", people.clone()).expect("bind");

    let bus = CommitEventBus::new();
    attach_index_synchronizer(&bus, registry, Arc::new(MapGraph::default())).expect("attach");

    bus.notify_shutdown().expect("shutdown");
    assert_eq!(people.events(), vec!["shutdown"]);
}

#[test]
fn indexer_failure_propagates_through_commit() {
    let registry = Arc::new(IndexerRegistry::new());
    registry.register_with("Person", "Person", Arc::new(FailingIndexer)).expect("bind");

    let bus = CommitEventBus::new();
    attach_index_synchronizer(&bus, registry, Arc::new(MapGraph::default())).expect("attach");

    let change_set = TransactionChangeSet::new().with_property_change(
        Entity::new(EntityId::new(1)).with_label("Person"),
        "email",
        None,
        Some(Value::from("a@x.com")),
    );

    let err = bus.notify_commit(&change_set).expect_err("indexer failure");
    assert!(matches!(err, SyncError::Indexer(_)));
}
