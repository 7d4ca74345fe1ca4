//! Commit-time event dispatch and relationship correlation.
//!
//! The [`IndexSynchronizer`] receives one [`TransactionChangeSet`] per
//! committed transaction, resolves the responsible indexer for each change,
//! and forwards a normalized event to it. It holds no mutable state of its
//! own beyond the registry handle; all side effects live in indexer storage.
//!
//! Activation is explicit: bootstrap code calls
//! [`attach_index_synchronizer`] once at startup, before any transaction
//! that should be indexed commits. Late attachment silently misses earlier
//! commits, which is acceptable since there is nothing to index before
//! attachment.

use std::sync::{Arc, RwLock};

use tracing::{debug, trace};

use syndex_core::{Edge, Entity, EntityId, PropertySnapshot};

use crate::changeset::{ChangedEntity, PropertyChange, TransactionChangeSet};
use crate::error::SyncError;
use crate::registry::IndexerRegistry;
use crate::resolve::{resolve_class_key, resolve_deleted_class_key};

/// Read access to the live graph, provided by the store.
///
/// Relationship events are indexed under the *end node's* class, and the end
/// node is usually not part of the change-set (only the relationship is).
/// The store supplies this one-method view so the dispatcher can read the
/// end node's class metadata.
pub trait GraphView: Send + Sync {
    /// Fetch the live entity with the given ID, or `None` if it does not
    /// exist (or is no longer visible).
    fn entity(&self, id: EntityId) -> Option<Entity>;
}

/// A listener registered with the store's commit-notification stream.
///
/// The store invokes [`on_transaction_committed`] only on successful commit,
/// never for rolled-back transactions, and serializes notifications per
/// store instance. [`on_shutdown`] is invoked once when the engine shuts
/// down.
///
/// [`on_transaction_committed`]: TransactionEventHandler::on_transaction_committed
/// [`on_shutdown`]: TransactionEventHandler::on_shutdown
pub trait TransactionEventHandler: Send + Sync {
    /// Called once per committed transaction with the complete change-set.
    fn on_transaction_committed(
        &self,
        change_set: &TransactionChangeSet,
    ) -> Result<(), SyncError>;

    /// Called once at engine shutdown.
    ///
    /// # Default
    ///
    /// Default implementation is a no-op, returning `Ok(())`.
    fn on_shutdown(&self) -> Result<(), SyncError> {
        Ok(())
    }
}

/// The event dispatcher: routes committed changes to their indexers.
///
/// Per change-set the dispatcher performs four passes over disjoint change
/// categories, in an order that guarantees deletion correlation sees a
/// complete picture: property changes, node deletions, relationship
/// creations, relationship deletions.
///
/// Indexer failures are not caught here; they propagate to the notifying
/// caller. An indexing failure partway through a change-set leaves some
/// entities indexed and others not (best-effort ordering, not transactional).
pub struct IndexSynchronizer {
    registry: Arc<IndexerRegistry>,
    graph: Arc<dyn GraphView>,
}

impl IndexSynchronizer {
    /// Create a synchronizer over the given registry and graph view.
    #[must_use]
    pub fn new(registry: Arc<IndexerRegistry>, graph: Arc<dyn GraphView>) -> Self {
        Self { registry, graph }
    }

    /// The registry this synchronizer dispatches through.
    #[must_use]
    pub fn registry(&self) -> &Arc<IndexerRegistry> {
        &self.registry
    }

    /// Handle a single property change.
    ///
    /// Resolves the class from the element's live metadata and forwards the
    /// field change to its indexer. Identical for node-owned and
    /// relationship-owned properties. Silent no-op when the class or indexer
    /// does not resolve.
    ///
    /// # Errors
    ///
    /// Propagates indexer failures.
    pub fn on_property_changed(&self, change: &PropertyChange) -> Result<(), SyncError> {
        let Some(class_key) = resolve_class_key(&change.entity) else {
            return Ok(());
        };
        let Some(indexer) = self.registry.lookup(&class_key) else {
            trace!(class = %class_key, "no indexer for class, skipping property change");
            return Ok(());
        };
        trace!(entity = %change.entity.key(), field = %change.field, "indexing property change");
        indexer.update_on_property_change(
            &change.entity,
            &change.field,
            change.old_value.as_ref(),
            change.new_value.as_ref(),
        )?;
        Ok(())
    }

    /// Handle a deleted element (node or relationship).
    ///
    /// The class is resolved snapshot-first: the live handle's metadata is no
    /// longer queryable post-deletion, so the pre-delete snapshot's reserved
    /// class entry wins, with the handle's structural type as the only
    /// fallback.
    ///
    /// # Errors
    ///
    /// Propagates indexer failures.
    pub fn on_node_deleted(
        &self,
        entity: &ChangedEntity,
        snapshot: &PropertySnapshot,
    ) -> Result<(), SyncError> {
        let Some(class_key) = resolve_deleted_class_key(entity, snapshot) else {
            return Ok(());
        };
        let Some(indexer) = self.registry.lookup(&class_key) else {
            trace!(class = %class_key, "no indexer for class, skipping deletion");
            return Ok(());
        };
        trace!(entity = %entity.key(), "removing index entries for deleted element");
        indexer.remove_entries(entity, snapshot)?;
        Ok(())
    }

    /// Handle a created relationship.
    ///
    /// Suppressed when the end node was created in the same change-set: the
    /// node's own property-change handling already accounts for the new
    /// relationship's index effect, and indexing both would double-apply it.
    ///
    /// # Errors
    ///
    /// Propagates indexer failures.
    pub fn on_relationship_created(
        &self,
        relationship: &Edge,
        change_set: &TransactionChangeSet,
    ) -> Result<(), SyncError> {
        let end_node = relationship.end_node();
        if change_set.created_node(end_node) {
            debug!(
                relationship = %relationship.id,
                end_node = %end_node,
                "end node created in same transaction, suppressing relationship indexing"
            );
            return Ok(());
        }
        let Some(indexer) = self.end_node_indexer(end_node) else {
            return Ok(());
        };
        indexer.update_for_new_relationship(relationship)?;
        Ok(())
    }

    /// Handle a deleted relationship.
    ///
    /// The relationship's own index entries are always removed first, exactly
    /// like a deleted node. The end-node-side cleanup is then suppressed when
    /// the end node was deleted in the same change-set, since that node's own
    /// deletion handling removes the shared entries.
    ///
    /// # Errors
    ///
    /// Propagates indexer failures.
    pub fn on_relationship_deleted(
        &self,
        relationship: &Edge,
        snapshot: &PropertySnapshot,
        change_set: &TransactionChangeSet,
    ) -> Result<(), SyncError> {
        let as_element = ChangedEntity::Relationship(relationship.clone());
        self.on_node_deleted(&as_element, snapshot)?;

        let end_node = relationship.end_node();
        if change_set.deleted_node(end_node) {
            debug!(
                relationship = %relationship.id,
                end_node = %end_node,
                "end node deleted in same transaction, suppressing relationship cleanup"
            );
            return Ok(());
        }
        let Some(indexer) = self.end_node_indexer(end_node) else {
            return Ok(());
        };
        indexer.update_for_deleted_relationship(relationship)?;
        Ok(())
    }

    /// Process one complete change-set: the four passes in order.
    ///
    /// # Errors
    ///
    /// Propagates the first indexer failure; remaining events in the
    /// change-set are not processed in that case.
    pub fn apply(&self, change_set: &TransactionChangeSet) -> Result<(), SyncError> {
        for change in &change_set.property_changes {
            self.on_property_changed(change)?;
        }
        for deleted in &change_set.deleted_nodes {
            let entity = ChangedEntity::Node(deleted.entity.clone());
            self.on_node_deleted(&entity, &deleted.snapshot)?;
        }
        for relationship in &change_set.created_relationships {
            self.on_relationship_created(relationship, change_set)?;
        }
        for deleted in &change_set.deleted_relationships {
            self.on_relationship_deleted(&deleted.relationship, &deleted.snapshot, change_set)?;
        }
        Ok(())
    }

    /// Resolve the indexer responsible for a relationship's end node.
    ///
    /// An end node of an unindexed class (or one the graph can no longer
    /// produce) resolves to `None` and the relationship event is dropped -
    /// not an error.
    fn end_node_indexer(
        &self,
        end_node: EntityId,
    ) -> Option<Arc<dyn crate::indexer::Indexer>> {
        let entity = self.graph.entity(end_node)?;
        let class_key = resolve_class_key(&ChangedEntity::Node(entity))?;
        self.registry.lookup(&class_key)
    }
}

impl TransactionEventHandler for IndexSynchronizer {
    fn on_transaction_committed(
        &self,
        change_set: &TransactionChangeSet,
    ) -> Result<(), SyncError> {
        self.apply(change_set)
    }

    fn on_shutdown(&self) -> Result<(), SyncError> {
        self.registry.shutdown_all()
    }
}

/// The store-side registry of commit-notification listeners.
///
/// The store owns one bus per instance, calls
/// [`notify_commit`](CommitEventBus::notify_commit) synchronously after each
/// successful commit, and [`notify_shutdown`](CommitEventBus::notify_shutdown)
/// once at engine shutdown. Handlers run to completion in registration order
/// before the call returns, matching the serialized delivery contract.
#[derive(Default)]
pub struct CommitEventBus {
    handlers: RwLock<Vec<Arc<dyn TransactionEventHandler>>>,
}

impl CommitEventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners survive for the lifetime of the bus.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] if the handler list is poisoned.
    pub fn add_handler(&self, handler: Arc<dyn TransactionEventHandler>) -> Result<(), SyncError> {
        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| SyncError::lock_poisoned("commit event bus"))?;
        handlers.push(handler);
        Ok(())
    }

    /// Deliver a committed change-set to every registered listener.
    ///
    /// # Errors
    ///
    /// Propagates the first listener failure; later listeners are not
    /// notified in that case.
    pub fn notify_commit(&self, change_set: &TransactionChangeSet) -> Result<(), SyncError> {
        let handlers = self
            .handlers
            .read()
            .map_err(|_| SyncError::lock_poisoned("commit event bus"))?;
        for handler in handlers.iter() {
            handler.on_transaction_committed(change_set)?;
        }
        Ok(())
    }

    /// Deliver the shutdown hook to every registered listener.
    ///
    /// # Errors
    ///
    /// Propagates the first listener failure.
    pub fn notify_shutdown(&self) -> Result<(), SyncError> {
        let handlers = self
            .handlers
            .read()
            .map_err(|_| SyncError::lock_poisoned("commit event bus"))?;
        for handler in handlers.iter() {
            handler.on_shutdown()?;
        }
        Ok(())
    }

    /// The number of registered listeners.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.read().map(|handlers| handlers.len()).unwrap_or(0)
    }
}

/// Attach an [`IndexSynchronizer`] to a store's commit event bus.
///
/// This is the explicit bootstrap entry point: activation is visible in
/// startup code, and test harnesses opt out by simply not calling it. Must
/// run before any transaction that should be indexed commits.
///
/// # Errors
///
/// Returns [`SyncError::LockPoisoned`] if the bus's handler list is poisoned.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use syndex_core::{Entity, EntityId};
/// use syndex_sync::{attach_index_synchronizer, CommitEventBus, GraphView, IndexerRegistry};
///
/// struct EmptyGraph;
/// impl GraphView for EmptyGraph {
///     fn entity(&self, _id: EntityId) -> Option<Entity> {
///         None
///     }
/// }
///
/// let registry = Arc::new(IndexerRegistry::new());
/// let bus = CommitEventBus::new();
/// let synchronizer = attach_index_synchronizer(&bus, registry, Arc::new(EmptyGraph))?;
///
/// assert_eq!(bus.handler_count(), 1);
/// assert!(synchronizer.registry().is_empty());
/// # Ok::<(), syndex_sync::SyncError>(())
/// ```
pub fn attach_index_synchronizer(
    bus: &CommitEventBus,
    registry: Arc<IndexerRegistry>,
    graph: Arc<dyn GraphView>,
) -> Result<Arc<IndexSynchronizer>, SyncError> {
    let synchronizer = Arc::new(IndexSynchronizer::new(registry, graph));
    bus.add_handler(Arc::clone(&synchronizer) as Arc<dyn TransactionEventHandler>)?;
    Ok(synchronizer)
}
