//! The indexer capability trait.
//!
//! An [`Indexer`] owns one secondary index's underlying storage for one or
//! more aliased classes. The dispatcher treats indexers as opaque: it decides
//! *which* indexer gets *which* update and forwards the normalized change;
//! what the backend does with it (inverted index, B-tree, full-text engine)
//! is entirely the backend's concern.

use syndex_core::{Edge, PropertySnapshot, Value};

use crate::changeset::ChangedEntity;
use crate::error::IndexerError;

/// Capability interface required from any index backend.
///
/// All operations are fire-and-forget from the dispatcher's perspective (no
/// return value is consumed beyond error propagation) and must be idempotent
/// under at-least-once delivery: the dispatcher does not retry, but a host
/// store may re-deliver a notification after a partial failure.
///
/// Implementations must be safe under concurrent calls if the host store
/// permits concurrent commits.
pub trait Indexer: Send + Sync {
    /// Update the index after a property changed on an entity of this
    /// indexer's class.
    ///
    /// `old_value` is `None` when the property was newly added, `new_value`
    /// is `None` when it was removed.
    fn update_on_property_change(
        &self,
        entity: &ChangedEntity,
        field: &str,
        old_value: Option<&Value>,
        new_value: Option<&Value>,
    ) -> Result<(), IndexerError>;

    /// Remove every index entry derived from the given entity's fields.
    ///
    /// Called on deletion; `snapshot` is the entity's property map as of just
    /// before the delete, since the live entity is already gone.
    fn remove_entries(
        &self,
        entity: &ChangedEntity,
        snapshot: &PropertySnapshot,
    ) -> Result<(), IndexerError>;

    /// Update the index for a newly created relationship ending at an entity
    /// of this indexer's class.
    fn update_for_new_relationship(&self, relationship: &Edge) -> Result<(), IndexerError>;

    /// Update the index for a deleted relationship that ended at an entity of
    /// this indexer's class.
    fn update_for_deleted_relationship(&self, relationship: &Edge) -> Result<(), IndexerError>;

    /// Clear the index's storage.
    ///
    /// The indexer stays registered and usable afterwards; this is the
    /// administrative re-index path, not shutdown.
    fn clear(&self) -> Result<(), IndexerError>;

    /// Flush and tear down the index's storage at engine shutdown.
    fn shutdown(&self) -> Result<(), IndexerError>;
}

impl std::fmt::Debug for dyn Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Indexer")
    }
}
