//! Syndex Sync
//!
//! This crate keeps externally-maintained secondary indexes consistent with
//! mutations happening inside a transactional graph store, by reacting to
//! commit-time change notifications.
//!
//! # Overview
//!
//! The engine is built from four pieces:
//!
//! - [`IndexerRegistry`] - the process-wide map from [`ClassKey`] to its owning
//!   indexer, with aliasing so several logical classes can share one index
//! - [`IndexSynchronizer`] - the event dispatcher that receives one
//!   [`TransactionChangeSet`] per committed transaction and routes each change
//!   to the responsible indexer
//! - [`Indexer`] - the capability trait any index backend implements
//! - [`CommitEventBus`] - the store-side handler registry the synchronizer is
//!   attached to at startup via [`attach_index_synchronizer`]
//!
//! Reference in-memory backends ([`ExactIndexer`], [`FullTextIndexer`]) are
//! included so the engine is usable and testable without an external index
//! server.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use syndex_core::{Entity, EntityId, Value, CLASS_KEY_PROPERTY};
//! use syndex_sync::{
//!     attach_index_synchronizer, ChangedEntity, CommitEventBus, GraphView, IndexerRegistry,
//!     TransactionChangeSet,
//! };
//!
//! // The store provides read access to live entities; a change-set alone
//! // does not carry a relationship's end node.
//! struct EmptyGraph;
//! impl GraphView for EmptyGraph {
//!     fn entity(&self, _id: EntityId) -> Option<Entity> {
//!         None
//!     }
//! }
//!
//! # fn main() -> Result<(), syndex_sync::SyncError> {
//! // Bootstrap: register indexers, then attach the synchronizer to the
//! // store's commit event bus.
//! let registry = Arc::new(IndexerRegistry::new());
//! registry.register("Person", "Person", "exact")?;
//!
//! let bus = CommitEventBus::new();
//! let _synchronizer =
//!     attach_index_synchronizer(&bus, Arc::clone(&registry), Arc::new(EmptyGraph))?;
//!
//! // The store delivers one change-set per committed transaction.
//! let person = Entity::new(EntityId::new(1))
//!     .with_label("Person")
//!     .with_property(CLASS_KEY_PROPERTY, "Person")
//!     .with_property("email", "a@x.com");
//!
//! let change_set = TransactionChangeSet::new()
//!     .with_created_node(person.clone())
//!     .with_property_change(
//!         ChangedEntity::Node(person),
//!         "email",
//!         None,
//!         Some(Value::from("a@x.com")),
//!     );
//!
//! bus.notify_commit(&change_set)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`changeset`] - Per-commit change payloads ([`TransactionChangeSet`])
//! - [`indexer`] - The indexer capability trait
//! - [`backend`] - Reference in-memory index backends
//! - [`registry`] - The class-to-indexer map
//! - [`dispatcher`] - Commit-time event dispatch and correlation
//! - [`resolve`] - Class key resolution rules
//! - [`error`] - Error types ([`SyncError`], [`IndexerError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod changeset;
pub mod dispatcher;
pub mod error;
pub mod indexer;
pub mod registry;
pub mod resolve;

// Re-export commonly used types
pub use backend::{ExactIndexer, FullTextIndexer, IndexKind};
pub use changeset::{
    ChangedEntity, DeletedNode, DeletedRelationship, PropertyChange, TransactionChangeSet,
};
pub use dispatcher::{
    attach_index_synchronizer, CommitEventBus, GraphView, IndexSynchronizer,
    TransactionEventHandler,
};
pub use error::{IndexerError, SyncError};
pub use indexer::Indexer;
pub use registry::IndexerRegistry;
pub use resolve::{resolve_class_key, resolve_deleted_class_key};

// Convenience re-export of the core vocabulary
pub use syndex_core::{
    ClassKey, Edge, EdgeId, EdgeType, Entity, EntityId, EntityKey, Label, PropertySnapshot, Value,
    CLASS_KEY_PROPERTY,
};
