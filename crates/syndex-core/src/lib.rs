//! Syndex Core
//!
//! This crate provides the fundamental graph types shared by the Syndex
//! index synchronization engine.
//!
//! # Overview
//!
//! The core crate defines the vocabulary used throughout Syndex:
//!
//! - **Identifiers**: [`EntityId`] and [`EdgeId`] for referencing graph elements,
//!   and [`EntityKey`] as a stable identity spanning both kinds
//! - **Graph primitives**: [`Entity`] (nodes) and [`Edge`] (relationships)
//! - **Values**: [`Value`] enum for property values
//! - **Classification**: [`Label`] for entity categorization, [`EdgeType`] for
//!   relationships, and [`ClassKey`] for selecting an indexer
//! - **Snapshots**: [`PropertySnapshot`] capturing an entity's properties as of
//!   just before its deletion
//!
//! # Example
//!
//! ```
//! use syndex_core::{Entity, EntityId, Edge, EdgeId, Value, CLASS_KEY_PROPERTY};
//!
//! // Create entities (graph nodes)
//! let alice = Entity::new(EntityId::new(1))
//!     .with_label("Person")
//!     .with_property(CLASS_KEY_PROPERTY, "Person")
//!     .with_property("name", "Alice");
//!
//! let bob = Entity::new(EntityId::new(2))
//!     .with_label("Person")
//!     .with_property("name", "Bob");
//!
//! // Create edges (relationships)
//! let follows = Edge::new(EdgeId::new(1), alice.id, bob.id, "FOLLOWS")
//!     .with_property("since", "2024-01-01");
//!
//! assert!(alice.has_label("Person"));
//! assert_eq!(follows.target, bob.id);
//! assert_eq!(alice.get_property("name"), Some(&Value::String("Alice".into())));
//! ```
//!
//! # Modules
//!
//! - [`types`] - Core data types ([`Entity`], [`Edge`], [`Value`], IDs, snapshots)

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod types;

// Re-export commonly used types
pub use types::{
    ClassKey, Edge, EdgeId, EdgeType, Entity, EntityId, EntityKey, Label, PropertySnapshot,
    Value, CLASS_KEY_PROPERTY,
};
