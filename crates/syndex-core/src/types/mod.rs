//! Core data types for Syndex.
//!
//! This module defines the fundamental types that represent entities, edges,
//! their properties, and the classification keys used for indexer dispatch.

mod class;
mod edge;
mod entity;
mod id;
mod snapshot;
mod value;

pub use class::{ClassKey, CLASS_KEY_PROPERTY};
pub use edge::{Edge, EdgeType};
pub use entity::{Entity, Label};
pub use id::{EdgeId, EntityId, EntityKey};
pub use snapshot::PropertySnapshot;
pub use value::Value;
