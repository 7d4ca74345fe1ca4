//! Exact-value in-memory index backend.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use syndex_core::{Edge, EntityKey, PropertySnapshot, Value};

use crate::changeset::ChangedEntity;
use crate::error::IndexerError;
use crate::indexer::Indexer;

use super::index_term;

/// A posting key: (field name, canonical term).
type Posting = (String, String);

/// An in-memory exact-value index.
///
/// Maintains one posting per (field, value) pair, each holding the set of
/// entity keys carrying that value. Lookup is equality only.
///
/// # Example
///
/// ```
/// use syndex_core::{Entity, EntityId, EntityKey, Value};
/// use syndex_sync::{ChangedEntity, ExactIndexer, Indexer};
///
/// let index = ExactIndexer::new();
/// let person = ChangedEntity::Node(Entity::new(EntityId::new(1)));
///
/// index
///     .update_on_property_change(&person, "email", None, Some(&Value::from("a@x.com")))
///     .expect("in-memory update");
///
/// let hits = index.lookup("email", &Value::from("a@x.com"));
/// assert_eq!(hits, vec![EntityKey::Node(EntityId::new(1))]);
/// ```
#[derive(Debug, Default)]
pub struct ExactIndexer {
    postings: RwLock<HashMap<Posting, BTreeSet<EntityKey>>>,
}

impl ExactIndexer {
    /// Create an empty exact index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entities holding `value` in `field`.
    ///
    /// Returns keys in stable (sorted) order. A poisoned postings lock reads
    /// as empty; mutation paths surface poisoning as errors instead.
    #[must_use]
    pub fn lookup(&self, field: &str, value: &Value) -> Vec<EntityKey> {
        let Some(term) = index_term(value) else {
            return Vec::new();
        };
        self.postings
            .read()
            .ok()
            .and_then(|postings| {
                postings.get(&(field.to_owned(), term)).map(|keys| keys.iter().copied().collect())
            })
            .unwrap_or_default()
    }

    /// The number of distinct (field, value) postings currently stored.
    #[must_use]
    pub fn posting_count(&self) -> usize {
        self.postings.read().map(|postings| postings.len()).unwrap_or(0)
    }

    fn add(&self, operation: &'static str, key: EntityKey, field: &str, value: &Value) -> Result<(), IndexerError> {
        let Some(term) = index_term(value) else {
            return Ok(());
        };
        let mut postings = self
            .postings
            .write()
            .map_err(|_| IndexerError::new(operation, "postings lock poisoned"))?;
        postings.entry((field.to_owned(), term)).or_default().insert(key);
        Ok(())
    }

    fn remove(&self, operation: &'static str, key: EntityKey, field: &str, value: &Value) -> Result<(), IndexerError> {
        let Some(term) = index_term(value) else {
            return Ok(());
        };
        let mut postings = self
            .postings
            .write()
            .map_err(|_| IndexerError::new(operation, "postings lock poisoned"))?;
        let posting = (field.to_owned(), term);
        if let Some(keys) = postings.get_mut(&posting) {
            keys.remove(&key);
            if keys.is_empty() {
                postings.remove(&posting);
            }
        }
        Ok(())
    }

    fn drain(&self, operation: &'static str) -> Result<(), IndexerError> {
        let mut postings = self
            .postings
            .write()
            .map_err(|_| IndexerError::new(operation, "postings lock poisoned"))?;
        postings.clear();
        Ok(())
    }
}

impl Indexer for ExactIndexer {
    fn update_on_property_change(
        &self,
        entity: &ChangedEntity,
        field: &str,
        old_value: Option<&Value>,
        new_value: Option<&Value>,
    ) -> Result<(), IndexerError> {
        let key = entity.key();
        if let Some(old) = old_value {
            self.remove("update_on_property_change", key, field, old)?;
        }
        if let Some(new) = new_value {
            self.add("update_on_property_change", key, field, new)?;
        }
        Ok(())
    }

    fn remove_entries(
        &self,
        entity: &ChangedEntity,
        snapshot: &PropertySnapshot,
    ) -> Result<(), IndexerError> {
        let key = entity.key();
        for (field, value) in snapshot.iter() {
            self.remove("remove_entries", key, field, value)?;
        }
        Ok(())
    }

    fn update_for_new_relationship(&self, relationship: &Edge) -> Result<(), IndexerError> {
        // The relationship's contribution is attributed to its end node.
        let key = EntityKey::Node(relationship.end_node());
        for (field, value) in &relationship.properties {
            self.add("update_for_new_relationship", key, field, value)?;
        }
        Ok(())
    }

    fn update_for_deleted_relationship(&self, relationship: &Edge) -> Result<(), IndexerError> {
        let key = EntityKey::Node(relationship.end_node());
        for (field, value) in &relationship.properties {
            self.remove("update_for_deleted_relationship", key, field, value)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), IndexerError> {
        self.drain("clear")
    }

    fn shutdown(&self) -> Result<(), IndexerError> {
        self.drain("shutdown")
    }
}
