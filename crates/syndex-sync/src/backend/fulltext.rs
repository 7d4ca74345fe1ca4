//! Full-text in-memory index backend.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use syndex_core::{Edge, EntityKey, PropertySnapshot, Value};

use crate::changeset::ChangedEntity;
use crate::error::IndexerError;
use crate::indexer::Indexer;

/// A posting key: (field name, lowercase token).
type Posting = (String, String);

/// An in-memory full-text index over string property values.
///
/// String values are lowercased and split on whitespace; every token becomes
/// a posting. Non-string values are not indexed. This is a reference backend:
/// there is no stemming, scoring, or phrase support.
///
/// # Example
///
/// ```
/// use syndex_core::{Entity, EntityId, EntityKey, Value};
/// use syndex_sync::{ChangedEntity, FullTextIndexer, Indexer};
///
/// let index = FullTextIndexer::new();
/// let doc = ChangedEntity::Node(Entity::new(EntityId::new(1)));
///
/// index
///     .update_on_property_change(&doc, "title", None, Some(&Value::from("Graph Index Sync")))
///     .expect("in-memory update");
///
/// assert_eq!(index.search("title", "graph"), vec![EntityKey::Node(EntityId::new(1))]);
/// assert!(index.search("title", "missing").is_empty());
/// ```
#[derive(Debug, Default)]
pub struct FullTextIndexer {
    postings: RwLock<HashMap<Posting, BTreeSet<EntityKey>>>,
}

fn tokens(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s.split_whitespace().map(str::to_lowercase).collect(),
        _ => Vec::new(),
    }
}

impl FullTextIndexer {
    /// Create an empty full-text index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Search for entities whose `field` contained the given token.
    ///
    /// The token is lowercased before lookup. Returns keys in stable order.
    #[must_use]
    pub fn search(&self, field: &str, token: &str) -> Vec<EntityKey> {
        self.postings
            .read()
            .ok()
            .and_then(|postings| {
                postings
                    .get(&(field.to_owned(), token.to_lowercase()))
                    .map(|keys| keys.iter().copied().collect())
            })
            .unwrap_or_default()
    }

    /// The number of distinct (field, token) postings currently stored.
    #[must_use]
    pub fn posting_count(&self) -> usize {
        self.postings.read().map(|postings| postings.len()).unwrap_or(0)
    }

    fn add(&self, operation: &'static str, key: EntityKey, field: &str, value: &Value) -> Result<(), IndexerError> {
        let terms = tokens(value);
        if terms.is_empty() {
            return Ok(());
        }
        let mut postings = self
            .postings
            .write()
            .map_err(|_| IndexerError::new(operation, "postings lock poisoned"))?;
        for term in terms {
            postings.entry((field.to_owned(), term)).or_default().insert(key);
        }
        Ok(())
    }

    fn remove(&self, operation: &'static str, key: EntityKey, field: &str, value: &Value) -> Result<(), IndexerError> {
        let terms = tokens(value);
        if terms.is_empty() {
            return Ok(());
        }
        let mut postings = self
            .postings
            .write()
            .map_err(|_| IndexerError::new(operation, "postings lock poisoned"))?;
        for term in terms {
            let posting = (field.to_owned(), term);
            if let Some(keys) = postings.get_mut(&posting) {
                keys.remove(&key);
                if keys.is_empty() {
                    postings.remove(&posting);
                }
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

impl Indexer for FullTextIndexer {
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
