//! Error types for the index synchronization engine.

use thiserror::Error;

/// Errors that can occur in the index synchronization engine.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A registration was attempted with an unrecognized index kind.
    ///
    /// Fatal only to that registration call; other registered classes are
    /// unaffected.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An indexer failed during an update/remove call.
    ///
    /// The dispatcher does not catch these; they propagate to the store's
    /// commit-notification caller. An indexing failure partway through a
    /// change-set leaves some entities indexed and others not, with no
    /// automatic rollback of index state (best-effort ordering, not
    /// transactional).
    #[error("indexer operation failed: {0}")]
    Indexer(#[from] IndexerError),

    /// An internal lock was poisoned (a thread panicked while holding it).
    #[error("internal lock poisoned: {0}")]
    LockPoisoned(String),
}

impl SyncError {
    /// Creates a lock-poisoned error naming the lock that failed.
    #[must_use]
    pub fn lock_poisoned(what: impl Into<String>) -> Self {
        Self::LockPoisoned(what.into())
    }
}

/// A failure surfaced by an indexer during an index update or removal.
#[derive(Debug, Error)]
#[error("{operation}: {message}")]
pub struct IndexerError {
    /// The indexer operation that failed.
    pub operation: &'static str,
    /// Backend-specific description of the failure.
    pub message: String,
}

impl IndexerError {
    /// Creates a new indexer error for the given operation.
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self { operation, message: message.into() }
    }
}
