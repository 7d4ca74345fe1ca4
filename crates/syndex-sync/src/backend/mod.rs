//! Reference in-memory index backends.
//!
//! These backends make the engine usable and testable without an external
//! index server. They are deliberately fixture-grade: postings maps with
//! equality (or token) lookup, no ranking, no persistence.
//!
//! # Backends
//!
//! - [`ExactIndexer`] - one posting per (field, value) pair, equality lookup
//! - [`FullTextIndexer`] - lowercase whitespace tokenization of string values

mod exact;
mod fulltext;

use std::sync::Arc;

pub use exact::ExactIndexer;
pub use fulltext::FullTextIndexer;

use syndex_core::Value;

use crate::indexer::Indexer;

/// Kind of index backend, selected at registration time.
///
/// Designed for extensibility - parsing an unrecognized kind string is the
/// engine's only configuration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum IndexKind {
    /// Exact-value index, optimized for equality lookups.
    #[default]
    Exact,
    /// Full-text index over tokenized string values.
    FullText,
}

impl IndexKind {
    /// Get a string representation of the index kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Exact => "exact",
            IndexKind::FullText => "fulltext",
        }
    }

    /// Parse an index kind from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Some(IndexKind::Exact),
            "fulltext" => Some(IndexKind::FullText),
            _ => None,
        }
    }

    /// Construct a fresh backend of this kind.
    #[must_use]
    pub fn create_indexer(self) -> Arc<dyn Indexer> {
        match self {
            IndexKind::Exact => Arc::new(ExactIndexer::new()),
            IndexKind::FullText => Arc::new(FullTextIndexer::new()),
        }
    }
}

/// Derive the canonical posting term for a property value.
///
/// Returns `None` for value types that are not indexable (nulls and arrays
/// have no natural single term).
#[must_use]
pub(crate) fn index_term(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Array(_) => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Bytes(b) => {
            let mut term = String::with_capacity(b.len() * 2);
            for byte in b {
                use std::fmt::Write;
                // Writing to a String cannot fail.
                let _ = write!(term, "{byte:02x}");
            }
            Some(term)
        }
    }
}
