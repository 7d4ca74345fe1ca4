//! The process-wide class-to-indexer map.
//!
//! The registry binds [`ClassKey`]s to indexers and supports aliasing:
//! several class keys resolving to one shared indexer (modeling "this
//! subclass shares its parent's index"). Sharing is a first-class, inspectable
//! relationship: each binding is either the owner of an indexer or an alias
//! naming the owning key.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use syndex_core::ClassKey;

use crate::backend::IndexKind;
use crate::error::SyncError;
use crate::indexer::Indexer;

/// A registry entry: either the owner of an indexer, or an alias to the
/// class key that owns one.
///
/// Aliases always point directly at an owner (chains are flattened at
/// registration), so lookups resolve in at most one hop.
enum Binding {
    Owned(Arc<dyn Indexer>),
    Alias(ClassKey),
}

/// Process-wide mapping from class key to its owning indexer.
///
/// The registry is an explicitly constructed service with a defined
/// lifecycle: populated by bootstrap code at startup, torn down once via
/// [`shutdown_all`](IndexerRegistry::shutdown_all) at engine shutdown. Tests
/// get isolated instances by constructing their own.
///
/// # Thread Safety
///
/// Lookups take a read lock and may run concurrently; the rare write paths
/// (`register`, `clear_all`, `shutdown_all`) serialize against each other and
/// against lookups. Registration happens at startup/configuration time, not
/// in the steady-state hot path.
///
/// # Example
///
/// ```
/// use syndex_sync::IndexerRegistry;
///
/// let registry = IndexerRegistry::new();
///
/// // "Employee" shares the indexer created for "Person".
/// let person = registry.register("Person", "Person", "exact")?;
/// let employee = registry.register("Employee", "Person", "exact")?;
/// assert!(std::sync::Arc::ptr_eq(&person, &employee));
///
/// // Classes that were never registered are simply not indexed.
/// assert!(registry.lookup(&"Visitor".into()).is_none());
/// # Ok::<(), syndex_sync::SyncError>(())
/// ```
#[derive(Default)]
pub struct IndexerRegistry {
    bindings: RwLock<HashMap<ClassKey, Binding>>,
}

impl IndexerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `class_key` to an indexer.
    ///
    /// If `alias_key` is already bound, `class_key` is bound to that same
    /// indexer (sharing, not copying); otherwise a fresh backend of `kind` is
    /// constructed for `class_key`. Re-registering an already-bound
    /// `class_key` returns the existing binding unchanged, so the call is
    /// idempotent and a key never silently re-resolves to a different indexer.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when `kind` is not a recognized
    /// index kind. The kind string is validated on every call, including
    /// aliasing and idempotent re-registration, so configuration typos
    /// surface regardless of registration order.
    pub fn register(
        &self,
        class_key: impl Into<ClassKey>,
        alias_key: impl Into<ClassKey>,
        kind: &str,
    ) -> Result<Arc<dyn Indexer>, SyncError> {
        let kind = IndexKind::parse(kind)
            .ok_or_else(|| SyncError::Configuration(format!("unrecognized index kind: {kind}")))?;
        self.bind(class_key.into(), alias_key.into(), || kind.create_indexer())
    }

    /// Bind `class_key` using a caller-supplied backend.
    ///
    /// Same binding rules as [`register`](IndexerRegistry::register), but the
    /// indexer constructed when no sharing applies is the one given, not a
    /// built-in kind. This is the extension point for custom backends.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] if the registry lock is poisoned.
    pub fn register_with(
        &self,
        class_key: impl Into<ClassKey>,
        alias_key: impl Into<ClassKey>,
        indexer: Arc<dyn Indexer>,
    ) -> Result<Arc<dyn Indexer>, SyncError> {
        self.bind(class_key.into(), alias_key.into(), move || indexer)
    }

    fn bind(
        &self,
        class_key: ClassKey,
        alias_key: ClassKey,
        make: impl FnOnce() -> Arc<dyn Indexer>,
    ) -> Result<Arc<dyn Indexer>, SyncError> {
        let mut bindings = self
            .bindings
            .write()
            .map_err(|_| SyncError::lock_poisoned("indexer registry"))?;

        // Idempotent: an existing binding wins over everything else.
        if bindings.contains_key(&class_key) {
            return resolve(&bindings, &class_key).ok_or_else(|| {
                SyncError::Configuration(format!("alias target missing for class {class_key}"))
            });
        }

        // Share the indexer already bound under the alias key, flattening
        // alias chains so every alias points straight at its owner.
        if alias_key != class_key {
            if let Some(binding) = bindings.get(&alias_key) {
                let owner = match binding {
                    Binding::Owned(_) => alias_key.clone(),
                    Binding::Alias(target) => target.clone(),
                };
                let handle = resolve(&bindings, &owner).ok_or_else(|| {
                    SyncError::Configuration(format!("alias target missing for class {owner}"))
                })?;
                debug!(class = %class_key, owner = %owner, "aliased class to shared indexer");
                bindings.insert(class_key, Binding::Alias(owner));
                return Ok(handle);
            }
        }

        let handle = make();
        debug!(class = %class_key, "registered indexer");
        bindings.insert(class_key, Binding::Owned(Arc::clone(&handle)));
        Ok(handle)
    }

    /// Look up the indexer bound to `class_key`.
    ///
    /// Pure lookup with no side effects. Returns `None` for unregistered
    /// keys - entities with no configured index are silently ignored. A
    /// poisoned registry lock also reads as `None`; the write paths surface
    /// poisoning as errors instead.
    #[must_use]
    pub fn lookup(&self, class_key: &ClassKey) -> Option<Arc<dyn Indexer>> {
        let bindings = self.bindings.read().ok()?;
        resolve(&bindings, class_key)
    }

    /// The class key owning the indexer that `class_key` resolves to.
    ///
    /// Returns the key itself for owners, the alias target for aliases, and
    /// `None` for unregistered keys. This makes the sharing relationship
    /// inspectable without comparing indexer handles.
    #[must_use]
    pub fn resolves_to(&self, class_key: &ClassKey) -> Option<ClassKey> {
        let bindings = self.bindings.read().ok()?;
        match bindings.get(class_key)? {
            Binding::Owned(_) => Some(class_key.clone()),
            Binding::Alias(target) => Some(target.clone()),
        }
    }

    /// Clear every distinct indexer's storage.
    ///
    /// An indexer shared by several aliased classes is cleared exactly once.
    /// Bindings are left intact so indexing resumes immediately; this is the
    /// administrative re-index path, not shutdown.
    ///
    /// # Errors
    ///
    /// Propagates the first indexer failure; remaining indexers are not
    /// cleared in that case.
    pub fn clear_all(&self) -> Result<(), SyncError> {
        self.for_each_distinct(|indexer| indexer.clear())
    }

    /// Shut down every distinct indexer.
    ///
    /// Called once at engine shutdown. Total on an empty registry.
    ///
    /// # Errors
    ///
    /// Propagates the first indexer failure.
    pub fn shutdown_all(&self) -> Result<(), SyncError> {
        self.for_each_distinct(|indexer| indexer.shutdown())
    }

    /// The number of class keys currently bound (owners and aliases).
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.read().map(|bindings| bindings.len()).unwrap_or(0)
    }

    /// The number of distinct indexers currently owned.
    #[must_use]
    pub fn indexer_count(&self) -> usize {
        self.bindings
            .read()
            .map(|bindings| {
                bindings.values().filter(|b| matches!(b, Binding::Owned(_))).count()
            })
            .unwrap_or(0)
    }

    /// Check if no class keys are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binding_count() == 0
    }

    /// Run `op` once per distinct indexer. The Owned/Alias split makes
    /// deduplication structural: aliases are skipped, owners visited once.
    fn for_each_distinct(
        &self,
        op: impl Fn(&Arc<dyn Indexer>) -> Result<(), crate::error::IndexerError>,
    ) -> Result<(), SyncError> {
        let bindings = self
            .bindings
            .read()
            .map_err(|_| SyncError::lock_poisoned("indexer registry"))?;
        for binding in bindings.values() {
            if let Binding::Owned(indexer) = binding {
                op(indexer)?;
            }
        }
        Ok(())
    }
}

/// Resolve a class key to its indexer handle within a locked bindings map.
fn resolve(
    bindings: &HashMap<ClassKey, Binding>,
    class_key: &ClassKey,
) -> Option<Arc<dyn Indexer>> {
    match bindings.get(class_key)? {
        Binding::Owned(indexer) => Some(Arc::clone(indexer)),
        Binding::Alias(target) => match bindings.get(target)? {
            Binding::Owned(indexer) => Some(Arc::clone(indexer)),
            // Aliases point at owners by construction.
            Binding::Alias(_) => None,
        },
    }
}
