//! Lock-guarded document stores.
//!
//! Realms and secure deployments share one store shape: a name-keyed map of
//! [`AttributeDocument`]s behind a `parking_lot` read-write lock.

use std::collections::HashMap;

use kc_model::{AttributeDocument, ModelValue};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use crate::error::{AdapterError, AdapterResult};

/// Name-keyed store of attribute documents.
///
/// Implementations must be thread-safe and support concurrent access;
/// every method takes the lock for its whole duration.
#[derive(Debug)]
pub struct DocumentStore {
    /// Entity kind used in error messages.
    entity_type: &'static str,

    /// Stored documents.
    entries: RwLock<HashMap<String, AttributeDocument>>,
}

impl DocumentStore {
    /// Creates an empty store for the given entity kind.
    #[must_use]
    pub fn new(entity_type: &'static str) -> Self {
        Self {
            entity_type,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stores a copy of `document` under `name`.
    ///
    /// An existing entry is replaced. Returns `true` if one was.
    pub fn add(&self, name: &str, document: &AttributeDocument) -> bool {
        self.entries
            .write()
            .insert(name.to_string(), document.clone())
            .is_some()
    }

    /// Sets a single attribute on an existing entry.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::MissingEntity` if `name` is not stored.
    pub fn update(&self, name: &str, attr_name: &str, value: ModelValue) -> AdapterResult<()> {
        self.modify(name, |document| {
            document.set(attr_name, value);
            Ok(())
        })
    }

    /// Runs `f` against an entry under the write lock.
    ///
    /// `f` must not write to the document before it has decided to
    /// succeed, so a failed call leaves the entry unchanged.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::MissingEntity` if `name` is not stored, or
    /// whatever `f` returns.
    pub fn modify<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut AttributeDocument) -> AdapterResult<R>,
    ) -> AdapterResult<R> {
        let mut entries = self.entries.write();
        let document = entries
            .get_mut(name)
            .ok_or_else(|| AdapterError::missing_entity(self.entity_type, name))?;
        f(document)
    }

    /// Removes an entry. Returns `true` if it existed.
    pub fn remove(&self, name: &str) -> bool {
        self.entries.write().remove(name).is_some()
    }

    /// Returns the stored document without copying it.
    ///
    /// The returned guard holds the read lock; drop it before mutating
    /// the store from the same thread.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MappedRwLockReadGuard<'_, AttributeDocument>> {
        RwLockReadGuard::try_map(self.entries.read(), |entries| entries.get(name)).ok()
    }

    /// Checks if an entry exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Lists stored names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Takes the read lock over the whole store.
    ///
    /// Used for multi-step reads that must see one consistent state.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, HashMap<String, AttributeDocument>> {
        self.entries.read()
    }
}
