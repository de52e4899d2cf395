//! In-memory document store
//!
//! Reference implementation of the [`DocumentStore`] contract: collections
//! held as maps keyed by the canonical identity encoding, guarded by a
//! single `RwLock`. The lock makes every mutating call atomic, which is
//! exactly the contract the repository depends on.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::document::{id_key, Document, ETAG_FIELD, ID_FIELD};

use super::bulk::{BulkWriteSummary, WriteModel};
use super::errors::{StoreError, StoreResult};
use super::filter::FilterMatcher;
use super::patch::apply_patch;
use super::DocumentStore;

type Collection = HashMap<String, Document>;

/// An in-process, lock-guarded document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> StoreResult<usize> {
        let collections = self.read()?;
        Ok(collections.get(collection).map_or(0, Collection::len))
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Collection>>> {
        self.collections
            .read()
            .map_err(|_| StoreError::unavailable("store lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Collection>>> {
        self.collections
            .write()
            .map_err(|_| StoreError::unavailable("store lock poisoned"))
    }

    /// Forces the identity field onto a document about to be stored, the
    /// way an upsert derives `_id` from its query.
    fn with_id(id: &Value, mut document: Document) -> Document {
        document
            .entry(ID_FIELD.to_string())
            .or_insert_with(|| id.clone());
        document
    }

    fn apply_model(collection: &mut Collection, model: &WriteModel) -> BulkWriteSummary {
        let mut summary = BulkWriteSummary::empty();
        match model {
            WriteModel::UpsertOne { id, document } => {
                let stored = Self::with_id(id, document.clone());
                match collection.insert(id_key(id), stored.clone()) {
                    Some(old) => {
                        summary.matched += 1;
                        if old != stored {
                            summary.modified += 1;
                        }
                    }
                    None => summary.inserted += 1,
                }
            }
            WriteModel::UpdateMany { filter, patch } => {
                for document in collection.values_mut() {
                    if FilterMatcher::matches(document, filter) {
                        summary.matched += 1;
                        if apply_patch(document, patch) {
                            summary.modified += 1;
                        }
                    }
                }
            }
            WriteModel::DeleteMany { filter } => {
                let before = collection.len();
                collection.retain(|_, document| !FilterMatcher::matches(document, filter));
                summary.deleted += (before - collection.len()) as u64;
            }
        }
        summary
    }
}

impl DocumentStore for MemoryStore {
    fn replace_or_upsert(
        &self,
        collection: &str,
        id: &Value,
        document: Document,
        upsert: bool,
    ) -> StoreResult<Option<Document>> {
        let mut collections = self.write()?;
        let coll = collections.entry(collection.to_string()).or_default();
        let key = id_key(id);

        if !upsert && !coll.contains_key(&key) {
            return Ok(None);
        }
        Ok(coll.insert(key, Self::with_id(id, document)))
    }

    fn replace_if_etag_matches(
        &self,
        collection: &str,
        id: &Value,
        expected_etag: &Value,
        document: Document,
    ) -> StoreResult<bool> {
        let mut collections = self.write()?;
        let coll = collections.entry(collection.to_string()).or_default();
        let key = id_key(id);

        match coll.get(&key) {
            Some(current) if current.get(ETAG_FIELD) == Some(expected_etag) => {
                coll.insert(key, Self::with_id(id, document));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn patch_or_upsert(
        &self,
        collection: &str,
        id: &Value,
        patch: &Document,
        upsert: bool,
    ) -> StoreResult<Option<Document>> {
        let mut collections = self.write()?;
        let coll = collections.entry(collection.to_string()).or_default();
        let key = id_key(id);

        match coll.get_mut(&key) {
            Some(document) => {
                let old = document.clone();
                apply_patch(document, patch);
                Ok(Some(old))
            }
            None => {
                if upsert {
                    coll.insert(key, Self::with_id(id, patch.clone()));
                }
                Ok(None)
            }
        }
    }

    fn find_and_delete(&self, collection: &str, id: &Value) -> StoreResult<Option<Document>> {
        let mut collections = self.write()?;
        let coll = collections.entry(collection.to_string()).or_default();
        Ok(coll.remove(&id_key(id)))
    }

    fn find_by_id(&self, collection: &str, id: &Value) -> StoreResult<Option<Document>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|coll| coll.get(&id_key(id)))
            .cloned())
    }

    fn bulk_write(
        &self,
        collection: &str,
        models: &[WriteModel],
    ) -> StoreResult<BulkWriteSummary> {
        let mut collections = self.write()?;
        let coll = collections.entry(collection.to_string()).or_default();

        let mut summary = BulkWriteSummary::empty();
        for model in models {
            summary.absorb(Self::apply_model(coll, model));
        }
        Ok(summary)
    }
}
