//! Bulk write models and their aggregate result
//!
//! A bulk request is an ordered sequence of models executed in one store
//! round trip. Bulk writes carry no per-document snapshots and no etag
//! checking; callers get aggregate counts only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;

/// One entry in a bulk write request
#[derive(Debug, Clone)]
pub enum WriteModel {
    /// Replace-or-create a single document by identity
    UpsertOne { id: Value, document: Document },

    /// Merge `patch` into every document matching `filter`; never creates
    UpdateMany { filter: Document, patch: Document },

    /// Remove every document matching `filter`
    DeleteMany { filter: Document },
}

/// Aggregate counts reported by a bulk write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkWriteSummary {
    /// Documents matched by update models
    pub matched: u64,
    /// Documents actually changed by update models
    pub modified: u64,
    /// Documents created by upsert models
    pub inserted: u64,
    /// Documents removed by delete models
    pub deleted: u64,
}

impl BulkWriteSummary {
    /// An empty summary
    pub fn empty() -> Self {
        Self::default()
    }

    /// Folds another summary into this one
    pub fn absorb(&mut self, other: BulkWriteSummary) {
        self.matched += other.matched;
        self.modified += other.modified;
        self.inserted += other.inserted;
        self.deleted += other.deleted;
    }

    /// True when the bulk write touched nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
