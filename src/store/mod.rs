//! Consumed store contract for etchdb
//!
//! The repository layer owns no persistent state; all atomicity comes from
//! the store behind the [`DocumentStore`] trait. The hard part of the
//! contract: every mutating call must return, in one atomic step, both the
//! effect (write/delete) and the pre-operation snapshot. Stores that cannot
//! provide that cannot host the optimistic-concurrency protocol.
//!
//! [`MemoryStore`] is the in-process reference implementation, used by the
//! test suite and by embedders that do not need durability.

mod bulk;
mod errors;
mod filter;
mod memory;
mod patch;

pub use bulk::{BulkWriteSummary, WriteModel};
pub use errors::{StoreError, StoreResult};
pub use filter::FilterMatcher;
pub use memory::MemoryStore;
pub use patch::apply_patch;

use serde_json::Value;

use crate::document::Document;

/// Atomic document-store primitives consumed by the repository.
///
/// Each method is a single store round trip. Timeouts, cancellation, and
/// reconnection are the store client's concern; this layer performs no
/// retries.
pub trait DocumentStore {
    /// Atomically replaces the document with identity `id`, returning the
    /// document as it was immediately before the write. With `upsert` set,
    /// creates the document when absent (and returns `None`).
    fn replace_or_upsert(
        &self,
        collection: &str,
        id: &Value,
        document: Document,
        upsert: bool,
    ) -> StoreResult<Option<Document>>;

    /// Atomically replaces the document only if its current `_etag` field
    /// equals `expected_etag`. Returns whether a replacement happened.
    ///
    /// This is the compensation primitive: a losing writer restores the
    /// prior snapshot guarded on its own transient write still being in
    /// place, so it never clobbers a later third-party write.
    fn replace_if_etag_matches(
        &self,
        collection: &str,
        id: &Value,
        expected_etag: &Value,
        document: Document,
    ) -> StoreResult<bool>;

    /// Atomically merges `patch` into the document with identity `id`,
    /// returning the pre-write snapshot. With `upsert` unset and no matching
    /// document, the call is a true no-op and returns `None`.
    fn patch_or_upsert(
        &self,
        collection: &str,
        id: &Value,
        patch: &Document,
        upsert: bool,
    ) -> StoreResult<Option<Document>>;

    /// Atomically removes the document with identity `id`, returning the
    /// removed snapshot.
    fn find_and_delete(&self, collection: &str, id: &Value) -> StoreResult<Option<Document>>;

    /// Non-atomic point read, used after a mutation has been accepted.
    fn find_by_id(&self, collection: &str, id: &Value) -> StoreResult<Option<Document>>;

    /// Executes the write models in order against one collection. Each model
    /// applies atomically; the batch as a whole does not.
    fn bulk_write(&self, collection: &str, models: &[WriteModel])
        -> StoreResult<BulkWriteSummary>;
}
