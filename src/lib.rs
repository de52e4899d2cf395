//! etchdb - optimistic-concurrency document mutation for schemaless JSON stores
//!
//! Sits between an HTTP-style resource API and a document store: every
//! single-document mutation carries an optional client version token
//! (etag), and the repository either accepts the write, detects a
//! concurrent change and reports a conflict while restoring the prior
//! state, or reports that the document never existed.

pub mod document;
pub mod observability;
pub mod repo;
pub mod session;
pub mod store;

pub use document::{Document, Etag, ETAG_FIELD, ID_FIELD};
pub use repo::{
    BulkOperationResult, DocumentRepository, OperationResult, RepoError, StatusCode, VersionToken,
};
pub use session::{SessionOptions, Sid};
pub use store::{BulkWriteSummary, DocumentStore, MemoryStore, StoreError, WriteModel};
