//! Document repository: optimistic-concurrency mutations
//!
//! Turns "update/replace/delete document D, client believes its version is
//! V" into a race-safe store mutation. Every single-document operation
//! resolves to exactly one status plus optional etag/snapshot payload:
//!
//! - `CREATED`: document was absent, now exists
//! - `OK`: document existed and was replaced or patched
//! - `NO_CONTENT`: document deleted
//! - `NOT_FOUND`: patch or delete targeted a nonexistent document
//! - `CONFLICT`: resource is versioned but the caller omitted its
//!   precondition; the prior state was restored
//! - `PRECONDITION_FAILED`: the caller's version is stale; the prior state
//!   was restored
//!
//! Bulk operations skip etag checking entirely and report aggregate counts.

mod document;
mod errors;
mod result;

pub use document::DocumentRepository;
pub use errors::{RepoError, RepoResult};
pub use result::{BulkOperationResult, OperationResult, StatusCode, VersionToken};
