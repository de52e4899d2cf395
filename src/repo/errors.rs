//! Repository error types
//!
//! Concurrency outcomes (conflict, stale version, not found) are statuses on
//! [`super::OperationResult`], not errors. Errors here are either malformed
//! input, rejected before any store call, or store failures passed through.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository errors
#[derive(Debug, Error)]
pub enum RepoError {
    /// Document content is not a JSON object
    #[error("invalid document content: {0}")]
    InvalidContent(String),

    /// Bulk upsert called with no documents
    #[error("bulk upsert requires at least one document")]
    EmptyBulk,

    /// Store-level failure, propagated uncaught
    #[error(transparent)]
    Store(#[from] StoreError),
}
