//! Operation result types
//!
//! Pure data: the outcome status, the etag to surface to the caller, and
//! the before/after document snapshots where applicable.

use std::fmt;

use crate::document::{etag_of, etag_str_of, Document, Etag};
use crate::store::BulkWriteSummary;

/// Outcome of a repository operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Document was absent and has been created
    Created,
    /// Document existed and was replaced or patched
    Ok,
    /// Document was deleted
    NoContent,
    /// Patch or delete targeted a nonexistent document
    NotFound,
    /// Resource is versioned but the caller omitted its precondition
    Conflict,
    /// The caller's version precondition is stale
    PreconditionFailed,
}

impl StatusCode {
    /// HTTP status code for API responses
    pub fn code(&self) -> u16 {
        match self {
            Self::Created => 201,
            Self::Ok => 200,
            Self::NoContent => 204,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::PreconditionFailed => 412,
        }
    }

    /// True for outcomes where the mutation was accepted
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created | Self::Ok | Self::NoContent)
    }
}

/// The version token a caller must present on its next conditional request:
/// either a token this layer issued, or the raw rendering of a `_etag`
/// value some other writer left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionToken {
    /// A well-formed token issued by this layer
    Etag(Etag),
    /// A foreign `_etag` value, rendered the way comparisons see it
    Legacy(String),
}

impl VersionToken {
    /// Token carried by a stored document, if any
    pub fn of(document: &Document) -> Option<Self> {
        match etag_of(document) {
            Some(etag) => Some(Self::Etag(etag)),
            None => etag_str_of(document).map(Self::Legacy),
        }
    }

    /// The token as an issued etag, when it is one
    pub fn as_etag(&self) -> Option<Etag> {
        match self {
            Self::Etag(etag) => Some(*etag),
            Self::Legacy(_) => None,
        }
    }
}

impl From<Etag> for VersionToken {
    fn from(etag: Etag) -> Self {
        Self::Etag(etag)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Etag(etag) => write!(f, "{etag}"),
            Self::Legacy(raw) => f.write_str(raw),
        }
    }
}

/// Outcome of a single-document operation.
///
/// `old` is the document as it existed immediately before the mutation
/// (absent when newly created); `new` is the document after the operation
/// was accepted. Rejected operations carry `old` but no `new`.
#[derive(Debug, Clone)]
pub struct OperationResult {
    pub status: StatusCode,
    pub etag: Option<VersionToken>,
    pub old: Option<Document>,
    pub new: Option<Document>,
}

impl OperationResult {
    /// A result with no etag or snapshots
    pub fn status_only(status: StatusCode) -> Self {
        Self {
            status,
            etag: None,
            old: None,
            new: None,
        }
    }
}

/// Outcome of a bulk operation: aggregate counts, no snapshots
#[derive(Debug, Clone)]
pub struct BulkOperationResult {
    pub status: StatusCode,
    pub etag: Option<Etag>,
    pub summary: BulkWriteSummary,
}
