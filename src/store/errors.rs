//! Store error types
//!
//! Driver-level failures are reported here and propagated uncaught by the
//! repository: this layer assumes an already-initialized store handle and
//! performs no reconnection logic.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store cannot currently serve requests
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Stored data failed validation on read
    #[error("stored document corrupted: {0}")]
    Corrupted(String),

    /// Transport or disk failure
    #[error("store i/o failure: {0}")]
    Io(String),
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a corruption error
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Create an i/o error
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::unavailable("connection pool exhausted");
        assert_eq!(
            err.to_string(),
            "store unavailable: connection pool exhausted"
        );
    }
}
