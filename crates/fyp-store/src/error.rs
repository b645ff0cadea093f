//! Store error types for fyp-store.

use fyp_core::enums::Collection;
use thiserror::Error;

/// Errors from directory store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("{} not found: {id}", .collection.entity_name())]
    NotFound { collection: Collection, id: String },

    /// The store could not be reached or refused the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A request did not complete within the configured bound.
    #[error("Store request '{operation}' timed out after {after_ms}ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },

    /// A single-document transaction kept losing to concurrent writers.
    #[error("Transaction on {collection}/{id} gave up after {attempts} conflicting attempts")]
    Contention {
        collection: Collection,
        id: String,
        attempts: u32,
    },

    /// A batch was rejected as a whole; nothing was applied.
    #[error("Batch aborted: {0}")]
    Aborted(String),

    /// A document did not match the expected record shape.
    #[error("Failed to decode {collection}/{id}: {reason}")]
    Decode {
        collection: Collection,
        id: String,
        reason: String,
    },

    /// Snapshot file could not be read or written.
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Transient failures a caller may retry. The engine itself never does.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::Timeout { .. } | Self::Contention { .. }
        )
    }

    pub(crate) fn not_found(collection: Collection, id: &str) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}
