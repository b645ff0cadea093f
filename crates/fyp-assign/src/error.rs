//! Assignment error types.
//!
//! "No supervisor available" is deliberately absent: it is the
//! [`crate::Assignment::Unassigned`] outcome, not a failure.

use fyp_core::errors::CoreError;
use fyp_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssignError {
    /// A student, supervisor, or other required document is absent.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The targeted supervisor has no free slot at write time. Nothing was written.
    #[error("Supervisor {supervisor_id} is at capacity ({current}/{max})")]
    CapacityExceeded {
        supervisor_id: String,
        current: u32,
        max: u32,
    },

    /// Projects could not be re-pointed after the assignment committed.
    #[error("Project propagation failed for student {student_id}: {reason}")]
    PartialPropagation { student_id: String, reason: String },

    /// Input rejected before touching the store.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Store failure surfaced to the caller without retry.
    #[error(transparent)]
    Store(StoreError),
}

impl AssignError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl From<StoreError> for AssignError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { collection, id } => Self::NotFound {
                entity: collection.entity_name(),
                id,
            },
            other => Self::Store(other),
        }
    }
}
