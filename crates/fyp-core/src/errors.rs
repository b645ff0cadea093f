//! Cross-cutting error types.
//!
//! Domain-specific errors (`StoreError`, `AssignError`) live in their own
//! crates. `CoreError` covers input that fails record-level checks.

use thiserror::Error;

/// Errors raised while checking directory records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (shape, ranges, required fields).
    #[error("Validation error: {0}")]
    Validation(String),
}
