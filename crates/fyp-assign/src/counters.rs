//! Supervisor load counters.

use fyp_core::enums::Collection;
use fyp_core::fields;
use fyp_store::{Document, DirectoryStore, Fields, StoreError, fields_from};
use serde_json::json;
use tracing::{debug, instrument};

use crate::engine::AssignmentEngine;
use crate::error::AssignError;

impl<S: DirectoryStore> AssignmentEngine<S> {
    /// Atomically add one to the supervisor's `currentStudents`.
    ///
    /// Returns the committed count. Concurrent calls never lose an
    /// increment; the store retries conflicting transactions.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown supervisor, `Store` when the transaction
    /// cannot commit.
    #[instrument(skip(self))]
    pub async fn record_assignment(&self, supervisor_id: &str) -> Result<u32, AssignError> {
        self.adjust_count(supervisor_id, Delta::Claim).await
    }

    /// Atomically remove one from the supervisor's `currentStudents`, never below zero.
    pub(crate) async fn release_slot(&self, supervisor_id: &str) -> Result<u32, AssignError> {
        self.adjust_count(supervisor_id, Delta::Release).await
    }

    async fn adjust_count(&self, supervisor_id: &str, delta: Delta) -> Result<u32, AssignError> {
        if supervisor_id.is_empty() {
            return Err(AssignError::NotFound {
                entity: Collection::Supervisors.entity_name(),
                id: String::new(),
            });
        }
        let mutation = move |doc: &Document| -> Result<Fields, StoreError> {
            // Missing or corrupt counters read as zero.
            let current = doc.get_u64(fields::CURRENT_STUDENTS).unwrap_or(0);
            Ok(fields_from([(fields::CURRENT_STUDENTS, json!(delta.apply(current)))]))
        };
        let committed = self
            .store
            .transact(Collection::Supervisors, supervisor_id, &mutation)
            .await?;
        let count = committed
            .get_u64(fields::CURRENT_STUDENTS)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(u32::MAX);
        debug!(supervisor_id, count, ?delta, "supervisor load adjusted");
        Ok(count)
    }
}

#[derive(Debug, Clone, Copy)]
enum Delta {
    Claim,
    Release,
}

impl Delta {
    const fn apply(self, current: u64) -> u64 {
        match self {
            Self::Claim => current.saturating_add(1),
            Self::Release => current.saturating_sub(1),
        }
    }
}
