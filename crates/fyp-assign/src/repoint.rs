//! Batch re-pointing of a student's projects to a new supervisor.

use fyp_core::enums::Collection;
use fyp_core::fields;
use fyp_store::{DirectoryStore, Query, WriteBatch, fields_from};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::error::AssignError;

/// Result of one re-pointing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepointSummary {
    pub student_id: String,
    pub supervisor_id: String,
    pub updated: usize,
    pub message: String,
}

/// Rewrites `supervisorId` on every project owned by a student.
pub struct ProjectRepointer<'a, S> {
    store: &'a S,
}

impl<'a, S: DirectoryStore> ProjectRepointer<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Point all of `student_id`'s projects at `supervisor_id` in one batch.
    ///
    /// Either every matching project is updated or none is. Zero projects is
    /// a success with a "No projects found" message.
    ///
    /// # Errors
    ///
    /// `PartialPropagation` when the lookup or the batch fails.
    #[instrument(skip(self))]
    pub async fn repoint(&self, student_id: &str, supervisor_id: &str) -> Result<RepointSummary, AssignError> {
        let query = Query::new(Collection::Projects).where_eq(fields::STUDENT_ID, student_id);
        let projects = self.store.query(&query).await.map_err(|e| {
            warn!(error = %e, "project lookup failed");
            AssignError::PartialPropagation {
                student_id: student_id.to_string(),
                reason: format!("Error querying projects: {e}"),
            }
        })?;

        let summary = |updated: usize, message: String| RepointSummary {
            student_id: student_id.to_string(),
            supervisor_id: supervisor_id.to_string(),
            updated,
            message,
        };

        if projects.is_empty() {
            debug!("student has no projects");
            return Ok(summary(0, "No projects found for this student".to_string()));
        }

        let mut batch = WriteBatch::new();
        for project in &projects {
            debug!(project_id = %project.id, "queueing project update");
            batch.update(
                Collection::Projects,
                project.id.clone(),
                fields_from([(fields::SUPERVISOR_ID, json!(supervisor_id))]),
            );
        }
        let updated = batch.len();

        self.store.commit(batch).await.map_err(|e| {
            warn!(error = %e, updated, "project batch rejected");
            AssignError::PartialPropagation {
                student_id: student_id.to_string(),
                reason: format!("Error updating projects: {e}"),
            }
        })?;

        info!(updated, "projects re-pointed");
        Ok(summary(
            updated,
            format!("Updated {updated} project(s) with supervisor {supervisor_id}"),
        ))
    }
}
