//! Admin reassignment.
//!
//! Three writes with no cross-document transaction:
//! 1. student record points at the new supervisor (must succeed);
//! 2. old counter released, new counter claimed;
//! 3. projects re-pointed in one batch.
//!
//! Steps 2 and 3 run even if an earlier follow-up fails. Their outcomes are
//! returned in the [`ReassignReport`] rather than hidden behind step 1's success.

use fyp_core::entities::Supervisor;
use fyp_core::enums::Collection;
use fyp_core::fields;
use fyp_store::{DirectoryStore, fields_from};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::engine::{AssignmentEngine, decode_supervisor};
use crate::error::AssignError;
use crate::report::{CounterAdjustment, CounterChange, ReassignReport};

impl<S: DirectoryStore> AssignmentEngine<S> {
    /// Move `student_id` from `old_supervisor_id` to `new_supervisor_id`.
    ///
    /// An empty or `None` old id means the student was unassigned. Moving to
    /// the supervisor the student already has changes no counters.
    ///
    /// # Errors
    ///
    /// Fails before any write with `NotFound` for an unknown student or
    /// supervisor and `CapacityExceeded` when the new supervisor is full.
    /// A `Store` error from the student update is also returned directly.
    #[instrument(skip(self))]
    pub async fn reassign(
        &self,
        student_id: &str,
        old_supervisor_id: Option<&str>,
        new_supervisor_id: &str,
    ) -> Result<ReassignReport, AssignError> {
        let old = old_supervisor_id.filter(|id| !id.is_empty());
        let moving = old != Some(new_supervisor_id);

        let target = self.load_supervisor(new_supervisor_id).await?;
        if moving && !target.has_capacity() {
            warn!(
                current = target.current_students,
                max = target.max_students,
                "target supervisor is full"
            );
            return Err(AssignError::CapacityExceeded {
                supervisor_id: target.id,
                current: target.current_students,
                max: target.max_students,
            });
        }

        self.store
            .update(
                Collection::Users,
                student_id,
                fields_from([
                    (fields::SUPERVISOR_ID, json!(new_supervisor_id)),
                    (fields::SUPERVISOR_NAME, json!(target.name)),
                ]),
            )
            .await?;
        info!("student record re-pointed");

        let counters = if moving {
            self.move_counters(old, new_supervisor_id).await
        } else {
            CounterAdjustment::default()
        };

        let projects = self.repointer().repoint(student_id, new_supervisor_id).await;

        Ok(ReassignReport {
            student_id: student_id.to_string(),
            supervisor_id: new_supervisor_id.to_string(),
            supervisor_name: target.name,
            counters,
            projects,
        })
    }

    /// Reassign a student, reading their current supervisor from the store.
    ///
    /// # Errors
    ///
    /// As [`Self::reassign`], plus `NotFound` when the student is unknown.
    pub async fn reassign_student(
        &self,
        student_id: &str,
        new_supervisor_id: &str,
    ) -> Result<ReassignReport, AssignError> {
        let current = self.current_supervisor(student_id).await?;
        self.reassign(student_id, current.as_deref(), new_supervisor_id)
            .await
    }

    pub(crate) async fn load_supervisor(&self, supervisor_id: &str) -> Result<Supervisor, AssignError> {
        let doc = self
            .store
            .get(Collection::Supervisors, supervisor_id)
            .await?
            .ok_or_else(|| AssignError::NotFound {
                entity: Collection::Supervisors.entity_name(),
                id: supervisor_id.to_string(),
            })?;
        Ok(decode_supervisor(&doc, self.settings.default_max_students)?)
    }

    async fn move_counters(&self, old: Option<&str>, new: &str) -> CounterAdjustment {
        let released = match old {
            Some(old) => Some(self.release_slot(old).await.map(|count| CounterChange {
                supervisor_id: old.to_string(),
                current_students: count,
            })),
            None => None,
        };
        let claimed = self.record_assignment(new).await.map(|count| CounterChange {
            supervisor_id: new.to_string(),
            current_students: count,
        });

        if let Some(Err(error)) = &released {
            warn!(%error, "old supervisor counter not released");
        }
        if let Err(error) = &claimed {
            warn!(%error, "new supervisor counter not claimed");
        }

        CounterAdjustment {
            released,
            claimed: Some(claimed),
        }
    }
}
