//! New-student registration with automatic supervisor assignment.

use chrono::Utc;
use fyp_core::entities::Student;
use fyp_core::enums::{Collection, Role};
use fyp_core::errors::CoreError;
use fyp_store::{DirectoryStore, fields_of};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::engine::AssignmentEngine;
use crate::error::AssignError;
use crate::report::RegistrationReport;

/// Registration input. The id is the user id issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub id: String,
    pub username: String,
    pub email: String,
    pub school_id: String,
    pub department_id: String,
}

impl NewStudent {
    /// Reject input the engine cannot place.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` naming the first empty required field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("id", &self.id),
            ("schoolId", &self.school_id),
            ("departmentId", &self.department_id),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

impl<S: DirectoryStore> AssignmentEngine<S> {
    /// Create the student record and give it a supervisor when one is free.
    ///
    /// The record is written with the match already embedded, then the
    /// supervisor's counter is claimed. A failed claim is reported, not
    /// rolled back.
    ///
    /// # Errors
    ///
    /// `Invalid` for bad input and `Store` when the record cannot be written.
    #[instrument(skip(self, student), fields(student_id = %student.id))]
    pub async fn register_student(&self, student: &NewStudent) -> Result<RegistrationReport, AssignError> {
        student.validate()?;

        let assignment = self
            .find_assignment(&student.school_id, &student.department_id)
            .await;
        let assigned = assignment.is_assigned();

        let record = Student {
            id: student.id.clone(),
            username: student.username.clone(),
            email: student.email.clone(),
            role: Role::Student,
            school_id: student.school_id.clone(),
            department_id: student.department_id.clone(),
            supervisor_id: assigned.then(|| assignment.supervisor_id().to_string()),
            supervisor_name: assigned.then(|| assignment.supervisor_name().to_string()),
            created_at: Some(Utc::now()),
        };
        let fields = fields_of(Collection::Users, &student.id, &record)?;
        self.store.set(Collection::Users, &student.id, fields).await?;
        info!(assigned, "student registered");

        let counter = if assigned {
            let claimed = self.record_assignment(assignment.supervisor_id()).await;
            if let Err(error) = &claimed {
                warn!(%error, "supervisor counter not claimed after registration");
            }
            Some(claimed)
        } else {
            None
        };

        Ok(RegistrationReport {
            student_id: student.id.clone(),
            message: RegistrationReport::message_for(&assignment),
            assignment,
            counter,
        })
    }
}
