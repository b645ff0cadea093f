//! Multi-step operation reports.
//!
//! Reassignment and registration write several documents without a
//! cross-document transaction. Each step's outcome is kept separately so
//! callers can see exactly which writes landed.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::assignment::Assignment;
use crate::error::AssignError;
use crate::repoint::RepointSummary;

/// A supervisor counter after adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterChange {
    pub supervisor_id: String,
    pub current_students: u32,
}

/// Counter writes made by a reassignment, one outcome per supervisor.
///
/// Both are `None` when the student stayed with the same supervisor.
/// `released` is also `None` when the student had no supervisor before.
#[derive(Debug, Default, Serialize)]
pub struct CounterAdjustment {
    #[serde(serialize_with = "serialize_optional_step")]
    pub released: Option<Result<CounterChange, AssignError>>,
    #[serde(serialize_with = "serialize_optional_step")]
    pub claimed: Option<Result<CounterChange, AssignError>>,
}

impl CounterAdjustment {
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.released.is_none() && self.claimed.is_none()
    }

    /// No counter write failed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(self.released, Some(Err(_))) && !matches!(self.claimed, Some(Err(_)))
    }
}

/// Outcome of an admin reassignment.
///
/// Reaching a report means the student record was updated. The follow-up
/// steps may still have failed independently.
#[derive(Debug, Serialize)]
pub struct ReassignReport {
    pub student_id: String,
    pub supervisor_id: String,
    pub supervisor_name: String,
    pub counters: CounterAdjustment,
    #[serde(serialize_with = "serialize_step")]
    pub projects: Result<RepointSummary, AssignError>,
}

impl ReassignReport {
    /// Every step succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.counters.is_complete() && self.projects.is_ok()
    }
}

/// Outcome of a student registration.
#[derive(Debug, Serialize)]
pub struct RegistrationReport {
    pub student_id: String,
    pub assignment: Assignment,
    /// Counter increment for the chosen supervisor. `None` when unassigned.
    #[serde(serialize_with = "serialize_optional_step")]
    pub counter: Option<Result<u32, AssignError>>,
    pub message: String,
}

impl RegistrationReport {
    #[must_use]
    pub fn message_for(assignment: &Assignment) -> String {
        match assignment {
            Assignment::Assigned {
                supervisor_name, ..
            } => format!("Successfully registered! Assigned to supervisor: {supervisor_name}"),
            Assignment::Unassigned => {
                "Successfully registered! A supervisor will be assigned later.".to_string()
            }
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !matches!(self.counter, Some(Err(_)))
    }
}

fn serialize_step<T, S>(step: &Result<T, AssignError>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(2))?;
    match step {
        Ok(detail) => {
            map.serialize_entry("status", "ok")?;
            map.serialize_entry("detail", detail)?;
        }
        Err(error) => {
            map.serialize_entry("status", "failed")?;
            map.serialize_entry("error", &error.to_string())?;
        }
    }
    map.end()
}

fn serialize_optional_step<T, S>(
    step: &Option<Result<T, AssignError>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match step {
        Some(step) => serialize_step(step, serializer),
        None => serializer.serialize_none(),
    }
}
