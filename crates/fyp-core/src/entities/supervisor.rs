use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Capacity assumed when a supervisor document carries no `maxStudents`.
pub const DEFAULT_MAX_STUDENTS: u32 = 5;

/// Name shown when a supervisor document carries no `name`.
pub const UNKNOWN_SUPERVISOR_NAME: &str = "Unknown Supervisor";

fn default_max_students() -> u32 {
    DEFAULT_MAX_STUDENTS
}

fn unknown_supervisor_name() -> String {
    UNKNOWN_SUPERVISOR_NAME.to_string()
}

/// A supervisor and their running student load.
///
/// `current_students` must equal the number of students pointing at this
/// supervisor. The store does not enforce it; only the assignment engine
/// mutates the counter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    #[serde(default)]
    pub id: String,
    #[serde(default = "unknown_supervisor_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub school_id: String,
    #[serde(default)]
    pub department_id: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub current_students: u32,
    #[serde(default = "default_max_students")]
    pub max_students: u32,
    /// Informational only.
    #[serde(default)]
    pub specialization: String,
}

impl Supervisor {
    /// Whether at least one more student fits.
    #[must_use]
    pub const fn has_capacity(&self) -> bool {
        self.current_students < self.max_students
    }

    /// Free slots, zero when at or over capacity.
    #[must_use]
    pub const fn remaining_capacity(&self) -> u32 {
        self.max_students.saturating_sub(self.current_students)
    }
}
