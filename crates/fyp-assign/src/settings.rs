use fyp_config::AssignmentConfig;
use fyp_core::entities::{DEFAULT_MAX_STUDENTS, UNKNOWN_SUPERVISOR_NAME};

pub const UNKNOWN_DEPARTMENT_NAME: &str = "Unknown Department";
pub const UNKNOWN_SCHOOL_NAME: &str = "Unknown School";

/// Engine knobs, usually derived from [`AssignmentConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSettings {
    /// Capacity given to supervisors only known from the `users` collection.
    pub default_max_students: u32,
    /// Name reported when a supervisor cannot be resolved.
    pub unknown_supervisor_name: String,
}

impl Default for AssignmentSettings {
    fn default() -> Self {
        Self {
            default_max_students: DEFAULT_MAX_STUDENTS,
            unknown_supervisor_name: UNKNOWN_SUPERVISOR_NAME.to_string(),
        }
    }
}

impl From<&AssignmentConfig> for AssignmentSettings {
    fn from(config: &AssignmentConfig) -> Self {
        Self {
            default_max_students: config.default_max_students,
            unknown_supervisor_name: config.unknown_supervisor_name.clone(),
        }
    }
}
