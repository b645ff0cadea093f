//! Assignment engine settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_students() -> u32 {
    5
}

fn default_unknown_supervisor_name() -> String {
    "Unknown Supervisor".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignmentConfig {
    /// Capacity given to supervisors that only exist as `users` documents.
    #[serde(default = "default_max_students")]
    pub default_max_students: u32,

    /// Name reported when a supervisor cannot be resolved.
    #[serde(default = "default_unknown_supervisor_name")]
    pub unknown_supervisor_name: String,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            default_max_students: default_max_students(),
            unknown_supervisor_name: default_unknown_supervisor_name(),
        }
    }
}

impl AssignmentConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.default_max_students == 0 {
            return Err(ConfigError::InvalidValue {
                field: "assignment.default_max_students".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
