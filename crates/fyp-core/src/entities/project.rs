use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A student project.
///
/// `supervisor_id` mirrors the owning student's assignment and is rewritten
/// by the batch re-pointer; it is not authoritative on its own.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub supervisor_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}
