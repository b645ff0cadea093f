use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A school. Static reference data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A department, always owned by one school.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub school_id: String,
}
