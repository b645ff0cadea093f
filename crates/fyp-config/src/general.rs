//! General application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(".fyp/directory.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory snapshot used by the `fyp` console.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}
