//! JSON snapshots of a whole directory.
//!
//! On disk a snapshot is one object keyed by collection name, each holding
//! documents keyed by id:
//!
//! ```json
//! { "supervisors": { "sup-ada": { "name": "Dr. Ada", "maxStudents": 5 } } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use fyp_core::enums::Collection;
use serde::{Deserialize, Serialize};

use crate::document::Fields;
use crate::error::StoreError;
use crate::memory::MemoryStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<Collection, BTreeMap<String, Fields>>);

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: Collection, id: impl Into<String>, fields: Fields) -> &mut Self {
        self.0.entry(collection).or_default().insert(id.into(), fields);
        self
    }

    #[must_use]
    pub fn document(&self, collection: Collection, id: &str) -> Option<&Fields> {
        self.0.get(&collection).and_then(|docs| docs.get(id))
    }

    #[must_use]
    pub fn len(&self, collection: Collection) -> usize {
        self.0.get(&collection).map_or(0, BTreeMap::len)
    }

    /// Read a snapshot file. A missing file reads as an empty directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "snapshot missing; starting empty");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&raw).map_err(std::io::Error::from)?;
        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self).map_err(std::io::Error::from)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

impl From<Snapshot> for MemoryStore {
    fn from(snapshot: Snapshot) -> Self {
        let collections = snapshot
            .0
            .into_iter()
            .map(|(collection, docs)| (collection, crate::memory::stored(docs)))
            .collect();
        Self::with_collections(collections)
    }
}

impl MemoryStore {
    /// Copy every document out of the store.
    pub async fn snapshot(&self) -> Snapshot {
        Snapshot(self.export().await)
    }
}
