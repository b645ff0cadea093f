//! Snapshot-backed store and the engine built over it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use fyp_assign::{AssignmentEngine, AssignmentSettings};
use fyp_config::FypConfig;
use fyp_store::{MemoryStore, Snapshot, TimeoutStore};

pub type Store = TimeoutStore<MemoryStore>;

pub struct AppContext {
    pub snapshot_path: PathBuf,
    pub engine: AssignmentEngine<Store>,
}

impl AppContext {
    /// Load the directory snapshot and build the engine over it.
    ///
    /// `snapshot_override` wins over `general.snapshot_path`.
    pub fn init(config: &FypConfig, snapshot_override: Option<&Path>) -> anyhow::Result<Self> {
        let snapshot_path = snapshot_override
            .map_or_else(|| config.general.snapshot_path.clone(), Path::to_path_buf);
        let snapshot = Snapshot::load(&snapshot_path).with_context(|| {
            format!("failed to load directory snapshot at {}", snapshot_path.display())
        })?;

        let memory = MemoryStore::from(snapshot)
            .with_transaction_attempts(config.store.transaction_max_attempts);
        let store = TimeoutStore::new(memory, config.store.request_timeout());
        let settings = AssignmentSettings::from(&config.assignment);
        tracing::debug!(path = %snapshot_path.display(), "directory snapshot loaded");

        Ok(Self {
            snapshot_path,
            engine: AssignmentEngine::with_settings(store, settings),
        })
    }

    /// Write the current directory back to the snapshot file.
    pub async fn persist(&self) -> anyhow::Result<()> {
        let snapshot = self.engine.store().inner().snapshot().await;
        snapshot.save(&self.snapshot_path).with_context(|| {
            format!("failed to save directory snapshot at {}", self.snapshot_path.display())
        })?;
        tracing::debug!(path = %self.snapshot_path.display(), "directory snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyp_core::enums::Collection;
    use fyp_store::{DirectoryStore, fields_from};
    use serde_json::json;

    #[tokio::test]
    async fn missing_snapshot_starts_empty_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fyp").join("directory.json");

        let ctx = AppContext::init(&FypConfig::default(), Some(&path)).unwrap();
        ctx.engine
            .store()
            .set(
                Collection::Schools,
                "sch-eng",
                fields_from([("name", json!("Engineering"))]),
            )
            .await
            .unwrap();
        ctx.persist().await.unwrap();

        let reopened = AppContext::init(&FypConfig::default(), Some(&path)).unwrap();
        assert_eq!(reopened.engine.school_name("sch-eng").await, "Engineering");
    }

    #[test]
    fn corrupt_snapshot_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AppContext::init(&FypConfig::default(), Some(&path))
            .err()
            .expect("corrupt snapshot must fail");
        assert!(format!("{err:#}").contains("failed to load directory snapshot"));
    }
}
