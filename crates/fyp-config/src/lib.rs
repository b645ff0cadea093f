//! # fyp-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FYP_*` prefix, `__` as separator)
//! 2. Project-level `.fyp/config.toml`
//! 3. User-level `~/.config/fyp/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `FYP_STORE__REQUEST_TIMEOUT_MS` -> `store.request_timeout_ms`,
//! `FYP_ASSIGNMENT__DEFAULT_MAX_STUDENTS` -> `assignment.default_max_students`.
//!
//! # Usage
//!
//! ```no_run
//! use fyp_config::FypConfig;
//!
//! let config = FypConfig::load_with_dotenv().expect("config");
//! println!("timeout: {:?}", config.store.request_timeout());
//! ```

mod assignment;
mod error;
mod general;
mod store;

pub use assignment::AssignmentConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FypConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub assignment: AssignmentConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FypConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".fyp/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FYP_").split("__"))
    }

    /// Check cross-field ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;
        self.assignment.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fyp").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FypConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.transaction_max_attempts, 5);
        assert_eq!(config.assignment.default_max_students, 5);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = FypConfig::from_figment(&FypConfig::figment()).expect("defaults extract");
            assert_eq!(config.store.request_timeout_ms, 10_000);
            assert_eq!(
                config.general.snapshot_path,
                PathBuf::from(".fyp/directory.json")
            );
            Ok(())
        });
    }
}
