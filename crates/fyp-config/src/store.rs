//! Directory store connection settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ConfigError;

const fn default_request_timeout_ms() -> u64 {
    10_000
}

const fn default_transaction_max_attempts() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Upper bound for a single store round-trip, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Attempts a single-document transaction makes before giving up on
    /// conflicting writers.
    #[serde(default = "default_transaction_max_attempts")]
    pub transaction_max_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            transaction_max_attempts: default_transaction_max_attempts(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.request_timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.transaction_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.transaction_max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StoreConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.transaction_max_attempts, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = StoreConfig {
            request_timeout_ms: 0,
            ..StoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "store.request_timeout_ms"
        ));
    }
}
