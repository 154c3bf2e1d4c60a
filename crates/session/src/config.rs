use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session-core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How often the expiry worker re-validates the current credential.
    /// Operational default: once per minute.
    pub expiry_check_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_check_interval_ms: 60_000,
        }
    }
}

impl SessionConfig {
    pub fn expiry_check_interval(&self) -> Duration {
        Duration::from_millis(self.expiry_check_interval_ms)
    }
}
