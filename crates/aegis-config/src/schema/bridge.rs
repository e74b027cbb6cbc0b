//! Bridge runtime tuning.

use serde::{Deserialize, Serialize};

/// Worker pool and response queue sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Maximum async actions running at once (valid range: 1-64).
    pub max_workers: u32,
    /// Capacity of the worker -> UI response queue (valid range: 1-65536).
    pub queue_capacity: u32,
    /// Connect/read timeout for `download` (valid range: 1-3600).
    pub download_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            queue_capacity: 256,
            download_timeout_secs: 30,
            user_agent: format!("Aegis/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
