//! Configuration schema types for Aegis projects.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod app;
mod bridge;
mod capabilities;
mod legacy;
mod window;

pub use app::*;
pub use bridge::*;
pub use capabilities::*;
pub use legacy::LegacyJsonConfig;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for an Aegis project.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AegisConfig {
    pub app: AppConfig,
    pub window: WindowConfig,
    pub capabilities: CapabilitiesConfig,
    pub bridge: BridgeConfig,
}

impl AegisConfig {
    /// Values exposed to page script as `window.__aegisConfig`.
    pub fn page_config(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.app.name,
            "version": self.app.version,
            "allowRemoteContent": self.capabilities.allow_remote_content,
            "enableDevTools": self.window.devtools,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = AegisConfig::default();
        assert_eq!(config.app.name, "Aegis App");
        assert_eq!(config.app.title, "Aegis App");
        assert_eq!(config.app.main, "index.html");
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.window.height, 800);
        assert!(config.window.resizable);
        assert!(config.window.frame);
        assert!(config.capabilities.allow.is_empty());
        assert!(!config.capabilities.allow_remote_content);
        assert_eq!(config.bridge.max_workers, 4);
        assert_eq!(config.bridge.queue_capacity, 256);
        assert_eq!(config.bridge.download_timeout_secs, 30);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml_str = r#"
[app]
title = "Notes"

[capabilities]
allow = ["read", "write", "dialog"]
"#;
        let config: AegisConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.title, "Notes");
        assert_eq!(config.app.name, "Aegis App");
        assert_eq!(config.capabilities.allow, vec!["read", "write", "dialog"]);
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.bridge.max_workers, 4);
    }

    #[test]
    fn page_config_shape() {
        let mut config = AegisConfig::default();
        config.capabilities.allow_remote_content = true;
        let v = config.page_config();
        assert_eq!(v["name"], "Aegis App");
        assert_eq!(v["allowRemoteContent"], true);
        assert!(v.get("enableDevTools").is_some());
    }
}
