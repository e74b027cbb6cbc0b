//! Capability allow-list declaration.

use serde::{Deserialize, Serialize};

/// Which bridge actions page script may invoke.
///
/// Entries are exact action names (`dialog.open`), namespaces (`dialog`,
/// allowing every `dialog.*` action) or `*`. An empty list allows
/// everything unless `default_open` is turned off, in which case it denies
/// everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitiesConfig {
    pub allow: Vec<String>,
    /// What an empty `allow` means: every action (`true`) or none.
    pub default_open: bool,
    /// Forwarded to page script; the bridge itself does not load remote
    /// content.
    pub allow_remote_content: bool,
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            default_open: true,
            allow_remote_content: false,
        }
    }
}

impl CapabilitiesConfig {
    /// True when no action at all may run.
    pub fn denies_everything(&self) -> bool {
        self.allow.is_empty() && !self.default_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_open_by_default() {
        let config = CapabilitiesConfig::default();
        assert!(config.default_open);
        assert!(!config.denies_everything());
    }

    #[test]
    fn closed_empty_list_denies_everything() {
        let config: CapabilitiesConfig = toml::from_str("default_open = false").unwrap();
        assert!(config.denies_everything());

        let config: CapabilitiesConfig =
            toml::from_str("default_open = false\nallow = [\"read\"]").unwrap();
        assert!(!config.denies_everything());
    }
}
