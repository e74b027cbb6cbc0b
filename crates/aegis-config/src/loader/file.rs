//! Read a config file, choosing the format by extension.

use crate::schema::{AegisConfig, LegacyJsonConfig};
use crate::validation;
use aegis_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

/// Load config from a specific file path.
///
/// `.json` files are read in the flat legacy layout; everything else is
/// TOML. Missing fields use serde defaults. Validation problems are logged
/// and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<AegisConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        let legacy: LegacyJsonConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse JSON: {e}")))?;
        if let Some(preload) = &legacy.preload {
            warn!(
                preload = %preload,
                "preload scripts no longer declare capabilities; use [capabilities] allow in aegis.toml"
            );
        }
        let config = AegisConfig::from(legacy);
        if config.capabilities.denies_everything() {
            warn!("legacy project has a preload script but no allow list: every bridge action is denied");
        }
        config
    } else {
        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?
    };

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}
