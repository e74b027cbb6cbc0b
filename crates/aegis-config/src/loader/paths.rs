//! Config path resolution and default file creation.

use aegis_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_config_toml;

pub const CONFIG_FILE_NAME: &str = "aegis.toml";
pub const LEGACY_CONFIG_FILE_NAME: &str = "aegis.config.json";

/// Locate the project's config file, preferring `aegis.toml`.
pub fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    [CONFIG_FILE_NAME, LEGACY_CONFIG_FILE_NAME]
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file())
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}
