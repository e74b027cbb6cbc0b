//! Aegis project configuration.
//!
//! Loads `aegis.toml` (or a legacy `aegis.config.json`) from the project
//! directory. All sections use serde defaults so partial configs work, and the
//! capability allow-list is declared here instead of in page script.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aegis_config::{load_project_config, config_to_json};
//!
//! let config = load_project_config(std::path::Path::new(".")).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{create_default_config, find_config_file, load_from_path};
pub use schema::{AegisConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use aegis_common::ConfigError;

/// Load the config of the project rooted at `project_dir`.
///
/// Falls back to defaults when the directory has no config file, and
/// validates the result either way.
pub fn load_project_config(project_dir: &Path) -> Result<AegisConfig, ConfigError> {
    let config = match find_config_file(project_dir) {
        Some(path) => load_from_path(&path)?,
        None => {
            tracing::info!(
                "no aegis.toml in {}, using defaults",
                project_dir.display()
            );
            AegisConfig::default()
        }
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AegisConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
