//! Project config loading and `--init`.

use std::path::{Path, PathBuf};

use aegis_common::ConfigError;
use aegis_config::{loader::CONFIG_FILE_NAME, validation, AegisConfig};

/// Load the project config, or `override_path` when given.
///
/// Any load or validation failure falls back to defaults.
pub fn load_config(project_dir: &Path, override_path: Option<&Path>) -> AegisConfig {
    let loaded = match override_path {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            aegis_config::load_from_path(path)
                .and_then(|config| validation::validate(&config).map(|()| config))
        }
        None => aegis_config::load_project_config(project_dir),
    };

    loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AegisConfig::default()
    })
}

/// Write the config template into `project_dir`.
///
/// Returns the path written, or `None` when a config already exists.
pub fn init_project(project_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(existing) = aegis_config::find_config_file(project_dir) {
        tracing::info!("config already present at {}", existing.display());
        return Ok(None);
    }
    let path = project_dir.join(CONFIG_FILE_NAME);
    aegis_config::create_default_config(&path)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), None);
        assert_eq!(config.app.main, "index.html");
    }

    #[test]
    fn project_config_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("aegis.toml"),
            "[app]\ntitle = \"Notes\"\n[capabilities]\nallow = [\"read\"]\n",
        )
        .unwrap();
        let config = load_config(dir.path(), None);
        assert_eq!(config.app.title, "Notes");
        assert_eq!(config.capabilities.allow, vec!["read"]);
    }

    #[test]
    fn override_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("aegis.toml"), "[app]\ntitle = \"Project\"\n").unwrap();
        let alt = dir.path().join("alt.toml");
        std::fs::write(&alt, "[app]\ntitle = \"Override\"\n").unwrap();

        let config = load_config(dir.path(), Some(&alt));
        assert_eq!(config.app.title, "Override");
    }

    #[test]
    fn invalid_override_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let alt = dir.path().join("alt.toml");
        std::fs::write(&alt, "[bridge]\nmax_workers = 0\n").unwrap();

        let config = load_config(dir.path(), Some(&alt));
        assert_eq!(config.bridge.max_workers, 4);
    }

    #[test]
    fn init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let written = init_project(dir.path()).unwrap().unwrap();
        assert_eq!(written, dir.path().join("aegis.toml"));

        let config = load_config(dir.path(), None);
        assert_eq!(config.window.width, 1200);

        assert!(init_project(dir.path()).unwrap().is_none());
    }

    #[test]
    fn init_respects_legacy_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("aegis.config.json"), "{}").unwrap();
        assert!(init_project(dir.path()).unwrap().is_none());
        assert!(!dir.path().join("aegis.toml").exists());
    }
}
