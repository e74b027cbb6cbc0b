//! Application identity.

use serde::{Deserialize, Serialize};

/// Name, version and entry page of the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    /// Initial window title.
    pub title: String,
    pub version: String,
    /// Entry HTML file, relative to the project directory.
    pub main: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Aegis App".into(),
            title: "Aegis App".into(),
            version: "1.0.0".into(),
            main: "index.html".into(),
        }
    }
}
