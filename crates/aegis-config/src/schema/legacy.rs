//! Flat `aegis.config.json` layout written by older project templates.

use serde::{Deserialize, Serialize};

use super::{AegisConfig, AppConfig, CapabilitiesConfig, WindowConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyJsonConfig {
    pub name: String,
    pub title: String,
    pub version: String,
    pub main: String,
    /// Script the old loader scraped for `Aegis.expose([...])`. Kept only so
    /// the loader can warn that it is no longer read.
    pub preload: Option<String>,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub frame: bool,
    pub dev_tools: bool,
    pub context_menu: bool,
    pub allow: Vec<String>,
}

impl Default for LegacyJsonConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        let window = WindowConfig::default();
        Self {
            name: app.name,
            title: app.title,
            version: app.version,
            main: app.main,
            preload: None,
            width: window.width,
            height: window.height,
            resizable: window.resizable,
            frame: window.frame,
            dev_tools: window.devtools,
            context_menu: window.context_menu,
            allow: Vec::new(),
        }
    }
}

impl From<LegacyJsonConfig> for AegisConfig {
    fn from(legacy: LegacyJsonConfig) -> Self {
        Self {
            app: AppConfig {
                name: legacy.name,
                title: legacy.title,
                version: legacy.version,
                main: legacy.main,
            },
            window: WindowConfig {
                width: legacy.width,
                height: legacy.height,
                resizable: legacy.resizable,
                frame: legacy.frame,
                devtools: legacy.dev_tools,
                context_menu: legacy.context_menu,
            },
            capabilities: CapabilitiesConfig {
                // A preload script used to declare the exposed actions. That
                // list is no longer read, so such a project starts closed.
                default_open: legacy.preload.is_none() || !legacy.allow.is_empty(),
                allow: legacy.allow,
                ..Default::default()
            },
            bridge: Default::default(),
        }
    }
}
