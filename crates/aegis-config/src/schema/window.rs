//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Window appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial inner width in logical pixels (valid range: 100-16384).
    pub width: u32,
    /// Initial inner height in logical pixels (valid range: 100-16384).
    pub height: u32,
    pub resizable: bool,
    /// Draw native decorations. Frameless windows drag and resize through
    /// the `window.startDrag` / `window.resize` actions.
    pub frame: bool,
    pub devtools: bool,
    /// Allow the web view's default context menu.
    pub context_menu: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            resizable: true,
            frame: true,
            devtools: cfg!(debug_assertions),
            context_menu: true,
        }
    }
}
