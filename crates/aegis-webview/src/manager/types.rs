/// Configuration for creating the application web view.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load.
    pub url: String,
    /// Scripts run before any page script, in order.
    pub init_scripts: Vec<String>,
    /// Whether to enable dev tools.
    pub devtools: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            init_scripts: Vec::new(),
            devtools: cfg!(debug_assertions),
        }
    }
}
