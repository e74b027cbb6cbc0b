//! Window creation, bridge construction and web view setup.

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use aegis_bridge::host::{UiWaker, WindowHost};
use aegis_bridge::{ipc, response, Bridge, BridgeContext};
use aegis_common::AegisError;
use aegis_config::AegisConfig;
use aegis_webview::{ContentProvider, WebViewConfig, WebViewManager};

use crate::window_host::WinitHost;

use super::core::AegisApp;
use super::types::RUNTIME_THREADS;

// =============================================================================
// INITIALIZATION
// =============================================================================

impl AegisApp {
    /// Create the window, the bridge and the web view.
    pub(super) fn initialize_window(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(), AegisError> {
        let window = event_loop
            .create_window(window_attributes(&self.config))
            .map(Arc::new)
            .map_err(|e| AegisError::Other(format!("failed to create window: {e}")))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(RUNTIME_THREADS)
            .thread_name("aegis-worker")
            .enable_all()
            .build()?;

        let host = Arc::new(WinitHost::new(Arc::clone(&window)));
        let wake = Arc::clone(&self.wake);
        let waker: Arc<dyn UiWaker> = Arc::new(move || wake());
        let (responses_tx, responses_rx) =
            response::channel(self.config.bridge.queue_capacity as usize, waker);

        let bridge = Bridge::new(
            &self.config,
            BridgeContext {
                project_dir: self.project_dir.clone(),
                host: Arc::clone(&host) as Arc<dyn WindowHost>,
                runtime: runtime.handle().clone(),
                responses: responses_tx,
            },
        )?;

        let mut manager = WebViewManager::new(Arc::clone(&self.wake));
        let provider = ContentProvider::new(&self.project_dir, &self.config.app.main);
        let url = entry_url(&self.config, &provider);
        manager.set_content_provider(provider);

        let webview_config = WebViewConfig {
            url,
            init_scripts: ipc::init_scripts(&self.config, bridge.capabilities()),
            devtools: self.config.window.devtools,
        };

        let webview = manager
            .create(window.as_ref(), webview_config)
            .map_err(|e| AegisError::WebView(e.to_string()))?;

        tracing::info!(
            url = %webview.current_url(),
            actions = bridge.registry().len(),
            "Window created and bridge ready"
        );

        self.window = Some(window);
        self.host = Some(host);
        self.webviews = Some(manager);
        self.webview = Some(webview);
        self.bridge = Some(bridge);
        self.responses = Some(responses_rx);
        self.tokio_runtime = Some(runtime);
        Ok(())
    }
}

/// Window attributes from the `[app]` and `[window]` sections.
pub(super) fn window_attributes(config: &AegisConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(&config.app.title)
        .with_inner_size(LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
        .with_resizable(config.window.resizable)
        .with_decorations(config.window.frame)
}

/// First URL the web view loads: the entry page over `aegis://`, or the
/// entry itself when it is a remote URL and remote content is allowed.
pub(super) fn entry_url(config: &AegisConfig, provider: &ContentProvider) -> String {
    let main = config.app.main.trim();
    let remote = main.starts_with("https://") || main.starts_with("http://");
    if remote && config.capabilities.allow_remote_content {
        main.to_string()
    } else {
        if remote {
            tracing::warn!(main, "remote entry page needs capabilities.allow_remote_content");
        }
        provider.entry_url()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_attributes_follow_config() {
        let mut config = AegisConfig::default();
        config.app.title = "Notes".into();
        config.window.frame = false;
        config.window.resizable = false;

        let attrs = window_attributes(&config);
        assert_eq!(attrs.title, "Notes");
        assert!(!attrs.decorations);
        assert!(!attrs.resizable);
        assert!(attrs.inner_size.is_some());
    }

    #[test]
    fn entry_url_serves_local_main() {
        let config = AegisConfig::default();
        let provider = ContentProvider::new("/srv/app", &config.app.main);
        assert_eq!(entry_url(&config, &provider), "aegis://localhost/index.html");
    }

    #[test]
    fn remote_main_needs_opt_in() {
        let mut config = AegisConfig::default();
        config.app.main = "https://example.com/app".into();
        let provider = ContentProvider::new("/srv/app", "index.html");
        assert_eq!(entry_url(&config, &provider), "aegis://localhost/index.html");

        config.capabilities.allow_remote_content = true;
        assert_eq!(entry_url(&config, &provider), "https://example.com/app");
    }
}
