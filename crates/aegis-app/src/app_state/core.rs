//! AegisApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;

use winit::window::Window;

use aegis_bridge::{Bridge, ResponseReceiver};
use aegis_config::AegisConfig;
use aegis_webview::{Notify, WebViewHandle, WebViewManager};

use crate::window_host::WinitHost;

/// Top-level application state.
pub struct AegisApp {
    pub(super) config: AegisConfig,
    pub(super) project_dir: PathBuf,
    /// Wakes the event loop from web view callbacks and bridge workers.
    pub(super) wake: Notify,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) host: Option<Arc<WinitHost>>,

    // WebView
    pub(super) webviews: Option<WebViewManager>,
    pub(super) webview: Option<WebViewHandle>,

    // Bridge
    pub(super) bridge: Option<Bridge>,
    pub(super) responses: Option<ResponseReceiver>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    // Whether the app should exit
    pub(super) should_exit: bool,
}

impl AegisApp {
    pub fn new(config: AegisConfig, project_dir: PathBuf, wake: Notify) -> Self {
        Self {
            config,
            project_dir,
            wake,
            window: None,
            host: None,
            webviews: None,
            webview: None,
            bridge: None,
            responses: None,
            tokio_runtime: None,
            should_exit: false,
        }
    }

    /// True once the page or the window asked to close.
    pub(super) fn exit_requested(&self) -> bool {
        self.should_exit || self.host.as_ref().is_some_and(|h| h.quit_requested())
    }
}
