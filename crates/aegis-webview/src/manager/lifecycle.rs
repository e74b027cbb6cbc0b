use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::Response;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{ContentProvider, ORIGIN, SCHEME};

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the web view filling `window`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let events = Arc::clone(&self.events);

        let mut builder = WebViewBuilder::new()
            .with_devtools(config.devtools)
            .with_focused(true);

        for script in &config.init_scripts {
            builder = builder.with_initialization_script(script);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events), Arc::clone(&self.notify));
        builder =
            Self::attach_page_load_handler(builder, Arc::clone(&events), Arc::clone(&self.notify));
        builder = Self::attach_title_handler(builder, Arc::clone(&events), Arc::clone(&self.notify));

        builder = self.attach_custom_protocol(builder);
        builder = builder.with_url(&config.url);

        let webview = builder.build(window)?;

        debug!(url = %config.url, "WebView created");

        Ok(WebViewHandle {
            webview,
            current_url: config.url,
        })
    }

    /// Set the content provider for serving project files via `aegis://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    fn attach_custom_protocol<'a>(&self, mut builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        if let Some(provider) = &self.content_provider {
            let cp = Arc::clone(provider);
            builder = builder.with_custom_protocol(SCHEME.to_string(), move |_wv_id, request| {
                let uri = request.uri().to_string();
                let path = ContentProvider::request_path(&uri);

                match cp.resolve(path) {
                    Some((mime, data)) => respond(200, mime, data),
                    None => {
                        warn!(path = %path, "custom protocol: asset not found");
                        respond(404, "text/plain", b"Not Found".to_vec())
                    }
                }
            });
        }
        builder
    }
}

fn respond(status: u16, mime: &str, data: Vec<u8>) -> Response<Cow<'static, [u8]>> {
    Response::builder()
        .status(status)
        .header("Content-Type", mime)
        .header("Access-Control-Allow-Origin", ORIGIN)
        .body(Cow::Owned(data))
        .unwrap_or_else(|e| {
            warn!(error = %e, "custom protocol: failed to build response");
            Response::new(Cow::Borrowed(&[] as &[u8]))
        })
}
