//! WebView lifecycle management.
//!
//! `WebViewManager` builds the application's `wry::WebView`, wiring its page
//! callbacks into an event queue the event loop drains.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

/// Called after an event is queued, from whichever thread the web view
/// runs its callbacks on. Used to wake the event loop.
pub type Notify = Arc<dyn Fn() + Send + Sync>;

pub struct WebViewManager {
    /// Event sink: events are pushed here for the main event loop to consume.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    notify: Notify,
    /// Optional content provider for the `aegis://` custom protocol.
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new(notify: Notify) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            notify,
            content_provider: None,
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_takes_everything_once() {
        let manager = WebViewManager::new(Arc::new(|| {}));
        manager.events.lock().unwrap().extend([
            WebViewEvent::IpcMessage { body: "1".into() },
            WebViewEvent::IpcMessage { body: "2".into() },
        ]);

        let drained = manager.drain_events();
        assert_eq!(
            drained,
            vec![
                WebViewEvent::IpcMessage { body: "1".into() },
                WebViewEvent::IpcMessage { body: "2".into() },
            ]
        );
        assert!(manager.drain_events().is_empty());
    }
}
