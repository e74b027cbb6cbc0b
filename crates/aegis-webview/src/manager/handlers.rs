use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::{Notify, WebViewManager};

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn push(events: &Mutex<Vec<WebViewEvent>>, notify: &Notify, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
    notify();
}

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        notify: Notify,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            debug!(body_len = body.len(), "IPC message from page");
            push(&events, &notify, WebViewEvent::IpcMessage { body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        notify: Notify,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            push(&events, &notify, WebViewEvent::PageLoad { state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        notify: Notify,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            push(&events, &notify, WebViewEvent::TitleChanged { title });
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_records_and_notifies() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let events = Mutex::new(Vec::new());
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let notify: Notify = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        push(&events, &notify, WebViewEvent::IpcMessage { body: "{}".into() });
        push(&events, &notify, WebViewEvent::TitleChanged { title: "t".into() });

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(events.lock().unwrap().len(), 2);
    }
}
