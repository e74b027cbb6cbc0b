//! Event loop pumping: page messages in, bridge responses out.

use std::time::Instant;

use winit::dpi::PhysicalSize;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use aegis_bridge::response::to_script;
use aegis_common::Outbound;
use aegis_webview::{PageLoadState, WebViewEvent};

use super::core::AegisApp;
use super::types::POLL_INTERVAL;

impl AegisApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        pump_gtk();
        self.poll_webview_events();
        self.poll_responses();

        if self.exit_requested() {
            self.shutdown();
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Feed queued page events to the bridge.
    pub(super) fn poll_webview_events(&mut self) {
        let events = match &self.webviews {
            Some(manager) => manager.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::IpcMessage { body } => {
                    let reply = self.bridge.as_ref().and_then(|b| b.handle_message(&body));
                    if let Some(reply) = reply {
                        self.deliver(&reply);
                    }
                }
                WebViewEvent::PageLoad { state, url } => {
                    if state == PageLoadState::Finished {
                        tracing::info!(url = %url, "Page loaded");
                    }
                    if let Some(wv) = self.webview.as_mut() {
                        wv.set_url(url);
                    }
                }
                WebViewEvent::TitleChanged { title } => {
                    if !title.is_empty() {
                        if let Some(window) = &self.window {
                            window.set_title(&title);
                        }
                    }
                }
            }
        }
    }

    /// Deliver everything the async workers have queued.
    pub(super) fn poll_responses(&mut self) {
        let pending = match self.responses.as_mut() {
            Some(rx) => rx.drain(),
            None => return,
        };
        for msg in &pending {
            self.deliver(msg);
        }
    }

    fn deliver(&self, msg: &Outbound) {
        let Some(wv) = &self.webview else {
            tracing::debug!(callback_id = %msg.callback_id(), "no webview, response dropped");
            return;
        };
        if let Err(e) = wv.evaluate_script(&to_script(msg)) {
            tracing::warn!(callback_id = %msg.callback_id(), error = %e, "Failed to deliver response");
        }
    }

    /// Keep the web view filling the window.
    pub(super) fn sync_webview_bounds(&self, size: PhysicalSize<u32>) {
        if let Some(wv) = &self.webview {
            if let Err(e) = wv.set_bounds(fill_bounds(size)) {
                tracing::warn!(error = %e, "Failed to resize webview");
            }
        }
    }
}

/// Bounds covering the whole client area.
pub(super) fn fill_bounds(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::PhysicalPosition::new(0, 0).into(),
        size: wry::dpi::PhysicalSize::new(size.width, size.height).into(),
    }
}

/// Run pending GTK events; WebKitGTK only makes progress when GTK is pumped.
#[cfg(target_os = "linux")]
fn pump_gtk() {
    while gtk::events_pending() {
        gtk::main_iteration_do(false);
    }
}

#[cfg(not(target_os = "linux"))]
fn pump_gtk() {}
