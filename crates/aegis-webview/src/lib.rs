//! WebView shell for Aegis applications.
//!
//! Wraps the `wry` crate to provide:
//! - The application web view, filling its window
//! - Page -> host IPC queued as [`WebViewEvent`]s, with a wake-up callback
//! - The `aegis://` custom protocol serving the project directory

pub mod content;
pub mod events;
pub mod manager;

pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use manager::{Notify, WebViewConfig, WebViewHandle, WebViewManager};
