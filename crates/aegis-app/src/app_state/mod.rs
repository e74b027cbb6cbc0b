//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the web view, the bridge and the tokio
//! runtime the bridge's async actions run on.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;

pub use core::AegisApp;
pub use types::UserEvent;
