//! Host-side request bridge between page script and native capabilities.
//!
//! Page script posts `{action, payload, callbackId}` JSON through the web
//! view's IPC hook. The [`Bridge`] checks the action against the
//! [`CapabilityList`], looks it up in the [`ActionRegistry`], and either runs
//! it inline (sync actions) or hands it to the [`AsyncDispatcher`], whose
//! workers report progress and results through the [`response`] channel.

pub mod bridge;
pub mod capability;
pub mod handlers;
pub mod host;
pub mod ipc;
pub mod registry;
pub mod response;
pub mod worker;

pub use bridge::{Bridge, BridgeContext};
pub use capability::CapabilityList;
pub use host::{HeadlessHost, UiWaker, WindowHost};
pub use registry::{ActionRegistry, Handler};
pub use response::{ResponseReceiver, ResponseSender};
pub use worker::{AsyncDispatcher, CancelRegistry, ProgressReporter, TaskState};
