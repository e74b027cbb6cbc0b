pub mod actions;
pub mod errors;
pub mod id;
pub mod types;

pub use actions::{Action, WindowEdge};
pub use errors::{AegisError, BridgeError, ConfigError, HostError};
pub use id::{new_correlation_id, CallbackId};
pub use types::{ActionRequest, ActionResult, Outbound, Payload, ProgressEvent};

pub type Result<T> = std::result::Result<T, AegisError>;
