//! Wire-level data model shared by the bridge and the window host.

mod request;
mod response;

pub use request::{ActionRequest, Payload};
pub use response::{ActionResult, Outbound, ProgressEvent};
