//! Internal types and constants for the app state module.

use std::time::Duration;

/// Events sent to the event loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    /// A page message or worker response is waiting.
    Wake,
}

/// How often to poll when nothing wakes the loop (approx 60 Hz). GTK needs
/// regular pumping on Linux.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Worker threads in the runtime backing async actions.
pub(super) const RUNTIME_THREADS: usize = 2;
