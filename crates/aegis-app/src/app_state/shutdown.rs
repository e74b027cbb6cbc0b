//! Graceful shutdown: stop async actions, then drop the web view and window.

use std::time::Duration;

use super::core::AegisApp;

impl AegisApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Drop the bridge (no new async actions)
    /// 2. Shut down the tokio runtime (aborts in-flight actions; child
    ///    processes are killed on drop)
    /// 3. Destroy the web view, then the window
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");
        self.should_exit = true;

        if let Some(bridge) = self.bridge.take() {
            let in_flight = bridge.workers().in_flight();
            if in_flight > 0 {
                tracing::info!(in_flight, "Aborting in-flight async actions");
            }
        }
        self.responses = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.webview = None;
        self.webviews = None;
        self.host = None;
        self.window = None;

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
