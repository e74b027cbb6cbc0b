use aegis_common::{ActionResult, BridgeError, CallbackId, Outbound};
use serde_json::Value;

use crate::response::ResponseSender;

/// Lifecycle of one async request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Waiting for a worker slot.
    Pending,
    Running,
    /// At least one progress event has been emitted.
    Progressing,
    Finished,
}

/// Emits progress for one request and, exactly once, its terminal result.
///
/// [`finish`](Self::finish) consumes the reporter, so nothing can be emitted
/// after the terminal result. A reporter dropped without finishing (worker
/// panic, runtime shutdown) queues an error result instead.
pub struct ProgressReporter {
    callback_id: CallbackId,
    sender: ResponseSender,
    state: TaskState,
    last_metric: u64,
}

impl ProgressReporter {
    pub(crate) fn new(callback_id: CallbackId, sender: ResponseSender) -> Self {
        Self {
            callback_id,
            sender,
            state: TaskState::Pending,
            last_metric: 0,
        }
    }

    pub fn callback_id(&self) -> &CallbackId {
        &self.callback_id
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub(crate) fn start(&mut self) {
        self.state = TaskState::Running;
    }

    /// Emit a progress event. `metric` (bytes, lines, files) must not go
    /// backwards; events that would are dropped.
    pub async fn emit(&mut self, metric: u64, data: Value) {
        if metric < self.last_metric {
            tracing::warn!(
                callback_id = %self.callback_id,
                metric,
                last = self.last_metric,
                "dropping out-of-order progress event"
            );
            return;
        }
        self.last_metric = metric;
        self.state = TaskState::Progressing;
        self.sender
            .send(Outbound::progress(self.callback_id.clone(), data))
            .await;
    }

    pub async fn finish(mut self, outcome: Result<Value, BridgeError>) {
        self.state = TaskState::Finished;
        if let Err(e) = &outcome {
            tracing::warn!(callback_id = %self.callback_id, error = %e, "async action failed");
        }
        let msg = Outbound::resolve(self.callback_id.clone(), ActionResult::from(outcome));
        self.sender.send(msg).await;
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if self.state != TaskState::Finished {
            tracing::error!(callback_id = %self.callback_id, "worker stopped without a result");
            self.sender.try_send(Outbound::resolve(
                self.callback_id.clone(),
                ActionResult::err("worker stopped without a result"),
            ));
        }
    }
}

/// Percentage of `done` over `total`; 0 when the total is unknown.
pub(crate) fn percent(done: u64, total: Option<u64>) -> f64 {
    match total {
        Some(t) if t > 0 => done as f64 * 100.0 / t as f64,
        _ => 0.0,
    }
}
