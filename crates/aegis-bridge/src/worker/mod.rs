//! Async dispatcher: long-running actions on the tokio runtime.
//!
//! Each request becomes one task. Tasks wait for a semaphore permit, so at
//! most `max_workers` actions run at once; the rest stay pending. Every
//! in-flight request owns a watch channel that the `cancel` action flips.

mod copy_async;
mod download;
mod progress;
mod run_async;

pub use progress::{ProgressReporter, TaskState};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use aegis_common::{Action, BridgeError, CallbackId, Payload};
use aegis_config::schema::BridgeConfig;
use serde_json::{json, Value};
use tokio::runtime::Handle;
use tokio::sync::{watch, Semaphore};

use crate::response::ResponseSender;

/// Cancel switches of in-flight async requests, keyed by callback id.
#[derive(Clone, Default)]
pub struct CancelRegistry {
    inner: Arc<Mutex<HashMap<CallbackId, watch::Sender<bool>>>>,
}

impl CancelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CallbackId, watch::Sender<bool>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn register(&self, id: &CallbackId) -> Result<watch::Receiver<bool>, BridgeError> {
        let mut map = self.lock();
        if map.contains_key(id) {
            return Err(BridgeError::InvalidRequest(format!(
                "callbackId {id} is already in flight"
            )));
        }
        let (tx, rx) = watch::channel(false);
        map.insert(id.clone(), tx);
        Ok(rx)
    }

    fn release(&self, id: &CallbackId) {
        self.lock().remove(id);
    }

    /// Signal the request; false when nothing with that id is in flight.
    pub fn cancel(&self, id: &CallbackId) -> bool {
        match self.lock().get(id) {
            Some(tx) => {
                tx.send_replace(true);
                true
            }
            None => false,
        }
    }

    /// `cancel` action: `{callbackId}` -> `{cancelled}`.
    pub fn cancel_from_payload(&self, payload: &Payload) -> Result<Value, BridgeError> {
        let raw = payload
            .get("callbackId")
            .ok_or_else(|| BridgeError::missing_field("callbackId"))?;
        let id: CallbackId = serde_json::from_value(raw.clone())
            .map_err(|_| BridgeError::InvalidRequest("callbackId must be a number or string".into()))?;
        let cancelled = self.cancel(&id);
        tracing::info!(callback_id = %id, cancelled, "cancel requested");
        Ok(json!({ "cancelled": cancelled }))
    }

    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    pub fn is_in_flight(&self, id: &CallbackId) -> bool {
        self.lock().contains_key(id)
    }
}

#[derive(Clone)]
struct JobContext {
    http: reqwest::Client,
    read_timeout: Duration,
}

pub struct AsyncDispatcher {
    runtime: Handle,
    permits: Arc<Semaphore>,
    cancels: CancelRegistry,
    responses: ResponseSender,
    ctx: JobContext,
}

impl AsyncDispatcher {
    pub fn new(
        runtime: Handle,
        config: &BridgeConfig,
        responses: ResponseSender,
        cancels: CancelRegistry,
    ) -> Result<Self, BridgeError> {
        let read_timeout = Duration::from_secs(config.download_timeout_secs.max(1));
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(read_timeout)
            .build()
            .map_err(|e| BridgeError::failure(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            runtime,
            permits: Arc::new(Semaphore::new(config.max_workers.max(1) as usize)),
            cancels,
            responses,
            ctx: JobContext { http, read_timeout },
        })
    }

    /// Start `action` for `callback_id` and return immediately. Progress and
    /// the terminal result arrive through the response channel.
    pub fn spawn(
        &self,
        action: Action,
        payload: Payload,
        callback_id: CallbackId,
    ) -> Result<(), BridgeError> {
        if !action.is_async() {
            return Err(BridgeError::InvalidRequest(format!(
                "'{}' is not an asynchronous action",
                action.name()
            )));
        }
        let cancel_rx = self.cancels.register(&callback_id)?;

        let permits = Arc::clone(&self.permits);
        let cancels = self.cancels.clone();
        let ctx = self.ctx.clone();
        let mut reporter = ProgressReporter::new(callback_id.clone(), self.responses.clone());

        tracing::debug!(action = action.name(), callback_id = %callback_id, "queued async action");
        self.runtime.spawn(async move {
            let outcome = tokio::select! {
                outcome = execute(permits, action, &payload, &mut reporter, &ctx) => outcome,
                _ = wait_for_cancel(cancel_rx) => {
                    tracing::info!(action = action.name(), callback_id = %callback_id, "async action cancelled");
                    Err(BridgeError::Cancelled)
                }
            };
            cancels.release(&callback_id);
            reporter.finish(outcome).await;
        });
        Ok(())
    }

    /// Replace the HTTP client used by `download`.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.ctx.http = client;
        self
    }

    /// Worker slots not currently taken.
    pub fn available_workers(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn in_flight(&self) -> usize {
        self.cancels.in_flight()
    }

    pub fn is_in_flight(&self, id: &CallbackId) -> bool {
        self.cancels.is_in_flight(id)
    }
}

async fn execute(
    permits: Arc<Semaphore>,
    action: Action,
    payload: &Payload,
    reporter: &mut ProgressReporter,
    ctx: &JobContext,
) -> Result<Value, BridgeError> {
    let _permit = permits
        .acquire_owned()
        .await
        .map_err(|_| BridgeError::failure("worker pool is shut down"))?;
    reporter.start();
    tracing::debug!(action = action.name(), callback_id = %reporter.callback_id(), "running async action");

    match action {
        Action::RunAsync => run_async::run(payload, reporter).await,
        Action::Download => download::download(&ctx.http, ctx.read_timeout, payload, reporter).await,
        Action::CopyAsync => copy_async::copy(payload, reporter).await,
        other => Err(BridgeError::InvalidRequest(format!(
            "'{}' is not an asynchronous action",
            other.name()
        ))),
    }
}

async fn wait_for_cancel(mut rx: watch::Receiver<bool>) {
    loop {
        let cancelled = *rx.borrow_and_update();
        if cancelled {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
