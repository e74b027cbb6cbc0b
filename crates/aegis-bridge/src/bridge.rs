//! The bridge: capability check, registry lookup, then either inline
//! execution or hand-off to the async dispatcher.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use aegis_common::{
    new_correlation_id, ActionRequest, ActionResult, BridgeError, CallbackId, Outbound, Payload,
};
use aegis_config::AegisConfig;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::capability::CapabilityList;
use crate::handlers::Builtins;
use crate::host::WindowHost;
use crate::registry::{ActionRegistry, Entry, Handler};
use crate::response::ResponseSender;
use crate::worker::{AsyncDispatcher, CancelRegistry};

/// Everything the bridge needs from its embedder.
pub struct BridgeContext {
    /// Directory reported as `app.getPath({name: "app"})`.
    pub project_dir: PathBuf,
    pub host: Arc<dyn WindowHost>,
    /// Runtime the async actions are spawned on.
    pub runtime: Handle,
    pub responses: ResponseSender,
}

pub struct Bridge {
    capabilities: CapabilityList,
    registry: ActionRegistry,
    builtins: Builtins,
    workers: AsyncDispatcher,
}

impl Bridge {
    pub fn new(config: &AegisConfig, ctx: BridgeContext) -> Result<Self, BridgeError> {
        let capabilities = CapabilityList::from_config(&config.capabilities);
        if capabilities.denies_everything() {
            tracing::warn!("capability list is closed and empty: every action will be denied");
        } else if capabilities.is_default_open() {
            tracing::warn!(
                sensitive = ?capabilities.reachable_sensitive_actions(),
                "capabilities.allow is empty: every action is allowed, including shell execution"
            );
        } else {
            tracing::info!(allow = ?capabilities.entries(), "capability list loaded");
            let sensitive = capabilities.reachable_sensitive_actions();
            if !sensitive.is_empty() {
                tracing::info!(?sensitive, "shell execution is enabled for page script");
            }
        }

        let cancels = CancelRegistry::new();
        let workers =
            AsyncDispatcher::new(ctx.runtime, &config.bridge, ctx.responses, cancels.clone())?;
        let builtins = Builtins::new(ctx.host, ctx.project_dir, cancels);

        Ok(Self {
            capabilities,
            registry: ActionRegistry::with_builtins(),
            builtins,
            workers,
        })
    }

    /// Add or replace an action. Custom actions run synchronously and are
    /// subject to the capability list like built-ins.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H)
    where
        H: Handler + 'static,
    {
        self.registry.register(name, handler);
    }

    pub fn capabilities(&self) -> &CapabilityList {
        &self.capabilities
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn workers(&self) -> &AsyncDispatcher {
        &self.workers
    }

    fn route(&self, name: &str) -> Result<&Entry, BridgeError> {
        self.capabilities.check(name)?;
        self.registry.lookup(name)
    }

    /// Synchronous entry point: run `name` inline and return its result.
    ///
    /// Async built-ins are refused here; they need a callback id.
    pub fn process_action(&self, name: &str, payload: &Payload) -> Result<Value, BridgeError> {
        match self.route(name)? {
            Entry::Builtin(action) => self.builtins.call(*action, payload),
            Entry::Custom(handler) => call_guarded(name, handler.as_ref(), payload),
        }
    }

    /// Handle one raw IPC body from the page.
    ///
    /// Returns the response to deliver right away for a synchronous action.
    /// Async actions return `None` and respond through the response channel,
    /// as does anything without a callback id.
    pub fn handle_message(&self, raw: &str) -> Option<Outbound> {
        let request = match ActionRequest::from_json(raw) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "malformed bridge message");
                return salvage_callback_id(raw)
                    .map(|id| Outbound::resolve(id, ActionResult::err(e.to_string())));
            }
        };
        self.dispatch(request)
    }

    pub fn dispatch(&self, request: ActionRequest) -> Option<Outbound> {
        let ActionRequest {
            action: name,
            payload,
            callback_id,
        } = request;
        let request_id = new_correlation_id();
        tracing::debug!(request_id = %request_id, action = %name, ?callback_id, "bridge request");

        // Async built-ins go to the worker pool; everything else runs here.
        let outcome = match self.route(&name) {
            Ok(Entry::Builtin(action)) if action.is_async() => {
                let Some(id) = callback_id else {
                    tracing::warn!(request_id = %request_id, action = %name, "async action without callbackId dropped");
                    return None;
                };
                if self.workers.is_in_flight(&id) {
                    tracing::warn!(request_id = %request_id, action = %name, callback_id = %id, "callbackId already in flight, duplicate dropped");
                    return None;
                }
                return match self.workers.spawn(*action, payload, id.clone()) {
                    Ok(()) => None,
                    Err(e) => {
                        tracing::warn!(request_id = %request_id, action = %name, error = %e, "async action refused");
                        Some(Outbound::resolve(id, ActionResult::err(e.to_string())))
                    }
                };
            }
            Ok(Entry::Builtin(action)) => self.builtins.call(*action, &payload),
            Ok(Entry::Custom(handler)) => call_guarded(&name, handler.as_ref(), &payload),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            tracing::warn!(request_id = %request_id, action = %name, error = %e, "bridge action failed");
        }

        match callback_id {
            Some(id) => Some(Outbound::resolve(id, ActionResult::from(outcome))),
            None => {
                tracing::debug!(request_id = %request_id, action = %name, "no callbackId, result discarded");
                None
            }
        }
    }
}

/// Run a custom handler, turning a panic into a handler failure.
fn call_guarded(name: &str, handler: &dyn Handler, payload: &Payload) -> Result<Value, BridgeError> {
    panic::catch_unwind(AssertUnwindSafe(|| handler.call(payload))).unwrap_or_else(|_| {
        tracing::error!(action = %name, "handler panicked");
        Err(BridgeError::failure(format!("handler for '{name}' panicked")))
    })
}

/// Callback id of a message that failed to parse as a request, so the
/// page still gets an error back.
fn salvage_callback_id(raw: &str) -> Option<CallbackId> {
    let value: Value = serde_json::from_str(raw).ok()?;
    serde_json::from_value(value.get("callbackId")?.clone()).ok()
}

#[cfg(test)]
mod tests;
