use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::BridgeError;
use crate::id::CallbackId;

/// Terminal outcome of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl From<Result<Value, BridgeError>> for ActionResult {
    fn from(outcome: Result<Value, BridgeError>) -> Self {
        match outcome {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Intermediate progress of an async request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub callback_id: CallbackId,
    pub data: Value,
}

/// A message travelling from the bridge back into the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Resolve {
        callback_id: CallbackId,
        result: ActionResult,
    },
    Progress(ProgressEvent),
}

impl Outbound {
    pub fn resolve(callback_id: CallbackId, result: ActionResult) -> Self {
        Self::Resolve {
            callback_id,
            result,
        }
    }

    pub fn progress(callback_id: CallbackId, data: Value) -> Self {
        Self::Progress(ProgressEvent { callback_id, data })
    }

    pub fn callback_id(&self) -> &CallbackId {
        match self {
            Self::Resolve { callback_id, .. } => callback_id,
            Self::Progress(p) => &p.callback_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolve { .. })
    }

    /// JSON object handed to the page-side resolver or progress function.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Resolve {
                callback_id,
                result,
            } => {
                let mut v = json!({
                    "callbackId": callback_id,
                    "success": result.success,
                });
                if let Some(data) = &result.data {
                    v["data"] = data.clone();
                }
                if let Some(error) = &result.error {
                    v["error"] = Value::String(error.clone());
                }
                v
            }
            Self::Progress(p) => json!({
                "callbackId": p.callback_id,
                "type": "progress",
                "data": p.data,
            }),
        }
    }
}
