use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Short random id used to correlate log lines for one bridge request.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Opaque token chosen by page script to correlate a request with its
/// progress events and terminal result. Echoed back verbatim, so a numeric
/// id stays numeric on the wire, fractions and 64-bit unsigned values
/// included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallbackId {
    Number(serde_json::Number),
    Text(String),
}

// Numbers compare by their canonical JSON text, so `1.5` matches `1.5` and
// never the string `"1.5"`.
impl PartialEq for CallbackId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.to_string() == b.to_string(),
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CallbackId {}

impl Hash for CallbackId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(n) => {
                state.write_u8(0);
                n.to_string().hash(state);
            }
            Self::Text(s) => {
                state.write_u8(1);
                s.hash(state);
            }
        }
    }
}

impl From<i64> for CallbackId {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<serde_json::Number> for CallbackId {
    fn from(n: serde_json::Number) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for CallbackId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CallbackId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
