use std::path::PathBuf;

/// Failure of a single bridge request.
///
/// Every variant is delivered to the page as `{success: false, error}`; none
/// of them is fatal to the host process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action '{0}' is not allowed by the capability list")]
    PermissionDenied(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    HandlerFailure(String),

    #[error("cancelled")]
    Cancelled,
}

impl BridgeError {
    pub fn failure(msg: impl Into<String>) -> Self {
        Self::HandlerFailure(msg.into())
    }

    pub fn missing_field(field: &str) -> Self {
        Self::InvalidRequest(format!("missing '{field}' in payload"))
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(e: std::io::Error) -> Self {
        Self::HandlerFailure(e.to_string())
    }
}

impl From<HostError> for BridgeError {
    fn from(e: HostError) -> Self {
        Self::HandlerFailure(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors raised by the window/dialog collaborator.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("window not available")]
    NoWindow,

    #[error("window operation failed: {0}")]
    Window(String),

    #[error("dialog error: {0}")]
    Dialog(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AegisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::UnknownAction("doesNotExist".into());
        assert_eq!(err.to_string(), "Unknown action: doesNotExist");

        let err = BridgeError::PermissionDenied("run".into());
        assert_eq!(
            err.to_string(),
            "Action 'run' is not allowed by the capability list"
        );

        let err = BridgeError::missing_field("path");
        assert_eq!(err.to_string(), "invalid request: missing 'path' in payload");

        let err = BridgeError::failure("disk full");
        assert_eq!(err.to_string(), "disk full");

        assert_eq!(BridgeError::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn bridge_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BridgeError = io_err.into();
        assert!(matches!(err, BridgeError::HandlerFailure(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn bridge_error_from_host() {
        let err: BridgeError = HostError::NoWindow.into();
        assert_eq!(err, BridgeError::HandlerFailure("window not available".into()));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("bridge.max_workers = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: bridge.max_workers = 0"
        );
    }

    #[test]
    fn aegis_error_from_variants() {
        let err: AegisError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, AegisError::Config(_)));
        assert!(err.to_string().contains("bad toml"));

        let err: AegisError = BridgeError::Cancelled.into();
        assert!(matches!(err, AegisError::Bridge(_)));

        let err: AegisError = HostError::Dialog("no portal".into()).into();
        assert_eq!(err.to_string(), "dialog error: no portal");

        let err = AegisError::WebView("js error".into());
        assert_eq!(err.to_string(), "webview error: js error");
    }
}
