//! `dialog.*`, `app.*` (except `getPath`) and `window.*` actions, forwarded
//! to the [`WindowHost`].

use std::path::PathBuf;

use aegis_common::{BridgeError, Payload, WindowEdge};
use serde_json::{json, Value};

use crate::host::{
    DialogFilter, MessageButtons, MessageDialog, MessageKind, OpenDialog, SaveDialog, WindowHost,
};

fn parse_filters(payload: &Payload) -> Vec<DialogFilter> {
    let Some(raw) = payload.array("filters") else {
        return Vec::new();
    };
    raw.iter()
        .filter_map(Value::as_object)
        .map(|f| DialogFilter {
            name: f
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Files")
                .to_string(),
            extensions: f
                .get("extensions")
                .and_then(Value::as_array)
                .map(|exts| {
                    exts.iter()
                        .filter_map(Value::as_str)
                        .map(|e| e.trim_start_matches("*.").trim_start_matches('.').to_string())
                        .filter(|e| !e.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

fn path_value(path: PathBuf) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

/// `{path}`: a string, a list when `multiple` is set, or null on cancel.
pub fn dialog_open(host: &dyn WindowHost, payload: &Payload) -> Result<Value, BridgeError> {
    let opts = OpenDialog {
        title: payload.str("title").unwrap_or("Open File").to_string(),
        directory: payload.bool_or("directory", false),
        multiple: payload.bool_or("multiple", false),
        filters: parse_filters(payload),
    };
    let picked = host.open_dialog(&opts)?;
    let path = match picked {
        None => Value::Null,
        Some(paths) if opts.multiple => paths.into_iter().map(path_value).collect(),
        Some(paths) => paths.into_iter().next().map(path_value).unwrap_or(Value::Null),
    };
    Ok(json!({ "path": path }))
}

pub fn dialog_save(host: &dyn WindowHost, payload: &Payload) -> Result<Value, BridgeError> {
    let opts = SaveDialog {
        title: payload.str("title").unwrap_or("Save File").to_string(),
        default_name: payload.str("defaultName").unwrap_or_default().to_string(),
        filters: parse_filters(payload),
    };
    let path = host.save_dialog(&opts)?.map(path_value).unwrap_or(Value::Null);
    Ok(json!({ "path": path }))
}

/// `{response}`: true when the user confirmed.
pub fn dialog_message(host: &dyn WindowHost, payload: &Payload) -> Result<Value, BridgeError> {
    let opts = MessageDialog {
        title: payload.str("title").unwrap_or_default().to_string(),
        message: payload.str("message").unwrap_or_default().to_string(),
        kind: MessageKind::parse(payload.str("type").unwrap_or("info")),
        buttons: MessageButtons::parse(payload.str("buttons").unwrap_or("ok")),
    };
    let response = host.message_dialog(&opts)?;
    Ok(json!({ "response": response }))
}

fn done() -> Value {
    json!({ "success": true })
}

pub fn app_quit(host: &dyn WindowHost) -> Result<Value, BridgeError> {
    tracing::info!("quit requested by page");
    host.quit();
    Ok(done())
}

pub fn app_minimize(host: &dyn WindowHost) -> Result<Value, BridgeError> {
    host.minimize()?;
    Ok(done())
}

pub fn app_maximize(host: &dyn WindowHost) -> Result<Value, BridgeError> {
    host.toggle_maximize()?;
    Ok(done())
}

pub fn start_drag(host: &dyn WindowHost) -> Result<Value, BridgeError> {
    host.start_drag()?;
    Ok(done())
}

pub fn start_resize(host: &dyn WindowHost, payload: &Payload) -> Result<Value, BridgeError> {
    let edge = WindowEdge::parse(payload.str("edge").unwrap_or("se"));
    host.start_resize(edge)?;
    Ok(done())
}

fn dimension(payload: &Payload, key: &str) -> Result<Option<u32>, BridgeError> {
    match payload.i64(key) {
        None => Ok(None),
        Some(v) if v > 0 && v <= i64::from(u32::MAX) => Ok(Some(v as u32)),
        Some(v) => Err(BridgeError::InvalidRequest(format!(
            "{key} must be a positive integer, got {v}"
        ))),
    }
}

fn coordinate(payload: &Payload, key: &str) -> Result<Option<i32>, BridgeError> {
    match payload.i64(key) {
        None => Ok(None),
        Some(v) => i32::try_from(v)
            .map(Some)
            .map_err(|_| BridgeError::InvalidRequest(format!("{key} is out of range: {v}"))),
    }
}

/// Resize when both `width` and `height` are given; otherwise a no-op.
pub fn set_size(host: &dyn WindowHost, payload: &Payload) -> Result<Value, BridgeError> {
    if let (Some(width), Some(height)) = (dimension(payload, "width")?, dimension(payload, "height")?)
    {
        host.set_size(width, height)?;
    }
    Ok(done())
}

pub fn get_size(host: &dyn WindowHost) -> Result<Value, BridgeError> {
    let (width, height) = host.size()?;
    Ok(json!({ "width": width, "height": height }))
}

/// Move when both `x` and `y` are given; otherwise a no-op.
pub fn set_position(host: &dyn WindowHost, payload: &Payload) -> Result<Value, BridgeError> {
    if let (Some(x), Some(y)) = (coordinate(payload, "x")?, coordinate(payload, "y")?) {
        host.set_position(x, y)?;
    }
    Ok(done())
}

pub fn get_position(host: &dyn WindowHost) -> Result<Value, BridgeError> {
    let (x, y) = host.position()?;
    Ok(json!({ "x": x, "y": y }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_host::RecordingHost;

    fn payload(v: Value) -> Payload {
        Payload::try_from(v).unwrap()
    }

    #[test]
    fn open_dialog_single_and_multiple() {
        let host = RecordingHost::default();
        host.set_open_result(Some(vec!["/a.txt".into(), "/b.txt".into()]));

        let single = dialog_open(&host, &Payload::new()).unwrap();
        assert_eq!(single, json!({ "path": "/a.txt" }));

        let multi = dialog_open(&host, &payload(json!({ "multiple": true }))).unwrap();
        assert_eq!(multi, json!({ "path": ["/a.txt", "/b.txt"] }));
    }

    #[test]
    fn open_dialog_cancel_is_null() {
        let host = RecordingHost::default();
        host.set_open_result(None);
        let out = dialog_open(&host, &Payload::new()).unwrap();
        assert_eq!(out, json!({ "path": null }));
    }

    #[test]
    fn open_dialog_parses_filters() {
        let host = RecordingHost::default();
        dialog_open(
            &host,
            &payload(json!({
                "title": "Pick",
                "directory": true,
                "filters": [{ "name": "Images", "extensions": ["png", "*.jpg", ".gif"] }, "junk"],
            })),
        )
        .unwrap();
        let opts = host.last_open().unwrap();
        assert_eq!(opts.title, "Pick");
        assert!(opts.directory);
        assert_eq!(
            opts.filters,
            vec![DialogFilter {
                name: "Images".into(),
                extensions: vec!["png".into(), "jpg".into(), "gif".into()],
            }]
        );
    }

    #[test]
    fn save_dialog_passes_default_name() {
        let host = RecordingHost::default();
        let out = dialog_save(&host, &payload(json!({ "defaultName": "report.pdf" }))).unwrap();
        assert_eq!(out, json!({ "path": "/saved/report.pdf" }));
    }

    #[test]
    fn message_dialog_reports_response() {
        let host = RecordingHost::default();
        let out = dialog_message(
            &host,
            &payload(json!({ "title": "Sure?", "type": "question", "buttons": "yesno" })),
        )
        .unwrap();
        assert_eq!(out, json!({ "response": true }));
        let opts = host.last_message().unwrap();
        assert_eq!(opts.kind, MessageKind::Question);
        assert_eq!(opts.buttons, MessageButtons::YesNo);
    }

    #[test]
    fn size_round_trip() {
        let host = RecordingHost::default();
        set_size(&host, &payload(json!({ "width": 1024, "height": 768 }))).unwrap();
        assert_eq!(get_size(&host).unwrap(), json!({ "width": 1024, "height": 768 }));
    }

    #[test]
    fn partial_size_is_ignored() {
        let host = RecordingHost::default();
        set_size(&host, &payload(json!({ "width": 10 }))).unwrap();
        assert_eq!(get_size(&host).unwrap(), json!({ "width": 800, "height": 600 }));
    }

    #[test]
    fn bad_size_is_invalid() {
        let host = RecordingHost::default();
        let err = set_size(&host, &payload(json!({ "width": -5, "height": 10 }))).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidRequest(_)));
    }

    #[test]
    fn position_round_trip_allows_negative() {
        let host = RecordingHost::default();
        set_position(&host, &payload(json!({ "x": -20, "y": 40 }))).unwrap();
        assert_eq!(get_position(&host).unwrap(), json!({ "x": -20, "y": 40 }));
    }

    #[test]
    fn resize_edge_defaults_to_south_east() {
        let host = RecordingHost::default();
        start_resize(&host, &Payload::new()).unwrap();
        start_resize(&host, &payload(json!({ "edge": "nw" }))).unwrap();
        assert_eq!(host.resizes(), vec![WindowEdge::Se, WindowEdge::Nw]);
    }

    #[test]
    fn host_errors_become_handler_failures() {
        let host = crate::host::HeadlessHost::new();
        let err = app_minimize(&host).unwrap_err();
        assert_eq!(err, BridgeError::HandlerFailure("window not available".into()));
    }
}
