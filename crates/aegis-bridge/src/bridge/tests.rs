//! End-to-end tests: raw IPC bodies in, wire responses out.

use super::*;
use crate::handlers::test_host::RecordingHost;
use crate::response::{channel, ResponseReceiver};
use aegis_common::Outbound;
use serde_json::json;
use std::time::Duration;
use tokio::runtime::Runtime;

struct Harness {
    bridge: Bridge,
    responses: ResponseReceiver,
    host: Arc<RecordingHost>,
    rt: Runtime,
    _tmp: tempfile::TempDir,
    dir: PathBuf,
}

fn harness(allow: &[&str]) -> Harness {
    let mut config = AegisConfig::default();
    config.capabilities.allow = allow.iter().map(|s| s.to_string()).collect();
    harness_with(config)
}

fn harness_with(config: AegisConfig) -> Harness {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_path_buf();
    let host = Arc::new(RecordingHost::default());

    let (tx, rx) = channel(64, Arc::new(|| {}));
    let bridge = Bridge::new(
        &config,
        BridgeContext {
            project_dir: dir.clone(),
            host: Arc::clone(&host) as Arc<dyn WindowHost>,
            runtime: rt.handle().clone(),
            responses: tx,
        },
    )
    .unwrap();

    Harness {
        bridge,
        responses: rx,
        host,
        rt,
        _tmp: tmp,
        dir,
    }
}

impl Harness {
    fn send(&self, msg: Value) -> Option<Value> {
        self.bridge
            .handle_message(&msg.to_string())
            .map(|out| out.to_wire())
    }

    fn path(&self, rel: &str) -> String {
        self.dir.join(rel).to_string_lossy().into_owned()
    }

    /// Next message on the async channel, as wire JSON.
    fn next_async(&mut self) -> Value {
        let rx = &mut self.responses;
        self.rt.block_on(async {
            tokio::time::timeout(Duration::from_secs(10), rx.recv())
                .await
                .expect("timed out waiting for async response")
                .expect("channel closed")
                .to_wire()
        })
    }
}

#[test]
fn unknown_action_under_default_open_policy() {
    let h = harness(&[]);
    let out = h
        .send(json!({ "action": "doesNotExist", "payload": {}, "callbackId": 1 }))
        .unwrap();
    assert_eq!(
        out,
        json!({ "callbackId": 1, "success": false, "error": "Unknown action: doesNotExist" })
    );
}

#[test]
fn permission_denied_before_handler_runs() {
    let h = harness(&["read"]);
    let target = h.path("never.txt");
    let out = h
        .send(json!({
            "action": "write",
            "payload": { "path": target, "content": "x" },
            "callbackId": 2,
        }))
        .unwrap();
    assert_eq!(out["success"], false);
    assert_eq!(
        out["error"],
        "Action 'write' is not allowed by the capability list"
    );
    assert!(!std::path::Path::new(&target).exists());
}

#[test]
fn closed_capability_list_denies_every_action() {
    let mut config = AegisConfig::default();
    config.capabilities.default_open = false;
    let h = harness_with(config);
    let target = h.path("never.txt");

    let out = h
        .send(json!({
            "action": "write",
            "payload": { "path": target, "content": "x" },
            "callbackId": 1,
        }))
        .unwrap();
    assert_eq!(out["success"], false);
    assert_eq!(
        out["error"],
        "Action 'write' is not allowed by the capability list"
    );
    assert!(!std::path::Path::new(&target).exists());

    let out = h
        .send(json!({ "action": "exists", "payload": { "path": target }, "callbackId": 2 }))
        .unwrap();
    assert!(out["error"].as_str().unwrap().contains("not allowed"));
}

#[test]
fn permission_check_precedes_unknown_lookup() {
    let h = harness(&["read"]);
    let out = h
        .send(json!({ "action": "doesNotExist", "callbackId": 3 }))
        .unwrap();
    assert!(out["error"].as_str().unwrap().contains("not allowed"));
}

#[test]
fn namespace_entry_allows_members_only() {
    let h = harness(&["window"]);
    let ok = h
        .send(json!({ "action": "window.getSize", "callbackId": 1 }))
        .unwrap();
    assert_eq!(ok["data"], json!({ "width": 800, "height": 600 }));

    let denied = h
        .send(json!({ "action": "app.quit", "callbackId": 2 }))
        .unwrap();
    assert_eq!(denied["success"], false);
    assert!(!h.host.quit_requested());
}

#[test]
fn write_then_read_round_trip() {
    let h = harness(&[]);
    let dir = h.dir.to_string_lossy().into_owned();
    let text = "line one\nünïcödé ✓\n";

    let wrote = h
        .send(json!({
            "action": "write",
            "payload": { "path": dir, "file": "notes.txt", "content": text },
            "callbackId": "w",
        }))
        .unwrap();
    assert_eq!(wrote["success"], true);

    let read = h
        .send(json!({
            "action": "read",
            "payload": { "path": dir, "file": "notes.txt" },
            "callbackId": "r",
        }))
        .unwrap();
    assert_eq!(read["callbackId"], "r");
    assert_eq!(read["data"]["content"], text);
}

#[test]
fn mkdir_recursive_then_exists() {
    let h = harness(&[]);
    let target = h.path("x/y");
    let made = h
        .send(json!({
            "action": "mkdir",
            "payload": { "path": target, "recursive": true },
            "callbackId": 1,
        }))
        .unwrap();
    assert_eq!(made["success"], true);

    let exists = h
        .send(json!({ "action": "exists", "payload": { "path": target }, "callbackId": 2 }))
        .unwrap();
    assert_eq!(exists["data"]["isDirectory"], true);
}

#[test]
fn handler_failure_is_reported_not_fatal() {
    let h = harness(&[]);
    let out = h
        .send(json!({
            "action": "read",
            "payload": { "path": h.path("missing.txt") },
            "callbackId": 4,
        }))
        .unwrap();
    assert_eq!(out["success"], false);
    assert!(out.get("data").is_none());

    // The bridge keeps serving.
    let again = h
        .send(json!({ "action": "exists", "payload": { "path": h.path("") }, "callbackId": 5 }))
        .unwrap();
    assert_eq!(again["success"], true);
}

#[test]
fn sync_action_without_callback_still_runs() {
    let h = harness(&[]);
    let target = h.path("quiet");
    let out = h.send(json!({ "action": "mkdir", "payload": { "path": target } }));
    assert!(out.is_none());
    assert!(std::path::Path::new(&target).is_dir());
}

#[test]
fn malformed_messages() {
    let h = harness(&[]);
    assert!(h.bridge.handle_message("not json").is_none());
    assert!(h.bridge.handle_message(r#"{"payload": {}}"#).is_none());

    let out = h
        .bridge
        .handle_message(r#"{"payload": {}, "callbackId": 12}"#)
        .unwrap();
    assert_eq!(out.callback_id(), &CallbackId::from(12));
    let wire = out.to_wire();
    assert_eq!(wire["success"], false);
    assert!(wire["error"].as_str().unwrap().starts_with("invalid request"));

    let out = h
        .send(json!({ "action": "read", "payload": [1, 2], "callbackId": 13 }))
        .unwrap();
    assert_eq!(out["success"], false);
}

#[test]
fn callback_id_echoed_verbatim() {
    let h = harness(&[]);
    let numeric = h
        .send(json!({ "action": "app.getPath", "payload": { "name": "app" }, "callbackId": 42 }))
        .unwrap();
    assert_eq!(numeric["callbackId"], json!(42));
    assert_eq!(numeric["data"]["path"], &*h.dir.to_string_lossy());

    let text = h
        .send(json!({ "action": "app.getPath", "callbackId": "abc-1" }))
        .unwrap();
    assert_eq!(text["callbackId"], json!("abc-1"));
}

#[test]
fn fractional_and_unsigned_callback_ids_resolve() {
    let h = harness(&[]);
    let out = h
        .bridge
        .handle_message(r#"{"action":"exists","payload":{"path":"."},"callbackId":1.5}"#)
        .unwrap();
    assert_eq!(out.to_wire()["callbackId"], json!(1.5));
    assert_eq!(out.to_wire()["success"], true);

    let out = h
        .bridge
        .handle_message(
            r#"{"action":"exists","payload":{"path":"."},"callbackId":18446744073709551615}"#,
        )
        .unwrap();
    assert_eq!(out.to_wire()["callbackId"], json!(u64::MAX));

    let out = h
        .bridge
        .handle_message(r#"{"payload":{},"callbackId":2.5}"#)
        .unwrap();
    assert_eq!(out.to_wire()["callbackId"], json!(2.5));
    assert_eq!(out.to_wire()["success"], false);
}

#[test]
fn custom_handler_registration_and_override() {
    let mut h = harness(&["greet", "read"]);
    h.bridge
        .register("greet", |p: &Payload| -> Result<Value, BridgeError> {
            Ok(json!({ "hello": p.require_str("name")? }))
        });
    let out = h
        .send(json!({ "action": "greet", "payload": { "name": "ada" }, "callbackId": 1 }))
        .unwrap();
    assert_eq!(out["data"], json!({ "hello": "ada" }));

    let missing = h.send(json!({ "action": "greet", "callbackId": 2 })).unwrap();
    assert_eq!(missing["error"], "invalid request: missing 'name' in payload");

    h.bridge
        .register("read", |_: &Payload| -> Result<Value, BridgeError> {
            Ok(json!("stubbed"))
        });
    assert_eq!(
        h.bridge.process_action("read", &Payload::new()).unwrap(),
        json!("stubbed")
    );
}

#[test]
fn custom_handler_is_capability_checked() {
    let mut h = harness(&["read"]);
    h.bridge
        .register("secret", |_: &Payload| -> Result<Value, BridgeError> {
            Ok(Value::Null)
        });
    assert_eq!(
        h.bridge.process_action("secret", &Payload::new()).unwrap_err(),
        BridgeError::PermissionDenied("secret".into())
    );
}

#[test]
fn panicking_handler_becomes_failure() {
    let mut h = harness(&[]);
    h.bridge
        .register("boom", |_: &Payload| -> Result<Value, BridgeError> {
            panic!("kaboom")
        });
    let out = h.send(json!({ "action": "boom", "callbackId": 1 })).unwrap();
    assert_eq!(out["success"], false);
    assert_eq!(out["error"], "handler for 'boom' panicked");
}

#[test]
fn process_action_refuses_async_builtins() {
    let h = harness(&[]);
    let err = h
        .bridge
        .process_action("download", &Payload::new())
        .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidRequest(_)));
}

#[test]
fn window_actions_reach_the_host() {
    let h = harness(&[]);
    h.send(json!({ "action": "app.maximize", "callbackId": 1 })).unwrap();
    assert!(h.host.is_maximized());
    h.send(json!({ "action": "window.setPosition", "payload": { "x": 5, "y": 6 }, "callbackId": 2 }))
        .unwrap();
    let pos = h
        .send(json!({ "action": "window.getPosition", "callbackId": 3 }))
        .unwrap();
    assert_eq!(pos["data"], json!({ "x": 5, "y": 6 }));
    h.send(json!({ "action": "app.quit", "callbackId": 4 })).unwrap();
    assert!(h.host.quit_requested());
}

#[test]
fn async_action_responds_through_channel() {
    let mut h = harness(&[]);
    let src = h.path("src.txt");
    std::fs::write(&src, "payload").unwrap();
    let dest = h.path("dest.txt");

    let immediate = h.send(json!({
        "action": "copy.async",
        "payload": { "src": src, "dest": dest },
        "callbackId": 77,
    }));
    assert!(immediate.is_none());

    let progress = h.next_async();
    assert_eq!(progress["type"], "progress");
    assert_eq!(progress["callbackId"], 77);
    assert_eq!(progress["data"]["copied"], 7);

    let done = h.next_async();
    assert_eq!(done["callbackId"], 77);
    assert_eq!(done["success"], true);
    assert_eq!(std::fs::read_to_string(dest).unwrap(), "payload");
}

#[test]
fn denied_async_action_resolves_immediately() {
    let h = harness(&["read"]);
    let out = h
        .send(json!({
            "action": "download",
            "payload": { "url": "http://example.invalid/", "dest": h.path("f") },
            "callbackId": 8,
        }))
        .unwrap();
    assert_eq!(out["success"], false);
    assert_eq!(h.bridge.workers().in_flight(), 0);
}

#[test]
fn async_action_without_callback_is_dropped() {
    let h = harness(&[]);
    let out = h.send(json!({ "action": "run.async", "payload": { "sh": "true" } }));
    assert!(out.is_none());
    assert_eq!(h.bridge.workers().in_flight(), 0);
}

#[cfg(unix)]
#[test]
fn duplicate_in_flight_callback_is_dropped() {
    let mut h = harness(&[]);
    let first = h.send(json!({
        "action": "run.async",
        "payload": { "sh": "sleep 10" },
        "callbackId": 5,
    }));
    assert!(first.is_none());

    let dup = h.send(json!({
        "action": "run.async",
        "payload": { "sh": "echo again" },
        "callbackId": 5,
    }));
    assert!(dup.is_none());
    assert_eq!(h.bridge.workers().in_flight(), 1);

    let cancel = h
        .send(json!({ "action": "cancel", "payload": { "callbackId": 5 }, "callbackId": "c" }))
        .unwrap();
    assert_eq!(cancel["data"], json!({ "cancelled": true }));

    // The only terminal result for id 5 belongs to the first request.
    let done = h.next_async();
    assert_eq!(done["callbackId"], 5);
    assert_eq!(done["error"], "cancelled");
    assert!(h.responses.drain().is_empty());
}

#[cfg(unix)]
#[test]
fn cancel_through_the_bridge() {
    let mut h = harness(&[]);
    let started = h.send(json!({
        "action": "run.async",
        "payload": { "sh": "sleep 10" },
        "callbackId": "long",
    }));
    assert!(started.is_none());

    let cancel = h
        .send(json!({ "action": "cancel", "payload": { "callbackId": "long" }, "callbackId": "c" }))
        .unwrap();
    assert_eq!(cancel["data"], json!({ "cancelled": true }));

    let done = h.next_async();
    assert_eq!(done["callbackId"], "long");
    assert_eq!(done["success"], false);
    assert_eq!(done["error"], "cancelled");
}

#[test]
fn outbound_helpers() {
    let h = harness(&[]);
    let out = h
        .bridge
        .handle_message(r#"{"action":"exists","payload":{"path":"."},"callbackId":1}"#)
        .unwrap();
    assert!(matches!(out, Outbound::Resolve { .. }));
    assert!(out.is_terminal());
}
