//! `run.async`: shell command with line-by-line output streaming.

use std::process::Stdio;

use aegis_common::{BridgeError, Payload};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::ProgressReporter;
use crate::handlers::process::{run_result, RunRequest};

/// Emits `{type: "output", stream, line, lines}` per line, then resolves
/// like `run`. The child is killed if the task is cancelled or times out.
pub(super) async fn run(
    payload: &Payload,
    reporter: &mut ProgressReporter,
) -> Result<Value, BridgeError> {
    let req = RunRequest::from_payload(payload)?;
    tracing::info!(command = %req.script, "running shell command (streaming)");

    let mut cmd = Command::from(req.command());
    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    let mut child = cmd
        .spawn()
        .map_err(|e| BridgeError::failure(format!("failed to start command: {e}")))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| BridgeError::failure("stdout not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| BridgeError::failure("stderr not captured"))?;

    let mut output = String::new();
    let mut error = String::new();

    let stream = async {
        let mut out_reader = BufReader::new(stdout);
        let mut err_reader = BufReader::new(stderr);
        // Partial reads stay in these buffers when the other branch wins.
        let (mut out_buf, mut err_buf) = (Vec::new(), Vec::new());
        let (mut out_done, mut err_done) = (false, false);
        let mut lines: u64 = 0;

        while !(out_done && err_done) {
            let (line, from_stderr) = tokio::select! {
                n = out_reader.read_until(b'\n', &mut out_buf), if !out_done => {
                    if n? == 0 {
                        out_done = true;
                        continue;
                    }
                    (take_line(&mut out_buf), false)
                },
                n = err_reader.read_until(b'\n', &mut err_buf), if !err_done => {
                    if n? == 0 {
                        err_done = true;
                        continue;
                    }
                    (take_line(&mut err_buf), true)
                },
                else => break,
            };

            let sink = if from_stderr { &mut error } else { &mut output };
            sink.push_str(&line);
            sink.push('\n');
            lines += 1;

            reporter
                .emit(
                    lines,
                    json!({
                        "type": "output",
                        "stream": if from_stderr { "stderr" } else { "stdout" },
                        "line": line,
                        "lines": lines,
                    }),
                )
                .await;
        }

        let status = child.wait().await?;
        Ok::<_, BridgeError>(status)
    };

    let status = match req.timeout {
        Some(limit) => tokio::time::timeout(limit, stream).await.map_err(|_| {
            tracing::warn!(timeout = ?limit, "streaming command timed out");
            BridgeError::failure(format!(
                "Command timed out after {:.1}s",
                limit.as_secs_f64()
            ))
        })??,
        None => stream.await?,
    };

    run_result(&req, output, error, status.code().unwrap_or(-1))
}

/// One line of child output without its line ending. Invalid UTF-8 is
/// replaced, as `run` does for the whole output.
fn take_line(buf: &mut Vec<u8>) -> String {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    let line = String::from_utf8_lossy(buf).into_owned();
    buf.clear();
    line
}
