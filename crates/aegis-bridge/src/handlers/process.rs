//! `run`: execute a shell command and collect its output.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use aegis_common::{BridgeError, Payload};
use serde_json::{json, Value};

/// Poll interval while waiting on a command with a deadline.
const WAIT_POLL: Duration = Duration::from_millis(10);

/// Platform shell invocation of `script`.
pub(crate) fn shell_command(script: &str) -> Command {
    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", script]);
        c
    };
    #[cfg(not(windows))]
    let mut cmd = {
        let mut c = Command::new("sh");
        c.args(["-c", script]);
        c
    };
    cmd.stdin(Stdio::null());
    cmd
}

/// Parsed `run` / `run.async` arguments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunRequest {
    pub script: String,
    pub cwd: Option<String>,
    pub timeout: Option<Duration>,
    pub check: bool,
}

impl RunRequest {
    pub fn from_payload(payload: &Payload) -> Result<Self, BridgeError> {
        if payload.contains("py") && !payload.contains("sh") {
            return Err(BridgeError::failure(
                "inline code evaluation is not supported; use 'sh'",
            ));
        }
        let script = payload
            .str("sh")
            .ok_or_else(|| BridgeError::InvalidRequest("no 'sh' command specified".into()))?
            .to_string();
        let timeout = match payload.f64("timeout") {
            Some(secs) if secs > 0.0 && secs.is_finite() => Some(Duration::from_secs_f64(secs)),
            Some(_) => {
                return Err(BridgeError::InvalidRequest(
                    "timeout must be a positive number of seconds".into(),
                ))
            }
            None => None,
        };
        Ok(Self {
            script,
            cwd: payload.str("cwd").map(str::to_string),
            timeout,
            check: payload.bool_or("check", false),
        })
    }

    pub fn command(&self) -> Command {
        let mut cmd = shell_command(&self.script);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

/// Build the result object, or a failure when `check` is set and the
/// command exited non-zero.
pub(crate) fn run_result(
    req: &RunRequest,
    output: String,
    error: String,
    exit_code: i32,
) -> Result<Value, BridgeError> {
    if req.check && exit_code != 0 {
        let detail = error.trim();
        return Err(BridgeError::failure(if detail.is_empty() {
            format!("command exited with code {exit_code}")
        } else {
            format!("command exited with code {exit_code}: {detail}")
        }));
    }
    Ok(json!({ "output": output, "error": error, "exitCode": exit_code }))
}

pub fn run(payload: &Payload) -> Result<Value, BridgeError> {
    let req = RunRequest::from_payload(payload)?;
    tracing::info!(command = %req.script, "running shell command");

    let child = req
        .command()
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| BridgeError::failure(format!("failed to start command: {e}")))?;

    let (stdout, stderr, code) = match req.timeout {
        None => {
            let out = child.wait_with_output()?;
            (
                String::from_utf8_lossy(&out.stdout).into_owned(),
                String::from_utf8_lossy(&out.stderr).into_owned(),
                out.status.code().unwrap_or(-1),
            )
        }
        Some(limit) => wait_with_deadline(child, limit)?,
    };

    run_result(&req, stdout, stderr, code)
}

fn wait_with_deadline(
    mut child: Child,
    limit: Duration,
) -> Result<(String, String, i32), BridgeError> {
    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);
    let deadline = Instant::now() + limit;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            tracing::warn!(timeout = ?limit, "shell command timed out");
            return Err(BridgeError::failure(format!(
                "Command timed out after {:.1}s",
                limit.as_secs_f64()
            )));
        }
        thread::sleep(WAIT_POLL);
    };

    let join = |h: Option<thread::JoinHandle<String>>| {
        h.and_then(|h| h.join().ok()).unwrap_or_default()
    };
    Ok((join(stdout), join(stderr), status.code().unwrap_or(-1)))
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}
