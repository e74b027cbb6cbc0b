//! `download`: fetch a URL to a file with byte-level progress.

use std::path::{Path, PathBuf};
use std::time::Duration;

use aegis_common::{BridgeError, Payload};
use futures_util::StreamExt;
use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;

use super::progress::percent;
use super::ProgressReporter;

/// Emits `{downloaded, total, percent}` per chunk and resolves with
/// `{success, path, size}`. A partial file is removed on failure.
pub(super) async fn download(
    client: &reqwest::Client,
    read_timeout: Duration,
    payload: &Payload,
    reporter: &mut ProgressReporter,
) -> Result<Value, BridgeError> {
    let url = payload.require_str("url")?;
    let dest = PathBuf::from(payload.require_str("dest")?);

    let parsed = reqwest::Url::parse(url)
        .map_err(|e| BridgeError::InvalidRequest(format!("invalid url '{url}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BridgeError::InvalidRequest(format!(
            "unsupported url scheme '{}'",
            parsed.scheme()
        )));
    }

    tracing::info!(url = %parsed, dest = %dest.display(), "starting download");
    let result = fetch(client, read_timeout, parsed, &dest, reporter).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&dest).await;
    }
    result
}

async fn fetch(
    client: &reqwest::Client,
    read_timeout: Duration,
    url: reqwest::Url,
    dest: &Path,
    reporter: &mut ProgressReporter,
) -> Result<Value, BridgeError> {
    let timed_out = || BridgeError::failure(format!("download timed out after {}s", read_timeout.as_secs()));

    let response = tokio::time::timeout(read_timeout, client.get(url).send())
        .await
        .map_err(|_| timed_out())?
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| BridgeError::failure(format!("download failed: {e}")))?;
    let total = response.content_length();

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(dest).await?;

    let mut body = response.bytes_stream();
    let mut downloaded: u64 = 0;
    loop {
        let next = tokio::time::timeout(read_timeout, body.next())
            .await
            .map_err(|_| timed_out())?;
        let Some(chunk) = next else { break };
        let chunk = chunk.map_err(|e| BridgeError::failure(format!("download failed: {e}")))?;

        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        reporter
            .emit(
                downloaded,
                json!({
                    "downloaded": downloaded,
                    "total": total.unwrap_or(0),
                    "percent": percent(downloaded, total),
                }),
            )
            .await;
    }
    file.flush().await?;

    tracing::info!(size = downloaded, dest = %dest.display(), "download finished");
    Ok(json!({
        "success": true,
        "path": dest.to_string_lossy(),
        "size": downloaded,
    }))
}
