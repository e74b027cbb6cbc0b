//! `copy.async`: copy with progress, by bytes for a file and by files for
//! a directory tree.

use std::path::{Path, PathBuf};

use aegis_common::{BridgeError, Payload};
use serde_json::{json, Value};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::progress::percent;
use crate::handlers::fs::{ensure_distinct, inside_dir};
use super::ProgressReporter;

const CHUNK_SIZE: usize = 64 * 1024;

pub(super) async fn copy(
    payload: &Payload,
    reporter: &mut ProgressReporter,
) -> Result<Value, BridgeError> {
    let src = PathBuf::from(payload.require_str("src")?);
    let dest = PathBuf::from(payload.require_str("dest")?);

    let meta = fs::metadata(&src).await?;
    if meta.is_dir() {
        copy_tree(&src, &dest, reporter).await
    } else {
        let dest = inside_dir(&src, dest);
        ensure_distinct(&src, &dest)?;
        copy_file(&src, &dest, meta.len(), reporter).await
    }
}

/// Progress `{copied, total, percent}` in bytes.
async fn copy_file(
    src: &Path,
    dest: &Path,
    total: u64,
    reporter: &mut ProgressReporter,
) -> Result<Value, BridgeError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let mut reader = fs::File::open(src).await?;
    let mut writer = fs::File::create(dest).await?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut copied: u64 = 0;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
        copied += n as u64;
        reporter
            .emit(
                copied,
                json!({
                    "copied": copied,
                    "total": total,
                    "percent": percent(copied, Some(total)),
                }),
            )
            .await;
    }
    writer.flush().await?;

    let perms = fs::metadata(src).await?.permissions();
    fs::set_permissions(dest, perms).await?;

    Ok(json!({ "success": true, "dest": dest.to_string_lossy(), "size": copied }))
}

/// Progress `{copied, total, percent, current}` in files.
async fn copy_tree(
    src: &Path,
    dest: &Path,
    reporter: &mut ProgressReporter,
) -> Result<Value, BridgeError> {
    if fs::try_exists(dest).await? {
        return Err(BridgeError::failure(format!(
            "destination already exists: {}",
            dest.display()
        )));
    }

    let (dirs, files) = walk(src).await?;
    fs::create_dir_all(dest).await?;
    for dir in &dirs {
        fs::create_dir_all(dest.join(dir)).await?;
    }

    let total = files.len() as u64;
    for (i, rel) in files.iter().enumerate() {
        fs::copy(src.join(rel), dest.join(rel)).await?;
        let copied = i as u64 + 1;
        reporter
            .emit(
                copied,
                json!({
                    "copied": copied,
                    "total": total,
                    "percent": percent(copied, Some(total)),
                    "current": rel.to_string_lossy(),
                }),
            )
            .await;
    }

    Ok(json!({ "success": true, "dest": dest.to_string_lossy(), "files": total }))
}

/// Relative paths of every directory and file below `root`, sorted.
async fn walk(root: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), BridgeError> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    let mut stack = vec![PathBuf::new()];

    while let Some(rel) = stack.pop() {
        let mut entries = fs::read_dir(root.join(&rel)).await?;
        while let Some(entry) = entries.next_entry().await? {
            let child = rel.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                dirs.push(child.clone());
                stack.push(child);
            } else {
                files.push(child);
            }
        }
    }

    dirs.sort();
    files.sort();
    Ok((dirs, files))
}
