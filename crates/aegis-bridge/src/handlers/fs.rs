//! Filesystem actions: read, write, exists, mkdir, remove, copy, move.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use aegis_common::{BridgeError, Payload};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

/// `path` joined with the optional `file` component. `path` defaults to
/// the working directory.
pub(crate) fn target_path(payload: &Payload) -> PathBuf {
    let base = PathBuf::from(payload.str("path").unwrap_or("."));
    match payload.str("file") {
        Some(file) if !file.is_empty() => base.join(file),
        _ => base,
    }
}

/// `{content, path}` for a file (text or base64), `{entries, path}` for a
/// directory.
pub fn read(payload: &Payload) -> Result<Value, BridgeError> {
    let path = target_path(payload);

    let shown = path.to_string_lossy().into_owned();

    if path.is_dir() {
        return Ok(json!({ "entries": list_dir(&path)?, "path": shown }));
    }

    if payload.bool_or("binary", false) {
        let bytes = fs::read(&path)?;
        return Ok(json!({ "content": BASE64.encode(bytes), "path": shown }));
    }

    let encoding = payload.str("encoding").unwrap_or("utf-8");
    if !matches!(encoding.to_ascii_lowercase().as_str(), "utf-8" | "utf8") {
        return Err(BridgeError::InvalidRequest(format!(
            "unsupported encoding '{encoding}'"
        )));
    }

    let text = fs::read_to_string(&path)?;
    Ok(json!({ "content": text, "path": shown }))
}

fn list_dir(path: &Path) -> Result<Vec<Value>, BridgeError> {
    let mut entries: Vec<Value> = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // Entries that vanish or deny stat still get listed, with zeros.
        let value = match entry.path().metadata() {
            Ok(meta) => {
                let modified = meta
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0);
                let size = if meta.is_file() { meta.len() } else { 0 };
                json!({
                    "name": name,
                    "isDirectory": meta.is_dir(),
                    "isFile": meta.is_file(),
                    "size": size,
                    "modified": modified,
                })
            }
            Err(_) => json!({
                "name": name,
                "isDirectory": false,
                "isFile": false,
                "size": 0,
                "modified": 0.0,
            }),
        };
        entries.push(value);
    }
    entries.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
    Ok(entries)
}

/// Write text or base64-decoded bytes, creating parent directories.
pub fn write(payload: &Payload) -> Result<Value, BridgeError> {
    let path = target_path(payload);
    let content = payload.str("content").unwrap_or("");

    let bytes = if payload.bool_or("binary", false) {
        BASE64
            .decode(content)
            .map_err(|e| BridgeError::InvalidRequest(format!("content is not valid base64: {e}")))?
    } else {
        content.as_bytes().to_vec()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if payload.bool_or("append", false) {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        file.write_all(&bytes)?;
    } else {
        fs::write(&path, &bytes)?;
    }

    Ok(json!({ "success": true, "path": path.to_string_lossy() }))
}

pub fn exists(payload: &Payload) -> Result<Value, BridgeError> {
    payload.require_str("path")?;
    let path = target_path(payload);
    Ok(json!({
        "exists": path.exists(),
        "isFile": path.is_file(),
        "isDirectory": path.is_dir(),
    }))
}

/// Create a directory; parents are created unless `recursive` is false.
pub fn mkdir(payload: &Payload) -> Result<Value, BridgeError> {
    let path = PathBuf::from(payload.require_str("path")?);
    if payload.bool_or("recursive", true) {
        fs::create_dir_all(&path)?;
    } else {
        fs::create_dir(&path)?;
    }
    Ok(json!({ "success": true, "path": path.to_string_lossy() }))
}

pub fn remove(payload: &Payload) -> Result<Value, BridgeError> {
    let path = PathBuf::from(payload.require_str("path")?);
    let meta = fs::symlink_metadata(&path)?;

    if meta.is_dir() {
        if payload.bool_or("recursive", false) {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_dir(&path)?;
        }
    } else {
        fs::remove_file(&path)?;
    }
    Ok(json!({ "success": true }))
}

/// Copy a file, or a whole tree when `src` is a directory. A file copied
/// onto an existing directory lands inside it.
pub fn copy(payload: &Payload) -> Result<Value, BridgeError> {
    let src = PathBuf::from(payload.require_str("src")?);
    let dest = PathBuf::from(payload.require_str("dest")?);

    let dest = if src.is_dir() {
        if dest.exists() {
            return Err(BridgeError::failure(format!(
                "destination already exists: {}",
                dest.display()
            )));
        }
        copy_tree(&src, &dest)?;
        dest
    } else {
        let dest = inside_dir(&src, dest);
        ensure_distinct(&src, &dest)?;
        fs::copy(&src, &dest)?;
        dest
    };
    Ok(json!({ "success": true, "dest": dest.to_string_lossy() }))
}

/// `dest/<name of src>` when `dest` is an existing directory.
pub(crate) fn inside_dir(src: &Path, dest: PathBuf) -> PathBuf {
    match src.file_name() {
        Some(name) if dest.is_dir() => dest.join(name),
        _ => dest,
    }
}

/// Fail when `src` and `dest` are the same file, hard links included.
/// Opening `dest` for writing would otherwise truncate `src`.
pub(crate) fn ensure_distinct(src: &Path, dest: &Path) -> Result<(), BridgeError> {
    let (Ok(a), Ok(b)) = (fs::metadata(src), fs::metadata(dest)) else {
        return Ok(());
    };
    #[cfg(unix)]
    let same = {
        use std::os::unix::fs::MetadataExt;
        a.dev() == b.dev() && a.ino() == b.ino()
    };
    #[cfg(not(unix))]
    let same = {
        let _ = (a, b);
        matches!(
            (fs::canonicalize(src), fs::canonicalize(dest)),
            (Ok(x), Ok(y)) if x == y
        )
    };
    if same {
        return Err(BridgeError::failure(format!(
            "'{}' and '{}' are the same file",
            src.display(),
            dest.display()
        )));
    }
    Ok(())
}

pub(crate) fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Rename, falling back to copy + delete across filesystems. Moving onto
/// an existing directory moves `src` inside it.
pub fn move_path(payload: &Payload) -> Result<Value, BridgeError> {
    let src = PathBuf::from(payload.require_str("src")?);
    let requested = PathBuf::from(payload.require_str("dest")?);

    let dest = inside_dir(&src, requested.clone());
    if dest != requested && dest.exists() {
        return Err(BridgeError::failure(format!(
            "destination already exists: {}",
            dest.display()
        )));
    }

    if let Err(rename_err) = fs::rename(&src, &dest) {
        if !src.exists() {
            return Err(rename_err.into());
        }
        tracing::debug!(error = %rename_err, "rename failed, copying instead");
        if src.is_dir() {
            copy_tree(&src, &dest)?;
            fs::remove_dir_all(&src)?;
        } else {
            ensure_distinct(&src, &dest)?;
            fs::copy(&src, &dest)?;
            fs::remove_file(&src)?;
        }
    }
    Ok(json!({ "success": true, "dest": dest.to_string_lossy() }))
}
