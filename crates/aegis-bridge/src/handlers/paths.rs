//! `app.getPath`: well-known directories by name.

use std::path::{Path, PathBuf};
use std::process::Command;

use aegis_common::{BridgeError, Payload};
use serde_json::{json, Value};

/// Names page script may ask for. Anything else resolves to `home`.
pub const KNOWN_PATHS: &[&str] = &[
    "home",
    "desktop",
    "documents",
    "downloads",
    "music",
    "pictures",
    "videos",
    "templates",
    "publicshare",
    "temp",
    "app",
    "root",
];

pub fn get_path(payload: &Payload, app_dir: &Path) -> Result<Value, BridgeError> {
    let name = payload.str("name").unwrap_or("home");
    let path = resolve(name, app_dir);
    Ok(json!({ "path": path.to_string_lossy() }))
}

pub(crate) fn resolve(name: &str, app_dir: &Path) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    match name {
        "temp" => std::env::temp_dir(),
        "app" => app_dir.to_path_buf(),
        "root" => root_dir(),
        "desktop" | "documents" | "downloads" | "music" | "pictures" | "videos"
        | "templates" | "publicshare" => {
            user_dir(name).unwrap_or_else(|| home().join(fallback_folder(name)))
        }
        _ => home(),
    }
}

#[cfg(windows)]
fn root_dir() -> PathBuf {
    PathBuf::from(std::env::var("SystemDrive").unwrap_or_else(|_| "C:".into()) + "\\")
}

#[cfg(not(windows))]
fn root_dir() -> PathBuf {
    PathBuf::from("/")
}

/// Localized user folder: `xdg-user-dir` first on Linux, then the
/// platform lookup.
fn user_dir(name: &str) -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        if let Some(path) = xdg_user_dir(name) {
            return Some(path);
        }
    }
    match name {
        "desktop" => dirs::desktop_dir(),
        "documents" => dirs::document_dir(),
        "downloads" => dirs::download_dir(),
        "music" => dirs::audio_dir(),
        "pictures" => dirs::picture_dir(),
        "videos" => dirs::video_dir(),
        "templates" => dirs::template_dir(),
        "publicshare" => dirs::public_dir(),
        _ => None,
    }
}

fn xdg_user_dir(name: &str) -> Option<PathBuf> {
    let key = match name {
        "desktop" => "DESKTOP",
        "documents" => "DOCUMENTS",
        "downloads" => "DOWNLOAD",
        "music" => "MUSIC",
        "pictures" => "PICTURES",
        "videos" => "VIDEOS",
        "templates" => "TEMPLATES",
        "publicshare" => "PUBLICSHARE",
        _ => return None,
    };
    let output = Command::new("xdg-user-dir").arg(key).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8(output.stdout).ok()?;
    let path = path.trim();
    // xdg-user-dir prints $HOME for folders it does not know about.
    let home = dirs::home_dir();
    if path.is_empty() || home.as_deref() == Some(Path::new(path)) {
        return None;
    }
    Some(PathBuf::from(path))
}

fn fallback_folder(name: &str) -> &'static str {
    match name {
        "desktop" => "Desktop",
        "documents" => "Documents",
        "downloads" => "Downloads",
        "music" => "Music",
        "pictures" => "Pictures",
        "videos" => "Videos",
        "templates" => "Templates",
        _ => "Public",
    }
}
