//! Project content served through the `aegis://` custom protocol.
//!
//! A request for `aegis://localhost/css/app.css` resolves to
//! `{project_dir}/css/app.css`. The bare root resolves to the entry page.

use std::path::{Path, PathBuf};

/// Scheme registered with the web view.
pub const SCHEME: &str = "aegis";

/// Origin page script sees for project content.
pub const ORIGIN: &str = "aegis://localhost";

/// Serves files from the project directory.
pub struct ContentProvider {
    base_dir: PathBuf,
    /// Entry page, relative to `base_dir`.
    index: String,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>, index: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            index: index.into(),
        }
    }

    /// URL of the entry page.
    pub fn entry_url(&self) -> String {
        format!("{ORIGIN}/{}", self.index.trim_start_matches('/'))
    }

    /// Resolve a request path to a MIME type and file contents.
    ///
    /// The path may be percent-encoded. Anything that escapes the project
    /// directory (`..`, absolute paths, symlinks) resolves to `None`.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Vec<u8>)> {
        let decoded = urlencoding::decode(path).ok()?;
        let clean = match decoded.trim_start_matches('/') {
            "" => self.index.trim_start_matches('/'),
            rest => rest,
        };

        let file_path = self.base_dir.join(clean);

        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&canonical_file), data))
    }

    /// Map a full `aegis://` request URI to the path part [`resolve`] takes.
    ///
    /// WebView2 rewrites custom schemes to `http://aegis.localhost/...`, so
    /// both spellings are accepted. The query and fragment are dropped.
    ///
    /// [`resolve`]: ContentProvider::resolve
    pub fn request_path(uri: &str) -> &str {
        let rest = uri
            .strip_prefix("aegis://localhost")
            .or_else(|| uri.strip_prefix("http://aegis.localhost"))
            .or_else(|| uri.strip_prefix("https://aegis.localhost"))
            .or_else(|| uri.strip_prefix("aegis://"))
            .unwrap_or("");
        let end = rest.find(['?', '#']).unwrap_or(rest.len());
        &rest[..end]
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}
