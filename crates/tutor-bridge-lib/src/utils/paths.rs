// Path Utilities
// Action-root-relative resolution and file read helpers

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BridgeError, BridgeResult};

/// Resolve a possibly relative path against the action root. Absolute paths
/// pass through untouched.
pub fn resolve_path(action_root: &Path, file_path: &str) -> PathBuf {
    let path = Path::new(file_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        action_root.join(path)
    }
}

/// Read a UTF-8 text file, mapping a missing file to `NotFound`.
pub fn read_text_file(action_root: &Path, file_path: &str) -> BridgeResult<String> {
    let path = resolve_path(action_root, file_path);
    std::fs::read_to_string(&path).map_err(|err| not_found_or_io(err, &path))
}

/// Read a file's raw bytes, for multipart uploads.
pub fn read_binary_file(action_root: &Path, file_path: &str) -> BridgeResult<Vec<u8>> {
    let path = resolve_path(action_root, file_path);
    std::fs::read(&path).map_err(|err| not_found_or_io(err, &path))
}

fn not_found_or_io(err: std::io::Error, path: &Path) -> BridgeError {
    match err.kind() {
        ErrorKind::NotFound => BridgeError::NotFound {
            message: format!("{} does not exist", path.display()),
        },
        _ => BridgeError::Io(err),
    }
}

/// MIME type from the file extension. Markdown goes up as plain text so the
/// ingestion service indexes it verbatim.
pub fn guess_mime_type(file_path: &str) -> &'static str {
    let ext = file_path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "md" | "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
