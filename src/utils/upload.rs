//! File intake for employee attachments. Uploads land under the public root
//! in a per-kind subdirectory, prefixed with the millisecond upload timestamp
//! so repeated uploads of the same filename never collide.

use chrono::Utc;
use log::warn;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Photo,
    Document,
}

impl AttachmentKind {
    pub fn subdir(self) -> &'static str {
        match self {
            AttachmentKind::Photo => "uploads/photos",
            AttachmentKind::Document => "uploads/documents",
        }
    }
}

/// Root directory served as static content; attachments are stored beneath it
/// and referenced by relative path.
pub fn public_root() -> PathBuf {
    std::env::var("PUBLIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./public"))
}

/// Relative storage path for an upload. Only the final component of the
/// client-supplied filename is used; directory components are stripped.
pub fn relative_path(kind: AttachmentKind, timestamp_millis: i64, original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload");
    format!("{}/{}_{}", kind.subdir(), timestamp_millis, base)
}

/// Persists one attachment slot. An absent or zero-size upload yields no path
/// and the corresponding column stays unset.
pub async fn store(
    root: &Path,
    kind: AttachmentKind,
    original_name: &str,
    data: &[u8],
) -> io::Result<Option<String>> {
    if data.is_empty() {
        return Ok(None);
    }
    let relative = relative_path(kind, Utc::now().timestamp_millis(), original_name);
    let full = root.join(&relative);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&full, data).await?;
    Ok(Some(relative))
}

/// Compensating delete for a file written before a failed insert. Failure to
/// remove is logged, not propagated; the request has already failed.
pub async fn remove(root: &Path, relative: &str) {
    if let Err(err) = fs::remove_file(root.join(relative)).await {
        warn!("failed to remove orphaned upload {}: {}", relative, err);
    }
}
