//! Artifact storage for uploaded files.
//!
//! The chain itself is memory-only; the uploaded bytes are the one thing
//! written to disk, and that write must succeed before a block is appended.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ensure that the given directory exists (create recursively if needed).
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Reduce a client-supplied file name to its final path component.
///
/// Uploads must never escape the upload directory; empty or dot-only names
/// fall back to a fixed placeholder.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if base.is_empty() || base == "." || base == ".." {
        "unnamed".to_string()
    } else {
        base.to_string()
    }
}

/// Write artifact bytes as `<dir>/<sanitized name>` and return the path.
/// An existing artifact with the same name is overwritten.
pub fn store_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(sanitize_file_name(file_name));
    fs::write(&path, bytes)?;
    Ok(path)
}
