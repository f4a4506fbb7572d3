use crate::error::MergeError;
use std::path::{Path, PathBuf};

/// Helper to convert a Path to &str, returning an error if not valid UTF-8.
pub fn path_to_str(path: &Path) -> Result<&str, MergeError> {
    path.to_str()
        .ok_or_else(|| MergeError::NonUtf8Path(path.to_path_buf()))
}

/// Absolute form of `path` for display, falling back to the path as given.
pub fn display_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// File name of `path` for display.
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
