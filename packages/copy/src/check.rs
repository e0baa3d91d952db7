//! Existence checks used before copying.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::CopyError;

/// Check whether `path` exists and is a directory.
///
/// Symlinks are followed, so a link to a directory counts.
#[must_use]
pub fn dir_exists(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_dir())
}

/// Check whether anything exists at `path`.
///
/// Succeeds for files, directories, and other entries alike.
#[must_use]
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Get the size of a file in bytes.
///
/// # Errors
///
/// * If the file metadata cannot be read
pub fn file_size(path: &Path) -> Result<u64, CopyError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| CopyError::MetadataError {
            path: path.to_path_buf(),
            io_error: e,
        })
}
