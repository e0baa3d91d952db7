//! Chunked file copying implementation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::check::file_size;
use crate::error::CopyError;
use crate::progress::CopyProgress;

/// Buffer size used when the caller has no preference.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Result of a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyResult {
    /// The file was copied successfully.
    Created {
        /// Number of bytes written to the target.
        bytes_copied: u64,
    },
    /// Target already exists, operation skipped.
    Exists,
    /// Source does not exist, operation skipped.
    SourceNotFound,
    /// The cancel flag was raised mid-copy. The partial target was removed.
    Cancelled {
        /// Number of bytes written before the copy stopped.
        bytes_copied: u64,
    },
}

/// Copy a single file in fixed-size chunks.
///
/// Only copies if target doesn't exist. `cancel` is checked before writing
/// each chunk, never once the source is exhausted. `on_progress` is called
/// once up front and after every chunk.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `target` - Target file path
/// * `chunk_size` - Size of the copy buffer in bytes
/// * `cancel` - Flag that stops the copy when set
/// * `on_progress` - Callback for progress updates
///
/// # Errors
///
/// * If `chunk_size` is zero
/// * If the target directory cannot be created
/// * If reading the source or writing the target fails
pub fn copy_file_chunked<F>(
    source: &Path,
    target: &Path,
    chunk_size: usize,
    cancel: &AtomicBool,
    mut on_progress: F,
) -> Result<CopyResult, CopyError>
where
    F: FnMut(&CopyProgress),
{
    log::debug!("Copying file: {} -> {}", source.display(), target.display());

    if chunk_size == 0 {
        return Err(CopyError::InvalidChunkSize(chunk_size));
    }

    if !source.exists() {
        log::debug!("Source does not exist");
        return Ok(CopyResult::SourceNotFound);
    }

    if target.exists() {
        log::debug!("Target already exists");
        return Ok(CopyResult::Exists);
    }

    stream_copy(source, target, chunk_size, cancel, &mut on_progress)
}

/// Copy a single file in fixed-size chunks, overwriting the target if it exists.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `target` - Target file path
/// * `chunk_size` - Size of the copy buffer in bytes
/// * `cancel` - Flag that stops the copy when set
/// * `on_progress` - Callback for progress updates
///
/// # Errors
///
/// * If `chunk_size` is zero
/// * If the target directory cannot be created
/// * If reading the source or writing the target fails
/// * If the source and target are the same file
pub fn overwrite_file_chunked<F>(
    source: &Path,
    target: &Path,
    chunk_size: usize,
    cancel: &AtomicBool,
    mut on_progress: F,
) -> Result<CopyResult, CopyError>
where
    F: FnMut(&CopyProgress),
{
    log::debug!(
        "Overwriting file: {} -> {}",
        source.display(),
        target.display()
    );

    if chunk_size == 0 {
        return Err(CopyError::InvalidChunkSize(chunk_size));
    }

    if !source.exists() {
        log::debug!("Source does not exist");
        return Ok(CopyResult::SourceNotFound);
    }

    // Truncating the target would empty the source before the first read
    if is_same_file(source, target) {
        log::debug!("Source and target are the same file");
        return Err(CopyError::SameFile {
            path: target.to_path_buf(),
        });
    }

    stream_copy(source, target, chunk_size, cancel, &mut on_progress)
}

/// Whether `a` and `b` resolve to the same existing file.
///
/// A path that cannot be canonicalized does not exist, so it cannot alias
/// the other one.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Open both ends, pump the bytes, and clean up the target unless the copy finished.
fn stream_copy<F>(
    source: &Path,
    target: &Path,
    chunk_size: usize,
    cancel: &AtomicBool,
    on_progress: &mut F,
) -> Result<CopyResult, CopyError>
where
    F: FnMut(&CopyProgress),
{
    let bytes_total = file_size(source)?;

    // Ensure parent directory exists
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CopyError::CreateDirError {
            path: parent.to_path_buf(),
            io_error: e,
        })?;
    }

    let mut reader = File::open(source).map_err(|e| CopyError::OpenError {
        path: source.to_path_buf(),
        io_error: e,
    })?;
    let mut writer = File::create(target).map_err(|e| CopyError::OpenError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    let outcome = pump(
        &mut reader,
        &mut writer,
        source,
        target,
        chunk_size,
        bytes_total,
        cancel,
        on_progress,
    );
    drop(writer);

    match outcome {
        Ok(CopyResult::Created { bytes_copied }) => {
            log::debug!("Copied {bytes_copied} bytes to {}", target.display());
            Ok(CopyResult::Created { bytes_copied })
        }
        Ok(other) => {
            log::debug!("Copy stopped early: {other:?}");
            remove_partial(target);
            Ok(other)
        }
        Err(e) => {
            remove_partial(target);
            Err(e)
        }
    }
}

/// Move bytes from `reader` to `writer` one chunk at a time.
#[allow(clippy::too_many_arguments)]
fn pump<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    source: &Path,
    target: &Path,
    chunk_size: usize,
    bytes_total: u64,
    cancel: &AtomicBool,
    on_progress: &mut F,
) -> Result<CopyResult, CopyError>
where
    R: Read,
    W: Write,
    F: FnMut(&CopyProgress),
{
    let label = Some(source.to_string_lossy().to_string());
    let mut buffer = vec![0u8; chunk_size];
    let mut bytes_copied: u64 = 0;

    // Report starting
    on_progress(&CopyProgress::new(bytes_total, 0, label.clone()));

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(CopyError::ReadError {
                    path: source.to_path_buf(),
                    io_error: e,
                });
            }
        };

        // Cancel only while unread data remains
        if cancel.load(Ordering::SeqCst) {
            return Ok(CopyResult::Cancelled { bytes_copied });
        }

        writer
            .write_all(&buffer[..read])
            .map_err(|e| CopyError::WriteError {
                path: target.to_path_buf(),
                io_error: e,
            })?;

        bytes_copied += read as u64;
        log::trace!("Copied chunk of {read} bytes ({bytes_copied}/{bytes_total})");

        on_progress(&CopyProgress::new(bytes_total, bytes_copied, label.clone()));
    }

    writer.flush().map_err(|e| CopyError::WriteError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    Ok(CopyResult::Created { bytes_copied })
}

/// Remove a partially written target. Failure is logged, not returned.
fn remove_partial(target: &Path) {
    if let Err(e) = fs::remove_file(target) {
        if e.kind() != io::ErrorKind::NotFound {
            log::warn!(
                "Failed to remove partial file {}: {e}",
                target.display()
            );
        }
    }
}
