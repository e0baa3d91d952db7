//! Error types for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Errors that can occur during copy operations.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Failed to create target directory.
    #[error("Failed to create directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to open a file for reading or writing.
    #[error("Failed to open {}: {io_error}", path.display())]
    OpenError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to read a chunk from the source.
    #[error("Failed to read {}: {io_error}", path.display())]
    ReadError {
        /// Source file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to write a chunk to the target.
    #[error("Failed to write {}: {io_error}", path.display())]
    WriteError {
        /// Target file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to get file metadata.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Source and target are the same file.
    #[error("Source and target are the same file: {}", path.display())]
    SameFile {
        /// The shared path.
        path: PathBuf,
    },

    /// A copy was requested with a zero-byte buffer.
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),
}
