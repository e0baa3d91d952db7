//! Chunked file copying with progress and cancellation.
//!
//! This crate provides the file-level primitives the installer is built on:
//!
//! * Existence checks for directories and files
//! * Buffered copying in fixed-size chunks
//! * Progress callbacks after every chunk for UI integration
//! * Cancellation through a shared flag, with the partial target removed
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::atomic::AtomicBool;
//! use pbp_installer_copy::{CopyProgress, DEFAULT_CHUNK_SIZE, copy_file_chunked};
//!
//! let cancel = AtomicBool::new(false);
//! copy_file_chunked(source, target, DEFAULT_CHUNK_SIZE, &cancel, |progress: &CopyProgress| {
//!     println!("{:.0}%", progress.percentage());
//! })?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod check;
mod copy;
mod error;
mod progress;

pub use check::{dir_exists, file_exists, file_size};
pub use copy::{CopyResult, DEFAULT_CHUNK_SIZE, copy_file_chunked, overwrite_file_chunked};
pub use error::CopyError;
pub use progress::CopyProgress;
