//! Progress reporting for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Progress information for a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyProgress {
    /// Total number of bytes to copy.
    pub bytes_total: u64,
    /// Number of bytes copied so far.
    pub bytes_copied: u64,
    /// File being copied (if any).
    pub current_file: Option<String>,
}

impl CopyProgress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(bytes_total: u64, bytes_copied: u64, current_file: Option<String>) -> Self {
        Self {
            bytes_total,
            bytes_copied,
            current_file,
        }
    }

    /// Calculate progress as a percentage (0.0 to 100.0).
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.bytes_total == 0 {
            100.0
        } else {
            (self.bytes_copied as f64 / self.bytes_total as f64) * 100.0
        }
    }

    /// Whole-number percentage, clamped to 100.
    ///
    /// The source can grow while it is being read, so `bytes_copied` may
    /// overtake `bytes_total`.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 || self.bytes_copied >= self.bytes_total {
            100
        } else {
            (self.bytes_copied * 100 / self.bytes_total) as u8
        }
    }

    /// Whether every byte has been copied.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.bytes_copied >= self.bytes_total
    }
}
