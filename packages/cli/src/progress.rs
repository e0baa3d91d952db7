//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar factory for the payload copy.
#[derive(Debug, Clone, Copy)]
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Create a byte progress bar for a copy.
    ///
    /// Shows a filled bar and the percentage. If progress is disabled,
    /// returns a hidden progress bar.
    #[must_use]
    pub fn create_copy_bar(&self, label: &str, total_bytes: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total_bytes);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {prefix:<12} [{bar:40.green/dim}] {percent:>3}% {bytes}/{total_bytes}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        pb.set_prefix(label.to_string());
        pb
    }
}
