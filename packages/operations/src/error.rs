//! Error types for install operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

/// Errors that can occur while planning an install.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The requested partition is not configured.
    #[error("Unknown partition '{name}' (available: {})", available.join(", "))]
    UnknownPartition {
        /// The requested name.
        name: String,
        /// Names of the configured partitions.
        available: Vec<String>,
    },

    /// The configuration has no partitions to install to.
    #[error("No partitions configured")]
    NoPartitions,
}
