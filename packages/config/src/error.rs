//! Error types for configuration loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No partitions are configured.
    #[error("No partitions configured")]
    NoPartitions,

    /// Two partitions share a name.
    #[error("Duplicate partition name: {0}")]
    DuplicatePartition(String),

    /// The default partition does not name a configured partition.
    #[error("Unknown default partition: {0}")]
    UnknownDefaultPartition(String),

    /// The copy buffer size is zero.
    #[error("chunkSize must be greater than zero")]
    InvalidChunkSize,

    /// Invalid configuration path.
    #[error("Invalid config path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// IO error while locating the bundle directory.
    #[error("IO error during config discovery: {0}")]
    IoError(#[from] std::io::Error),
}
