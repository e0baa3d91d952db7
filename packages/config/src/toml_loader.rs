//! TOML configuration file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::Config;

/// Load a TOML configuration file.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML
/// * If the parsed configuration is invalid
pub fn load_toml_config(path: &Path) -> Result<Config, ConfigError> {
    log::debug!("Loading TOML config from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_config(&config)?;

    log::debug!("Loaded config: {:?}", config.description);

    Ok(config)
}

/// Check the invariants the installer relies on.
///
/// # Errors
///
/// * If there are no partitions
/// * If two partitions share a name
/// * If the default partition is unknown
/// * If the chunk size is zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.partitions.is_empty() {
        return Err(ConfigError::NoPartitions);
    }

    let mut seen = BTreeSet::new();
    for partition in &config.partitions {
        if !seen.insert(partition.name.as_str()) {
            return Err(ConfigError::DuplicatePartition(partition.name.clone()));
        }
    }

    if let Some(name) = &config.default_partition {
        if config.partition_index(name).is_none() {
            return Err(ConfigError::UnknownDefaultPartition(name.clone()));
        }
    }

    if config.chunk_size == 0 {
        return Err(ConfigError::InvalidChunkSize);
    }

    Ok(())
}
