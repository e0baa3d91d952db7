//! Configuration loading for pbp-installer.
//!
//! This crate provides configuration types and loading functionality for the
//! pbp-installer CLI. Configuration is a single TOML file; every key is
//! optional and missing keys fall back to the stock Adrenaline layout.
//!
//! # Example
//!
//! ```rust,ignore
//! use pbp_installer_config::load_config;
//!
//! let loaded = load_config(None)?;
//! println!("{}: {}", loaded.config.description, loaded.source_path().display());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod toml_loader;
mod types;

pub use discovery::{CONFIG_FILE_NAME, candidate_paths, discover_config, executable_dir};
pub use error::ConfigError;
pub use toml_loader::{load_toml_config, validate_config};
pub use types::{Config, LoadedConfig, Partition};

use std::path::Path;

/// Load the installer configuration.
///
/// Uses `explicit` when given, otherwise the first discovered file, otherwise
/// the built-in defaults.
///
/// # Errors
///
/// * If an explicit path does not exist
/// * If the file cannot be read or parsed
/// * If the current directory cannot be determined for the defaults
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return load_config_file(path);
    }

    if let Some(path) = discover_config() {
        return load_config_file(&path);
    }

    let bundle_dir = match executable_dir() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    Ok(LoadedConfig {
        config: Config::default(),
        config_path: None,
        bundle_dir,
    })
}

/// Load a specific configuration file.
///
/// # Errors
///
/// * If the file cannot be read or parsed
/// * If the file has no parent directory
pub fn load_config_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let config = load_toml_config(path)?;

    let bundle_dir = path
        .parent()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?
        .to_path_buf();
    let bundle_dir = if bundle_dir.as_os_str().is_empty() {
        std::env::current_dir()?
    } else {
        bundle_dir
    };

    Ok(LoadedConfig {
        config,
        config_path: Some(path.to_path_buf()),
        bundle_dir,
    })
}
