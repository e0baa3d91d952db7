//! Configuration types for pbp-installer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A storage partition the payload can be installed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Short name shown in the selector (e.g. `ux0`).
    pub name: String,
    /// Filesystem root of the partition.
    pub root: PathBuf,
}

impl Partition {
    /// Create a partition.
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// Installer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Human-readable description shown in the header.
    pub description: String,

    /// Display name of the compatibility layer.
    pub dependency_name: String,

    /// Directory of the compatibility layer, relative to the partition root.
    pub dependency_dir: PathBuf,

    /// Bundled payload. Relative paths resolve against the bundle directory.
    pub source: PathBuf,

    /// Directory the payload is copied into, relative to the partition root.
    pub destination_dir: PathBuf,

    /// Name of the installed file. Defaults to the source file name.
    pub file_name: Option<String>,

    /// Copy buffer size in bytes.
    pub chunk_size: usize,

    /// Partition selected when the installer starts.
    pub default_partition: Option<String>,

    /// Partitions offered by the selector.
    pub partitions: Vec<Partition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            description: "Adrenaline 6.61 firmware installer".to_string(),
            dependency_name: "Adrenaline".to_string(),
            dependency_dir: PathBuf::from("app/PSPEMUCFW"),
            source: PathBuf::from("661.PBP"),
            destination_dir: PathBuf::from("app/PSPEMUCFW"),
            file_name: None,
            chunk_size: 16 * 1024,
            default_partition: None,
            partitions: vec![Partition::new("ux0", "ux0:")],
        }
    }
}

impl Config {
    /// Name of the installed file.
    ///
    /// Falls back to the source's file name, then to the whole source path.
    #[must_use]
    pub fn installed_file_name(&self) -> String {
        self.file_name.clone().unwrap_or_else(|| {
            self.source
                .file_name()
                .map_or_else(
                    || self.source.to_string_lossy().to_string(),
                    |n| n.to_string_lossy().to_string(),
                )
        })
    }

    /// Index of the partition selected at startup.
    ///
    /// Returns 0 when no default is configured or the name is unknown.
    #[must_use]
    pub fn default_partition_index(&self) -> usize {
        self.default_partition
            .as_deref()
            .and_then(|name| self.partition_index(name))
            .unwrap_or(0)
    }

    /// Find a partition by name.
    #[must_use]
    pub fn partition_index(&self, name: &str) -> Option<usize> {
        let name = name.trim_end_matches(':');
        self.partitions.iter().position(|p| p.name == name)
    }
}

/// A loaded configuration with metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: Config,
    /// Path to the configuration file, if one was found.
    pub config_path: Option<PathBuf>,
    /// Directory bundled files are resolved against.
    pub bundle_dir: PathBuf,
}

impl LoadedConfig {
    /// Absolute path of the bundled payload.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        resolve(&self.bundle_dir, &self.config.source)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
