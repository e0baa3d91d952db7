//! Install planning - resolve every path before touching the filesystem.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use pbp_installer_config::{LoadedConfig, Partition};

use crate::error::OperationError;

/// Resolved paths for one install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Partition the payload goes to.
    pub partition: Partition,
    /// Display name of the compatibility layer.
    pub dependency_name: String,
    /// Directory that must exist before copying.
    pub dependency_dir: PathBuf,
    /// Bundled payload (absolute).
    pub source: PathBuf,
    /// Where the payload is installed.
    pub destination: PathBuf,
    /// Copy buffer size in bytes.
    pub chunk_size: usize,
}

impl InstallPlan {
    /// Build a plan for `partition`.
    ///
    /// `source_override` replaces the configured payload; relative overrides
    /// are kept as given.
    #[must_use]
    pub fn new(loaded: &LoadedConfig, partition: &Partition, source_override: Option<&Path>) -> Self {
        let config = &loaded.config;
        let source = source_override.map_or_else(|| loaded.source_path(), Path::to_path_buf);

        let destination = under_root(&partition.root, &config.destination_dir)
            .join(config.installed_file_name())
            .clean();

        Self {
            partition: partition.clone(),
            dependency_name: config.dependency_name.clone(),
            dependency_dir: under_root(&partition.root, &config.dependency_dir),
            source: source.clean(),
            destination,
            chunk_size: config.chunk_size,
        }
    }

    /// Build a plan for the partition called `name`.
    ///
    /// # Errors
    ///
    /// * If no partition has that name
    pub fn for_partition_name(
        loaded: &LoadedConfig,
        name: &str,
        source_override: Option<&Path>,
    ) -> Result<Self, OperationError> {
        let index = loaded
            .config
            .partition_index(name)
            .ok_or_else(|| OperationError::UnknownPartition {
                name: name.to_string(),
                available: loaded
                    .config
                    .partitions
                    .iter()
                    .map(|p| p.name.clone())
                    .collect(),
            })?;

        Ok(Self::new(
            loaded,
            &loaded.config.partitions[index],
            source_override,
        ))
    }

    /// Build a plan for the partition at `index`.
    ///
    /// # Errors
    ///
    /// * If `index` is out of range
    pub fn for_partition_index(
        loaded: &LoadedConfig,
        index: usize,
        source_override: Option<&Path>,
    ) -> Result<Self, OperationError> {
        loaded
            .config
            .partitions
            .get(index)
            .map(|partition| Self::new(loaded, partition, source_override))
            .ok_or(OperationError::NoPartitions)
    }

    /// Name of the installed file.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Join `relative` under `root`, treating an absolute `relative` as root-relative.
fn under_root(root: &Path, relative: &Path) -> PathBuf {
    let relative = relative.strip_prefix("/").unwrap_or(relative);
    root.join(relative).clean()
}
