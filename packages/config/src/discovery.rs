//! Configuration file discovery.
//!
//! The installer looks for its configuration in a fixed set of places and
//! falls back to built-in defaults when none of them has a file.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

/// File name searched for in the working and executable directories.
pub const CONFIG_FILE_NAME: &str = "pbp-installer.toml";

/// Build the ordered list of candidate config locations.
///
/// Order: `<cwd>/pbp-installer.toml`, `<exe_dir>/pbp-installer.toml`,
/// `<config_dir>/pbp-installer/config.toml`. Missing bases are skipped.
#[must_use]
pub fn candidate_paths(
    cwd: Option<&Path>,
    exe_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(cwd) = cwd {
        candidates.push(cwd.join(CONFIG_FILE_NAME));
    }
    if let Some(exe_dir) = exe_dir {
        let path = exe_dir.join(CONFIG_FILE_NAME);
        if !candidates.contains(&path) {
            candidates.push(path);
        }
    }
    if let Some(config_dir) = config_dir {
        candidates.push(config_dir.join("pbp-installer").join("config.toml"));
    }

    candidates
}

/// Find the first existing configuration file.
///
/// Searches the working directory, the executable's directory, and the
/// platform config directory (via `dirs`).
#[must_use]
pub fn discover_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let exe_dir = executable_dir();
    let config_dir = dirs::config_dir();

    let found = candidate_paths(cwd.as_deref(), exe_dir.as_deref(), config_dir.as_deref())
        .into_iter()
        .find(|path| path.is_file());

    match &found {
        Some(path) => log::debug!("Discovered config at {}", path.display()),
        None => log::debug!("No config file found, using defaults"),
    }

    found
}

/// Directory containing the running executable.
#[must_use]
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_paths_order() {
        let candidates = candidate_paths(
            Some(Path::new("/work")),
            Some(Path::new("/opt/installer")),
            Some(Path::new("/home/user/.config")),
        );

        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/work/pbp-installer.toml"),
                PathBuf::from("/opt/installer/pbp-installer.toml"),
                PathBuf::from("/home/user/.config/pbp-installer/config.toml"),
            ]
        );
    }

    #[test]
    fn test_candidate_paths_dedupes_same_directory() {
        let candidates = candidate_paths(Some(Path::new("/work")), Some(Path::new("/work")), None);
        assert_eq!(candidates, vec![PathBuf::from("/work/pbp-installer.toml")]);
    }

    #[test]
    fn test_candidate_paths_skips_missing_bases() {
        assert!(candidate_paths(None, None, None).is_empty());
    }
}
