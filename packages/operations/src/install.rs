//! The check-then-copy sequence.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::AtomicBool;

use pbp_installer_copy::{
    CopyProgress, CopyResult, copy_file_chunked, dir_exists, file_exists, overwrite_file_chunked,
};

use crate::plan::InstallPlan;
use crate::status::{InstallStatus, NotCopiedReason};

/// Options for an install pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Replace the destination even if it already exists.
    pub overwrite: bool,
}

/// Check the dependency and the payload, then copy the payload into place.
///
/// Copy errors are folded into [`InstallStatus::NotCopied`] so the caller
/// always has a status to show.
///
/// # Arguments
///
/// * `plan` - Resolved paths
/// * `options` - Install options
/// * `cancel` - Flag that stops the copy when set
/// * `on_progress` - Callback for copy progress, called only when a copy runs
pub fn check_and_install<F>(
    plan: &InstallPlan,
    options: &InstallOptions,
    cancel: &AtomicBool,
    on_progress: F,
) -> InstallStatus
where
    F: FnMut(&CopyProgress),
{
    log::debug!(
        "Checking {} at {}",
        plan.dependency_name,
        plan.dependency_dir.display()
    );
    if !dir_exists(&plan.dependency_dir) {
        log::info!("{} is not installed", plan.dependency_name);
        return InstallStatus::DependencyMissing {
            name: plan.dependency_name.clone(),
            dependency_dir: plan.dependency_dir.clone(),
        };
    }

    log::debug!("Checking source {}", plan.source.display());
    if !file_exists(&plan.source) {
        log::info!("Source {} not found", plan.source.display());
        return InstallStatus::SourceMissing {
            source: plan.source.clone(),
        };
    }

    let result = if options.overwrite {
        overwrite_file_chunked(
            &plan.source,
            &plan.destination,
            plan.chunk_size,
            cancel,
            on_progress,
        )
    } else {
        copy_file_chunked(
            &plan.source,
            &plan.destination,
            plan.chunk_size,
            cancel,
            on_progress,
        )
    };

    let destination = plan.destination.clone();
    match result {
        Ok(CopyResult::Created { bytes_copied }) => {
            log::info!("Installed {}", destination.display());
            InstallStatus::Present {
                destination,
                bytes_copied: Some(bytes_copied),
            }
        }
        Ok(CopyResult::Exists) => InstallStatus::Present {
            destination,
            bytes_copied: None,
        },
        // Removed between the check and the copy
        Ok(CopyResult::SourceNotFound) => InstallStatus::SourceMissing {
            source: plan.source.clone(),
        },
        Ok(CopyResult::Cancelled { bytes_copied }) => {
            log::info!("Copy cancelled after {bytes_copied} bytes");
            InstallStatus::NotCopied {
                destination,
                reason: NotCopiedReason::Cancelled,
            }
        }
        Err(e) => {
            log::error!("Copy failed: {e}");
            InstallStatus::NotCopied {
                destination,
                reason: NotCopiedReason::Failed(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::Ordering;

    use pbp_installer_config::Partition;
    use tempfile::TempDir;

    fn plan_in(root: &TempDir, bundle: &TempDir) -> InstallPlan {
        InstallPlan {
            partition: Partition::new("ux0", root.path()),
            dependency_name: "Adrenaline".to_string(),
            dependency_dir: root.path().join("app/PSPEMUCFW"),
            source: bundle.path().join("661.PBP"),
            destination: root.path().join("app/PSPEMUCFW/661.PBP"),
            chunk_size: 64,
        }
    }

    #[test]
    fn test_dependency_missing_wins() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let plan = plan_in(&root, &bundle);
        fs::write(&plan.source, "payload").unwrap();

        let cancel = AtomicBool::new(false);
        let status = check_and_install(&plan, &InstallOptions::default(), &cancel, |_| {
            panic!("no copy expected");
        });

        assert!(matches!(status, InstallStatus::DependencyMissing { .. }));
        assert!(!plan.destination.exists());
    }

    #[test]
    fn test_source_missing() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let plan = plan_in(&root, &bundle);
        fs::create_dir_all(&plan.dependency_dir).unwrap();

        let cancel = AtomicBool::new(false);
        let status = check_and_install(&plan, &InstallOptions::default(), &cancel, |_| {});

        assert_eq!(
            status,
            InstallStatus::SourceMissing {
                source: plan.source.clone()
            }
        );
    }

    #[test]
    fn test_copies_payload() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let plan = plan_in(&root, &bundle);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::write(&plan.source, vec![7u8; 200]).unwrap();

        let cancel = AtomicBool::new(false);
        let mut reports = 0;
        let status = check_and_install(&plan, &InstallOptions::default(), &cancel, |_| {
            reports += 1;
        });

        assert_eq!(
            status,
            InstallStatus::Present {
                destination: plan.destination.clone(),
                bytes_copied: Some(200),
            }
        );
        // Start report plus four 64-byte chunks
        assert_eq!(reports, 5);
        assert_eq!(fs::read(&plan.destination).unwrap(), vec![7u8; 200]);
    }

    #[test]
    fn test_already_present_is_left_alone() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let plan = plan_in(&root, &bundle);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::write(&plan.source, "new").unwrap();
        fs::write(&plan.destination, "old").unwrap();

        let cancel = AtomicBool::new(false);
        let status = check_and_install(&plan, &InstallOptions::default(), &cancel, |_| {});

        assert_eq!(
            status,
            InstallStatus::Present {
                destination: plan.destination.clone(),
                bytes_copied: None,
            }
        );
        assert_eq!(fs::read_to_string(&plan.destination).unwrap(), "old");
    }

    #[test]
    fn test_overwrite_replaces_existing() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let plan = plan_in(&root, &bundle);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::write(&plan.source, "new").unwrap();
        fs::write(&plan.destination, "old payload").unwrap();

        let cancel = AtomicBool::new(false);
        let status = check_and_install(&plan, &InstallOptions { overwrite: true }, &cancel, |_| {});

        assert!(status.is_present());
        assert_eq!(fs::read_to_string(&plan.destination).unwrap(), "new");
    }

    #[test]
    fn test_overwrite_onto_source_fails_and_keeps_payload() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let mut plan = plan_in(&root, &bundle);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::write(&plan.destination, vec![5u8; 300]).unwrap();
        plan.source = plan.destination.clone();

        let cancel = AtomicBool::new(false);
        let status = check_and_install(&plan, &InstallOptions { overwrite: true }, &cancel, |_| {});

        assert!(matches!(
            status,
            InstallStatus::NotCopied {
                reason: NotCopiedReason::Failed(_),
                ..
            }
        ));
        assert_eq!(status.exit_code(), 4);
        assert_eq!(fs::read(&plan.destination).unwrap(), vec![5u8; 300]);
    }

    #[test]
    fn test_cancelled_copy() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let plan = plan_in(&root, &bundle);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::write(&plan.source, vec![1u8; 1000]).unwrap();

        let cancel = AtomicBool::new(false);
        let status = check_and_install(&plan, &InstallOptions::default(), &cancel, |p| {
            if p.bytes_copied > 0 {
                cancel.store(true, Ordering::SeqCst);
            }
        });

        assert_eq!(
            status,
            InstallStatus::NotCopied {
                destination: plan.destination.clone(),
                reason: NotCopiedReason::Cancelled,
            }
        );
        assert!(!plan.destination.exists());
    }

    #[test]
    fn test_copy_failure_becomes_status() {
        let root = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let plan = plan_in(&root, &bundle);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        // A directory passes the existence check but cannot be read as a file
        fs::create_dir_all(&plan.source).unwrap();

        let cancel = AtomicBool::new(false);
        let status = check_and_install(&plan, &InstallOptions::default(), &cancel, |_| {});

        assert!(matches!(
            status,
            InstallStatus::NotCopied {
                reason: NotCopiedReason::Failed(_),
                ..
            }
        ));
        assert!(!plan.destination.exists());
    }
}
