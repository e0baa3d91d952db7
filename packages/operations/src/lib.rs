//! Install flow for pbp-installer.
//!
//! This crate turns a loaded configuration into an install:
//!
//! * Path planning for the selected partition
//! * The check-then-copy sequence with a four-way outcome
//! * Partition selection and the status loop, driven through the
//!   [`Controller`] and [`Screen`] seams
//!
//! # Example
//!
//! ```rust,ignore
//! use pbp_installer_operations::{InstallOptions, InstallPlan, Installer};
//!
//! let plan = InstallPlan::for_partition_name(&loaded, "ux0", None)?;
//! let mut installer = Installer::new(controller, screen, InstallOptions::default());
//! let status = installer.run(&plan);
//! std::process::exit(status.exit_code());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod controller;
mod error;
mod install;
mod installer;
mod partition;
mod plan;
mod status;

pub use controller::{
    Button, CANCEL_BUTTON, CONFIRM_BUTTON, Controller, EXIT_BUTTON, NoInput, RESCAN_BUTTON, Screen,
};
pub use error::OperationError;
pub use install::{InstallOptions, check_and_install};
pub use installer::Installer;
pub use partition::PartitionSelector;
pub use pbp_installer_copy::CopyProgress;
pub use plan::InstallPlan;
pub use status::{InstallStatus, NotCopiedReason, StatusLine, Tone};
