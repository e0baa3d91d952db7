//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;
use pbp_installer_operations::InstallOptions;

/// CLI arguments for pbp-installer.
#[derive(Debug, Parser)]
#[command(
    name = "pbp-installer",
    about = "Install a bundled PBP payload into the compatibility layer's directory",
    version
)]
pub struct Args {
    /// Config file to use instead of the discovered one.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Install to this partition without showing the selector.
    #[arg(long, short = 'p')]
    pub partition: Option<String>,

    /// Payload to install instead of the bundled one.
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Replace the installed file even if it already exists.
    #[arg(long)]
    pub force: bool,

    /// Run once without waiting for buttons and exit with the status code.
    #[arg(long)]
    pub non_interactive: bool,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Determine if we should show the progress bar.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }

    /// Install options derived from the flags.
    #[must_use]
    pub const fn install_options(&self) -> InstallOptions {
        InstallOptions {
            overwrite: self.force,
        }
    }
}
