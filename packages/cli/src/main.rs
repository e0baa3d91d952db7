//! pbp-installer CLI entry point.
//!
//! Checks that the compatibility layer is installed, copies the bundled
//! payload into its directory, and reports the outcome on a button-driven
//! status screen.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;
mod terminal;

use std::env;

use clap::Parser;
use console::Term;

use args::Args;
use pbp_installer_config::{LoadedConfig, load_config};
use pbp_installer_operations::{Controller, InstallPlan, Installer, NoInput, Screen};
use progress::ProgressManager;
use terminal::{TermController, TermScreen};

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Main application logic. Returns the process exit code.
fn run(args: &Args) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_config(args.config.as_deref())?;

    let term = Term::stdout();
    let interactive = !args.non_interactive && term.is_term();
    log::debug!("Interactive: {interactive}");

    output::print_header(&loaded.config.description);
    output::print_config_source(loaded.config_path.as_deref());

    let screen = TermScreen::new(
        term.clone(),
        loaded.config.description.clone(),
        ProgressManager::new(args.should_show_progress()),
    );
    let options = args.install_options();

    if interactive {
        let controller = TermController::spawn(term)?;
        install(Installer::new(controller, screen, options), &loaded, args, true)
    } else {
        install(Installer::new(NoInput, screen, options), &loaded, args, false)
    }
}

/// Pick the partition, then run the install loop.
fn install<C: Controller, S: Screen>(
    mut installer: Installer<C, S>,
    loaded: &LoadedConfig,
    args: &Args,
    interactive: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let source = args.source.as_deref();

    let plan = if let Some(name) = &args.partition {
        InstallPlan::for_partition_name(loaded, name, source)?
    } else if interactive {
        let initial = loaded.config.default_partition_index();
        let Some(index) = installer.select_partition(&loaded.config.partitions, initial) else {
            println!("No partition selected. Exiting.");
            return Ok(0);
        };
        InstallPlan::for_partition_index(loaded, index, source)?
    } else {
        InstallPlan::for_partition_index(loaded, loaded.config.default_partition_index(), source)?
    };

    if !interactive {
        output::print_plan(&plan);
    }

    let status = installer.run(&plan);
    log::debug!("Final status: {status}");

    Ok(status.exit_code())
}
