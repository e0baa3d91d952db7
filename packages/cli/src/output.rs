//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::{ColoredString, Colorize};
use pbp_installer_operations::{InstallPlan, Tone};

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "🎮", message.bold());
}

/// Print where the configuration came from.
pub fn print_config_source(path: Option<&Path>) {
    match path {
        Some(path) => println!("Config: {}", path.display().to_string().cyan()),
        None => println!("Config: {}", "built-in defaults".dimmed()),
    }
}

/// Print the resolved paths of an install.
pub fn print_plan(plan: &InstallPlan) {
    println!("Partition:   {}", plan.partition.name.yellow());
    println!("Source:      {}", plan.source.display());
    println!("Destination: {}", plan.destination.display());
    println!();
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Colour `text` for its tone.
#[must_use]
pub fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Warning => text.yellow().bold(),
        Tone::Success => text.green().bold(),
        Tone::Error => text.red().bold(),
        Tone::Info => text.normal(),
    }
}
