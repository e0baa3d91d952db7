//! Install outcomes and the lines shown for each.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

/// Why the payload was not copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotCopiedReason {
    /// The user pressed the cancel button mid-copy.
    Cancelled,
    /// The copy failed with this message.
    Failed(String),
}

/// Outcome of one check-then-copy pass. Exactly one variant is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    /// The compatibility layer directory is missing.
    DependencyMissing {
        /// Display name of the compatibility layer.
        name: String,
        /// The directory that was checked.
        dependency_dir: PathBuf,
    },
    /// The bundled payload is missing.
    SourceMissing {
        /// The payload path that was checked.
        source: PathBuf,
    },
    /// The payload is in place.
    Present {
        /// Installed file.
        destination: PathBuf,
        /// Bytes written by this pass, `None` if it was already there.
        bytes_copied: Option<u64>,
    },
    /// The copy was attempted and did not finish.
    NotCopied {
        /// Target file.
        destination: PathBuf,
        /// Why it stopped.
        reason: NotCopiedReason,
    },
}

/// Colour class of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something the user has to fix elsewhere.
    Warning,
    /// The payload is installed.
    Success,
    /// The payload could not be installed.
    Error,
    /// Neutral text such as button hints.
    Info,
}

/// One line of the status screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Text to draw.
    pub text: String,
    /// Colour class.
    pub tone: Tone,
}

impl StatusLine {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().to_string(),
        |n| n.to_string_lossy().to_string(),
    )
}

impl InstallStatus {
    /// Whether the payload ended up installed.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }

    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Present { .. } => 0,
            Self::DependencyMissing { .. } => 2,
            Self::SourceMissing { .. } => 3,
            Self::NotCopied { .. } => 4,
        }
    }

    /// Lines of the status screen, message first, button hints last.
    #[must_use]
    pub fn lines(&self) -> Vec<StatusLine> {
        let mut lines = match self {
            Self::DependencyMissing { name, .. } => {
                vec![StatusLine::new(format!("{name} is not installed."), Tone::Warning)]
            }
            Self::SourceMissing { source } => vec![StatusLine::new(
                format!("{} NOT FOUND", display_name(source)),
                Tone::Error,
            )],
            Self::Present {
                destination,
                bytes_copied,
            } => {
                let mut lines = vec![StatusLine::new(
                    format!("{} PRESENT", display_name(destination)),
                    Tone::Success,
                )];
                if let Some(bytes) = bytes_copied {
                    lines.push(StatusLine::new(format!("Copied {bytes} bytes"), Tone::Info));
                }
                lines
            }
            Self::NotCopied { reason, .. } => match reason {
                NotCopiedReason::Cancelled => vec![StatusLine::new("COPY CANCELLED", Tone::Error)],
                NotCopiedReason::Failed(message) => vec![
                    StatusLine::new("COPY FAILED", Tone::Error),
                    StatusLine::new(message.clone(), Tone::Info),
                ],
            },
        };

        lines.push(StatusLine::new("Press O to exit", Tone::Info));
        lines.push(StatusLine::new("Press \u{25b3} to rescan", Tone::Info));
        lines
    }
}

impl std::fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DependencyMissing {
                name,
                dependency_dir,
            } => write!(f, "{name} not installed ({})", dependency_dir.display()),
            Self::SourceMissing { source } => write!(f, "source not found: {}", source.display()),
            Self::Present {
                destination,
                bytes_copied: Some(bytes),
            } => write!(f, "copied {bytes} bytes to {}", destination.display()),
            Self::Present {
                destination,
                bytes_copied: None,
            } => write!(f, "already present: {}", destination.display()),
            Self::NotCopied {
                destination,
                reason: NotCopiedReason::Cancelled,
            } => write!(f, "copy to {} cancelled", destination.display()),
            Self::NotCopied {
                destination,
                reason: NotCopiedReason::Failed(message),
            } => write!(f, "copy to {} failed: {message}", destination.display()),
        }
    }
}
