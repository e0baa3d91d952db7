//! Seams to the display and input hardware.
//!
//! The installer never draws or reads buttons itself. It talks to a
//! [`Screen`] and a [`Controller`], which the binary implements for a
//! terminal and the tests implement with scripted fakes.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use pbp_installer_config::Partition;
use pbp_installer_copy::CopyProgress;

use crate::status::StatusLine;

/// A physical button on the handheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Cross.
    Cross,
    /// Circle.
    Circle,
    /// Triangle.
    Triangle,
    /// Square.
    Square,
    /// D-pad left.
    Left,
    /// D-pad right.
    Right,
    /// Start.
    Start,
}

/// Leaves the status screen.
pub const EXIT_BUTTON: Button = Button::Circle;
/// Stops a running copy.
pub const CANCEL_BUTTON: Button = Button::Circle;
/// Reruns the checks from the status screen.
pub const RESCAN_BUTTON: Button = Button::Triangle;
/// Accepts the highlighted partition.
pub const CONFIRM_BUTTON: Button = Button::Cross;

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cross => write!(f, "X"),
            Self::Circle => write!(f, "O"),
            Self::Triangle => write!(f, "\u{25b3}"),
            Self::Square => write!(f, "\u{25a1}"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
            Self::Start => write!(f, "Start"),
        }
    }
}

/// Source of button presses.
pub trait Controller {
    /// Return a button pressed since the last call, without blocking.
    fn poll(&mut self) -> Option<Button>;

    /// Block until a button is pressed.
    ///
    /// `None` means input is closed and no press will ever arrive.
    fn wait(&mut self) -> Option<Button>;
}

/// Output surface for the installer.
pub trait Screen {
    /// Show a single transient message such as "Checking...".
    fn show_message(&mut self, message: &str);

    /// Show the partition selector with `selected` highlighted.
    fn show_partitions(&mut self, partitions: &[Partition], selected: usize);

    /// Update the copy percentage and bar. The first call starts the display.
    fn copy_progress(&mut self, progress: &CopyProgress);

    /// Tear down the copy display.
    fn copy_finished(&mut self);

    /// Show the final status lines.
    fn show_status(&mut self, lines: &[StatusLine]);
}

/// A controller with nothing plugged in.
///
/// Never reports a press, so the installer runs once and returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Controller for NoInput {
    fn poll(&mut self) -> Option<Button> {
        None
    }

    fn wait(&mut self) -> Option<Button> {
        None
    }
}
