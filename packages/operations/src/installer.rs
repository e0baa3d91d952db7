//! The interactive install loop.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicBool, Ordering};

use pbp_installer_config::Partition;

use crate::controller::{
    Button, CANCEL_BUTTON, CONFIRM_BUTTON, Controller, EXIT_BUTTON, RESCAN_BUTTON, Screen,
};
use crate::install::{InstallOptions, check_and_install};
use crate::partition::PartitionSelector;
use crate::plan::InstallPlan;
use crate::status::InstallStatus;

/// Drives partition selection, the check-then-copy pass, and the status screen.
pub struct Installer<C, S> {
    controller: C,
    screen: S,
    options: InstallOptions,
}

impl<C: Controller, S: Screen> Installer<C, S> {
    /// Create an installer over a controller and a screen.
    pub const fn new(controller: C, screen: S, options: InstallOptions) -> Self {
        Self {
            controller,
            screen,
            options,
        }
    }

    /// Let the user pick a partition.
    ///
    /// Left and Right move the highlight, Cross confirms, Circle or closed
    /// input aborts. With a single partition it is returned without asking.
    ///
    /// Returns the index of the chosen partition, or `None` if aborted.
    pub fn select_partition(&mut self, partitions: &[Partition], initial: usize) -> Option<usize> {
        let mut selector = PartitionSelector::new(partitions.len(), initial);

        if partitions.is_empty() {
            return None;
        }
        if !selector.has_choice() {
            return Some(0);
        }

        loop {
            self.screen.show_partitions(partitions, selector.selected());

            match self.controller.wait() {
                Some(Button::Left) => selector.toggle_previous(),
                Some(Button::Right) => selector.toggle_next(),
                Some(button) if button == CONFIRM_BUTTON => {
                    log::debug!(
                        "Selected partition {}",
                        partitions[selector.selected()].name
                    );
                    return Some(selector.selected());
                }
                Some(button) if button == EXIT_BUTTON => return None,
                None => return None,
                Some(_) => {}
            }
        }
    }

    /// Run check-then-copy passes until the user exits.
    ///
    /// Each pass shows "Checking...", copies if needed while polling for the
    /// cancel button, and shows the status. Triangle starts another pass;
    /// Circle or closed input returns the last status.
    pub fn run(&mut self, plan: &InstallPlan) -> InstallStatus {
        loop {
            let status = self.install_once(plan);
            self.screen.show_status(&status.lines());

            loop {
                match self.controller.wait() {
                    Some(button) if button == EXIT_BUTTON => return status,
                    None => return status,
                    Some(button) if button == RESCAN_BUTTON => {
                        log::debug!("Rescanning");
                        break;
                    }
                    Some(_) => {}
                }
            }
        }
    }

    fn install_once(&mut self, plan: &InstallPlan) -> InstallStatus {
        self.screen.show_message("Checking...");

        let cancel = AtomicBool::new(false);
        let mut copying = false;

        let controller = &mut self.controller;
        let screen = &mut self.screen;
        let status = check_and_install(plan, &self.options, &cancel, |progress| {
            copying = true;
            screen.copy_progress(progress);
            if controller.poll() == Some(CANCEL_BUTTON) {
                log::debug!("Cancel pressed at {}%", progress.percent());
                cancel.store(true, Ordering::SeqCst);
            }
        });

        if copying {
            self.screen.copy_finished();
        }

        log::info!("Install pass finished: {status}");
        status
    }

    /// Give back the controller and the screen.
    pub fn into_parts(self) -> (C, S) {
        (self.controller, self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;

    use pbp_installer_copy::CopyProgress;
    use tempfile::TempDir;

    use crate::controller::NoInput;
    use crate::status::{NotCopiedReason, StatusLine};

    #[derive(Default)]
    struct Scripted {
        polls: VecDeque<Button>,
        waits: VecDeque<Button>,
    }

    impl Scripted {
        fn waits(buttons: &[Button]) -> Self {
            Self {
                polls: VecDeque::new(),
                waits: buttons.iter().copied().collect(),
            }
        }
    }

    impl Controller for Scripted {
        fn poll(&mut self) -> Option<Button> {
            self.polls.pop_front()
        }

        fn wait(&mut self) -> Option<Button> {
            self.waits.pop_front()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Message(String),
        Partitions(usize),
        Progress(u64),
        Finished,
        Status(String),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl Screen for Recorder {
        fn show_message(&mut self, message: &str) {
            self.events.push(Event::Message(message.to_string()));
        }

        fn show_partitions(&mut self, _partitions: &[Partition], selected: usize) {
            self.events.push(Event::Partitions(selected));
        }

        fn copy_progress(&mut self, progress: &CopyProgress) {
            self.events.push(Event::Progress(progress.bytes_copied));
        }

        fn copy_finished(&mut self) {
            self.events.push(Event::Finished);
        }

        fn show_status(&mut self, lines: &[StatusLine]) {
            self.events.push(Event::Status(lines[0].text.clone()));
        }
    }

    fn partitions() -> Vec<Partition> {
        vec![
            Partition::new("ux0", "/mnt/ux0"),
            Partition::new("ur0", "/mnt/ur0"),
            Partition::new("uma0", "/mnt/uma0"),
        ]
    }

    fn plan_in(root: &Path, chunk_size: usize) -> InstallPlan {
        InstallPlan {
            partition: Partition::new("ux0", root),
            dependency_name: "Adrenaline".to_string(),
            dependency_dir: root.join("app/PSPEMUCFW"),
            source: root.join("bundle/661.PBP"),
            destination: root.join("app/PSPEMUCFW/661.PBP"),
            chunk_size,
        }
    }

    #[test]
    fn test_select_partition_toggles_and_confirms() {
        let controller = Scripted::waits(&[Button::Right, Button::Right, Button::Left, Button::Cross]);
        let mut installer = Installer::new(controller, Recorder::default(), InstallOptions::default());

        let selected = installer.select_partition(&partitions(), 0);
        assert_eq!(selected, Some(1));

        let (_, screen) = installer.into_parts();
        assert_eq!(
            screen.events,
            vec![
                Event::Partitions(0),
                Event::Partitions(1),
                Event::Partitions(2),
                Event::Partitions(1),
            ]
        );
    }

    #[test]
    fn test_select_partition_wraps_left() {
        let controller = Scripted::waits(&[Button::Left, Button::Cross]);
        let mut installer = Installer::new(controller, Recorder::default(), InstallOptions::default());

        assert_eq!(installer.select_partition(&partitions(), 0), Some(2));
    }

    #[test]
    fn test_select_partition_aborts() {
        let controller = Scripted::waits(&[Button::Square, Button::Circle]);
        let mut installer = Installer::new(controller, Recorder::default(), InstallOptions::default());
        assert_eq!(installer.select_partition(&partitions(), 1), None);

        let mut installer = Installer::new(NoInput, Recorder::default(), InstallOptions::default());
        assert_eq!(installer.select_partition(&partitions(), 1), None);
    }

    #[test]
    fn test_select_single_partition_skips_prompt() {
        let mut installer = Installer::new(NoInput, Recorder::default(), InstallOptions::default());
        let only = vec![Partition::new("ux0", "ux0:")];

        assert_eq!(installer.select_partition(&only, 0), Some(0));
        assert_eq!(installer.select_partition(&[], 0), None);

        let (_, screen) = installer.into_parts();
        assert!(screen.events.is_empty());
    }

    #[test]
    fn test_run_once_without_input() {
        let dir = TempDir::new().unwrap();
        let plan = plan_in(dir.path(), 16);

        let mut installer = Installer::new(NoInput, Recorder::default(), InstallOptions::default());
        let status = installer.run(&plan);

        assert!(matches!(status, InstallStatus::DependencyMissing { .. }));
        let (_, screen) = installer.into_parts();
        assert_eq!(
            screen.events,
            vec![
                Event::Message("Checking...".to_string()),
                Event::Status("Adrenaline is not installed.".to_string()),
            ]
        );
    }

    #[test]
    fn test_run_copies_with_progress() {
        let dir = TempDir::new().unwrap();
        let plan = plan_in(dir.path(), 16);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::create_dir_all(plan.source.parent().unwrap()).unwrap();
        fs::write(&plan.source, vec![9u8; 40]).unwrap();

        let controller = Scripted::waits(&[Button::Cross, Button::Circle]);
        let mut installer = Installer::new(controller, Recorder::default(), InstallOptions::default());
        let status = installer.run(&plan);

        assert_eq!(
            status,
            InstallStatus::Present {
                destination: plan.destination.clone(),
                bytes_copied: Some(40),
            }
        );

        let (controller, screen) = installer.into_parts();
        assert!(controller.waits.is_empty());
        assert_eq!(
            screen.events,
            vec![
                Event::Message("Checking...".to_string()),
                Event::Progress(0),
                Event::Progress(16),
                Event::Progress(32),
                Event::Progress(40),
                Event::Finished,
                Event::Status("661.PBP PRESENT".to_string()),
            ]
        );
    }

    #[test]
    fn test_cancel_then_rescan() {
        let dir = TempDir::new().unwrap();
        let plan = plan_in(dir.path(), 10);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::create_dir_all(plan.source.parent().unwrap()).unwrap();
        fs::write(&plan.source, vec![3u8; 30]).unwrap();

        // First pass: Circle arrives during the initial progress report
        let controller = Scripted {
            polls: VecDeque::from([Button::Circle]),
            waits: VecDeque::from([Button::Triangle, Button::Circle]),
        };
        let mut installer = Installer::new(controller, Recorder::default(), InstallOptions::default());
        let status = installer.run(&plan);

        // Second pass found nothing to cancel and copied the file
        assert_eq!(
            status,
            InstallStatus::Present {
                destination: plan.destination.clone(),
                bytes_copied: Some(30),
            }
        );

        let (_, screen) = installer.into_parts();
        let statuses: Vec<&Event> = screen
            .events
            .iter()
            .filter(|e| matches!(e, Event::Status(_)))
            .collect();
        assert_eq!(
            statuses,
            vec![
                &Event::Status("COPY CANCELLED".to_string()),
                &Event::Status("661.PBP PRESENT".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_exit_buttons_are_ignored_on_status_screen() {
        let dir = TempDir::new().unwrap();
        let plan = plan_in(dir.path(), 16);
        fs::create_dir_all(&plan.dependency_dir).unwrap();

        let controller = Scripted::waits(&[Button::Square, Button::Start, Button::Circle]);
        let mut installer = Installer::new(controller, Recorder::default(), InstallOptions::default());
        let status = installer.run(&plan);

        assert!(matches!(status, InstallStatus::SourceMissing { .. }));
        let (controller, _) = installer.into_parts();
        assert!(controller.waits.is_empty());
    }

    #[test]
    fn test_cancel_reason_is_reported() {
        let dir = TempDir::new().unwrap();
        let plan = plan_in(dir.path(), 4);
        fs::create_dir_all(&plan.dependency_dir).unwrap();
        fs::create_dir_all(plan.source.parent().unwrap()).unwrap();
        fs::write(&plan.source, vec![1u8; 12]).unwrap();

        let controller = Scripted {
            polls: VecDeque::from([Button::Square, Button::Circle]),
            waits: VecDeque::new(),
        };
        let mut installer = Installer::new(controller, Recorder::default(), InstallOptions::default());
        let status = installer.run(&plan);

        assert_eq!(
            status,
            InstallStatus::NotCopied {
                destination: plan.destination.clone(),
                reason: NotCopiedReason::Cancelled,
            }
        );
        assert!(!plan.destination.exists());

        let (_, screen) = installer.into_parts();
        // Square on the first report is ignored, Circle on the second stops the copy
        assert!(screen.events.contains(&Event::Progress(4)));
        assert!(!screen.events.contains(&Event::Progress(8)));
    }
}
