//! Terminal stand-ins for the handheld's buttons and display.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use console::{Key, Term};
use indicatif::ProgressBar;
use pbp_installer_config::Partition;
use pbp_installer_operations::{Button, Controller, CopyProgress, Screen, StatusLine, Tone};

use crate::output::paint;
use crate::progress::ProgressManager;

/// Map a key to the button it stands in for.
///
/// `x`/Enter is Cross, `o`/Esc is Circle, `t`/`r` is Triangle, `s` is
/// Square, the arrow keys are the d-pad, and Space is Start.
#[must_use]
pub const fn button_for_key(key: &Key) -> Option<Button> {
    match key {
        Key::Enter | Key::Char('x' | 'X') => Some(Button::Cross),
        Key::Escape | Key::Char('o' | 'O') => Some(Button::Circle),
        Key::Char('t' | 'T' | 'r' | 'R') => Some(Button::Triangle),
        Key::Char('s' | 'S') => Some(Button::Square),
        Key::ArrowLeft => Some(Button::Left),
        Key::ArrowRight => Some(Button::Right),
        Key::Char(' ') => Some(Button::Start),
        _ => None,
    }
}

/// Buttons read from the keyboard on a background thread.
///
/// A key is only read after the installer asks for one, so the terminal is
/// never left in raw mode once the installer stops asking.
pub struct TermController {
    requests: Sender<()>,
    buttons: Receiver<Button>,
    pending: bool,
}

impl TermController {
    /// Start the key reader for `term`.
    ///
    /// # Errors
    ///
    /// * If the reader thread cannot be spawned
    pub fn spawn(term: Term) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<()>();
        let (button_tx, button_rx) = mpsc::channel::<Button>();

        thread::Builder::new()
            .name("button-reader".to_string())
            .spawn(move || {
                for () in request_rx {
                    let button = loop {
                        match term.read_key() {
                            Ok(key) => {
                                if let Some(button) = button_for_key(&key) {
                                    break button;
                                }
                                log::trace!("Ignoring key {key:?}");
                            }
                            Err(e) => {
                                log::debug!("Key reader stopped: {e}");
                                return;
                            }
                        }
                    };

                    if button_tx.send(button).is_err() {
                        return;
                    }
                }
            })?;

        Ok(Self {
            requests: request_tx,
            buttons: button_rx,
            pending: false,
        })
    }

    /// Ask the reader for a key unless one is already on the way.
    fn arm(&mut self) -> bool {
        if !self.pending {
            if self.requests.send(()).is_err() {
                return false;
            }
            self.pending = true;
        }
        true
    }
}

impl Controller for TermController {
    fn poll(&mut self) -> Option<Button> {
        if !self.arm() {
            return None;
        }

        match self.buttons.try_recv() {
            Ok(button) => {
                self.pending = false;
                Some(button)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    fn wait(&mut self) -> Option<Button> {
        if !self.arm() {
            return None;
        }

        let button = self.buttons.recv().ok();
        self.pending = false;
        button
    }
}

/// Centre `text` in `width` columns.
///
/// Text wider than the screen is returned unchanged.
#[must_use]
pub fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{text}", " ".repeat((width - len) / 2))
}

/// Full-screen terminal display.
pub struct TermScreen {
    term: Term,
    title: String,
    progress: ProgressManager,
    bar: Option<ProgressBar>,
}

impl TermScreen {
    /// Create a screen that draws on `term` under `title`.
    #[must_use]
    pub fn new(term: Term, title: String, progress: ProgressManager) -> Self {
        Self {
            term,
            title,
            progress,
            bar: None,
        }
    }

    fn width(&self) -> usize {
        self.term
            .size_checked()
            .map_or(80, |(_, cols)| usize::from(cols))
    }

    fn write(&self, line: &str) {
        if let Err(e) = self.term.write_line(line) {
            log::debug!("Failed to write to terminal: {e}");
        }
    }

    fn write_centered(&self, text: &str, tone: Tone) {
        let width = self.width();
        let line = centered(text, width);
        let pad = line.len() - text.len();
        self.write(&format!("{}{}", &line[..pad], paint(text, tone)));
    }

    /// Start a fresh frame: clear when on a terminal, then draw the title.
    fn begin_frame(&self) {
        if self.term.is_term() {
            if let Err(e) = self.term.clear_screen() {
                log::debug!("Failed to clear terminal: {e}");
            }
        }
        self.write("");
        self.write_centered(&self.title, Tone::Info);
        self.write("");
    }
}

impl Screen for TermScreen {
    fn show_message(&mut self, message: &str) {
        self.begin_frame();
        self.write_centered(message, Tone::Info);
    }

    fn show_partitions(&mut self, partitions: &[Partition], selected: usize) {
        self.begin_frame();
        self.write_centered("Select the destination partition", Tone::Info);
        self.write("");

        for (index, partition) in partitions.iter().enumerate() {
            if index == selected {
                self.write_centered(&format!("> {} <", partition.name), Tone::Success);
            } else {
                self.write_centered(&partition.name, Tone::Info);
            }
        }

        self.write("");
        self.write_centered("\u{2190}/\u{2192} switch   X confirm   O exit", Tone::Info);
    }

    fn copy_progress(&mut self, progress: &CopyProgress) {
        if self.bar.is_none() {
            let label = progress
                .current_file
                .as_deref()
                .and_then(|f| Path::new(f).file_name())
                .map_or_else(|| "copy".to_string(), |n| n.to_string_lossy().to_string());
            self.write_centered("Copying... press O to cancel", Tone::Info);
            self.bar = Some(self.progress.create_copy_bar(&label, progress.bytes_total));
        }

        if let Some(bar) = &self.bar {
            bar.set_position(progress.bytes_copied);
        }
        log::trace!("Copy progress {}%", progress.percent());
    }

    fn copy_finished(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn show_status(&mut self, lines: &[StatusLine]) {
        self.begin_frame();
        for line in lines {
            self.write_centered(&line.text, line.tone);
        }
    }
}
