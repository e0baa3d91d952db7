//! Partition selection state.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Cursor over a fixed number of partitions that wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionSelector {
    count: usize,
    selected: usize,
}

impl PartitionSelector {
    /// Create a selector over `count` partitions starting at `initial`.
    ///
    /// An out-of-range `initial` starts at 0.
    #[must_use]
    pub const fn new(count: usize, initial: usize) -> Self {
        let selected = if initial < count { initial } else { 0 };
        Self { count, selected }
    }

    /// Index of the highlighted partition.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Whether there is more than one partition to choose from.
    #[must_use]
    pub const fn has_choice(&self) -> bool {
        self.count > 1
    }

    /// Move to the next partition.
    pub const fn toggle_next(&mut self) {
        if self.count > 0 {
            self.selected = (self.selected + 1) % self.count;
        }
    }

    /// Move to the previous partition.
    pub const fn toggle_previous(&mut self) {
        if self.count > 0 {
            self.selected = (self.selected + self.count - 1) % self.count;
        }
    }
}
