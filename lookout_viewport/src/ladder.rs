// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete zoom steps for a plus/minus zoom control.

use core::fmt;

/// Error returned when a [`ZoomLadder`] cannot be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LadderError {
    /// The ladder has no levels.
    Empty,
    /// The initial index is past the last level.
    InitialOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of levels.
        len: usize,
    },
}

impl fmt::Display for LadderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("zoom ladder has no levels"),
            Self::InitialOutOfRange { index, len } => {
                write!(f, "initial zoom index {index} is out of range for {len} levels")
            }
        }
    }
}

impl core::error::Error for LadderError {}

/// An ordered list of zoom levels with a current index.
///
/// Stepping past either end clamps to the first or last level.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomLadder {
    levels: Vec<f64>,
    index: usize,
}

impl ZoomLadder {
    /// Creates a ladder positioned at `initial`.
    ///
    /// # Errors
    ///
    /// Fails if `levels` is empty or `initial` is not a valid index.
    pub fn new(levels: Vec<f64>, initial: usize) -> Result<Self, LadderError> {
        if levels.is_empty() {
            return Err(LadderError::Empty);
        }
        if initial >= levels.len() {
            return Err(LadderError::InitialOutOfRange {
                index: initial,
                len: levels.len(),
            });
        }
        Ok(Self {
            levels,
            index: initial,
        })
    }

    /// Powers of two `1, 2, 4, …` up to and including `max_zoom`.
    #[must_use]
    pub fn powers_of_two(max_zoom: f64) -> Self {
        let mut levels = vec![1.0];
        let mut level = 2.0;
        while level <= max_zoom {
            levels.push(level);
            level *= 2.0;
        }
        Self { levels, index: 0 }
    }

    /// The configured levels.
    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Current index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Zoom level at the current index.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.levels[self.index]
    }

    /// Steps one level in and returns the new level.
    pub fn zoom_in(&mut self) -> f64 {
        self.index = (self.index + 1).min(self.levels.len() - 1);
        self.level()
    }

    /// Steps one level out and returns the new level.
    pub fn zoom_out(&mut self) -> f64 {
        self.index = self.index.saturating_sub(1);
        self.level()
    }

    /// Whether each level's indicator segment is lit (`i <= index`).
    pub fn lit_segments(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.levels.len()).map(move |i| i <= self.index)
    }
}
