// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture state: `Idle → Dragging → Idle`.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] on pointer/touch down.
//! 2) On each move, [`DragState::update`] returns the delta since the last
//!    position, which the viewport turns into a pan.
//! 3) Call [`DragState::end`] on pointer/touch up.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use lookout_viewport::DragState;
//!
//! let mut drag = DragState::default();
//! assert_eq!(drag.update(Point::new(3.0, 3.0)), None);
//!
//! drag.start(Point::new(10.0, 20.0));
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.update(Point::new(15.0, 30.0)), Some(Vec2::new(0.0, 5.0)));
//!
//! drag.end();
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Pointer drag state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress; moves are ignored.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging {
        /// Last pointer position seen.
        last: Point,
    },
}

impl DragState {
    /// Starts a drag at `pos`, replacing any drag already in progress.
    pub fn start(&mut self, pos: Point) {
        *self = Self::Dragging { last: pos };
    }

    /// Records a move to `pos` and returns the delta since the last position.
    ///
    /// Returns `None` while idle.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        match self {
            Self::Idle => None,
            Self::Dragging { last } => {
                let delta = pos - *last;
                *last = pos;
                Some(delta)
            }
        }
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        *self = Self::Idle;
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
