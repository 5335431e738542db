// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The world-space rectangle a viewport shows.

use kurbo::{Point, Rect};

/// The world-space rectangle currently shown by a viewport.
///
/// Stored as a center and an extent, which is how it travels on the
/// `visible_window` channel.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct VisibleWindow {
    /// World-space center, x.
    pub cx: f64,
    /// World-space center, y.
    pub cy: f64,
    /// World-space width.
    pub width: f64,
    /// World-space height.
    pub height: f64,
}

impl VisibleWindow {
    /// Creates a window from its center and extent.
    #[must_use]
    pub const fn new(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
        }
    }

    /// Returns the center point.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// Returns the window as a rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.cx - self.width / 2.0,
            self.cy - self.height / 2.0,
            self.cx + self.width / 2.0,
            self.cy + self.height / 2.0,
        )
    }

    /// Returns `true` if `pt` lies inside the window or on its edge.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let r = self.to_rect();
        pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
    }

    /// Separating-axis overlap test against a world-space rectangle.
    ///
    /// Rectangles that only touch along an edge count as overlapping.
    #[must_use]
    pub fn overlaps(&self, rect: Rect) -> bool {
        let w = self.to_rect();
        let rect = rect.abs();
        !(rect.y0 > w.y1 || rect.y1 < w.y0 || rect.x0 > w.x1 || rect.x1 < w.x0)
    }
}
