// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use lookout_geom::{AffineTransform, SingularMatrix, VisibleWindow};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, warn};

use crate::drag::DragState;

/// How far, as a fraction of the container extent, the visible window's
/// edges may reach away from the nominal center.
pub const PAN_EDGE_FRACTION: f64 = 0.5;

/// Construction parameters for a [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Nominal center of the map, in world units.
    pub center: Point,
    /// Width of the display area.
    pub width: f64,
    /// Height of the display area.
    pub height: f64,
    /// Largest accepted zoom level.
    pub max_zoom: f64,
    /// Reset the transform to identity whenever the zoom level is exactly 1.
    ///
    /// The edge clamp already keeps a fully zoomed-out map in place; this
    /// also discards any rounding drift left over from earlier zooms.
    pub pin_at_unit_zoom: bool,
}

impl ViewportConfig {
    /// Creates a config with unit-zoom pinning enabled.
    #[must_use]
    pub fn new(center: Point, width: f64, height: f64, max_zoom: f64) -> Self {
        Self {
            center,
            width,
            height,
            max_zoom,
            pin_at_unit_zoom: true,
        }
    }

    /// Sets [`ViewportConfig::pin_at_unit_zoom`].
    #[must_use]
    pub fn with_pin_at_unit_zoom(mut self, pin: bool) -> Self {
        self.pin_at_unit_zoom = pin;
        self
    }
}

/// An event produced by a viewport mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    /// The zoom level changed.
    Zoom(f64),
    /// The visible world window after the mutation.
    VisibleWindow(VisibleWindow),
}

/// Events produced by one viewport operation, in publication order.
pub type ViewportEvents = SmallVec<[ViewportEvent; 2]>;

/// Pan/zoom state of one map container.
///
/// The viewport owns an [`AffineTransform`] mapping world coordinates into
/// display coordinates. Zoom scales that transform about the nominal center;
/// pan translates it in display space and is then clamped so no edge of the
/// visible window lies more than [`PAN_EDGE_FRACTION`] of the container
/// extent away from the nominal center.
///
/// Operations return the events to publish instead of publishing them, so a
/// container can forward them to whichever bus it belongs to.
#[derive(Clone, Debug)]
pub struct Viewport {
    center: Point,
    width: f64,
    height: f64,
    max_zoom: f64,
    pin_at_unit_zoom: bool,
    zoom: f64,
    transform: AffineTransform,
    window: VisibleWindow,
    drag: DragState,
}

impl Viewport {
    /// Creates a viewport at zoom level 1 with an identity transform.
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            center: config.center,
            width: config.width,
            height: config.height,
            max_zoom: config.max_zoom,
            pin_at_unit_zoom: config.pin_at_unit_zoom,
            zoom: 1.0,
            transform: AffineTransform::IDENTITY,
            window: VisibleWindow::new(
                config.center.x,
                config.center.y,
                config.width,
                config.height,
            ),
            drag: DragState::Idle,
        }
    }

    /// Nominal center in world units.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Display width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Display height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// Largest accepted zoom level.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Current world → display transform.
    #[must_use]
    pub fn transform(&self) -> AffineTransform {
        self.transform
    }

    /// The last successfully computed visible window.
    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow {
        self.window
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Pans by `delta` display units.
    ///
    /// Positive `dx` moves the content right, so the visible window moves
    /// left by `dx / zoom` world units. Always yields one
    /// [`ViewportEvent::VisibleWindow`].
    pub fn pan(&mut self, delta: Vec2) -> ViewportEvents {
        self.transform.compose_pan(delta);
        self.normalize();
        let window = self.refresh_window();
        debug!(dx = delta.x, dy = delta.y, cx = window.cx, cy = window.cy, "pan");
        smallvec![ViewportEvent::VisibleWindow(window)]
    }

    /// Zooms to `level`, anchored at the nominal center.
    ///
    /// Levels outside `[1, max_zoom]` (or NaN) are ignored: nothing changes
    /// and no events are produced. Otherwise yields
    /// [`ViewportEvent::Zoom`] followed by [`ViewportEvent::VisibleWindow`].
    pub fn zoom(&mut self, level: f64) -> ViewportEvents {
        if !(level >= 1.0 && level <= self.max_zoom) {
            debug!(level, max_zoom = self.max_zoom, "zoom rejected");
            return ViewportEvents::new();
        }
        let factor = level / self.zoom;
        self.transform.scale_about(factor, self.center);
        self.zoom = level;
        self.normalize();
        let window = self.refresh_window();
        debug!(level, cx = window.cx, cy = window.cy, "zoom");
        smallvec![
            ViewportEvent::Zoom(level),
            ViewportEvent::VisibleWindow(window)
        ]
    }

    /// Derives the visible window from the current transform.
    ///
    /// The container center is mapped back through the inverse transform;
    /// the extent is the display extent divided by the zoom level.
    ///
    /// # Errors
    ///
    /// Returns [`SingularMatrix`] if the transform cannot be inverted.
    pub fn compute_visible_window(&self) -> Result<VisibleWindow, SingularMatrix> {
        let inverse = self.transform.invert().ok_or(SingularMatrix)?;
        let world = inverse.apply(self.center);
        Ok(VisibleWindow::new(
            world.x,
            world.y,
            self.width / self.zoom,
            self.height / self.zoom,
        ))
    }

    /// Begins a drag at display position `pos`.
    pub fn drag_start(&mut self, pos: Point) {
        self.drag.start(pos);
    }

    /// Continues a drag; pans by the movement since the last position.
    ///
    /// Yields nothing while no drag is in progress.
    pub fn drag_move(&mut self, pos: Point) -> ViewportEvents {
        match self.drag.update(pos) {
            Some(delta) => self.pan(delta),
            None => ViewportEvents::new(),
        }
    }

    /// Ends the current drag.
    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    fn normalize(&mut self) {
        if self.pin_at_unit_zoom && self.zoom == 1.0 {
            self.transform = AffineTransform::IDENTITY;
            return;
        }
        self.clamp_to_edges();
    }

    fn clamp_to_edges(&mut self) {
        let Some(inverse) = self.transform.invert() else {
            warn!("singular view transform; skipping edge clamp");
            return;
        };
        let world = inverse.apply(self.center);
        // The window's half extent is used up by the window itself.
        let reach = |extent: f64| {
            let extent = extent.abs();
            (extent * PAN_EDGE_FRACTION - extent / (2.0 * self.zoom)).max(0.0)
        };
        let reach = Vec2::new(reach(self.width), reach(self.height));
        let clamped = Point::new(
            world
                .x
                .max(self.center.x - reach.x)
                .min(self.center.x + reach.x),
            world
                .y
                .max(self.center.y - reach.y)
                .min(self.center.y + reach.y),
        );
        if clamped != world {
            // Shift so that `clamped` is the world point shown at the center.
            let shown = self.transform.apply(clamped);
            self.transform.compose_pan(self.center - shown);
        }
    }

    fn refresh_window(&mut self) -> VisibleWindow {
        match self.compute_visible_window() {
            Ok(window) => self.window = window,
            Err(err) => warn!(%err, "keeping previous visible window"),
        }
        self.window
    }
}
