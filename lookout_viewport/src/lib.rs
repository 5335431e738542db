// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Viewport: the pan/zoom model behind a map container.
//!
//! A [`Viewport`] owns the map's [`AffineTransform`](lookout_geom::AffineTransform)
//! together with its nominal center, display size and zoom bounds. It:
//! - zooms by scaling the transform about the nominal center, rejecting levels
//!   outside `[1, max_zoom]`;
//! - pans by translating the transform in display space and clamping so the
//!   visible window never reaches past the container's edges, which lie half
//!   the container extent from the nominal center;
//! - derives the [`VisibleWindow`](lookout_geom::VisibleWindow) by inverting
//!   the transform, keeping the previous window if inversion fails;
//! - tracks drag gestures with [`DragState`].
//!
//! Every mutating operation returns the [`ViewportEvent`]s to publish, in
//! order: `Zoom` (for zoom only) then `VisibleWindow`.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use lookout_viewport::{Viewport, ViewportConfig, ViewportEvent};
//!
//! let mut view = Viewport::new(ViewportConfig::new(Point::ORIGIN, 400.0, 400.0, 8.0));
//!
//! let events = view.zoom(4.0);
//! assert_eq!(events[0], ViewportEvent::Zoom(4.0));
//!
//! view.pan(Vec2::new(50.0, 0.0));
//! let window = view.visible_window();
//! assert_eq!((window.cx, window.width), (-12.5, 100.0));
//!
//! // Out of range: ignored, nothing to publish.
//! assert!(view.zoom(16.0).is_empty());
//! ```
//!
//! [`ZoomLadder`] models the discrete zoom steps of a plus/minus control.

mod drag;
mod ladder;
mod viewport;

pub use drag::DragState;
pub use ladder::{LadderError, ZoomLadder};
pub use viewport::{PAN_EDGE_FRACTION, Viewport, ViewportConfig, ViewportEvent, ViewportEvents};
