// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Geom: the numeric core shared by Lookout map widgets.
//!
//! This crate provides:
//! - [`AffineTransform`]: the six-coefficient world → display transform that
//!   a map viewport mutates on pan and zoom, with exact inversion.
//! - [`Projection`] and [`WebMercator`]: conversion between longitude/latitude
//!   and planar easting/northing using the fixed spherical Mercator extent
//!   [`C1`].
//! - [`VisibleWindow`]: the world-space rectangle shown by a viewport, with
//!   the overlap test used for tile culling.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use lookout_geom::AffineTransform;
//!
//! let center = Point::new(0.0, 0.0);
//! let mut transform = AffineTransform::IDENTITY;
//!
//! // Zoom 4x about the center, then pan 50 display units to the right.
//! transform.scale_about(4.0, center);
//! transform.compose_pan(Vec2::new(50.0, 0.0));
//!
//! // The world point now shown at the center has moved left by 50 / 4.
//! let world = transform.apply_inverse(center).unwrap();
//! assert_eq!(world, Point::new(-12.5, 0.0));
//! ```
//!
//! Projection:
//!
//! ```rust
//! use lookout_geom::{GeoPoint, from_geo, to_geo};
//!
//! let edinburgh = GeoPoint::new(-3.19, 55.95);
//! let planar = from_geo(edinburgh);
//! let back = to_geo(planar);
//! assert!((back.lat - edinburgh.lat).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std`. Enable the `libm` feature instead of `std` to get
//! the float functions the projection needs.

#![no_std]

mod affine;
mod projection;
mod window;

pub use affine::{AffineTransform, SingularMatrix};
pub use projection::{
    C1, Equirectangular, GeoPoint, MAX_LATITUDE, PlanarPoint, Projection, ProjectionError,
    WebMercator, from_geo, to_geo, try_from_geo,
};
pub use window::VisibleWindow;
