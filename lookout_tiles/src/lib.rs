// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Tiles: raster tile visibility for zoomable maps.
//!
//! A tiled layer is drawn as a stack of [`ZoomBucket`]s, one per zoom level
//! `1, 2, 4, …`. [`TileVisibility`] shows the bucket selected by
//! `floor(log2(zoom))`, hides the others, and loads each tile of the shown
//! bucket the first time its placed rectangle overlaps the visible window.
//! Loaded tiles are never evicted.
//!
//! [`TilePyramid`] plans the buckets of a WMTS layer from a lon/lat box and
//! a slippy-map URL template.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use lookout_geom::VisibleWindow;
//! use lookout_tiles::{Tile, TileVisibility, ZoomBucket};
//!
//! let coarse = ZoomBucket::new("z1")
//!     .with_tile(Tile::new("a", Rect::new(0.0, 0.0, 100.0, 100.0), "a.png"))
//!     .with_tile(Tile::new("b", Rect::new(100.0, 0.0, 200.0, 100.0), "b.png"));
//! let fine = ZoomBucket::new("z2").with_placement(0.5, Vec2::ZERO);
//! let mut tiles = TileVisibility::new(vec![coarse, fine]);
//!
//! let window = VisibleWindow::new(40.0, 50.0, 80.0, 80.0);
//! let update = tiles.update(1.0, &window);
//! assert_eq!(update.active, Some(0));
//! assert_eq!(update.hidden.as_slice(), &[1]);
//! assert_eq!(update.loads.len(), 1);
//! assert_eq!(update.loads[0].url, "a.png");
//!
//! // Seen once, loaded for good.
//! assert!(tiles.update(1.0, &window).loads.is_empty());
//! ```

mod bucket;
mod pyramid;
mod slippy;
mod visibility;

pub use bucket::{Tile, TileId, ZoomBucket, bucket_index, bucket_level};
pub use pyramid::{
    BASE_ZOOM_SEARCH, GeoBounds, MAX_SLIPPY_ZOOM, PlanError, PyramidLevel, PyramidRequest,
    TilePyramid,
};
pub use slippy::{
    DEFAULT_ATTRIBUTION, DEFAULT_URL_TEMPLATE, EARTH_CIRCUMFERENCE, TILE_SIZE, TilePosition,
    expand_url, tile_north_west, tile_position, tile_width_m,
};
pub use visibility::{TileLoad, TileVisibility, VisibilityUpdate};
