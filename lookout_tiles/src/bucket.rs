// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiles and the zoom buckets that group them.

use core::fmt;

use kurbo::{Rect, Vec2};

/// Opaque identifier of a raster tile element.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(String);

impl TileId {
    /// Creates a tile id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TileId").field(&self.0).finish()
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A raster tile: an image element with a fixed home rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Element id.
    pub id: TileId,
    /// Position and size in the bucket's own coordinates.
    pub home: Rect,
    /// Image source to assign when the tile loads.
    pub url: String,
}

impl Tile {
    /// Creates a tile.
    #[must_use]
    pub fn new(id: impl Into<TileId>, home: Rect, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            home,
            url: url.into(),
        }
    }
}

/// One pre-rendered resolution level of a tiled layer.
///
/// Tile home rectangles are mapped into world space by
/// `world = home * scale + offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomBucket {
    /// Id of the group element holding this bucket's tiles.
    pub group: String,
    /// Home → world scale.
    pub scale: f64,
    /// Home → world offset.
    pub offset: Vec2,
    /// Tiles in this bucket.
    pub tiles: Vec<Tile>,
}

impl ZoomBucket {
    /// Creates an empty bucket with an identity placement.
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            scale: 1.0,
            offset: Vec2::ZERO,
            tiles: Vec::new(),
        }
    }

    /// Sets the home → world placement.
    #[must_use]
    pub fn with_placement(mut self, scale: f64, offset: Vec2) -> Self {
        self.scale = scale;
        self.offset = offset;
        self
    }

    /// Adds a tile.
    #[must_use]
    pub fn with_tile(mut self, tile: Tile) -> Self {
        self.tiles.push(tile);
        self
    }

    /// Maps a home rectangle into world space.
    #[must_use]
    pub fn placed(&self, home: Rect) -> Rect {
        let x = home.x0 * self.scale + self.offset.x;
        let y = home.y0 * self.scale + self.offset.y;
        Rect::new(
            x,
            y,
            x + home.width() * self.scale,
            y + home.height() * self.scale,
        )
    }
}

/// Index of the zoom bucket for `zoom`: `floor(log2(zoom))`.
///
/// Returns `None` for zoom levels below 1 and for non-finite input.
#[must_use]
pub fn bucket_index(zoom: f64) -> Option<usize> {
    if !(zoom >= 1.0) || !zoom.is_finite() {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "log2 of a finite f64 >= 1 lies in [0, 1024)"
    )]
    Some(zoom.log2().floor() as usize)
}

/// Zoom level represented by bucket `index`: `2^index`.
#[must_use]
pub fn bucket_level(index: usize) -> f64 {
    let exp = i32::try_from(index).unwrap_or(i32::MAX);
    2.0_f64.powi(exp)
}
