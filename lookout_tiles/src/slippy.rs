// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slippy-map tile arithmetic.

use core::f64::consts::PI;

use lookout_geom::GeoPoint;

/// Edge length of a slippy-map tile, in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Equatorial circumference of the earth, in metres.
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;

/// Default tile source (OpenStreetMap).
pub const DEFAULT_URL_TEMPLATE: &str = "https://a.tile.openstreetmap.de/{zoom}/{x}/{y}.png";

/// Attribution text required by the default tile source.
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// The tile containing a point, plus the point's fractional offset in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePosition {
    /// Tile column.
    pub x: i64,
    /// Tile row, counted from the north.
    pub y: i64,
    /// Fraction of a tile east of the tile's west edge, `[0, 1)`.
    pub fx: f64,
    /// Fraction of a tile south of the tile's north edge, `[0, 1)`.
    pub fy: f64,
}

/// Returns the tile containing `geo` at slippy zoom `zoom`.
#[must_use]
pub fn tile_position(geo: GeoPoint, zoom: u32) -> TilePosition {
    let n = tiles_per_side(zoom);
    let lat = geo.lat.to_radians();
    let tx = (geo.lon + 180.0) / 360.0 * n;
    let ty = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n;
    let (x, y) = (tx.trunc(), ty.trunc());
    #[allow(
        clippy::cast_possible_truncation,
        reason = "tile indices are bounded by 2^zoom"
    )]
    TilePosition {
        x: x as i64,
        y: y as i64,
        fx: tx - x,
        fy: ty - y,
    }
}

/// Returns the geographic position of the north-west corner of a tile.
#[must_use]
pub fn tile_north_west(x: i64, y: i64, zoom: u32) -> GeoPoint {
    let n = tiles_per_side(zoom);
    #[allow(
        clippy::cast_precision_loss,
        reason = "tile indices are far below 2^52"
    )]
    let (x, y) = (x as f64, y as f64);
    let lon = x / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
    GeoPoint::new(lon, lat)
}

/// Ground width of one tile at latitude `lat` (degrees), in metres.
#[must_use]
pub fn tile_width_m(lat: f64, zoom: u32) -> f64 {
    EARTH_CIRCUMFERENCE * lat.to_radians().cos() / tiles_per_side(zoom)
}

/// Substitutes `{zoom}`, `{x}` and `{y}` in a tile URL template.
#[must_use]
pub fn expand_url(template: &str, zoom: u32, x: i64, y: i64) -> String {
    template
        .replace("{zoom}", &zoom.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

fn tiles_per_side(zoom: u32) -> f64 {
    2.0_f64.powi(i32::try_from(zoom).unwrap_or(i32::MAX))
}
