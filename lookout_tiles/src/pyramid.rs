// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planning the zoom buckets of a WMTS layer.
//!
//! A map spans a lon/lat box drawn `width` display units wide. For each zoom
//! bucket `1, 2, 4, …` up to the map's maximum zoom, the plan picks a slippy
//! zoom whose tiles are sharp at that magnification, lists the tiles covering
//! the box, and computes the placement that lines the tiles up with the map's
//! world coordinates.

use core::fmt;

use kurbo::{Point, Rect, Vec2};
use lookout_geom::{GeoPoint, PlanarPoint, Projection, ProjectionError, WebMercator, try_from_geo};
use tracing::debug;

use crate::bucket::{Tile, ZoomBucket};
use crate::slippy::{
    DEFAULT_ATTRIBUTION, DEFAULT_URL_TEMPLATE, TILE_SIZE, expand_url, tile_north_west,
    tile_position, tile_width_m,
};
use crate::visibility::TileVisibility;

/// Slippy zoom levels searched for the base zoom, `0..BASE_ZOOM_SEARCH`.
pub const BASE_ZOOM_SEARCH: u32 = 16;

/// Deepest slippy zoom a plan may request.
pub const MAX_SLIPPY_ZOOM: u32 = 24;

/// Error returned by [`TilePyramid::plan`].
#[derive(Clone, Debug, PartialEq)]
pub enum PlanError {
    /// Only spherical Mercator tiles are supported.
    UnsupportedProjection(&'static str),
    /// Display size is not positive and finite.
    InvalidSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// The bounding box has no area.
    EmptyBounds,
    /// Maximum zoom is below 1 or needs tiles deeper than [`MAX_SLIPPY_ZOOM`].
    ZoomOutOfRange(f64),
    /// A bound lies outside the projection domain.
    Projection(ProjectionError),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedProjection(name) => write!(
                f,
                "tile layers require projection {}, got {name}",
                WebMercator::NAME
            ),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid tile layer size {width}x{height}")
            }
            Self::EmptyBounds => f.write_str("tile layer bounds are empty"),
            Self::ZoomOutOfRange(zoom) => write!(f, "maximum zoom {zoom} cannot be tiled"),
            Self::Projection(err) => write!(f, "tile layer bounds: {err}"),
        }
    }
}

impl core::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Projection(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectionError> for PlanError {
    fn from(err: ProjectionError) -> Self {
        Self::Projection(err)
    }
}

/// A lon/lat bounding box: south-west and north-east corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    /// South-west corner.
    pub min: GeoPoint,
    /// North-east corner.
    pub max: GeoPoint,
}

impl GeoBounds {
    /// Creates bounds from two corners.
    #[must_use]
    pub const fn new(min: GeoPoint, max: GeoPoint) -> Self {
        Self { min, max }
    }
}

/// Inputs to [`TilePyramid::plan`].
#[derive(Clone, Debug, PartialEq)]
pub struct PyramidRequest {
    /// Prefix for generated group and tile ids.
    pub id_prefix: String,
    /// Area covered by the map.
    pub bounds: GeoBounds,
    /// Display width of the map.
    pub width: f64,
    /// Display height of the map.
    pub height: f64,
    /// World-space center of the map.
    pub center: Point,
    /// Highest zoom level the map allows.
    pub zoom_to: f64,
    /// Tile URL with `{zoom}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Credit line the tile source requires.
    pub attribution: String,
}

impl PyramidRequest {
    /// Creates a request centered on the display area, zooming to 1 only,
    /// against the default tile source.
    #[must_use]
    pub fn new(bounds: GeoBounds, width: f64, height: f64) -> Self {
        Self {
            id_prefix: "wmts".into(),
            bounds,
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            zoom_to: 1.0,
            url_template: DEFAULT_URL_TEMPLATE.into(),
            attribution: DEFAULT_ATTRIBUTION.into(),
        }
    }

    /// Sets the id prefix.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Sets the world-space center.
    #[must_use]
    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    /// Sets the highest zoom level.
    #[must_use]
    pub fn with_zoom_to(mut self, zoom_to: f64) -> Self {
        self.zoom_to = zoom_to;
        self
    }

    /// Sets the tile URL template.
    #[must_use]
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    /// Sets the attribution; pair it with [`Self::with_url_template`].
    #[must_use]
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }
}

/// One planned zoom bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct PyramidLevel {
    /// Map zoom level this bucket serves, a power of two.
    pub level: u32,
    /// Slippy zoom the tiles are fetched at.
    pub slippy_zoom: u32,
    /// Tiles and their placement.
    pub bucket: ZoomBucket,
}

/// The zoom buckets of a WMTS layer.
#[derive(Clone, Debug, PartialEq)]
pub struct TilePyramid {
    base_zoom: u32,
    levels: Vec<PyramidLevel>,
    attribution: String,
}

impl TilePyramid {
    /// Plans the buckets for `request`.
    ///
    /// The base slippy zoom is the first zoom in `0..16` whose tiles have
    /// fewer metres per pixel than the map at zoom 1. Bucket `2^i` uses
    /// slippy zoom `base + i`.
    ///
    /// # Errors
    ///
    /// See [`PlanError`].
    pub fn plan(request: &PyramidRequest, projection: &dyn Projection) -> Result<Self, PlanError> {
        if projection.name() != WebMercator::NAME {
            return Err(PlanError::UnsupportedProjection(projection.name()));
        }
        let (width, height) = (request.width, request.height);
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(PlanError::InvalidSize { width, height });
        }
        if !(request.zoom_to >= 1.0) {
            return Err(PlanError::ZoomOutOfRange(request.zoom_to));
        }
        try_from_geo(request.bounds.min)?;
        try_from_geo(request.bounds.max)?;

        let lo = projection.from_geo(request.bounds.min);
        let hi = projection.from_geo(request.bounds.max);
        let width_m = hi.e - lo.e;
        if !(width_m > 0.0 && hi.n > lo.n) {
            return Err(PlanError::EmptyBounds);
        }
        let mid = projection.to_geo(PlanarPoint::new(
            lo.e + 0.5 * width_m,
            lo.n + 0.5 * (hi.n - lo.n),
        ));

        let m_per_pixel = width_m / width;
        let base_zoom = (0..BASE_ZOOM_SEARCH)
            .find(|&z| tile_width_m(mid.lat, z) / TILE_SIZE < m_per_pixel)
            .unwrap_or(BASE_ZOOM_SEARCH - 1);
        debug!(base_zoom, m_per_pixel, "planning tile pyramid");

        let mut steps = Vec::new();
        let mut level = 1_u32;
        while f64::from(level) <= request.zoom_to {
            let slippy_zoom = base_zoom + u32::try_from(steps.len()).unwrap_or(u32::MAX);
            if slippy_zoom > MAX_SLIPPY_ZOOM || level == u32::MAX {
                return Err(PlanError::ZoomOutOfRange(request.zoom_to));
            }
            steps.push((level, slippy_zoom));
            level = level.saturating_mul(2);
        }

        let mut levels = Vec::with_capacity(steps.len());
        for (level, slippy_zoom) in steps {
            let bucket = plan_bucket(request, projection, level, slippy_zoom, mid, width_m);
            debug!(
                level,
                slippy_zoom,
                tiles = bucket.tiles.len(),
                scale = bucket.scale,
                "planned tile bucket"
            );
            levels.push(PyramidLevel {
                level,
                slippy_zoom,
                bucket,
            });
        }
        Ok(Self {
            base_zoom,
            levels,
            attribution: request.attribution.clone(),
        })
    }

    /// Slippy zoom of the zoom-1 bucket.
    #[must_use]
    pub fn base_zoom(&self) -> u32 {
        self.base_zoom
    }

    /// Credit line to display alongside the tiles.
    #[must_use]
    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// Planned buckets, ascending.
    #[must_use]
    pub fn levels(&self) -> &[PyramidLevel] {
        &self.levels
    }

    /// Hands the buckets to a fresh [`TileVisibility`].
    #[must_use]
    pub fn into_visibility(self) -> TileVisibility {
        TileVisibility::new(self.levels.into_iter().map(|l| l.bucket).collect())
    }
}

fn plan_bucket(
    request: &PyramidRequest,
    projection: &dyn Projection,
    level: u32,
    zoom: u32,
    mid: GeoPoint,
    width_m: f64,
) -> ZoomBucket {
    let level_f = f64::from(level);
    let sw = tile_position(request.bounds.min, zoom);
    let ne = tile_position(request.bounds.max, zoom);
    let centre = tile_position(mid, zoom);
    let (tx_min, tx_max) = (sw.x, ne.x);
    let (ty_min, ty_max) = (ne.y, sw.y);

    let nw0 = projection.from_geo(tile_north_west(tx_min, ty_min, zoom));
    let nw1 = projection.from_geo(tile_north_west(tx_min + 1, ty_min + 1, zoom));
    let tiles_m_per_pixel = (nw1.e - nw0.e) / TILE_SIZE;
    let target_m_per_pixel = width_m / (request.width * level_f);
    let scale = tiles_m_per_pixel / target_m_per_pixel;

    let tile_size = TILE_SIZE / level_f;
    #[allow(clippy::cast_precision_loss, reason = "tile index deltas are small")]
    let offset = Vec2::new(
        tile_size * (centre.fx + (centre.x - tx_min) as f64),
        tile_size * (centre.fy + (centre.y - ty_min) as f64),
    );

    let c = request.center;
    let shift = Vec2::new(request.width / 2.0, request.height / 2.0) - offset;
    let pivot = Vec2::new(c.x - shift.x, c.y - shift.y);
    let placement = shift - pivot * (scale - 1.0);

    let origin = Point::new(c.x - request.width / 2.0, c.y - request.height / 2.0);
    let mut bucket = ZoomBucket::new(format!("{}-zoom-{level}", request.id_prefix))
        .with_placement(scale, placement);
    for x in tx_min..=tx_max {
        for y in ty_min..=ty_max {
            #[allow(clippy::cast_precision_loss, reason = "tile index deltas are small")]
            let corner = origin + Vec2::new((x - tx_min) as f64, (y - ty_min) as f64) * tile_size;
            bucket.tiles.push(Tile::new(
                format!("{}-{level}-{x}-{y}", request.id_prefix),
                Rect::from_origin_size(corner, (tile_size, tile_size)),
                expand_url(&request.url_template, zoom, x, y),
            ));
        }
    }
    bucket
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use lookout_geom::{Equirectangular, GeoPoint, PlanarPoint, Projection, WebMercator};

    use super::{GeoBounds, PlanError, PyramidRequest, TilePyramid};
    use crate::slippy::{DEFAULT_ATTRIBUTION, TILE_SIZE, tile_position, tile_width_m};

    fn europe() -> PyramidRequest {
        let bounds = GeoBounds::new(GeoPoint::new(-10.0, 40.0), GeoPoint::new(10.0, 60.0));
        let lo = WebMercator.from_geo(bounds.min);
        let hi = WebMercator.from_geo(bounds.max);
        let width = 800.0;
        let height = width * (hi.n - lo.n) / (hi.e - lo.e);
        PyramidRequest::new(bounds, width, height)
            .with_center(Point::new(0.0, 0.0))
            .with_zoom_to(8.0)
            .with_id_prefix("osm")
            .with_url_template("https://t/{zoom}/{x}/{y}.png")
    }

    #[test]
    fn levels_double_and_zooms_step() {
        let pyramid = TilePyramid::plan(&europe(), &WebMercator).unwrap();
        let levels: Vec<(u32, u32)> = pyramid
            .levels()
            .iter()
            .map(|l| (l.level, l.slippy_zoom - pyramid.base_zoom()))
            .collect();
        assert_eq!(levels, [(1, 0), (2, 1), (4, 2), (8, 3)]);
        assert_eq!(pyramid.levels()[2].bucket.group, "osm-zoom-4");
    }

    #[test]
    fn base_zoom_is_first_sharp_enough() {
        let req = europe();
        let pyramid = TilePyramid::plan(&req, &WebMercator).unwrap();
        let lo = WebMercator.from_geo(req.bounds.min);
        let hi = WebMercator.from_geo(req.bounds.max);
        let mid = WebMercator.to_geo(PlanarPoint::new((lo.e + hi.e) / 2.0, (lo.n + hi.n) / 2.0));
        let mpp = (hi.e - lo.e) / req.width;
        let z = pyramid.base_zoom();
        assert!(tile_width_m(mid.lat, z) / TILE_SIZE < mpp);
        assert!(z == 0 || tile_width_m(mid.lat, z - 1) / TILE_SIZE >= mpp);
    }

    #[test]
    fn map_midpoint_lands_on_center() {
        let req = europe();
        let pyramid = TilePyramid::plan(&req, &WebMercator).unwrap();
        let lo = WebMercator.from_geo(req.bounds.min);
        let hi = WebMercator.from_geo(req.bounds.max);
        let mid = WebMercator.to_geo(PlanarPoint::new((lo.e + hi.e) / 2.0, (lo.n + hi.n) / 2.0));
        for level in pyramid.levels() {
            let z = level.slippy_zoom;
            let sw = tile_position(req.bounds.min, z);
            let ne = tile_position(req.bounds.max, z);
            let c = tile_position(mid, z);
            let size = TILE_SIZE / f64::from(level.level);
            let home = Rect::from_origin_size(
                (
                    -req.width / 2.0 + size * ((c.x - sw.x) as f64 + c.fx),
                    -req.height / 2.0 + size * ((c.y - ne.y) as f64 + c.fy),
                ),
                (0.0, 0.0),
            );
            let placed = level.bucket.placed(home);
            assert!(placed.x0.abs() < 1e-6, "level {}: {placed:?}", level.level);
            assert!(placed.y0.abs() < 1e-6, "level {}: {placed:?}", level.level);
        }
    }

    #[test]
    fn placed_tiles_match_ground_size_and_cover_the_map() {
        let req = europe();
        let pyramid = TilePyramid::plan(&req, &WebMercator).unwrap();
        let lo = WebMercator.from_geo(req.bounds.min);
        let hi = WebMercator.from_geo(req.bounds.max);
        let map = Rect::new(
            -req.width / 2.0,
            -req.height / 2.0,
            req.width / 2.0,
            req.height / 2.0,
        );
        for level in pyramid.levels() {
            let bucket = &level.bucket;
            let tile_m = 2.0 * lookout_geom::C1 / 2.0_f64.powi(level.slippy_zoom as i32);
            let expected = tile_m * req.width / (hi.e - lo.e);
            let cover = bucket
                .tiles
                .iter()
                .map(|t| bucket.placed(t.home))
                .inspect(|r| assert!((r.width() - expected).abs() < 1e-6 * expected))
                .reduce(|a, b| a.union(b))
                .unwrap();
            assert!(cover.x0 <= map.x0 + 1e-6 && cover.x1 >= map.x1 - 1e-6);
            assert!(cover.y0 <= map.y0 + 1e-6 && cover.y1 >= map.y1 - 1e-6);
        }
    }

    #[test]
    fn urls_and_ids_follow_tiles() {
        let pyramid = TilePyramid::plan(&europe(), &WebMercator).unwrap();
        let level = &pyramid.levels()[0];
        let tile = &level.bucket.tiles[0];
        let id = tile.id.as_str();
        let (x, y) = {
            let mut parts = id.strip_prefix("osm-1-").unwrap().split('-');
            (parts.next().unwrap(), parts.next().unwrap())
        };
        assert_eq!(tile.url, format!("https://t/{}/{x}/{y}.png", level.slippy_zoom));
    }

    #[test]
    fn attribution_travels_with_the_plan() {
        let pyramid = TilePyramid::plan(&europe(), &WebMercator).unwrap();
        assert_eq!(pyramid.attribution(), DEFAULT_ATTRIBUTION);

        let custom = europe().with_attribution("Tiles © Example");
        let pyramid = TilePyramid::plan(&custom, &WebMercator).unwrap();
        assert_eq!(pyramid.attribution(), "Tiles © Example");
    }

    #[test]
    fn rejects_bad_requests() {
        let req = europe();
        assert_eq!(
            TilePyramid::plan(&req, &Equirectangular),
            Err(PlanError::UnsupportedProjection("EPSG:4326"))
        );
        let mut flat = req.clone();
        flat.bounds.max = flat.bounds.min;
        assert_eq!(TilePyramid::plan(&flat, &WebMercator), Err(PlanError::EmptyBounds));
        let narrow = PyramidRequest { width: 0.0, ..req.clone() };
        assert!(matches!(
            TilePyramid::plan(&narrow, &WebMercator),
            Err(PlanError::InvalidSize { .. })
        ));
        let deep = req.clone().with_zoom_to(f64::from(1_u32 << 30));
        assert!(matches!(
            TilePyramid::plan(&deep, &WebMercator),
            Err(PlanError::ZoomOutOfRange(_))
        ));
        let polar = PyramidRequest {
            bounds: GeoBounds::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 90.0)),
            ..req
        };
        assert!(matches!(
            TilePyramid::plan(&polar, &WebMercator),
            Err(PlanError::Projection(_))
        ));
    }
}
