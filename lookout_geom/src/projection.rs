// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between geographic and planar coordinates.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `tan`, `ln`, `exp` and `atan`

/// Half the extent of the spherical Mercator world, in metres.
pub const C1: f64 = 20_037_508.34;

/// Latitude bound accepted by the checked conversions.
pub const MAX_LATITUDE: f64 = 90.0;

/// A longitude/latitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GeoPoint {
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
    /// Latitude in degrees, `(-90, 90)`.
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// An easting/northing pair in projected units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PlanarPoint {
    /// Easting.
    pub e: f64,
    /// Northing.
    pub n: f64,
}

impl PlanarPoint {
    /// Creates a point from easting and northing.
    #[must_use]
    pub const fn new(e: f64, n: f64) -> Self {
        Self { e, n }
    }
}

/// Error returned by [`try_from_geo`] for inputs outside the projection domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectionError {
    /// Latitude is not strictly inside `(-90, 90)`.
    LatitudeOutOfRange(f64),
    /// Longitude is outside `[-180, 180]`.
    LongitudeOutOfRange(f64),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange(lat) => write!(f, "latitude {lat} is outside (-90, 90)"),
            Self::LongitudeOutOfRange(lon) => write!(f, "longitude {lon} is outside [-180, 180]"),
        }
    }
}

impl core::error::Error for ProjectionError {}

/// A map projection between geographic and planar space.
pub trait Projection {
    /// EPSG-style name of the projection, e.g. `"EPSG:3857"`.
    fn name(&self) -> &'static str;

    /// Projects a geographic point.
    fn from_geo(&self, geo: GeoPoint) -> PlanarPoint;

    /// Unprojects a planar point.
    fn to_geo(&self, planar: PlanarPoint) -> GeoPoint;
}

/// Spherical ("web") Mercator, EPSG:3857.
///
/// Latitudes of ±90° are outside the domain and produce non-finite
/// northings; callers clamp before projecting, or use [`try_from_geo`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WebMercator;

impl WebMercator {
    /// The projection name.
    pub const NAME: &'static str = "EPSG:3857";
}

impl Projection for WebMercator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn from_geo(&self, geo: GeoPoint) -> PlanarPoint {
        let e = geo.lon * C1 / 180.0;
        let n = C1 / PI * (FRAC_PI_4 + geo.lat * PI / 360.0).tan().ln();
        PlanarPoint { e, n }
    }

    fn to_geo(&self, planar: PlanarPoint) -> GeoPoint {
        let lon = planar.e * 180.0 / C1;
        let lat = 180.0 / PI * (2.0 * (planar.n * PI / C1).exp().atan() - FRAC_PI_2);
        GeoPoint { lon, lat }
    }
}

/// Plate carrée, EPSG:4326: degrees are used directly as planar units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Equirectangular;

impl Equirectangular {
    /// The projection name.
    pub const NAME: &'static str = "EPSG:4326";
}

impl Projection for Equirectangular {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn from_geo(&self, geo: GeoPoint) -> PlanarPoint {
        PlanarPoint::new(geo.lon, geo.lat)
    }

    fn to_geo(&self, planar: PlanarPoint) -> GeoPoint {
        GeoPoint::new(planar.e, planar.n)
    }
}

/// Projects through [`WebMercator`].
#[must_use]
pub fn from_geo(geo: GeoPoint) -> PlanarPoint {
    WebMercator.from_geo(geo)
}

/// Unprojects through [`WebMercator`].
#[must_use]
pub fn to_geo(planar: PlanarPoint) -> GeoPoint {
    WebMercator.to_geo(planar)
}

/// Projects through [`WebMercator`], rejecting inputs outside its domain.
///
/// # Errors
///
/// Returns a [`ProjectionError`] for a latitude not strictly inside
/// `(-90, 90)` or a longitude outside `[-180, 180]` (NaN included).
pub fn try_from_geo(geo: GeoPoint) -> Result<PlanarPoint, ProjectionError> {
    if !(geo.lat > -MAX_LATITUDE && geo.lat < MAX_LATITUDE) {
        return Err(ProjectionError::LatitudeOutOfRange(geo.lat));
    }
    if !(-180.0..=180.0).contains(&geo.lon) {
        return Err(ProjectionError::LongitudeOutOfRange(geo.lon));
    }
    Ok(from_geo(geo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn origin_maps_to_origin() {
        let p = from_geo(GeoPoint::new(0.0, 0.0));
        assert!(approx_eq(p.e, 0.0, 1e-9));
        assert!(approx_eq(p.n, 0.0, 1e-6));
    }

    #[test]
    fn antimeridian_maps_to_half_extent() {
        let p = from_geo(GeoPoint::new(180.0, 0.0));
        assert!(approx_eq(p.e, C1, 1e-6));
        let q = from_geo(GeoPoint::new(-180.0, 0.0));
        assert!(approx_eq(q.e, -C1, 1e-6));
    }

    #[test]
    fn web_mercator_limit_latitude_is_square() {
        // The square web-map limit latitude projects to the half extent.
        let p = from_geo(GeoPoint::new(0.0, 85.051_128_779_806_59));
        assert!(approx_eq(p.n, C1, 1e-2));
    }

    #[test]
    fn round_trip_over_valid_domain() {
        let mut lat = -89.0;
        while lat <= 89.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                let geo = GeoPoint::new(lon, lat);
                let back = to_geo(from_geo(geo));
                assert!(approx_eq(back.lon, lon, 1e-9), "lon {lon} lat {lat}");
                assert!(approx_eq(back.lat, lat, 1e-9), "lon {lon} lat {lat}");
                lon += 22.5;
            }
            lat += 4.45;
        }
    }

    #[test]
    fn poles_are_not_finite() {
        let north = from_geo(GeoPoint::new(0.0, 90.0));
        assert!(!north.n.is_finite() || north.n.abs() > 1e8);
        let south = from_geo(GeoPoint::new(0.0, -90.0));
        assert!(!south.n.is_finite());
    }

    #[test]
    fn checked_projection_rejects_out_of_domain() {
        assert_eq!(
            try_from_geo(GeoPoint::new(0.0, 90.0)),
            Err(ProjectionError::LatitudeOutOfRange(90.0))
        );
        assert_eq!(
            try_from_geo(GeoPoint::new(181.0, 0.0)),
            Err(ProjectionError::LongitudeOutOfRange(181.0))
        );
        assert!(try_from_geo(GeoPoint::new(f64::NAN, 0.0)).is_err());
        assert!(try_from_geo(GeoPoint::new(10.0, 45.0)).is_ok());
    }

    #[test]
    fn equirectangular_is_identity() {
        let geo = GeoPoint::new(-3.2, 55.9);
        let planar = Equirectangular.from_geo(geo);
        assert_eq!(planar, PlanarPoint::new(-3.2, 55.9));
        assert_eq!(Equirectangular.to_geo(planar), geo);
        assert_eq!(WebMercator.name(), "EPSG:3857");
    }
}
