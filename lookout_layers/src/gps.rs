// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position marker fed by location fixes.

use kurbo::Point;
use lookout_bus::{ChannelSet, Receiver};
use lookout_geom::{GeoPoint, PlanarPoint, from_geo, try_from_geo};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::MapEvent;
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// Configuration of a [`GpsLayer`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GpsConfig {
    /// Marker element id.
    pub marker_id: String,
    /// West edge of the map, degrees.
    pub lon_min: f64,
    /// East edge of the map, degrees.
    pub lon_max: f64,
    /// South edge of the map, degrees.
    pub lat_min: f64,
    /// North edge of the map, degrees.
    pub lat_max: f64,
}

impl WidgetConfig for GpsConfig {
    const KIND: &'static str = "gps";
}

/// Places a marker at each location fix that falls inside the map.
#[derive(Debug)]
pub struct GpsLayer {
    ctx: WidgetContext,
    config: GpsConfig,
    min: PlanarPoint,
    max: PlanarPoint,
}

impl GpsLayer {
    /// Display position of `fix`, or `None` if it is outside the map.
    #[must_use]
    pub fn locate(&self, fix: GeoPoint) -> Option<Point> {
        let c = &self.config;
        if !(c.lon_min..=c.lon_max).contains(&fix.lon) || !(c.lat_min..=c.lat_max).contains(&fix.lat)
        {
            return None;
        }
        let p = from_geo(fix);
        let (w, h) = (self.ctx.width, self.ctx.height);
        let origin = self.ctx.center;
        Some(Point::new(
            origin.x - w / 2.0 + w * (p.e - self.min.e) / (self.max.e - self.min.e),
            origin.y + h / 2.0 - h * (p.n - self.min.n) / (self.max.n - self.min.n),
        ))
    }

    /// Moves the marker to `fix` and shows it; fixes outside the map are
    /// ignored.
    pub fn show_marker(&mut self, fix: GeoPoint) -> Option<Point> {
        let Some(at) = self.locate(fix) else {
            trace!(lon = fix.lon, lat = fix.lat, "fix outside map");
            return None;
        };
        debug!(lon = fix.lon, lat = fix.lat, x = at.x, y = at.y, "gps fix");
        let id = self.config.marker_id.as_str();
        self.ctx.apply_all([
            ElementUpdate::set(id, "cx", at.x),
            ElementUpdate::set(id, "cy", at.y),
            ElementUpdate::show(id),
        ]);
        Some(at)
    }
}

impl Widget for GpsLayer {
    type Config = GpsConfig;

    fn build(ctx: WidgetContext, config: GpsConfig) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            kind: GpsConfig::KIND,
            reason,
        };
        let min = try_from_geo(GeoPoint::new(config.lon_min, config.lat_min))
            .map_err(|e| invalid(e.to_string()))?;
        let max = try_from_geo(GeoPoint::new(config.lon_max, config.lat_max))
            .map_err(|e| invalid(e.to_string()))?;
        if !(max.e > min.e && max.n > min.n) {
            return Err(invalid("bounds are empty".into()));
        }
        Ok(Self {
            ctx,
            config,
            min,
            max,
        })
    }
}

impl Receiver<MapEvent> for GpsLayer {
    fn channels(&self) -> ChannelSet {
        ChannelSet::empty()
    }

    fn receive(&mut self, _message: &MapEvent) {}
}
