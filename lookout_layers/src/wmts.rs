// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster tile layer.

use kurbo::{Rect, Vec2};
use lookout_bus::{ChannelSet, Receiver};
use lookout_geom::VisibleWindow;
use lookout_tiles::{Tile, TilePyramid, TileVisibility, ZoomBucket};
use serde::Deserialize;
use tracing::debug;

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::MapEvent;
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// One tile of a [`BucketConfig`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TileConfig {
    /// Image element id.
    pub id: String,
    /// Home x.
    pub x: f64,
    /// Home y.
    pub y: f64,
    /// Home width.
    pub width: f64,
    /// Home height.
    pub height: f64,
    /// Image source.
    pub url: String,
}

/// One zoom bucket of a [`WmtsConfig`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BucketConfig {
    /// Group element id.
    pub group: String,
    /// Home → world scale.
    #[serde(default = "unit_scale")]
    pub scale: f64,
    /// Home → world x offset.
    #[serde(default)]
    pub offset_x: f64,
    /// Home → world y offset.
    #[serde(default)]
    pub offset_y: f64,
    /// Tiles loaded on demand; empty for pre-rendered buckets.
    #[serde(default)]
    pub tiles: Vec<TileConfig>,
}

fn unit_scale() -> f64 {
    1.0
}

/// Configuration of a [`WmtsLayer`]: its buckets by ascending zoom.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WmtsConfig {
    /// Zoom buckets `1, 2, 4, …`.
    pub buckets: Vec<BucketConfig>,
}

impl WidgetConfig for WmtsConfig {
    const KIND: &'static str = "wmts";
}

impl From<&BucketConfig> for ZoomBucket {
    fn from(config: &BucketConfig) -> Self {
        let mut bucket = Self::new(config.group.as_str())
            .with_placement(config.scale, Vec2::new(config.offset_x, config.offset_y));
        bucket.tiles = config
            .tiles
            .iter()
            .map(|t| {
                Tile::new(
                    t.id.as_str(),
                    Rect::new(t.x, t.y, t.x + t.width, t.y + t.height),
                    t.url.as_str(),
                )
            })
            .collect();
        bucket
    }
}

/// Shows the tile bucket for the current zoom and loads visible tiles.
///
/// `zoom` only records the level; the following `visible_window` does the
/// work.
#[derive(Debug)]
pub struct WmtsLayer {
    ctx: WidgetContext,
    tiles: TileVisibility,
    zoom: f64,
}

impl WmtsLayer {
    /// Builds a layer over planned buckets.
    #[must_use]
    pub fn from_pyramid(ctx: WidgetContext, pyramid: TilePyramid) -> Self {
        Self {
            ctx,
            tiles: pyramid.into_visibility(),
            zoom: 1.0,
        }
    }

    /// Tile visibility state.
    #[must_use]
    pub fn tiles(&self) -> &TileVisibility {
        &self.tiles
    }

    /// Last zoom level received.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// Updates bucket visibility and loads newly visible tiles.
    pub fn refresh(&mut self, window: &VisibleWindow) {
        let update = self.tiles.update(self.zoom, window);
        let buckets = self.tiles.buckets();
        let shown = update
            .active
            .map(|i| ElementUpdate::show(buckets[i].group.as_str()));
        let hidden = update
            .hidden
            .iter()
            .map(|&i| ElementUpdate::hide(buckets[i].group.as_str()));
        let loads = update
            .loads
            .iter()
            .map(|load| ElementUpdate::set(load.id.as_str(), "href", &load.url));
        debug!(
            zoom = self.zoom,
            active = ?update.active,
            loads = update.loads.len(),
            "wmts refresh"
        );
        self.ctx.apply_all(shown.into_iter().chain(hidden).chain(loads));
    }
}

impl Widget for WmtsLayer {
    type Config = WmtsConfig;

    fn build(ctx: WidgetContext, config: WmtsConfig) -> Result<Self, ConfigError> {
        let buckets = config.buckets.iter().map(ZoomBucket::from).collect();
        Ok(Self {
            ctx,
            tiles: TileVisibility::new(buckets),
            zoom: 1.0,
        })
    }
}

impl Receiver<MapEvent> for WmtsLayer {
    fn channels(&self) -> ChannelSet {
        ChannelSet::ZOOM | ChannelSet::VISIBLE_WINDOW
    }

    fn receive(&mut self, message: &MapEvent) {
        match message {
            MapEvent::Zoom(level) => self.zoom = *level,
            MapEvent::VisibleWindow(window) => self.refresh(window),
            _ => {}
        }
    }
}
