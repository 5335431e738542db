// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map container: owner of the viewport.

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use lookout_bus::{ChannelSet, Message, Receiver};
use lookout_viewport::{Viewport, ViewportConfig, ViewportEvent, ViewportEvents};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::{Direction, LayerSetting, LayerValue, MapEvent};
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// Opacity used when a layer without a configured opacity is toggled on.
pub const DEFAULT_LAYER_OPACITY: f64 = 1.0;

/// Configuration of a [`MapContainer`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MapConfig {
    /// Opacity restored when a layer is toggled on, by layer id.
    #[serde(default)]
    pub opacities: HashMap<String, f64>,
    /// Highest zoom level.
    pub max_zoom: f64,
    /// Group holding the map layers.
    #[serde(rename = "layerGroupId")]
    pub layer_group_id: String,
    /// Group holding the layers' popups.
    #[serde(rename = "popGroupId")]
    pub pop_group_id: String,
    /// Element receiving drag input, if the map is draggable.
    #[serde(rename = "overlayId", default)]
    pub overlay_id: Option<String>,
    /// Reset any pan when fully zoomed out.
    #[serde(default = "pin_by_default")]
    pub pin_at_unit_zoom: bool,
}

fn pin_by_default() -> bool {
    true
}

impl WidgetConfig for MapConfig {
    const KIND: &'static str = "map";
}

/// Hosts the map layers and drives their pan/zoom.
///
/// Consumes `pan`, `zoom` and `manage_layers`. After each viewport change it
/// rewrites the layer and popup group transforms and republishes `zoom` (for
/// zoom changes) then `visible_window` under its own id. Search requests
/// are relayed unchanged to the map's subscribers.
#[derive(Debug)]
pub struct MapContainer {
    ctx: WidgetContext,
    config: MapConfig,
    viewport: Viewport,
}

impl MapContainer {
    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Moves one step in `direction`.
    pub fn pan_step(&mut self, direction: Direction) {
        self.pan(direction.step());
    }

    /// Pans by a display-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        let events = self.viewport.pan(delta);
        self.emit(events);
    }

    /// Zooms to `level`; ignored outside `[1, max_zoom]`.
    pub fn zoom(&mut self, level: f64) {
        let events = self.viewport.zoom(level);
        self.emit(events);
    }

    /// Starts a drag at `pos`.
    pub fn drag_start(&mut self, pos: Point) {
        self.viewport.drag_start(pos);
    }

    /// Continues a drag; pans by the movement since the last position.
    pub fn drag_move(&mut self, pos: Point) {
        let events = self.viewport.drag_move(pos);
        self.emit(events);
    }

    /// Ends a drag.
    pub fn drag_end(&mut self) {
        self.viewport.drag_end();
    }

    /// Applies a `manage_layers` request.
    pub fn manage_layer(&mut self, setting: &LayerSetting) {
        let opacity = match setting.value {
            LayerValue::Opacity(opacity) => opacity,
            LayerValue::Toggle(false) => 0.0,
            LayerValue::Toggle(true) => match self.config.opacities.get(&setting.layer) {
                Some(&opacity) => opacity,
                None => {
                    warn!(layer = %setting.layer, "no configured opacity for layer");
                    DEFAULT_LAYER_OPACITY
                }
            },
        };
        debug!(layer = %setting.layer, opacity, "manage layer");
        self.ctx
            .apply(ElementUpdate::set(setting.layer.as_str(), "opacity", opacity));
    }

    /// Republishes the current zoom and visible window.
    ///
    /// Layers that only react to viewport events use this to pick up the
    /// initial view.
    pub fn announce(&mut self) {
        let mut events = ViewportEvents::new();
        events.push(ViewportEvent::Zoom(self.viewport.zoom_level()));
        events.push(ViewportEvent::VisibleWindow(self.viewport.visible_window()));
        self.emit(events);
    }

    fn emit(&mut self, events: ViewportEvents) {
        if events.is_empty() {
            return;
        }
        let transform = self.viewport.transform();
        self.ctx.apply_all([
            ElementUpdate::set(self.config.layer_group_id.as_str(), "transform", transform),
            ElementUpdate::set(self.config.pop_group_id.as_str(), "transform", transform),
        ]);
        for event in events {
            let message = match event {
                ViewportEvent::Zoom(level) => MapEvent::Zoom(level),
                ViewportEvent::VisibleWindow(window) => MapEvent::VisibleWindow(window),
            };
            self.ctx.publish(&message);
        }
    }
}

impl Widget for MapContainer {
    type Config = MapConfig;

    fn build(ctx: WidgetContext, config: MapConfig) -> Result<Self, ConfigError> {
        if !(config.max_zoom >= 1.0 && config.max_zoom.is_finite()) {
            return Err(ConfigError::Invalid {
                kind: MapConfig::KIND,
                reason: format!("max_zoom must be at least 1, got {}", config.max_zoom),
            });
        }
        let viewport = Viewport::new(
            ViewportConfig::new(ctx.center, ctx.width, ctx.height, config.max_zoom)
                .with_pin_at_unit_zoom(config.pin_at_unit_zoom),
        );
        Ok(Self {
            ctx,
            config,
            viewport,
        })
    }
}

impl Receiver<MapEvent> for MapContainer {
    fn channels(&self) -> ChannelSet {
        ChannelSet::PAN
            | ChannelSet::ZOOM
            | ChannelSet::MANAGE_LAYERS
            | ChannelSet::SEARCH
            | ChannelSet::FILTER
            | ChannelSet::HIGHLIGHT
    }

    fn receive(&mut self, message: &MapEvent) {
        match message {
            MapEvent::Pan(direction) => self.pan_step(*direction),
            MapEvent::Zoom(level) => self.zoom(*level),
            MapEvent::ManageLayers(setting) => self.manage_layer(setting),
            MapEvent::Search(_) | MapEvent::Filter(_) | MapEvent::Highlight(_) => {
                self.ctx.publish(message);
            }
            other => debug!(channel = ?other.channel(), "map ignores message"),
        }
    }
}
