// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pan/zoom control drawn in the corner of a map.

use lookout_bus::{ChannelSet, Receiver};
use lookout_viewport::ZoomLadder;
use serde::Deserialize;
use tracing::debug;

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::{Direction, MapEvent};
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// Configuration of a [`ZoomControl`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ZoomControlConfig {
    /// Selectable zoom levels, ascending.
    pub zoom_levels: Vec<f64>,
    /// Index of the starting level.
    #[serde(default)]
    pub initial_zoom: usize,
    /// Indicator segment ids, one per level.
    #[serde(default)]
    pub zoom_segments: Vec<String>,
    /// Fill of lit segments.
    #[serde(default = "default_stroke")]
    pub stroke: String,
    /// Fill of unlit segments.
    #[serde(default = "default_fill")]
    pub fill: String,
}

fn default_stroke() -> String {
    "black".into()
}

fn default_fill() -> String {
    "white".into()
}

impl WidgetConfig for ZoomControlConfig {
    const KIND: &'static str = "panzoom";
}

/// A button on the control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlButton {
    /// Zoom in one level.
    ZoomIn,
    /// Zoom out one level.
    ZoomOut,
    /// Pan one step.
    Pan(Direction),
}

/// Publishes `zoom` and `pan` requests from button presses.
///
/// The control keeps its own zoom index and lights the indicator segments
/// up to it. It consumes nothing from the bus.
#[derive(Debug)]
pub struct ZoomControl {
    ctx: WidgetContext,
    config: ZoomControlConfig,
    ladder: ZoomLadder,
}

impl ZoomControl {
    /// The zoom ladder.
    #[must_use]
    pub fn ladder(&self) -> &ZoomLadder {
        &self.ladder
    }

    /// Handles a button press.
    pub fn press(&mut self, button: ControlButton) {
        let event = match button {
            ControlButton::ZoomIn | ControlButton::ZoomOut => {
                let level = if button == ControlButton::ZoomIn {
                    self.ladder.zoom_in()
                } else {
                    self.ladder.zoom_out()
                };
                self.paint_segments();
                debug!(level, index = self.ladder.index(), "zoom control");
                MapEvent::Zoom(level)
            }
            ControlButton::Pan(direction) => MapEvent::Pan(direction),
        };
        self.ctx.publish(&event);
    }

    fn paint_segments(&self) {
        let updates = self
            .config
            .zoom_segments
            .iter()
            .zip(self.ladder.lit_segments())
            .map(|(id, lit)| {
                let fill = if lit {
                    &self.config.stroke
                } else {
                    &self.config.fill
                };
                ElementUpdate::set(id.as_str(), "fill", fill)
            });
        self.ctx.apply_all(updates);
    }
}

impl Widget for ZoomControl {
    type Config = ZoomControlConfig;

    fn build(ctx: WidgetContext, config: ZoomControlConfig) -> Result<Self, ConfigError> {
        let ladder = ZoomLadder::new(config.zoom_levels.clone(), config.initial_zoom).map_err(
            |err| ConfigError::Invalid {
                kind: ZoomControlConfig::KIND,
                reason: err.to_string(),
            },
        )?;
        Ok(Self {
            ctx,
            config,
            ladder,
        })
    }
}

impl Receiver<MapEvent> for ZoomControl {
    fn channels(&self) -> ChannelSet {
        ChannelSet::empty()
    }

    fn receive(&mut self, _message: &MapEvent) {}
}
