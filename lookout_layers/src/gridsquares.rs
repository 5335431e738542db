// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid line overlay.

use lookout_bus::{ChannelSet, Receiver};
use serde::Deserialize;

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::MapEvent;
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// Configuration of a [`GridSquaresLayer`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GridSquaresConfig {
    /// Grid line width at zoom 1.
    pub stroke_width: f64,
    /// Label font size at zoom 1.
    pub font_height: f64,
    /// Grid line ids.
    #[serde(default)]
    pub lines: Vec<String>,
    /// Label ids.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl WidgetConfig for GridSquaresConfig {
    const KIND: &'static str = "gridsquares";
}

/// Keeps grid lines and labels at a constant screen size under zoom.
#[derive(Debug)]
pub struct GridSquaresLayer {
    ctx: WidgetContext,
    config: GridSquaresConfig,
}

impl GridSquaresLayer {
    /// Rescales lines and labels for `level`.
    pub fn zoom(&mut self, level: f64) {
        let c = &self.config;
        let lines = c
            .lines
            .iter()
            .map(|id| ElementUpdate::set(id.as_str(), "stroke-width", c.stroke_width / level));
        let labels = c
            .labels
            .iter()
            .map(|id| ElementUpdate::set(id.as_str(), "font-size", c.font_height / level));
        self.ctx.apply_all(lines.chain(labels));
    }
}

impl Widget for GridSquaresLayer {
    type Config = GridSquaresConfig;

    fn build(ctx: WidgetContext, config: GridSquaresConfig) -> Result<Self, ConfigError> {
        Ok(Self { ctx, config })
    }
}

impl Receiver<MapEvent> for GridSquaresLayer {
    fn channels(&self) -> ChannelSet {
        ChannelSet::ZOOM
    }

    fn receive(&mut self, message: &MapEvent) {
        if let MapEvent::Zoom(level) = message {
            self.zoom(*level);
        }
    }
}
