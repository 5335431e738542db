// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compass needle driven by device heading.

use lookout_bus::{ChannelSet, Receiver};
use serde::Deserialize;
use tracing::trace;

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::MapEvent;
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// Configuration of a [`CompassLayer`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CompassConfig {
    /// Needle element id.
    pub needle: String,
    /// Rotation center x.
    pub x: f64,
    /// Rotation center y.
    pub y: f64,
}

impl WidgetConfig for CompassConfig {
    const KIND: &'static str = "compass";
}

/// Rotates the needle to the reported heading. Consumes no bus channels.
#[derive(Debug)]
pub struct CompassLayer {
    ctx: WidgetContext,
    config: CompassConfig,
}

impl CompassLayer {
    /// Points the needle at `angle` degrees and shows it.
    pub fn heading(&mut self, angle: f64) {
        trace!(angle, "compass heading");
        let c = &self.config;
        self.ctx.apply_all([
            ElementUpdate::set(
                c.needle.as_str(),
                "transform",
                format!("rotate({angle} {} {})", c.x, c.y),
            ),
            ElementUpdate::show(c.needle.as_str()),
        ]);
    }
}

impl Widget for CompassLayer {
    type Config = CompassConfig;

    fn build(ctx: WidgetContext, config: CompassConfig) -> Result<Self, ConfigError> {
        Ok(Self { ctx, config })
    }
}

impl Receiver<MapEvent> for CompassLayer {
    fn channels(&self) -> ChannelSet {
        ChannelSet::empty()
    }

    fn receive(&mut self, _message: &MapEvent) {}
}
