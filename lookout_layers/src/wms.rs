// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pre-rendered image layer with one image group per zoom bucket.

use lookout_bus::{ChannelSet, Receiver};
use lookout_tiles::bucket_index;
use serde::Deserialize;

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::MapEvent;
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// Configuration of a [`WmsLayer`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WmsConfig {
    /// Group ids for zoom buckets `1, 2, 4, …`.
    pub zoom_groups: Vec<String>,
}

impl WidgetConfig for WmsConfig {
    const KIND: &'static str = "wms";
}

/// Shows the group for `floor(log2(zoom))` and hides the rest.
#[derive(Debug)]
pub struct WmsLayer {
    ctx: WidgetContext,
    config: WmsConfig,
}

impl WmsLayer {
    /// Selects the group for `level`.
    pub fn zoom(&mut self, level: f64) {
        let target = bucket_index(level);
        let updates = self.config.zoom_groups.iter().enumerate().map(|(i, id)| {
            if Some(i) == target {
                ElementUpdate::show(id.as_str())
            } else {
                ElementUpdate::hide(id.as_str())
            }
        });
        self.ctx.apply_all(updates);
    }
}

impl Widget for WmsLayer {
    type Config = WmsConfig;

    fn build(ctx: WidgetContext, config: WmsConfig) -> Result<Self, ConfigError> {
        Ok(Self { ctx, config })
    }
}

impl Receiver<MapEvent> for WmsLayer {
    fn channels(&self) -> ChannelSet {
        ChannelSet::ZOOM
    }

    fn receive(&mut self, message: &MapEvent) {
        if let MapEvent::Zoom(level) = message {
            self.zoom(*level);
        }
    }
}
