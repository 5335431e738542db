// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The messages exchanged by map widgets.

use kurbo::Vec2;
use lookout_bus::{Channel, Message};
use lookout_geom::VisibleWindow;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::EventError;

/// A compass direction on the `pan` channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// North.
    #[serde(rename = "n")]
    North,
    /// South.
    #[serde(rename = "s")]
    South,
    /// East.
    #[serde(rename = "e")]
    East,
    /// West.
    #[serde(rename = "w")]
    West,
}

impl Direction {
    /// Display distance moved by one pan step.
    pub const STEP: f64 = 20.0;

    /// The translation applied to the map for one step in this direction.
    ///
    /// Moving the view east shifts the content west, and so on.
    #[must_use]
    pub fn step(self) -> Vec2 {
        match self {
            Self::North => Vec2::new(0.0, Self::STEP),
            Self::South => Vec2::new(0.0, -Self::STEP),
            Self::East => Vec2::new(-Self::STEP, 0.0),
            Self::West => Vec2::new(Self::STEP, 0.0),
        }
    }
}

/// The value half of a `manage_layers` request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerValue {
    /// Set this opacity.
    Opacity(f64),
    /// Show at the configured opacity, or hide.
    Toggle(bool),
}

/// A `manage_layers` request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerSetting {
    /// Id of the layer's group element.
    pub layer: String,
    /// Requested opacity or visibility.
    pub value: LayerValue,
}

/// How a search is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Show only matching groups.
    #[default]
    Filter,
    /// Mark matching groups.
    Highlight,
}

/// Payload of the `search`, `filter` and `highlight` channels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Query {
    /// Just the search text.
    Text(String),
    /// Search text plus a mode, as sent by a search box.
    Structured {
        /// Search text.
        searchstring: String,
        /// How to apply the search.
        #[serde(default)]
        mode: QueryMode,
    },
}

impl Query {
    /// The search text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Structured { searchstring, .. } => searchstring,
        }
    }

    /// The requested mode; bare text carries no mode.
    #[must_use]
    pub fn mode(&self) -> Option<QueryMode> {
        match self {
            Self::Text(_) => None,
            Self::Structured { mode, .. } => Some(*mode),
        }
    }
}

/// Request to toggle a popup, published without a channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopupToggle {
    /// Id of the popup element.
    pub target: String,
    /// Page x of the triggering click.
    pub x: f64,
    /// Page y of the triggering click.
    pub y: f64,
}

#[derive(Serialize, Deserialize)]
struct WindowPayload {
    cx: f64,
    cy: f64,
    width: f64,
    height: f64,
}

/// Every message a map widget can publish or consume.
#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    /// Step the map.
    Pan(Direction),
    /// New zoom level.
    Zoom(f64),
    /// World window shown after a viewport change.
    VisibleWindow(VisibleWindow),
    /// Change a layer's opacity.
    ManageLayers(LayerSetting),
    /// Search with an explicit mode.
    Search(Query),
    /// Show only matching groups.
    Filter(Query),
    /// Highlight matching groups.
    Highlight(Query),
    /// Show or hide labels.
    ShowLabels(bool),
    /// A clicked element's id value.
    SelectId(Value),
    /// A clicked element's category value.
    SelectCategory(Value),
    /// A clicked group's label.
    Select(String),
    /// Toggle a popup. Travels without a channel.
    PopupToggle(PopupToggle),
}

impl Message for MapEvent {
    fn channel(&self) -> Option<Channel> {
        Some(match self {
            Self::Pan(_) => Channel::Pan,
            Self::Zoom(_) => Channel::Zoom,
            Self::VisibleWindow(_) => Channel::VisibleWindow,
            Self::ManageLayers(_) => Channel::ManageLayers,
            Self::Search(_) => Channel::Search,
            Self::Filter(_) => Channel::Filter,
            Self::Highlight(_) => Channel::Highlight,
            Self::ShowLabels(_) => Channel::ShowLabels,
            Self::SelectId(_) => Channel::SelectId,
            Self::SelectCategory(_) => Channel::SelectCategory,
            Self::Select(_) => Channel::Select,
            Self::PopupToggle(_) => return None,
        })
    }
}

impl MapEvent {
    /// Decodes a message from its channel name and JSON payload.
    ///
    /// # Errors
    ///
    /// Fails on an unknown channel name or a payload that does not fit the
    /// channel.
    pub fn from_wire(channel: Option<&str>, payload: Value) -> Result<Self, EventError> {
        let Some(name) = channel else {
            return decode(None, payload).map(Self::PopupToggle);
        };
        let channel =
            Channel::from_name(name).ok_or_else(|| EventError::UnknownChannel(name.into()))?;
        let wire = Some(channel.name());
        Ok(match channel {
            Channel::Pan => Self::Pan(decode(wire, payload)?),
            Channel::Zoom => Self::Zoom(decode(wire, payload)?),
            Channel::VisibleWindow => {
                let w: WindowPayload = decode(wire, payload)?;
                Self::VisibleWindow(VisibleWindow::new(w.cx, w.cy, w.width, w.height))
            }
            Channel::ManageLayers => Self::ManageLayers(decode(wire, payload)?),
            Channel::Search => Self::Search(decode(wire, payload)?),
            Channel::Filter => Self::Filter(decode(wire, payload)?),
            Channel::Highlight => Self::Highlight(decode(wire, payload)?),
            Channel::ShowLabels => Self::ShowLabels(decode(wire, payload)?),
            Channel::SelectId => Self::SelectId(payload),
            Channel::SelectCategory => Self::SelectCategory(payload),
            Channel::Select => Self::Select(decode(wire, payload)?),
        })
    }

    /// Encodes the message as a channel name and JSON payload.
    #[must_use]
    pub fn to_wire(&self) -> (Option<&'static str>, Value) {
        let payload = match self {
            Self::Pan(direction) => json!(direction),
            Self::Zoom(level) => json!(level),
            Self::VisibleWindow(w) => json!(WindowPayload {
                cx: w.cx,
                cy: w.cy,
                width: w.width,
                height: w.height,
            }),
            Self::ManageLayers(setting) => json!(setting),
            Self::Search(q) | Self::Filter(q) | Self::Highlight(q) => json!(q),
            Self::ShowLabels(show) => json!(show),
            Self::SelectId(v) | Self::SelectCategory(v) => v.clone(),
            Self::Select(label) => json!(label),
            Self::PopupToggle(p) => json!({
                "target": p.target,
                "action": "toggle",
                "x": p.x,
                "y": p.y,
            }),
        };
        (self.channel().map(Channel::name), payload)
    }
}

fn decode<T: DeserializeOwned>(
    channel: Option<&'static str>,
    payload: Value,
) -> Result<T, EventError> {
    serde_json::from_value(payload).map_err(|source| EventError::Payload { channel, source })
}
