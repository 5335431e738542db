// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Layers: the map container and the layers it drives.
//!
//! A [`Diagram`] owns one [`EventBus`](lookout_bus::EventBus) of [`MapEvent`]s
//! and one [`ElementSink`]. Widgets are mounted into it with a
//! [`WidgetContext`] (id, size, center, publisher, sink) and a configuration
//! decoded from JSON, then connected to the sources they listen to.
//!
//! The usual wiring:
//!
//! - a [`ZoomControl`] publishes `zoom` and `pan`;
//! - the [`MapContainer`] consumes them, updates its
//!   [`Viewport`](lookout_viewport::Viewport), and republishes `zoom` then
//!   `visible_window`;
//! - layers ([`WmtsLayer`], [`WmsLayer`], [`GeoplotLayer`],
//!   [`GridSquaresLayer`]) consume the map's events and write
//!   [`ElementUpdate`]s.
//!
//! [`CompassLayer`] and [`GpsLayer`] are driven by device input rather than
//! the bus.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use lookout_layers::{
//!     ControlButton, Diagram, GridSquaresLayer, MapContainer, RecordingSink, ZoomControl,
//! };
//!
//! let sink = RecordingSink::shared();
//! let diagram = Diagram::new(sink.clone());
//! let center = Point::new(200.0, 200.0);
//!
//! let map = diagram
//!     .mount_json::<MapContainer>(
//!         diagram.context("map", 400.0, 400.0, center),
//!         r#"{"max_zoom": 8, "layerGroupId": "layers", "popGroupId": "pops"}"#,
//!     )
//!     .unwrap();
//! let control = diagram
//!     .mount_json::<ZoomControl>(
//!         diagram.context("panzoom", 60.0, 60.0, Point::new(40.0, 40.0)),
//!         r#"{"zoom_levels": [1, 2, 4, 8]}"#,
//!     )
//!     .unwrap();
//! let grid = diagram
//!     .mount_json::<GridSquaresLayer>(
//!         diagram.context("grid", 400.0, 400.0, center),
//!         r#"{"stroke_width": 2, "font_height": 12, "lines": ["gl0"]}"#,
//!     )
//!     .unwrap();
//!
//! diagram.connect(&"panzoom".into(), &map);
//! diagram.connect(&"map".into(), &grid);
//!
//! control.borrow_mut().press(ControlButton::ZoomIn);
//! assert_eq!(map.borrow().viewport().zoom_level(), 2.0);
//! assert_eq!(sink.borrow().number("gl0", "stroke-width"), Some(1.0));
//! ```

mod compass;
mod diagram;
mod element;
mod error;
mod event;
mod geoplot;
mod gps;
mod gridsquares;
mod map;
mod widget;
mod wms;
mod wmts;
mod zoom_control;

pub use compass::{CompassConfig, CompassLayer};
pub use diagram::Diagram;
pub use element::{
    Change, ElementSink, ElementUpdate, RecordingSink, SharedSink, VISIBILITY,
};
pub use error::{ConfigError, EventError};
pub use event::{Direction, LayerSetting, LayerValue, MapEvent, PopupToggle, Query, QueryMode};
pub use geoplot::{
    Anchor, CircleStyle, EventSource, GeoplotConfig, GeoplotLayer, HIGHLIGHT_CLASS, StrokeStyle,
};
pub use gps::{GpsConfig, GpsLayer};
pub use gridsquares::{GridSquaresConfig, GridSquaresLayer};
pub use map::{DEFAULT_LAYER_OPACITY, MapConfig, MapContainer};
pub use widget::{Widget, WidgetConfig, WidgetContext};
pub use wms::{WmsConfig, WmsLayer};
pub use wmts::{BucketConfig, TileConfig, WmtsConfig, WmtsLayer};
pub use zoom_control::{ControlButton, ZoomControl, ZoomControlConfig};
