// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless map session.
//!
//! Mounts a map with a zoom control, a planned WMTS layer and a geoplot
//! layer, then replays a short session of button presses and wire messages,
//! printing the element updates each step produces.
//!
//! Run:
//! - `cargo run -p lookout_demos --example map_session`
//! - `RUST_LOG=debug cargo run -p lookout_demos --example map_session`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use lookout_bus::SourceId;
use lookout_geom::{GeoPoint, WebMercator};
use lookout_layers::{
    ControlButton, Diagram, Direction, GeoplotLayer, MapContainer, RecordingSink, WmtsLayer,
    ZoomControl,
};
use lookout_tiles::{GeoBounds, PyramidRequest, TilePyramid};
use serde_json::json;
use tracing::info;

const MAP: &str = r#"{
    "max_zoom": 8,
    "layerGroupId": "layers",
    "popGroupId": "pops",
    "opacities": {"tiles": 0.8}
}"#;

const CONTROL: &str = r#"{
    "zoom_levels": [1, 2, 4, 8],
    "zoom_segments": ["seg0", "seg1", "seg2", "seg3"]
}"#;

const PLOT: &str = r#"{
    "circles": {"pier": {"r": 6, "sw": 1.5}},
    "markers": {"harbour": {"x": 250, "y": 180}},
    "popups": {"harbour-pop": {"x": 250, "y": 180}},
    "group_properties": {
        "g-pier": {"name": "West Pier"},
        "g-harbour": {"name": "Old Harbour"}
    }
}"#;

fn main() {
    lookout_demos::init_logging();

    let sink = RecordingSink::shared();
    let diagram = Diagram::new(sink.clone());
    let center = Point::new(200.0, 150.0);

    let map = diagram
        .mount_json::<MapContainer>(diagram.context("map", 400.0, 300.0, center), MAP)
        .expect("map config");
    let control = diagram
        .mount_json::<ZoomControl>(
            diagram.context("panzoom", 60.0, 60.0, Point::new(40.0, 40.0)),
            CONTROL,
        )
        .expect("control config");
    let plot = diagram
        .mount_json::<GeoplotLayer>(diagram.context("plot", 400.0, 300.0, center), PLOT)
        .expect("geoplot config");

    let request = PyramidRequest::new(
        GeoBounds::new(GeoPoint::new(-3.25, 55.92), GeoPoint::new(-3.1, 55.98)),
        400.0,
        300.0,
    )
    .with_id_prefix("osm")
    .with_center(center)
    .with_zoom_to(8.0);
    let pyramid = TilePyramid::plan(&request, &WebMercator).expect("pyramid");
    info!(
        buckets = pyramid.levels().len(),
        base_zoom = pyramid.base_zoom(),
        "planned tile pyramid"
    );
    println!("tiles: {}", pyramid.attribution());
    let tiles = Rc::new(RefCell::new(WmtsLayer::from_pyramid(
        diagram.context("tiles", 400.0, 300.0, center),
        pyramid,
    )));

    let map_id = SourceId::new("map");
    diagram.connect(&"panzoom".into(), &map);
    diagram.connect(&"searchbox".into(), &map);
    diagram.connect(&"layers-menu".into(), &map);
    diagram.connect(&map_id, &tiles);
    diagram.connect(&map_id, &plot);

    let step = |heading: &str, action: &dyn Fn()| {
        action();
        let updates = sink.borrow_mut().take_updates();
        lookout_demos::print_updates(heading, &updates);
    };

    step("initial view", &|| map.borrow_mut().announce());
    step("zoom in", &|| {
        control.borrow_mut().press(ControlButton::ZoomIn);
    });
    step("pan east", &|| {
        control
            .borrow_mut()
            .press(ControlButton::Pan(Direction::East));
    });
    step("zoom in again", &|| {
        control.borrow_mut().press(ControlButton::ZoomIn);
    });
    step("drag", &|| {
        let mut map = map.borrow_mut();
        map.drag_start(Point::new(200.0, 150.0));
        map.drag_move(Point::new(230.0, 140.0));
        map.drag_end();
    });
    step("highlight \"harbour\"", &|| {
        if let Err(err) = diagram.publish_wire(
            &"searchbox".into(),
            Some("search"),
            json!({"searchstring": "harbour", "mode": "highlight"}),
        ) {
            eprintln!("search failed: {err}");
        }
    });
    step("hide tiles", &|| {
        if let Err(err) = diagram.publish_wire(
            &"layers-menu".into(),
            Some("manage_layers"),
            json!({"layer": "tiles", "value": false}),
        ) {
            eprintln!("manage_layers failed: {err}");
        }
    });
    step("zoom out", &|| {
        control.borrow_mut().press(ControlButton::ZoomOut);
    });

    println!(
        "{} tiles loaded in total",
        tiles.borrow().tiles().loaded_count()
    );
}
