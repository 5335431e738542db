// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A whole diagram: zoom control, map, tile layer and geoplot on one bus.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use lookout_bus::{Channel, SourceId};
use lookout_layers::{
    ControlButton, Diagram, Direction, GeoplotLayer, HIGHLIGHT_CLASS, MapContainer, MapEvent,
    RecordingSink, WmtsLayer, ZoomControl,
};
use serde_json::json;

const MAP: &str = r#"{"max_zoom": 4, "layerGroupId": "layers", "popGroupId": "pops"}"#;

const CONTROL: &str = r#"{"zoom_levels": [1, 2, 4], "zoom_segments": ["s0", "s1", "s2"]}"#;

const TILES: &str = r#"{
    "buckets": [
        {"group": "z1", "tiles": [
            {"id": "a", "x": 0, "y": 0, "width": 400, "height": 400, "url": "a.png"}
        ]},
        {"group": "z2", "tiles": [
            {"id": "c", "x": 150, "y": 150, "width": 100, "height": 100, "url": "c.png"},
            {"id": "d", "x": 0, "y": 0, "width": 50, "height": 50, "url": "d.png"}
        ]}
    ]
}"#;

const PLOT: &str = r#"{
    "circles": {"c1": {"r": 8, "sw": 2}},
    "lines": {"l1": {"sw": 4, "id": 17, "category": "path"}},
    "group_properties": {
        "g-oak": {"name": "Royal Oak"},
        "g-ash": {"name": "Ash"}
    }
}"#;

struct Fixture {
    sink: Rc<RefCell<RecordingSink>>,
    diagram: Diagram,
    map: Rc<RefCell<MapContainer>>,
    control: Rc<RefCell<ZoomControl>>,
    tiles: Rc<RefCell<WmtsLayer>>,
    plot: Rc<RefCell<GeoplotLayer>>,
}

fn fixture() -> Fixture {
    let sink = RecordingSink::shared();
    let diagram = Diagram::new(sink.clone());
    let center = Point::new(200.0, 200.0);
    let map = diagram
        .mount_json::<MapContainer>(diagram.context("map", 400.0, 400.0, center), MAP)
        .unwrap();
    let control = diagram
        .mount_json::<ZoomControl>(
            diagram.context("panzoom", 60.0, 60.0, Point::new(40.0, 40.0)),
            CONTROL,
        )
        .unwrap();
    let tiles = diagram
        .mount_json::<WmtsLayer>(diagram.context("tiles", 400.0, 400.0, center), TILES)
        .unwrap();
    let plot = diagram
        .mount_json::<GeoplotLayer>(diagram.context("plot", 400.0, 400.0, center), PLOT)
        .unwrap();

    let map_id = SourceId::new("map");
    diagram.connect(&"panzoom".into(), &map);
    diagram.connect(&"searchbox".into(), &map);
    diagram.connect(&map_id, &tiles);
    diagram.connect(&map_id, &plot);

    Fixture {
        sink,
        diagram,
        map,
        control,
        tiles,
        plot,
    }
}

fn hrefs(sink: &RecordingSink) -> usize {
    sink.updates()
        .iter()
        .filter(|u| u.to_string().contains("href="))
        .count()
}

#[test]
fn announce_shows_the_first_bucket() {
    let f = fixture();
    f.map.borrow_mut().announce();

    let sink = f.sink.borrow();
    assert!(!sink.is_hidden("z1"));
    assert!(sink.is_hidden("z2"));
    assert_eq!(sink.attribute("a", "href"), Some("a.png"));
    assert_eq!(sink.attribute("layers", "transform"), Some("matrix(1 0 0 1 0 0)"));
    assert_eq!(hrefs(&sink), 1);
}

#[test]
fn control_drives_map_and_layers() {
    let f = fixture();
    f.map.borrow_mut().announce();

    f.control.borrow_mut().press(ControlButton::ZoomIn);
    {
        let sink = f.sink.borrow();
        assert_eq!(f.map.borrow().viewport().zoom_level(), 2.0);
        assert_eq!(
            sink.attribute("layers", "transform"),
            Some("matrix(2 0 0 2 -200 -200)")
        );
        assert_eq!(sink.attribute("pops", "transform"), Some("matrix(2 0 0 2 -200 -200)"));
        assert!(sink.is_hidden("z1"));
        assert!(!sink.is_hidden("z2"));
        assert_eq!(sink.attribute("c", "href"), Some("c.png"));
        assert_eq!(sink.attribute("d", "href"), None);
        assert_eq!(sink.number("c1", "r"), Some(4.0));
        assert_eq!(sink.number("l1", "stroke-width"), Some(2.0));
        assert_eq!(sink.attribute("s1", "fill"), Some("black"));
        assert_eq!(sink.attribute("s2", "fill"), Some("white"));
    }

    // Walk the view towards the top-left corner until tile `d` comes in.
    for _ in 0..6 {
        f.control
            .borrow_mut()
            .press(ControlButton::Pan(Direction::West));
        f.control
            .borrow_mut()
            .press(ControlButton::Pan(Direction::North));
    }
    let window = f.map.borrow().viewport().visible_window();
    assert!((window.cx - 140.0).abs() < 1e-9);
    assert!((window.cy - 140.0).abs() < 1e-9);
    assert_eq!(f.sink.borrow().attribute("d", "href"), Some("d.png"));

    // Back out: the first bucket returns, nothing reloads.
    f.control.borrow_mut().press(ControlButton::ZoomOut);
    let sink = f.sink.borrow();
    assert!(!sink.is_hidden("z1"));
    assert!(sink.is_hidden("z2"));
    assert_eq!(sink.attribute("layers", "transform"), Some("matrix(1 0 0 1 0 0)"));
    assert_eq!(hrefs(&sink), 3);
    assert_eq!(f.tiles.borrow().tiles().loaded_count(), 3);
}

#[test]
fn search_box_reaches_geoplot_through_the_map() {
    let f = fixture();
    let delivered = f
        .diagram
        .publish_wire(
            &"searchbox".into(),
            Some("search"),
            json!({"searchstring": "oak", "mode": "highlight"}),
        )
        .unwrap();
    assert_eq!(delivered, 1);
    {
        let sink = f.sink.borrow();
        assert!(sink.has_class("g-oak", HIGHLIGHT_CLASS));
        assert!(!sink.has_class("g-ash", HIGHLIGHT_CLASS));
    }

    f.diagram
        .publish_wire(&"searchbox".into(), Some("filter"), json!("ash"))
        .unwrap();
    let sink = f.sink.borrow();
    assert!(sink.is_hidden("g-oak"));
    assert!(!sink.is_hidden("g-ash"));
}

#[test]
fn bad_wire_messages_publish_nothing() {
    let f = fixture();
    assert!(
        f.diagram
            .publish_wire(&"searchbox".into(), Some("teleport"), json!(1))
            .is_err()
    );
    assert!(
        f.diagram
            .publish_wire(&"panzoom".into(), Some("zoom"), json!("far"))
            .is_err()
    );
    assert!(f.sink.borrow().updates().is_empty());
    assert_eq!(f.map.borrow().viewport().zoom_level(), 1.0);
}

#[test]
fn clicks_are_published_under_the_layer_id() {
    let f = fixture();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    f.diagram
        .bus()
        .subscribe("plot", Some(Channel::SelectId), move |e: &MapEvent| {
            log.borrow_mut().push(e.clone());
        });

    assert_eq!(f.plot.borrow_mut().click("l1"), 2);
    assert_eq!(*seen.borrow(), vec![MapEvent::SelectId(json!(17))]);
}
