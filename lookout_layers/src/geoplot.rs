// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point, line and polygon overlay with popups, labels and search.

use std::borrow::Cow;
use std::collections::BTreeMap;

use kurbo::Point;
use lookout_bus::{ChannelSet, Receiver};
use lookout_geom::{AffineTransform, VisibleWindow};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::element::ElementUpdate;
use crate::error::ConfigError;
use crate::event::{MapEvent, PopupToggle, Query, QueryMode};
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// Class added to highlighted groups.
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// A circle's unscaled radius and stroke width.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CircleStyle {
    /// Radius at zoom 1.
    pub r: f64,
    /// Stroke width at zoom 1.
    pub sw: f64,
}

/// A world-space anchor for counter-scaled content.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Anchor {
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
}

impl Anchor {
    fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Values published when an element is clicked.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EventSource {
    /// Published on `select_id`.
    #[serde(default)]
    pub id: Option<Value>,
    /// Published on `select_category`.
    #[serde(default)]
    pub category: Option<Value>,
}

/// A stroked shape's unscaled stroke width, plus its click values.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StrokeStyle {
    /// Stroke width at zoom 1.
    pub sw: f64,
    /// Click values.
    #[serde(flatten)]
    pub source: EventSource,
}

/// Configuration of a [`GeoplotLayer`]. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeoplotConfig {
    /// Circles, by element id.
    pub circles: BTreeMap<String, CircleStyle>,
    /// Markers, by element id.
    pub markers: BTreeMap<String, Anchor>,
    /// Lines, by element id.
    pub lines: BTreeMap<String, StrokeStyle>,
    /// Polygons, by element id.
    pub polygons: BTreeMap<String, StrokeStyle>,
    /// Clickable points, by element id.
    pub points: BTreeMap<String, EventSource>,
    /// Labels, by element id.
    pub labels: BTreeMap<String, Anchor>,
    /// Popups, by element id.
    pub popups: BTreeMap<String, Anchor>,
    /// Labels toggled by `show_labels`.
    pub label_ids: Vec<String>,
    /// Searchable properties of each feature group.
    pub group_properties: BTreeMap<String, Option<Map<String, Value>>>,
    /// Label published on `select` when a group is clicked.
    pub group_labels: BTreeMap<String, String>,
    /// Popup opened by each trigger element.
    pub popup_map: BTreeMap<String, String>,
}

impl WidgetConfig for GeoplotConfig {
    const KIND: &'static str = "geoplot";
}

/// Keeps plotted features legible under zoom and applies searches.
#[derive(Debug)]
pub struct GeoplotLayer {
    ctx: WidgetContext,
    config: GeoplotConfig,
}

impl GeoplotLayer {
    /// Rescales strokes and counter-scales markers, labels and popups.
    pub fn zoom(&mut self, level: f64) {
        let c = &self.config;
        let counter = |anchor: &Anchor| {
            let mut t = AffineTransform::IDENTITY;
            t.scale_about(1.0 / level, anchor.point());
            t
        };
        let circles = c.circles.iter().flat_map(|(id, s)| {
            [
                ElementUpdate::set(id.as_str(), "r", s.r / level),
                ElementUpdate::set(id.as_str(), "stroke-width", s.sw / level),
            ]
        });
        let strokes = c
            .lines
            .iter()
            .chain(&c.polygons)
            .map(|(id, s)| ElementUpdate::set(id.as_str(), "stroke-width", s.sw / level));
        let anchored = c
            .markers
            .iter()
            .chain(&c.labels)
            .chain(&c.popups)
            .map(|(id, a)| ElementUpdate::set(id.as_str(), "transform", counter(a)));
        debug!(level, "geoplot zoom");
        self.ctx.apply_all(circles.chain(strokes).chain(anchored));
    }

    /// Hides popups whose anchor is outside `window`.
    pub fn update_visible_window(&mut self, window: &VisibleWindow) {
        let updates = self.config.popups.iter().map(|(id, anchor)| {
            if window.contains(anchor.point()) {
                ElementUpdate::show(id.as_str())
            } else {
                ElementUpdate::hide(id.as_str())
            }
        });
        self.ctx.apply_all(updates);
    }

    /// Shows or hides the configured labels.
    pub fn show_labels(&mut self, show: bool) {
        let updates = self.config.label_ids.iter().map(|id| {
            if show {
                ElementUpdate::show(id.as_str())
            } else {
                ElementUpdate::hide(id.as_str())
            }
        });
        self.ctx.apply_all(updates);
    }

    /// Shows groups matching `text` and hides the rest.
    ///
    /// An empty search shows every group.
    pub fn filter(&mut self, text: &str) {
        let needle = text.to_lowercase();
        let updates = self.config.group_properties.iter().map(|(id, props)| {
            if needle.is_empty() || matches(props.as_ref(), &needle) {
                ElementUpdate::show(id.as_str())
            } else {
                ElementUpdate::hide(id.as_str())
            }
        });
        self.ctx.apply_all(updates);
    }

    /// Shows every group, then highlights those matching `text`.
    ///
    /// An empty search clears all highlights.
    pub fn highlight(&mut self, text: &str) {
        let needle = text.to_lowercase();
        let groups = &self.config.group_properties;
        let shown = groups.keys().map(|id| ElementUpdate::show(id.as_str()));
        let marked = groups.iter().map(|(id, props)| {
            if !needle.is_empty() && matches(props.as_ref(), &needle) {
                ElementUpdate::add_class(id.as_str(), HIGHLIGHT_CLASS)
            } else {
                ElementUpdate::remove_class(id.as_str(), HIGHLIGHT_CLASS)
            }
        });
        self.ctx.apply_all(shown.chain(marked));
    }

    /// Applies a search in its requested mode; bare text filters.
    pub fn search(&mut self, query: &Query) {
        match query.mode().unwrap_or_default() {
            QueryMode::Filter => self.filter(query.text()),
            QueryMode::Highlight => self.highlight(query.text()),
        }
    }

    /// Publishes the click values configured for `element`.
    ///
    /// Returns the number of messages published.
    pub fn click(&mut self, element: &str) -> usize {
        let c = &self.config;
        let source = c
            .lines
            .get(element)
            .or_else(|| c.polygons.get(element))
            .map(|s| &s.source)
            .or_else(|| c.points.get(element));
        let Some(source) = source else {
            trace!(element, "click on element without values");
            return 0;
        };
        let mut sent = 0;
        if let Some(id) = &source.id {
            self.ctx.publish(&MapEvent::SelectId(id.clone()));
            sent += 1;
        }
        if let Some(category) = &source.category {
            self.ctx.publish(&MapEvent::SelectCategory(category.clone()));
            sent += 1;
        }
        sent
    }

    /// Publishes the label of a clicked group on `select`.
    pub fn click_group(&mut self, group: &str) -> bool {
        let Some(label) = self.config.group_labels.get(group) else {
            return false;
        };
        self.ctx.publish(&MapEvent::Select(label.clone()));
        true
    }

    /// Asks for the popup behind `trigger` to toggle.
    ///
    /// `at` is the click position; keyboard activation passes `None` and the
    /// popup opens at the layer center.
    pub fn activate_popup(&mut self, trigger: &str, at: Option<Point>) -> bool {
        let Some(target) = self.config.popup_map.get(trigger) else {
            return false;
        };
        let at = at.unwrap_or(self.ctx.center);
        self.ctx.publish(&MapEvent::PopupToggle(PopupToggle {
            target: target.clone(),
            x: at.x,
            y: at.y,
        }));
        true
    }
}

fn matches(props: Option<&Map<String, Value>>, needle: &str) -> bool {
    props.is_some_and(|props| {
        props
            .values()
            .any(|v| value_text(v).to_lowercase().contains(needle))
    })
}

fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

impl Widget for GeoplotLayer {
    type Config = GeoplotConfig;

    fn build(ctx: WidgetContext, config: GeoplotConfig) -> Result<Self, ConfigError> {
        Ok(Self { ctx, config })
    }
}

impl Receiver<MapEvent> for GeoplotLayer {
    fn channels(&self) -> ChannelSet {
        ChannelSet::ZOOM
            | ChannelSet::VISIBLE_WINDOW
            | ChannelSet::SHOW_LABELS
            | ChannelSet::SEARCH
            | ChannelSet::FILTER
            | ChannelSet::HIGHLIGHT
    }

    fn receive(&mut self, message: &MapEvent) {
        match message {
            MapEvent::Zoom(level) => self.zoom(*level),
            MapEvent::VisibleWindow(window) => self.update_visible_window(window),
            MapEvent::ShowLabels(show) => self.show_labels(*show),
            MapEvent::Search(query) => self.search(query),
            MapEvent::Filter(query) => self.filter(query.text()),
            MapEvent::Highlight(query) => self.highlight(query.text()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::Point;
    use lookout_bus::Receiver;
    use lookout_geom::VisibleWindow;
    use serde_json::json;

    use super::{GeoplotLayer, HIGHLIGHT_CLASS};
    use crate::diagram::Diagram;
    use crate::element::RecordingSink;
    use crate::event::{MapEvent, PopupToggle, Query, QueryMode};

    const CONFIG: &str = r#"{
        "circles": {"c1": {"r": 8, "sw": 2}},
        "markers": {"m1": {"x": 100, "y": 50}},
        "lines": {"l1": {"sw": 4, "id": 17}},
        "polygons": {"p1": {"sw": 1, "category": "forest"}},
        "points": {"c1": {"id": "oak-1", "category": "tree"}},
        "labels": {"t1": {"x": 10, "y": 10}},
        "popups": {"pop1": {"x": 50, "y": 50}, "pop2": {"x": 300, "y": 50}},
        "label_ids": ["t1"],
        "group_properties": {
            "g-oak": {"name": "Royal Oak", "height": 21},
            "g-ash": {"name": "Ash", "height": 12},
            "g-none": null
        },
        "group_labels": {"g-oak": "Oak"},
        "popup_map": {"c1": "pop1"}
    }"#;

    struct Fixture {
        sink: Rc<RefCell<RecordingSink>>,
        layer: Rc<RefCell<GeoplotLayer>>,
        seen: Rc<RefCell<Vec<MapEvent>>>,
    }

    fn fixture() -> Fixture {
        let sink = RecordingSink::shared();
        let diagram = Diagram::new(sink.clone());
        let ctx = diagram.context("geo", 200.0, 100.0, Point::new(100.0, 50.0));
        let layer = diagram.mount_json::<GeoplotLayer>(ctx, CONFIG).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        diagram
            .bus()
            .subscribe("geo", None, move |e: &MapEvent| log.borrow_mut().push(e.clone()));
        Fixture { sink, layer, seen }
    }

    #[test]
    fn zoom_keeps_symbols_at_screen_size() {
        let f = fixture();
        f.layer.borrow_mut().receive(&MapEvent::Zoom(4.0));
        let sink = f.sink.borrow();
        assert_eq!(sink.number("c1", "r"), Some(2.0));
        assert_eq!(sink.number("c1", "stroke-width"), Some(0.5));
        assert_eq!(sink.number("l1", "stroke-width"), Some(1.0));
        assert_eq!(sink.number("p1", "stroke-width"), Some(0.25));
        assert_eq!(
            sink.attribute("m1", "transform"),
            Some("matrix(0.25 0 0 0.25 75 37.5)")
        );
        assert_eq!(
            sink.attribute("t1", "transform"),
            Some("matrix(0.25 0 0 0.25 7.5 7.5)")
        );
    }

    #[test]
    fn popups_outside_the_window_hide() {
        let f = fixture();
        f.layer
            .borrow_mut()
            .receive(&MapEvent::VisibleWindow(VisibleWindow::new(100.0, 50.0, 200.0, 100.0)));
        assert!(!f.sink.borrow().is_hidden("pop1"));
        assert!(f.sink.borrow().is_hidden("pop2"));
    }

    #[test]
    fn labels_toggle() {
        let f = fixture();
        f.layer.borrow_mut().receive(&MapEvent::ShowLabels(false));
        assert!(f.sink.borrow().is_hidden("t1"));
        f.layer.borrow_mut().receive(&MapEvent::ShowLabels(true));
        assert!(!f.sink.borrow().is_hidden("t1"));
    }

    #[test]
    fn filter_matches_any_property_case_insensitively() {
        let f = fixture();
        f.layer
            .borrow_mut()
            .receive(&MapEvent::Filter(Query::Text("OAK".into())));
        {
            let sink = f.sink.borrow();
            assert!(!sink.is_hidden("g-oak"));
            assert!(sink.is_hidden("g-ash"));
            assert!(sink.is_hidden("g-none"));
        }
        f.layer
            .borrow_mut()
            .receive(&MapEvent::Filter(Query::Text("12".into())));
        assert!(!f.sink.borrow().is_hidden("g-ash"));
        assert!(f.sink.borrow().is_hidden("g-oak"));

        f.layer
            .borrow_mut()
            .receive(&MapEvent::Filter(Query::Text(String::new())));
        let sink = f.sink.borrow();
        assert!(["g-oak", "g-ash", "g-none"].iter().all(|g| !sink.is_hidden(g)));
    }

    #[test]
    fn highlight_unhides_then_marks() {
        let f = fixture();
        f.layer
            .borrow_mut()
            .receive(&MapEvent::Filter(Query::Text("ash".into())));
        f.layer.borrow_mut().receive(&MapEvent::Search(Query::Structured {
            searchstring: "royal".into(),
            mode: QueryMode::Highlight,
        }));
        {
            let sink = f.sink.borrow();
            assert!(!sink.is_hidden("g-oak"));
            assert!(sink.has_class("g-oak", HIGHLIGHT_CLASS));
            assert!(!sink.has_class("g-ash", HIGHLIGHT_CLASS));
        }
        f.layer
            .borrow_mut()
            .receive(&MapEvent::Highlight(Query::Text(String::new())));
        assert!(!f.sink.borrow().has_class("g-oak", HIGHLIGHT_CLASS));
    }

    #[test]
    fn clicks_publish_configured_values() {
        let f = fixture();
        let mut layer = f.layer.borrow_mut();
        assert_eq!(layer.click("l1"), 1);
        assert_eq!(layer.click("p1"), 1);
        assert_eq!(layer.click("c1"), 2);
        assert_eq!(layer.click("m1"), 0);
        assert!(layer.click_group("g-oak"));
        assert!(!layer.click_group("g-ash"));
        assert!(layer.activate_popup("c1", None));
        assert_eq!(
            *f.seen.borrow(),
            vec![
                MapEvent::SelectId(json!(17)),
                MapEvent::SelectCategory(json!("forest")),
                MapEvent::SelectId(json!("oak-1")),
                MapEvent::SelectCategory(json!("tree")),
                MapEvent::Select("Oak".into()),
                MapEvent::PopupToggle(PopupToggle {
                    target: "pop1".into(),
                    x: 100.0,
                    y: 50.0,
                }),
            ]
        );
    }
}
