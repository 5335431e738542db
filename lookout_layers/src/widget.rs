// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What every widget is given, and what every widget provides.

use core::fmt;

use kurbo::Point;
use lookout_bus::{Publisher, Receiver, SourceId};
use serde::de::DeserializeOwned;

use crate::element::{ElementUpdate, SharedSink};
use crate::error::ConfigError;
use crate::event::MapEvent;

/// Construction-time context shared by all widgets.
///
/// Bundles the widget's id and placement with a publisher bound to that id
/// and the diagram's element sink.
#[derive(Clone)]
pub struct WidgetContext {
    /// Widget id; also the source id of everything it publishes.
    pub id: SourceId,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Display-space center of the widget.
    pub center: Point,
    publisher: Publisher<MapEvent>,
    sink: SharedSink,
}

impl fmt::Debug for WidgetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetContext")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("center", &self.center)
            .finish_non_exhaustive()
    }
}

impl WidgetContext {
    /// Creates a context.
    #[must_use]
    pub fn new(
        width: f64,
        height: f64,
        center: Point,
        publisher: Publisher<MapEvent>,
        sink: SharedSink,
    ) -> Self {
        Self {
            id: publisher.source().clone(),
            width,
            height,
            center,
            publisher,
            sink,
        }
    }

    /// Publishes `event` under this widget's id.
    pub fn publish(&self, event: &MapEvent) -> usize {
        self.publisher.send(event)
    }

    /// Applies one element update.
    pub fn apply(&self, update: ElementUpdate) {
        self.sink.borrow_mut().apply(update);
    }

    /// Applies a batch of element updates.
    pub fn apply_all(&self, updates: impl IntoIterator<Item = ElementUpdate>) {
        let mut sink = self.sink.borrow_mut();
        for update in updates {
            sink.apply(update);
        }
    }
}

/// A widget configuration, decoded from the JSON emitted with the SVG.
pub trait WidgetConfig: DeserializeOwned {
    /// Widget kind used in error messages, e.g. `"geoplot"`.
    const KIND: &'static str;

    /// Decodes a configuration.
    ///
    /// # Errors
    ///
    /// Fails if the document is not valid JSON or a required key is missing.
    fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            kind: Self::KIND,
            source,
        })
    }
}

/// A widget with the uniform construction signature.
///
/// Every widget is built from a [`WidgetContext`] and its configuration, and
/// receives bus messages through [`Receiver`].
pub trait Widget: Receiver<MapEvent> + Sized {
    /// Configuration type.
    type Config: WidgetConfig;

    /// Builds the widget.
    ///
    /// # Errors
    ///
    /// Fails if the configuration cannot drive the widget.
    fn build(ctx: WidgetContext, config: Self::Config) -> Result<Self, ConfigError>;
}
