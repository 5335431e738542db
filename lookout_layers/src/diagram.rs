// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One diagram's bus and element sink, and widget mounting.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use lookout_bus::{EventBus, Receiver, SourceId};
use serde_json::Value;
use tracing::debug;

use crate::element::SharedSink;
use crate::error::{ConfigError, EventError};
use crate::event::MapEvent;
use crate::widget::{Widget, WidgetConfig, WidgetContext};

/// One diagram: a bus and an element sink shared by its widgets.
///
/// Diagrams never share state; two maps on one page each get their own.
#[derive(Clone)]
pub struct Diagram {
    bus: EventBus<MapEvent>,
    sink: SharedSink,
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

impl Diagram {
    /// Creates a diagram writing presentation changes to `sink`.
    #[must_use]
    pub fn new(sink: SharedSink) -> Self {
        Self {
            bus: EventBus::new(),
            sink,
        }
    }

    /// The diagram's bus.
    #[must_use]
    pub fn bus(&self) -> &EventBus<MapEvent> {
        &self.bus
    }

    /// Creates the context for a widget with id `id`.
    #[must_use]
    pub fn context(&self, id: &str, width: f64, height: f64, center: Point) -> WidgetContext {
        WidgetContext::new(
            width,
            height,
            center,
            self.bus.publisher(id),
            Rc::clone(&self.sink),
        )
    }

    /// Builds a widget.
    ///
    /// # Errors
    ///
    /// Propagates [`Widget::build`] failures.
    pub fn mount<W: Widget>(
        &self,
        ctx: WidgetContext,
        config: W::Config,
    ) -> Result<Rc<RefCell<W>>, ConfigError> {
        debug!(id = %ctx.id, kind = W::Config::KIND, "mounting widget");
        W::build(ctx, config).map(|w| Rc::new(RefCell::new(w)))
    }

    /// Builds a widget from a JSON configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not decode or cannot drive the widget.
    pub fn mount_json<W: Widget>(
        &self,
        ctx: WidgetContext,
        json: &str,
    ) -> Result<Rc<RefCell<W>>, ConfigError> {
        self.mount(ctx, W::Config::from_json(json)?)
    }

    /// Delivers messages published by `source` to `receiver`.
    pub fn connect<R>(&self, source: &SourceId, receiver: &Rc<RefCell<R>>)
    where
        R: Receiver<MapEvent> + 'static,
    {
        self.bus.connect(source, receiver);
    }

    /// Publishes a wire-format message on behalf of `source`.
    ///
    /// This is the entry point for inputs that live outside the diagram,
    /// such as a search box.
    ///
    /// # Errors
    ///
    /// Fails if the message does not decode; nothing is published then.
    pub fn publish_wire(
        &self,
        source: &SourceId,
        channel: Option<&str>,
        payload: Value,
    ) -> Result<usize, EventError> {
        let event = MapEvent::from_wire(channel, payload)?;
        Ok(self.bus.publish(source, &event))
    }
}
