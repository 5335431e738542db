// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget side of the bus: receiving and publishing.

use core::fmt;

use crate::bus::{EventBus, Message, SourceId};
use crate::channel::ChannelSet;

/// A component that consumes messages from the bus.
pub trait Receiver<M> {
    /// The channels this receiver handles.
    ///
    /// [`EventBus::connect`] drops channeled messages outside this set
    /// before they reach [`Receiver::receive`].
    fn channels(&self) -> ChannelSet;

    /// Handles one message.
    fn receive(&mut self, message: &M);
}

/// A publishing handle bound to one source id on one bus.
///
/// Widgets receive a `Publisher` at construction and use it for everything
/// they emit.
pub struct Publisher<M> {
    bus: EventBus<M>,
    source: SourceId,
}

impl<M> Clone for Publisher<M> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus.clone(),
            source: self.source.clone(),
        }
    }
}

impl<M> fmt::Debug for Publisher<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<M: Message + 'static> Publisher<M> {
    pub(crate) fn new(bus: EventBus<M>, source: SourceId) -> Self {
        Self { bus, source }
    }

    /// The source id messages are published under.
    #[must_use]
    pub fn source(&self) -> &SourceId {
        &self.source
    }

    /// Publishes `message` under this handle's source id.
    ///
    /// Returns the number of callbacks invoked.
    pub fn send(&self, message: &M) -> usize {
        self.bus.publish(&self.source, message)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Receiver;
    use crate::bus::{EventBus, Message};
    use crate::channel::{Channel, ChannelSet};

    #[derive(Debug)]
    enum Msg {
        Zoom(f64),
        Pan(&'static str),
        Broadcast,
    }

    impl Message for Msg {
        fn channel(&self) -> Option<Channel> {
            match self {
                Self::Zoom(_) => Some(Channel::Zoom),
                Self::Pan(_) => Some(Channel::Pan),
                Self::Broadcast => None,
            }
        }
    }

    #[derive(Default)]
    struct ZoomOnly {
        zooms: Vec<f64>,
        broadcasts: usize,
    }

    impl Receiver<Msg> for ZoomOnly {
        fn channels(&self) -> ChannelSet {
            ChannelSet::ZOOM
        }

        fn receive(&mut self, message: &Msg) {
            match message {
                Msg::Zoom(z) => self.zooms.push(*z),
                Msg::Broadcast => self.broadcasts += 1,
                Msg::Pan(dir) => panic!("pan {dir} should have been filtered"),
            }
        }
    }

    #[test]
    fn connect_filters_by_declared_channels() {
        let bus = EventBus::new();
        let rx = Rc::new(RefCell::new(ZoomOnly::default()));
        bus.connect("map", &rx);

        let map = bus.publisher("map");
        assert_eq!(map.send(&Msg::Zoom(2.0)), 1);
        map.send(&Msg::Pan("n"));
        map.send(&Msg::Broadcast);

        let rx = rx.borrow();
        assert_eq!(rx.zooms, vec![2.0]);
        assert_eq!(rx.broadcasts, 1);
    }

    #[test]
    fn publisher_is_bound_to_its_source() {
        let bus: EventBus<Msg> = EventBus::new();
        let rx = Rc::new(RefCell::new(ZoomOnly::default()));
        bus.connect("map", &rx);

        let other = bus.publisher("legend");
        assert_eq!(other.source().as_str(), "legend");
        assert_eq!(other.send(&Msg::Zoom(4.0)), 0);
        assert!(rx.borrow().zooms.is_empty());
    }
}
