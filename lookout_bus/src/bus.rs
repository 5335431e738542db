// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event bus: source id → ordered subscriptions.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::channel::Channel;
use crate::receiver::{Publisher, Receiver};

/// Identity of an event source, usually the id of the publishing element.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceId(Rc<str>);

impl SourceId {
    /// Creates a source id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(Rc::from(id))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SourceId").field(&&*self.0).finish()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<&SourceId> for SourceId {
    fn from(id: &SourceId) -> Self {
        id.clone()
    }
}

/// A value that can travel on the bus.
///
/// `None` marks an unchanneled message, which every subscriber of the source
/// receives regardless of the channel it subscribed with.
pub trait Message {
    /// The channel this message is published on.
    fn channel(&self) -> Option<Channel>;
}

type Callback<M> = Rc<RefCell<dyn FnMut(&M)>>;

struct Subscription<M> {
    channel: Option<Channel>,
    callback: Callback<M>,
}

impl<M> Clone for Subscription<M> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel,
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<M> Subscription<M> {
    fn matches(&self, channel: Option<Channel>) -> bool {
        match (self.channel, channel) {
            (None, _) | (_, None) => true,
            (Some(wanted), Some(got)) => wanted == got,
        }
    }
}

type Registry<M> = HashMap<SourceId, SmallVec<[Subscription<M>; 4]>>;

/// Synchronous publish/subscribe registry scoped to one diagram.
///
/// Cloning an `EventBus` yields another handle to the same registry, which
/// is how a bus is shared between the widgets of a diagram. Separate
/// diagrams use separate buses and never see each other's events.
///
/// Delivery happens on the publishing call: there is no queue, no replay for
/// late subscribers and no ordering between different sources. For one
/// source, callbacks run in subscription order.
pub struct EventBus<M> {
    registry: Rc<RefCell<Registry<M>>>,
}

impl<M> Clone for EventBus<M> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<M> Default for EventBus<M> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<M> fmt::Debug for EventBus<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("EventBus")
            .field("sources", &registry.len())
            .field(
                "subscriptions",
                &registry.values().map(SmallVec::len).sum::<usize>(),
            )
            .finish()
    }
}

impl<M: Message + 'static> EventBus<M> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for messages from `source`.
    ///
    /// With `channel == None` the callback receives every channel of the
    /// source; otherwise only messages on that channel (plus unchanneled
    /// messages).
    pub fn subscribe(
        &self,
        source: impl Into<SourceId>,
        channel: Option<Channel>,
        callback: impl FnMut(&M) + 'static,
    ) {
        let source = source.into();
        trace!(%source, ?channel, "subscribe");
        let callback: Callback<M> = Rc::new(RefCell::new(callback));
        self.registry
            .borrow_mut()
            .entry(source)
            .or_default()
            .push(Subscription { channel, callback });
    }

    /// Delivers `message` to the matching subscribers of `source`.
    ///
    /// Returns the number of callbacks invoked. Callbacks may publish
    /// further messages. A callback that is already running higher up the
    /// stack is skipped rather than re-entered.
    pub fn publish(&self, source: &SourceId, message: &M) -> usize {
        let channel = message.channel();
        let targets: SmallVec<[Subscription<M>; 4]> = {
            let registry = self.registry.borrow();
            let Some(subs) = registry.get(source) else {
                trace!(%source, ?channel, "publish with no subscribers");
                return 0;
            };
            subs.iter().filter(|s| s.matches(channel)).cloned().collect()
        };

        let mut delivered = 0;
        for sub in &targets {
            if let Ok(mut callback) = sub.callback.try_borrow_mut() {
                (&mut *callback)(message);
                delivered += 1;
            } else {
                warn!(%source, ?channel, "skipping re-entrant subscriber");
            }
        }
        trace!(%source, ?channel, delivered, "publish");
        delivered
    }

    /// Connects a receiver to `source`.
    ///
    /// Only messages on channels the receiver declares in
    /// [`Receiver::channels`] are forwarded, plus unchanneled messages.
    /// The channel set is read once, at connection time.
    pub fn connect<R>(&self, source: impl Into<SourceId>, receiver: &Rc<RefCell<R>>)
    where
        R: Receiver<M> + 'static,
    {
        let accepted = receiver.borrow().channels();
        let receiver = Rc::clone(receiver);
        self.subscribe(source, None, move |message: &M| {
            let wanted = message.channel().is_none_or(|c| accepted.accepts(c));
            if wanted {
                receiver.borrow_mut().receive(message);
            }
        });
    }

    /// Returns a publishing handle bound to `source`.
    #[must_use]
    pub fn publisher(&self, source: impl Into<SourceId>) -> Publisher<M> {
        Publisher::new(self.clone(), source.into())
    }

    /// Returns the number of subscriptions registered for `source`.
    #[must_use]
    pub fn subscriber_count(&self, source: &SourceId) -> usize {
        self.registry.borrow().get(source).map_or(0, SmallVec::len)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{EventBus, Message, SourceId};
    use crate::channel::Channel;

    #[derive(Clone, Debug, PartialEq)]
    struct Msg(Option<Channel>, i32);

    impl Message for Msg {
        fn channel(&self) -> Option<Channel> {
            self.0
        }
    }

    #[test]
    fn channel_and_wildcard_subscribers_fire_in_order() {
        let bus = EventBus::<Msg>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = Rc::clone(&log);
        bus.subscribe("A", Some(Channel::Zoom), move |m: &Msg| {
            l.borrow_mut().push(("zoom", m.1));
        });
        let l = Rc::clone(&log);
        bus.subscribe("A", None, move |m: &Msg| l.borrow_mut().push(("any", m.1)));

        let n = bus.publish(&"A".into(), &Msg(Some(Channel::Zoom), 5));
        assert_eq!(n, 2);
        assert_eq!(*log.borrow(), vec![("zoom", 5), ("any", 5)]);
    }

    #[test]
    fn other_channels_are_filtered() {
        let bus = EventBus::<Msg>::new();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        bus.subscribe("A", Some(Channel::Zoom), move |_: &Msg| *h.borrow_mut() += 1);

        assert_eq!(bus.publish(&"A".into(), &Msg(Some(Channel::Pan), 1)), 0);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn unchanneled_publish_reaches_everyone() {
        let bus = EventBus::<Msg>::new();
        let hits = Rc::new(RefCell::new(0));
        for channel in [Some(Channel::Zoom), Some(Channel::Pan), None] {
            let h = Rc::clone(&hits);
            bus.subscribe("A", channel, move |_: &Msg| *h.borrow_mut() += 1);
        }
        assert_eq!(bus.publish(&"A".into(), &Msg(None, 0)), 3);
        assert_eq!(*hits.borrow(), 3);
    }

    #[test]
    fn sources_are_isolated() {
        let bus = EventBus::<Msg>::new();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        bus.subscribe("A", None, move |_: &Msg| *h.borrow_mut() += 1);
        assert_eq!(bus.publish(&"B".into(), &Msg(None, 0)), 0);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(bus.subscriber_count(&SourceId::new("A")), 1);
        assert_eq!(bus.subscriber_count(&SourceId::new("B")), 0);
    }

    #[test]
    fn late_subscriber_sees_no_replay() {
        let bus = EventBus::<Msg>::new();
        bus.publish(&"A".into(), &Msg(Some(Channel::Zoom), 1));
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        bus.subscribe("A", None, move |_: &Msg| *h.borrow_mut() += 1);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn callbacks_can_publish_to_other_sources() {
        let bus = EventBus::<Msg>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let relay = bus.clone();
        bus.subscribe("A", None, move |m: &Msg| {
            relay.publish(&"B".into(), &Msg(Some(Channel::Zoom), m.1 * 2));
        });
        let l = Rc::clone(&log);
        bus.subscribe("B", None, move |m: &Msg| l.borrow_mut().push(m.1));

        bus.publish(&"A".into(), &Msg(Some(Channel::Zoom), 21));
        assert_eq!(*log.borrow(), vec![42]);
    }

    #[test]
    fn self_reentry_is_skipped() {
        let bus = EventBus::<Msg>::new();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let again = bus.clone();
        bus.subscribe("A", None, move |m: &Msg| {
            *h.borrow_mut() += 1;
            if m.1 == 0 {
                // This would recurse into the running callback.
                let n = again.publish(&"A".into(), &Msg(None, 1));
                assert_eq!(n, 0);
            }
        });
        bus.publish(&"A".into(), &Msg(None, 0));
        assert_eq!(*hits.borrow(), 1);
    }
}
