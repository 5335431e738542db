// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Bus: a synchronous publish/subscribe bus for diagram widgets.
//!
//! Widgets talk to each other only through an [`EventBus`]. Subscriptions are
//! keyed by the [`SourceId`] of the publisher and optionally narrowed to a
//! single [`Channel`]. Messages implement [`Message`] to report the channel
//! they travel on; a message with no channel reaches every subscriber of its
//! source.
//!
//! ## Delivery rules
//!
//! - Publishing runs the matching callbacks immediately, in subscription
//!   order, on the calling thread.
//! - A subscription with no channel receives every channel of its source.
//! - There is no buffering and no replay for late subscribers.
//! - A bus is an explicit value owned by one diagram. Clone it to share it
//!   between that diagram's widgets; other diagrams use their own bus.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use lookout_bus::{Channel, EventBus, Message};
//!
//! struct Zoom(f64);
//!
//! impl Message for Zoom {
//!     fn channel(&self) -> Option<Channel> {
//!         Some(Channel::Zoom)
//!     }
//! }
//!
//! let bus = EventBus::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let log = Rc::clone(&seen);
//! bus.subscribe("map", Some(Channel::Zoom), move |z: &Zoom| log.borrow_mut().push(z.0));
//!
//! let map = bus.publisher("map");
//! map.send(&Zoom(4.0));
//! assert_eq!(*seen.borrow(), vec![4.0]);
//! ```
//!
//! Components that handle a fixed set of channels implement [`Receiver`] and
//! are attached with [`EventBus::connect`].

mod bus;
mod channel;
mod receiver;

pub use bus::{EventBus, Message, SourceId};
pub use channel::{Channel, ChannelSet};
pub use receiver::{Publisher, Receiver};
