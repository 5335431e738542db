// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lookout_bus::{Channel, EventBus, Message, SourceId};

#[derive(Clone, Copy, Debug)]
enum Event {
    Zoom,
    Pan,
}

impl Message for Event {
    fn channel(&self) -> Option<Channel> {
        Some(match self {
            Self::Zoom => Channel::Zoom,
            Self::Pan => Channel::Pan,
        })
    }
}

fn bus_with(subscribers: usize) -> (EventBus<Event>, Rc<Cell<u64>>) {
    let bus = EventBus::new();
    let hits = Rc::new(Cell::new(0));
    for i in 0..subscribers {
        let hits = Rc::clone(&hits);
        let channel = if i % 2 == 0 {
            Some(Channel::Zoom)
        } else {
            Some(Channel::Pan)
        };
        bus.subscribe("map", channel, move |_: &Event| hits.set(hits.get() + 1));
    }
    (bus, hits)
}

fn bench_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookout_bus");
    let source = SourceId::new("map");
    for n in [1_usize, 8, 64] {
        let (bus, hits) = bus_with(n);
        group.bench_function(format!("publish_zoom(subs={n})"), |b| {
            b.iter(|| black_box(bus.publish(&source, black_box(&Event::Zoom))));
        });
        group.bench_function(format!("publish_pan(subs={n})"), |b| {
            b.iter(|| black_box(bus.publish(&source, black_box(&Event::Pan))));
        });
        black_box(hits.get());
    }
    group.bench_function("publish_unknown_source", |b| {
        let (bus, _) = bus_with(8);
        let other = SourceId::new("elsewhere");
        b.iter(|| black_box(bus.publish(&other, &Event::Pan)));
    });
    group.finish();
}

criterion_group!(benches, bench_publish);
criterion_main!(benches);
