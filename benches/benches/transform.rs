// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use lookout_geom::{AffineTransform, GeoPoint, from_geo, to_geo};
use lookout_viewport::{Viewport, ViewportConfig};

fn view_transform() -> AffineTransform {
    let mut t = AffineTransform::IDENTITY;
    t.scale_about(4.0, Point::new(200.0, 150.0));
    t.compose_pan(Vec2::new(-37.5, 12.25));
    t
}

fn bench_inversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookout_geom");
    let t = view_transform();

    group.bench_function("invert_gauss_jordan", |b| {
        b.iter(|| black_box(black_box(&t).invert()));
    });
    group.bench_function("invert_closed_form", |b| {
        b.iter(|| black_box(black_box(&t).invert_closed_form()));
    });
    group.bench_function("apply_inverse", |b| {
        b.iter(|| black_box(t.apply_inverse(black_box(Point::new(200.0, 150.0)))));
    });
    group.bench_function("mercator_round_trip", |b| {
        b.iter(|| black_box(to_geo(from_geo(black_box(GeoPoint::new(-3.19, 55.95))))));
    });
    group.finish();
}

fn bench_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookout_viewport");
    group.bench_function("zoom_then_pan", |b| {
        b.iter(|| {
            let mut viewport =
                Viewport::new(ViewportConfig::new(Point::new(200.0, 150.0), 400.0, 300.0, 16.0));
            for level in [2.0, 4.0, 8.0, 16.0] {
                black_box(viewport.zoom(level));
                black_box(viewport.pan(Vec2::new(20.0, -20.0)));
            }
            viewport
        });
    });
    group.finish();
}

criterion_group!(benches, bench_inversion, bench_viewport);
criterion_main!(benches);
