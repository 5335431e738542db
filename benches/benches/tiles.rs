// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use lookout_geom::{GeoPoint, VisibleWindow, WebMercator};
use lookout_tiles::{GeoBounds, PyramidRequest, TilePyramid, TileVisibility};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        f64::from((self.0 >> 32) as u32) / f64::from(u32::MAX)
    }
}

fn request(zoom_to: f64) -> PyramidRequest {
    PyramidRequest::new(
        GeoBounds::new(GeoPoint::new(-0.2, 51.48), GeoPoint::new(0.0, 51.54)),
        800.0,
        600.0,
    )
    .with_zoom_to(zoom_to)
}

fn windows(n: usize, seed: u64) -> Vec<(f64, VisibleWindow)> {
    let mut rng = Lcg(seed);
    (0..n)
        .map(|_| {
            let zoom = 1.0 + rng.next_unit() * 15.0;
            let cx = rng.next_unit() * 800.0;
            let cy = rng.next_unit() * 600.0;
            (zoom, VisibleWindow::new(cx, cy, 800.0 / zoom, 600.0 / zoom))
        })
        .collect()
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookout_tiles_plan");
    for zoom_to in [1.0, 4.0, 16.0] {
        let req = request(zoom_to);
        group.bench_function(format!("plan(zoom_to={zoom_to})"), |b| {
            b.iter(|| black_box(TilePyramid::plan(black_box(&req), &WebMercator)));
        });
    }
    group.finish();
}

fn bench_visibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookout_tiles_visibility");
    group.sample_size(50);
    let req = request(16.0).with_center(Point::new(400.0, 300.0));
    let pyramid = match TilePyramid::plan(&req, &WebMercator) {
        Ok(pyramid) => pyramid,
        Err(err) => panic!("plan failed: {err}"),
    };
    let sweep = windows(256, 0x10C0_0000_0000_0001);

    group.bench_function("fresh_sweep(n=256)", |b| {
        b.iter_batched(
            || pyramid.clone().into_visibility(),
            |mut tiles: TileVisibility| {
                for (zoom, window) in &sweep {
                    black_box(tiles.update(*zoom, window));
                }
                tiles
            },
            BatchSize::SmallInput,
        );
    });

    let mut warm = pyramid.clone().into_visibility();
    for (zoom, window) in &sweep {
        warm.update(*zoom, window);
    }
    group.bench_function("warm_sweep(n=256)", |b| {
        b.iter_batched(
            || warm.clone(),
            |mut tiles: TileVisibility| {
                for (zoom, window) in &sweep {
                    black_box(tiles.update(*zoom, window));
                }
                tiles
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_plan, bench_visibility);
criterion_main!(benches);
