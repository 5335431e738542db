// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile pyramid planning.
//!
//! Plans the zoom buckets of a WMTS layer over central London and prints
//! each bucket's slippy zoom, placement and first tiles.
//!
//! Run:
//! - `cargo run -p lookout_demos --example tile_pyramid`

use lookout_geom::{Equirectangular, GeoPoint, WebMercator};
use lookout_tiles::{GeoBounds, PyramidRequest, TilePyramid, tile_position};

fn main() {
    lookout_demos::init_logging();

    let bounds = GeoBounds::new(GeoPoint::new(-0.2, 51.48), GeoPoint::new(0.0, 51.54));
    let request = PyramidRequest::new(bounds, 800.0, 600.0)
        .with_id_prefix("london")
        .with_zoom_to(16.0);

    match TilePyramid::plan(&request, &Equirectangular) {
        Ok(_) => println!("unexpected: planned over EPSG:4326"),
        Err(err) => println!("EPSG:4326 refused: {err}"),
    }

    let pyramid = match TilePyramid::plan(&request, &WebMercator) {
        Ok(pyramid) => pyramid,
        Err(err) => {
            eprintln!("planning failed: {err}");
            return;
        }
    };

    let center = GeoPoint::new(-0.1, 51.51);
    println!("base slippy zoom {}", pyramid.base_zoom());
    println!("tiles: {}", pyramid.attribution());
    for level in pyramid.levels() {
        let bucket = &level.bucket;
        let at = tile_position(center, level.slippy_zoom);
        println!(
            "level {:>2}  slippy {:>2}  scale {:.4}  offset ({:.1}, {:.1})  {} tiles, center in tile {}/{}",
            level.level,
            level.slippy_zoom,
            bucket.scale,
            bucket.offset.x,
            bucket.offset.y,
            bucket.tiles.len(),
            at.x,
            at.y,
        );
        for tile in bucket.tiles.iter().take(2) {
            println!("    {} {}", tile.id, tile.url);
        }
    }
}
