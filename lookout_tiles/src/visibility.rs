// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which bucket is shown and which tiles load, per view.

use hashbrown::HashSet;
use lookout_geom::VisibleWindow;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::bucket::{TileId, ZoomBucket, bucket_index};

/// A tile that became visible for the first time and must fetch its image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLoad {
    /// Tile element id.
    pub id: TileId,
    /// Image source to assign.
    pub url: String,
}

/// The outcome of one [`TileVisibility::update`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityUpdate {
    /// Index of the shown bucket, or `None` when the zoom selects no bucket.
    pub active: Option<usize>,
    /// Indices of the hidden buckets, ascending.
    pub hidden: SmallVec<[usize; 8]>,
    /// Tiles to load, in bucket order.
    pub loads: Vec<TileLoad>,
}

/// Decides which raster tiles to show and load as the view changes.
///
/// Exactly one bucket is shown at a time: the one at `floor(log2(zoom))`.
/// Within it, any tile whose placed rectangle overlaps the visible window is
/// loaded on first sight. The loaded set only grows; a tile that scrolls out
/// of view keeps its image.
#[derive(Clone, Debug, Default)]
pub struct TileVisibility {
    buckets: Vec<ZoomBucket>,
    loaded: HashSet<TileId>,
    active: Option<usize>,
}

impl TileVisibility {
    /// Creates an engine over `buckets`, ordered by ascending zoom.
    #[must_use]
    pub fn new(buckets: Vec<ZoomBucket>) -> Self {
        Self {
            buckets,
            loaded: HashSet::new(),
            active: None,
        }
    }

    /// The configured buckets.
    #[must_use]
    pub fn buckets(&self) -> &[ZoomBucket] {
        &self.buckets
    }

    /// Bucket shown by the last update.
    #[must_use]
    pub fn active_bucket(&self) -> Option<usize> {
        self.active
    }

    /// Whether `id` has been loaded.
    #[must_use]
    pub fn is_loaded(&self, id: &TileId) -> bool {
        self.loaded.contains(id)
    }

    /// Number of loaded tiles.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Recomputes bucket visibility and tile loads for a view.
    pub fn update(&mut self, zoom: f64, window: &VisibleWindow) -> VisibilityUpdate {
        let target = bucket_index(zoom).filter(|&i| i < self.buckets.len());
        self.active = target;

        let mut update = VisibilityUpdate {
            active: target,
            hidden: (0..self.buckets.len())
                .filter(|&i| Some(i) != target)
                .collect(),
            loads: Vec::new(),
        };

        let Some(index) = target else {
            debug!(zoom, buckets = self.buckets.len(), "zoom selects no tile bucket");
            return update;
        };

        let bucket = &self.buckets[index];
        for tile in &bucket.tiles {
            let placed = bucket.placed(tile.home);
            if !window.overlaps(placed) {
                trace!(tile = %tile.id, "tile outside window");
                continue;
            }
            if self.loaded.contains(&tile.id) {
                trace!(tile = %tile.id, "tile already loaded");
                continue;
            }
            debug!(tile = %tile.id, url = %tile.url, bucket = index, "loading tile");
            self.loaded.insert(tile.id.clone());
            update.loads.push(TileLoad {
                id: tile.id.clone(),
                url: tile.url.clone(),
            });
        }
        update
    }
}
