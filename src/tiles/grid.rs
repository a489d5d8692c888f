//! Camera-relative tile set maintenance.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use glam::{IVec2, Mat4, Vec3};

use super::cache::MeshCache;
use super::key::{grid_cell, TileKey};
use super::rings::desired_tiles;
use crate::ocean::{PlaneMesh, TileUniforms};
use crate::params::TileGridParams;

/// One live tile: shared geometry plus its world placement
#[derive(Debug, Clone)]
pub struct TileInstance {
    pub key: TileKey,
    pub mesh: Arc<PlaneMesh>,
    pub center: Vec3,
    pub size: f32,
    pub render_group: u32,
}

impl TileInstance {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center)
    }

    pub fn uniforms(&self) -> TileUniforms {
        TileUniforms {
            model: self.model_matrix().to_cols_array_2d(),
            tile_size: self.size,
            lod: self.key.lod,
            resolution: self.mesh.resolution(),
            render_group: self.render_group,
        }
    }
}

/// Keys created and destroyed by one refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileDelta {
    pub created: HashSet<TileKey>,
    pub destroyed: HashSet<TileKey>,
}

impl TileDelta {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.destroyed.is_empty()
    }
}

/// Keeps the set of active tiles matched to the camera's grid cell.
///
/// Each key moves `absent -> active -> absent`; tiles present before and after
/// a refresh are never touched.
#[derive(Debug)]
pub struct TileGridManager {
    params: TileGridParams,
    cache: MeshCache,
    active: HashMap<TileKey, TileInstance>,
    last_cell: Option<IVec2>,
    since_refresh_s: f32,
    anchor_missing_reported: bool,
}

impl TileGridManager {
    pub fn new(params: TileGridParams) -> Self {
        Self {
            params: params.normalized(),
            cache: MeshCache::new(),
            active: HashMap::new(),
            last_cell: None,
            since_refresh_s: 0.0,
            anchor_missing_reported: false,
        }
    }

    pub fn params(&self) -> &TileGridParams {
        &self.params
    }

    pub fn cache(&self) -> &MeshCache {
        &self.cache
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn active_tiles(&self) -> impl Iterator<Item = &TileInstance> {
        self.active.values()
    }

    pub fn tile(&self, key: &TileKey) -> Option<&TileInstance> {
        self.active.get(key)
    }

    pub fn contains(&self, key: &TileKey) -> bool {
        self.active.contains_key(key)
    }

    /// The grid cell the active set was last built for
    pub fn current_cell(&self) -> Option<IVec2> {
        self.last_cell
    }

    /// Build the tile set around `camera` from scratch.
    ///
    /// Any previously active tiles are released first; the ring enumeration is
    /// the same one [`Self::refresh_tiles`] uses.
    pub fn generate_initial_tiles(&mut self, camera: Vec3) -> TileDelta {
        let destroyed: HashSet<TileKey> = self.active.drain().map(|(key, _)| key).collect();
        self.last_cell = None;

        let mut delta = self.refresh_tiles(camera);
        delta.destroyed.extend(destroyed);
        log::info!(
            "initial ocean tiles: {} across {} LOD levels",
            self.active.len(),
            self.params.lod_levels
        );
        delta
    }

    /// Bring the active set in line with the rings around `camera`.
    ///
    /// Cheap when the camera stays inside its grid cell: nothing is recomputed.
    pub fn refresh_tiles(&mut self, camera: Vec3) -> TileDelta {
        let cell = grid_cell(camera, self.params.base_tile_size_m);
        if self.last_cell == Some(cell) {
            return TileDelta::default();
        }
        self.last_cell = Some(cell);

        let desired = desired_tiles(cell, &self.params);
        let mut delta = TileDelta::default();

        let stale: Vec<TileKey> = self
            .active
            .keys()
            .filter(|key| !desired.contains(key))
            .copied()
            .collect();
        for key in stale {
            if self.release_tile(&key) {
                delta.destroyed.insert(key);
            }
        }

        for key in desired {
            if self.ensure_tile(key) {
                delta.created.insert(key);
            }
        }

        log::debug!(
            "camera cell ({}, {}): +{} -{} tiles, {} active",
            cell.x,
            cell.y,
            delta.created.len(),
            delta.destroyed.len(),
            self.active.len()
        );
        delta
    }

    /// Per-frame entry point with refresh throttling.
    ///
    /// A missing anchor idles the manager and is reported once per outage.
    pub fn tick(&mut self, anchor: Option<Vec3>, dt: f32) -> TileDelta {
        let Some(anchor) = anchor else {
            if !self.anchor_missing_reported {
                log::warn!("ocean tile grid has no anchor to follow, refresh disabled");
                self.anchor_missing_reported = true;
            }
            return TileDelta::default();
        };
        self.anchor_missing_reported = false;

        self.since_refresh_s += dt.max(0.0);
        if self.last_cell.is_some() && self.since_refresh_s < self.params.refresh_interval_s {
            return TileDelta::default();
        }
        self.since_refresh_s = 0.0;
        self.refresh_tiles(anchor)
    }

    /// Create the tile for `key` unless it already exists. Returns whether it was created.
    pub fn ensure_tile(&mut self, key: TileKey) -> bool {
        if self.active.contains_key(&key) {
            return false;
        }
        let base = self.params.base_tile_size_m;
        let size = key.size(base);
        let mesh = self.cache.get_or_generate(self.params.base_resolution, size);
        self.active.insert(
            key,
            TileInstance {
                key,
                mesh,
                center: key.world_center(base),
                size,
                render_group: self.params.render_group,
            },
        );
        true
    }

    /// Drop the tile for `key` if present. Returns whether it existed.
    pub fn release_tile(&mut self, key: &TileKey) -> bool {
        self.active.remove(key).is_some()
    }

    /// Coarsest LOD whose distance threshold does not cover `distance`, i.e. the
    /// first LOD expected to be visible there. `None` beyond the last threshold.
    pub fn lod_for_distance(&self, distance: f32) -> Option<u32> {
        self.params
            .lod_distances_m
            .iter()
            .position(|&threshold| distance <= threshold)
            .map(|lod| lod as u32)
    }

    /// Release every tile and cached mesh.
    pub fn teardown(&mut self) {
        let released = self.active.len();
        self.active.clear();
        self.cache.clear();
        self.last_cell = None;
        self.since_refresh_s = 0.0;
        log::debug!("ocean tile grid torn down, {released} tiles released");
    }
}
