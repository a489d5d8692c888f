//! Tile grid and LOD ring parameters.

use serde::{Deserialize, Serialize};

/// Smallest accepted mesh resolution (quads per tile side)
pub const MIN_TILE_RESOLUTION: u32 = 2;

/// Smallest accepted tile edge length (meters)
pub const MIN_TILE_SIZE_M: f32 = 0.01;

/// Most LOD rings a grid may have. Keeps `2^lod` grid offsets well inside `i32`.
pub const MAX_LOD_LEVELS: u32 = 16;

/// Largest accepted LOD 0 ring radius, in tiles
pub const MAX_TILE_RADIUS: i32 = 64;

/// Camera-relative tile grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileGridParams {
    /// Quads per side of every tile mesh
    pub base_resolution: u32,

    /// Edge length of an LOD 0 tile (meters). LOD l tiles are `2^l` times larger.
    pub base_tile_size_m: f32,

    /// Ring radius at LOD 0, in tiles
    pub tile_radius: i32,

    /// Number of LOD rings (1 to `MAX_LOD_LEVELS`)
    pub lod_levels: u32,

    /// Horizontal distance up to which each LOD is expected to be visible (meters).
    /// Length must equal `lod_levels`; rebuilt from the ring layout otherwise.
    pub lod_distances_m: Vec<f32>,

    /// Minimum time between refreshes when ticking (seconds, 0 = every tick)
    pub refresh_interval_s: f32,

    /// Upper bound on mesh resolution
    pub max_resolution: u32,

    /// Render grouping identifier handed to the renderer with every tile
    pub render_group: u32,
}

impl Default for TileGridParams {
    fn default() -> Self {
        let mut params = Self {
            base_resolution: 32,
            base_tile_size_m: 32.0,
            tile_radius: 3,
            lod_levels: 4,
            lod_distances_m: Vec::new(),
            refresh_interval_s: 0.1,
            max_resolution: 256,
            render_group: 0,
        };
        params.lod_distances_m = params.default_lod_distances();
        params
    }
}

impl TileGridParams {
    /// Ring radius at LOD `lod` (never below 1)
    pub fn ring_radius(&self, lod: u32) -> i32 {
        shifted_radius(self.tile_radius, lod).max(1)
    }

    /// Tile edge length at LOD `lod` (meters)
    pub fn tile_size(&self, lod: u32) -> f32 {
        self.base_tile_size_m * lod_scale(lod) as f32
    }

    /// Distances derived from the ring layout: the outer edge of each ring, kept monotonic.
    pub fn default_lod_distances(&self) -> Vec<f32> {
        let mut distances = Vec::with_capacity(self.lod_levels as usize);
        let mut previous = 0.0_f32;
        for lod in 0..self.lod_levels {
            let extent = (self.ring_radius(lod) as f32 + 1.0) * self.tile_size(lod);
            previous = previous.max(extent);
            distances.push(previous);
        }
        distances
    }

    /// Clamp degenerate values and rebuild mismatched LOD distances.
    pub fn normalized(mut self) -> Self {
        if self.lod_levels == 0 {
            log::warn!("lod_levels must be >= 1, using 1");
            self.lod_levels = 1;
        }
        if self.lod_levels > MAX_LOD_LEVELS {
            log::warn!(
                "lod_levels {} exceeds {}, using {}",
                self.lod_levels,
                MAX_LOD_LEVELS,
                MAX_LOD_LEVELS
            );
            self.lod_levels = MAX_LOD_LEVELS;
        }
        if self.tile_radius < 0 || self.tile_radius > MAX_TILE_RADIUS {
            let clamped = self.tile_radius.clamp(0, MAX_TILE_RADIUS);
            log::warn!("tile_radius {} out of range, using {}", self.tile_radius, clamped);
            self.tile_radius = clamped;
        }
        if self.max_resolution < MIN_TILE_RESOLUTION {
            self.max_resolution = MIN_TILE_RESOLUTION;
        }
        if self.base_resolution < MIN_TILE_RESOLUTION || self.base_resolution > self.max_resolution
        {
            let clamped = self
                .base_resolution
                .clamp(MIN_TILE_RESOLUTION, self.max_resolution);
            log::warn!(
                "base_resolution {} out of range, using {}",
                self.base_resolution,
                clamped
            );
            self.base_resolution = clamped;
        }
        if !self.base_tile_size_m.is_finite() || self.base_tile_size_m < MIN_TILE_SIZE_M {
            log::warn!(
                "base_tile_size_m {} too small, using {}",
                self.base_tile_size_m,
                MIN_TILE_SIZE_M
            );
            self.base_tile_size_m = MIN_TILE_SIZE_M;
        }
        if !self.refresh_interval_s.is_finite() || self.refresh_interval_s < 0.0 {
            self.refresh_interval_s = 0.0;
        }
        if self.lod_distances_m.len() != self.lod_levels as usize {
            if !self.lod_distances_m.is_empty() {
                log::warn!(
                    "{} LOD distances configured for {} LOD levels, regenerating",
                    self.lod_distances_m.len(),
                    self.lod_levels
                );
            }
            self.lod_distances_m = self.default_lod_distances();
        }
        self
    }
}

/// `radius >> lod`, saturating to 0 for large shifts
pub(crate) fn shifted_radius(radius: i32, lod: u32) -> i32 {
    radius.checked_shr(lod).unwrap_or(0)
}

/// `2^lod` tile size multiplier
pub(crate) fn lod_scale(lod: u32) -> i32 {
    1_i32.checked_shl(lod).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_radius_never_below_one() {
        let params = TileGridParams {
            tile_radius: 2,
            ..Default::default()
        };
        assert_eq!(params.ring_radius(0), 2);
        assert_eq!(params.ring_radius(1), 1);
        assert_eq!(params.ring_radius(2), 1);
        assert_eq!(params.ring_radius(40), 1);
    }

    #[test]
    fn test_tile_size_doubles_per_lod() {
        let params = TileGridParams::default();
        assert_eq!(params.tile_size(1), params.base_tile_size_m * 2.0);
        assert_eq!(params.tile_size(3), params.base_tile_size_m * 8.0);
    }

    #[test]
    fn test_mismatched_lod_distances_are_regenerated() {
        let params = TileGridParams {
            lod_levels: 3,
            lod_distances_m: vec![10.0],
            ..Default::default()
        }
        .normalized();

        assert_eq!(params.lod_distances_m.len(), 3);
        assert!(params
            .lod_distances_m
            .windows(2)
            .all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_matching_lod_distances_are_kept() {
        let params = TileGridParams {
            lod_levels: 2,
            lod_distances_m: vec![50.0, 200.0],
            ..Default::default()
        }
        .normalized();

        assert_eq!(params.lod_distances_m, vec![50.0, 200.0]);
    }

    #[test]
    fn test_zero_resolution_is_clamped() {
        let params = TileGridParams {
            base_resolution: 0,
            lod_levels: 0,
            ..Default::default()
        }
        .normalized();

        assert_eq!(params.base_resolution, MIN_TILE_RESOLUTION);
        assert_eq!(params.lod_levels, 1);
    }

    #[test]
    fn test_lod_levels_and_radius_are_bounded() {
        let params = TileGridParams {
            tile_radius: 1_000_000,
            lod_levels: 32,
            ..Default::default()
        }
        .normalized();

        assert_eq!(params.lod_levels, MAX_LOD_LEVELS);
        assert_eq!(params.tile_radius, MAX_TILE_RADIUS);
        assert_eq!(params.lod_distances_m.len(), MAX_LOD_LEVELS as usize);
        assert!(params.lod_distances_m.iter().all(|d| d.is_finite()));
    }
}
