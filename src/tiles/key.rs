//! Tile identity and grid placement.

use glam::{IVec2, Vec3};

use crate::params::lod_scale;

/// Identity of one ocean tile: grid coordinates in LOD 0 cells plus the LOD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    pub x: i32,
    pub z: i32,
    pub lod: u32,
}

impl TileKey {
    pub const fn new(x: i32, z: i32, lod: u32) -> Self {
        Self { x, z, lod }
    }

    /// World-space center of the tile. An LOD `l` tile covers the `2^l` LOD 0
    /// cells starting `2^l / 2` cells before its key on each axis.
    ///
    /// Coarse tiles are even-sized and centered on their key while the LOD 0
    /// square is odd-sized, so a coarse ring can leave a one-cell seam on the
    /// negative side of a finer ring. With radius 3 and 4 LODs, the LOD 3 tile
    /// keyed `-8` covers cells `-12..=-5` and LOD 0 starts at `-3`, leaving
    /// cell `-4` uncovered; the positive side (`+8` covers `4..=11`) is flush.
    pub fn world_center(&self, base_tile_size: f32) -> Vec3 {
        let span = lod_scale(self.lod);
        let center = |c: i32| (c - span / 2) as f32 + span as f32 / 2.0;
        Vec3::new(
            center(self.x) * base_tile_size,
            0.0,
            center(self.z) * base_tile_size,
        )
    }

    /// Edge length of this tile
    pub fn size(&self, base_tile_size: f32) -> f32 {
        base_tile_size * lod_scale(self.lod) as f32
    }
}

/// LOD 0 grid cell containing `position` (floor division on X and Z).
pub fn grid_cell(position: Vec3, base_tile_size: f32) -> IVec2 {
    IVec2::new(
        (position.x / base_tile_size).floor() as i32,
        (position.z / base_tile_size).floor() as i32,
    )
}
