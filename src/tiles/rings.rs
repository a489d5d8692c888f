//! Concentric LOD ring enumeration.
//!
//! LOD `l` covers offsets `(dx, dz)` in `[-r, r]^2` with `r = max(1, radius >> l)`,
//! each scaled by the tile size multiplier `2^l`. Outer rings skip offsets that
//! fall inside the previous LOD's radius `radius >> (l - 1)` so finer rings are
//! never covered twice.

use std::collections::HashSet;

use glam::IVec2;

use super::key::TileKey;
use crate::params::{lod_scale, shifted_radius, TileGridParams};

/// Offsets (in LOD `lod` tile units) that belong to ring `lod`.
pub fn ring_offsets(params: &TileGridParams, lod: u32) -> impl Iterator<Item = IVec2> {
    let radius = params.ring_radius(lod);
    let inner = (lod > 0).then(|| shifted_radius(params.tile_radius, lod - 1));

    (-radius..=radius)
        .flat_map(move |dz| (-radius..=radius).map(move |dx| IVec2::new(dx, dz)))
        .filter(move |offset| match inner {
            Some(inner) => offset.x.abs() > inner || offset.y.abs() > inner,
            None => true,
        })
}

/// Every tile that should exist around the camera cell `center`.
pub fn desired_tiles(center: IVec2, params: &TileGridParams) -> HashSet<TileKey> {
    let mut desired = HashSet::new();
    for lod in 0..params.lod_levels {
        let scale = lod_scale(lod);
        for offset in ring_offsets(params, lod) {
            let cell = center + offset * scale;
            desired.insert(TileKey::new(cell.x, cell.y, lod));
        }
    }
    desired
}
