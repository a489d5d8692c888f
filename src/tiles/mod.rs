//! Camera-relative ocean tile streaming
//!
//! Tiles are addressed by [`TileKey`] in LOD 0 grid units. The manager keeps a
//! set of concentric LOD rings centered on the camera's grid cell and shares
//! plane meshes between tiles through the [`MeshCache`].

mod cache;
mod grid;
mod key;
mod rings;

pub use cache::{CacheStats, MeshCache};
pub use grid::{TileDelta, TileGridManager, TileInstance};
pub use key::{grid_cell, TileKey};
pub use rings::{desired_tiles, ring_offsets};
