//! Parameter definitions with physical units and documented semantics.
//!
//! Every tunable constant of the ocean core lives here with:
//! - Physical units (meters, seconds, radians)
//! - Documented ranges and meanings
//! - A `normalized()` pass that clamps degenerate input instead of failing

mod camera;
mod config;
mod ocean;
mod tiles;

// Re-export all types
pub use camera::{CruisePath, FlightPreset, HoverPath, SweepPath};
pub use config::{ConfigError, OceanConfig, BUILTIN_OCEAN_CONFIG};
pub use ocean::{WaveFieldParams, DEFAULT_GRAVITY, MIN_WAVELENGTH_M, SAFE_MIN_WAVELENGTH_M};
pub use tiles::{
    TileGridParams, MAX_LOD_LEVELS, MAX_TILE_RADIUS, MIN_TILE_RESOLUTION, MIN_TILE_SIZE_M,
};
pub(crate) use tiles::{lod_scale, shifted_radius};
