//! Fixed-width parameter snapshots consumed by a GPU-side evaluator.

use bytemuck::{Pod, Zeroable};

use super::wave::WaveFieldState;

/// Wave slots in [`WaveUniforms`]. Must match `MAX_WAVES` in the WGSL source.
pub const MAX_GPU_WAVES: usize = 16;

/// Vertex-stage evaluator reproducing [`WaveFieldState::evaluate`]
pub const OCEAN_WAVES_WGSL: &str = include_str!("../shaders/ocean_waves.wgsl");

/// One wave slot (32 bytes, 16-byte aligned for uniform arrays)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuWave {
    pub direction: [f32; 2],
    pub wavenumber: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub _padding: [f32; 3],
}

/// Per-frame wave parameters. Unused slots are zeroed and skipped by the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct WaveUniforms {
    pub sea_level: f32,
    pub gravity: f32,
    pub time: f32,
    pub wave_count: u32,
    pub height_scale: f32,
    pub steepness_scale: f32,
    pub speed_scale: f32,
    pub _padding: f32,
    pub waves: [GpuWave; MAX_GPU_WAVES],
}

impl WaveUniforms {
    /// Snapshot `state` at simulation time `time`.
    ///
    /// Skipped waves are dropped and at most [`MAX_GPU_WAVES`] are kept;
    /// [`WaveFieldState::validate`] reports configurations that overflow.
    pub fn from_state(state: &WaveFieldState, time: f32) -> Self {
        let mut uniforms = Self {
            sea_level: state.sea_level,
            gravity: state.gravity,
            time,
            wave_count: 0,
            height_scale: state.height_scale,
            steepness_scale: state.steepness_scale,
            speed_scale: state.speed_scale,
            ..Self::zeroed()
        };

        let active = state.waves().iter().filter(|w| w.is_active());
        for (slot, wave) in uniforms.waves.iter_mut().zip(active) {
            *slot = GpuWave {
                direction: wave.direction().to_array(),
                wavenumber: wave.wavenumber(),
                amplitude: wave.amplitude(),
                speed: wave.speed(),
                _padding: [0.0; 3],
            };
            uniforms.wave_count += 1;
        }
        uniforms
    }
}

/// Per-tile placement handed to the renderer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TileUniforms {
    pub model: [[f32; 4]; 4],
    pub tile_size: f32,
    pub lod: u32,
    pub resolution: u32,
    pub render_group: u32,
}
