//! Gerstner ocean surface: wave evaluation, wave set generation, tile meshes
//! and the interfaces handed to physics and rendering collaborators.

mod mesh;
mod sampler;
mod spectrum;
mod uniforms;
mod wave;

// Re-export public types
pub use mesh::{MeshIndices, PlaneMesh, Vertex, MAX_U16_VERTICES};
pub use sampler::{SimulationClock, SurfaceSample, WaterSampler, WaterSurface};
pub use spectrum::WaveFieldConfig;
pub use uniforms::{GpuWave, TileUniforms, WaveUniforms, MAX_GPU_WAVES, OCEAN_WAVES_WGSL};
pub use wave::{WaveDescriptor, WaveField, WaveFieldState, WaveSample, WaveValidationError};
