//! Gerstner wave field evaluation.
//!
//! The field is a sum of trochoidal waves. Each wave displaces a surface point
//! at rest position `p` by
//!
//! ```text
//! f      = k * dot(D, p) - k * c * speed * speed_scale * t,   c = sqrt(g / k)
//! offset = (D.x * a * s * cos f,  a * h * sin f,  D.y * a * s * cos f)
//! ```
//!
//! where `a = steepness / (k * wave_count)` is fixed when the descriptor is built,
//! `h` is the global height multiplier and `s` the global steepness multiplier.
//! The surface normal is
//!
//! ```text
//! N = normalize(-Σ D.x * k*a*h * cos f,  1 - Σ k*a*s * sin f,  -Σ D.y * k*a*h * cos f)
//! ```
//!
//! The WGSL evaluator in `shaders/ocean_waves.wgsl` uses the same formulas term
//! for term; keep the two in sync.

use std::f32::consts::TAU;
use std::sync::{Arc, PoisonError, RwLock};

use glam::{Vec2, Vec3};
use thiserror::Error;

use super::uniforms::MAX_GPU_WAVES;
use crate::params::{DEFAULT_GRAVITY, MIN_WAVELENGTH_M};

/// Fixed-point iterations used to invert horizontal displacement
const WORLD_HEIGHT_ITERATIONS: usize = 8;

/// One trochoidal wave. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveDescriptor {
    direction: Vec2,
    steepness: f32,
    wavelength: f32,
    speed: f32,
    wavenumber: f32,
    amplitude: f32,
}

impl WaveDescriptor {
    /// Build a descriptor for a field of `wave_count` superposed waves.
    ///
    /// The direction is normalized (zero falls back to +X) and steepness is
    /// clamped to [0, 1]. A wavelength at or below [`MIN_WAVELENGTH_M`] yields a
    /// descriptor that contributes nothing.
    pub fn new(
        direction: Vec2,
        steepness: f32,
        wavelength: f32,
        speed: f32,
        wave_count: usize,
    ) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec2::X);
        let steepness = if steepness.is_finite() {
            steepness.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let speed = if speed.is_finite() { speed } else { 0.0 };

        let (wavenumber, amplitude) = if wavelength.is_finite() && wavelength > MIN_WAVELENGTH_M
        {
            let k = TAU / wavelength;
            (k, steepness / (k * wave_count.max(1) as f32))
        } else {
            (0.0, 0.0)
        };

        Self {
            direction,
            steepness,
            wavelength,
            speed,
            wavenumber,
            amplitude,
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn steepness(&self) -> f32 {
        self.steepness
    }

    pub fn wavelength(&self) -> f32 {
        self.wavelength
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Angular wavenumber `k = 2π / wavelength` (0 for skipped waves)
    pub fn wavenumber(&self) -> f32 {
        self.wavenumber
    }

    /// Alias of [`Self::wavenumber`]: spatial frequency in radians per meter
    pub fn frequency(&self) -> f32 {
        self.wavenumber
    }

    /// Displacement amplitude, already divided by the wave count
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Whether this wave contributes to the field
    pub fn is_active(&self) -> bool {
        self.wavenumber > 0.0
    }

    /// Deep-water phase speed `sqrt(g / k)` (m/s)
    pub fn phase_speed(&self, gravity: f32) -> f32 {
        if self.is_active() {
            (gravity / self.wavenumber).sqrt()
        } else {
            0.0
        }
    }

    /// Time for one full oscillation at a fixed point (seconds).
    /// Infinite for skipped or frozen waves.
    pub fn period(&self, gravity: f32, speed_scale: f32) -> f32 {
        let omega = self.wavenumber * self.phase_speed(gravity) * self.speed * speed_scale;
        if omega.abs() > f32::EPSILON {
            TAU / omega.abs()
        } else {
            f32::INFINITY
        }
    }
}

/// Result of evaluating the field at one rest position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    /// Total displacement from the rest position (x, y, z)
    pub displacement: Vec3,
    /// Surface height: sea level plus vertical displacement
    pub height: f32,
    /// Unit surface normal
    pub normal: Vec3,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaveValidationError {
    #[error("wave {index} has k*a*steepness_scale = {ka:.3} > 1, crests will loop")]
    LoopingCrest { index: usize, ka: f32 },
    #[error("{count} waves exceed the renderer limit of {max}")]
    TooManyWaves { count: usize, max: usize },
}

/// An immutable wave configuration: descriptors plus global factors.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFieldState {
    waves: Vec<WaveDescriptor>,
    pub height_scale: f32,
    pub steepness_scale: f32,
    pub speed_scale: f32,
    pub gravity: f32,
    pub sea_level: f32,
}

impl Default for WaveFieldState {
    fn default() -> Self {
        Self::calm(0.0)
    }
}

impl WaveFieldState {
    pub fn new(waves: Vec<WaveDescriptor>) -> Self {
        Self {
            waves,
            ..Self::calm(0.0)
        }
    }

    /// A field with no waves: flat water at `sea_level`.
    pub fn calm(sea_level: f32) -> Self {
        Self {
            waves: Vec::new(),
            height_scale: 1.0,
            steepness_scale: 1.0,
            speed_scale: 1.0,
            gravity: DEFAULT_GRAVITY,
            sea_level,
        }
    }

    pub fn with_sea_level(mut self, sea_level: f32) -> Self {
        self.sea_level = sea_level;
        self
    }

    pub fn with_scales(mut self, height: f32, steepness: f32, speed: f32) -> Self {
        self.height_scale = height;
        self.steepness_scale = steepness;
        self.speed_scale = speed;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn waves(&self) -> &[WaveDescriptor] {
        &self.waves
    }

    /// Check the soft no-looping constraint `k * a * steepness_scale <= 1` and
    /// that every wave fits in the renderer snapshot.
    pub fn validate(&self) -> Result<(), WaveValidationError> {
        if self.waves.len() > MAX_GPU_WAVES {
            return Err(WaveValidationError::TooManyWaves {
                count: self.waves.len(),
                max: MAX_GPU_WAVES,
            });
        }
        for (index, wave) in self.waves.iter().enumerate() {
            let ka = wave.wavenumber * wave.amplitude * self.steepness_scale;
            if ka > 1.0 + 1.0e-5 {
                return Err(WaveValidationError::LoopingCrest { index, ka });
            }
        }
        Ok(())
    }

    #[inline]
    fn phase(&self, wave: &WaveDescriptor, position: Vec2, time: f32) -> f32 {
        let k = wave.wavenumber;
        let c = (self.gravity / k).sqrt();
        k * wave.direction.dot(position) - k * c * wave.speed * self.speed_scale * time
    }

    /// Displacement, height and normal of the surface point at rest position `position`.
    pub fn evaluate(&self, position: Vec2, time: f32) -> WaveSample {
        let mut displacement = Vec3::ZERO;
        let mut normal = Vec3::Y;

        for wave in self.waves.iter().filter(|w| w.is_active()) {
            let f = self.phase(wave, position, time);
            let (sin_f, cos_f) = f.sin_cos();
            let a = wave.amplitude;
            let ka = wave.wavenumber * a;
            let d = wave.direction;

            displacement += Vec3::new(
                d.x * a * self.steepness_scale * cos_f,
                a * self.height_scale * sin_f,
                d.y * a * self.steepness_scale * cos_f,
            );
            normal += Vec3::new(
                -d.x * ka * self.height_scale * cos_f,
                -ka * self.steepness_scale * sin_f,
                -d.y * ka * self.height_scale * cos_f,
            );
        }

        WaveSample {
            displacement,
            height: self.sea_level + displacement.y,
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
        }
    }

    /// Height-only fast path of [`Self::evaluate`].
    pub fn height(&self, position: Vec2, time: f32) -> f32 {
        let mut offset = 0.0;
        for wave in self.waves.iter().filter(|w| w.is_active()) {
            let f = self.phase(wave, position, time);
            offset += wave.amplitude * self.height_scale * f.sin();
        }
        self.sea_level + offset
    }

    /// Horizontal part of the displacement only.
    fn horizontal_offset(&self, position: Vec2, time: f32) -> Vec2 {
        let mut offset = Vec2::ZERO;
        for wave in self.waves.iter().filter(|w| w.is_active()) {
            let f = self.phase(wave, position, time);
            offset += wave.direction * (wave.amplitude * self.steepness_scale * f.cos());
        }
        offset
    }

    /// Where the surface point with rest position `rest` (x, z) ends up.
    pub fn displaced_position(&self, rest: Vec2, time: f32) -> Vec3 {
        let sample = self.evaluate(rest, time);
        Vec3::new(rest.x, self.sea_level, rest.y) + sample.displacement
    }

    /// Sample the displaced surface at world (x, z) rather than at a rest position.
    ///
    /// Inverts the horizontal displacement with a few fixed-point steps, then
    /// evaluates at the recovered rest position. Converges while `k*a*s < 1`.
    pub fn evaluate_at_world(&self, world: Vec2, time: f32) -> WaveSample {
        let mut rest = world;
        for _ in 0..WORLD_HEIGHT_ITERATIONS {
            rest = world - self.horizontal_offset(rest, time);
        }
        self.evaluate(rest, time)
    }
}

/// Shared handle to the active wave configuration.
///
/// Readers take a snapshot per evaluation; [`WaveField::replace`] swaps the
/// whole state at once, so no evaluation ever sees a half-updated set.
#[derive(Debug, Default)]
pub struct WaveField {
    state: RwLock<Arc<WaveFieldState>>,
}

impl WaveField {
    pub fn new(state: WaveFieldState) -> Self {
        Self {
            state: RwLock::new(Arc::new(state)),
        }
    }

    pub fn snapshot(&self) -> Arc<WaveFieldState> {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn replace(&self, state: WaveFieldState) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(state);
    }

    pub fn evaluate(&self, position: Vec2, time: f32) -> WaveSample {
        self.snapshot().evaluate(position, time)
    }

    pub fn height(&self, position: Vec2, time: f32) -> f32 {
        self.snapshot().height(position, time)
    }
}
