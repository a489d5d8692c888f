//! Wave field parameters: spectrum shape and global multipliers.

use serde::{Deserialize, Serialize};

use crate::ocean::MAX_GPU_WAVES;

/// Standard gravity used by the deep-water dispersion relation (m/s²)
pub const DEFAULT_GRAVITY: f32 = 9.8;

/// Wavelengths at or below this are skipped by the evaluator (meters)
pub const MIN_WAVELENGTH_M: f32 = 1.0e-3;

/// Degenerate configured wavelengths are clamped up to this (meters)
pub const SAFE_MIN_WAVELENGTH_M: f32 = 1.0e-2;

/// Wave field generation and evaluation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveFieldParams {
    /// Number of superposed waves (1 to `MAX_GPU_WAVES`)
    pub wave_count: usize,

    /// Shortest generated wavelength in meters (ripples)
    pub min_wavelength_m: f32,

    /// Longest generated wavelength in meters (swells)
    pub max_wavelength_m: f32,

    /// Steepness assigned to the shortest wave (0-1)
    pub steepness_at_min_wavelength: f32,

    /// Steepness assigned to the longest wave (0-1)
    pub steepness_at_max_wavelength: f32,

    /// Per-wave multiplier on the dispersion-derived phase velocity
    pub wave_speed: f32,

    /// Prevailing wind direction in radians (None = uniformly random directions)
    pub prevailing_direction_rad: Option<f32>,

    /// Half-angle of the direction spread around the prevailing direction (radians)
    pub direction_spread_rad: f32,

    /// Seed for direction generation
    pub seed: u64,

    /// Global multiplier on vertical displacement
    pub height_scale: f32,

    /// Global multiplier on horizontal (crest-sharpening) displacement
    pub steepness_scale: f32,

    /// Global multiplier on wave animation speed
    pub speed_scale: f32,

    /// Gravitational acceleration (m/s²)
    pub gravity: f32,

    /// Rest height of the water surface (meters)
    pub sea_level_m: f32,
}

impl Default for WaveFieldParams {
    fn default() -> Self {
        Self {
            wave_count: 8,
            min_wavelength_m: 2.0,
            max_wavelength_m: 60.0,
            steepness_at_min_wavelength: 0.6,
            steepness_at_max_wavelength: 0.2,
            wave_speed: 1.0,
            prevailing_direction_rad: None,
            direction_spread_rad: std::f32::consts::FRAC_PI_4,
            seed: 42,
            height_scale: 1.0,
            steepness_scale: 1.0,
            speed_scale: 1.0,
            gravity: DEFAULT_GRAVITY,
            sea_level_m: 0.0,
        }
    }
}

impl WaveFieldParams {
    /// Clamp degenerate values to safe ones, logging each correction once.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        if self.wave_count == 0 {
            log::warn!("wave_count must be >= 1, using 1");
            self.wave_count = 1;
        }
        if self.wave_count > MAX_GPU_WAVES {
            log::warn!(
                "wave_count {} exceeds the renderer limit, using {}",
                self.wave_count,
                MAX_GPU_WAVES
            );
            self.wave_count = MAX_GPU_WAVES;
        }

        self.min_wavelength_m = clamp_wavelength("min_wavelength_m", self.min_wavelength_m);
        self.max_wavelength_m = clamp_wavelength("max_wavelength_m", self.max_wavelength_m);
        if self.max_wavelength_m < self.min_wavelength_m {
            log::warn!(
                "wavelength range inverted ({} > {}), swapping",
                self.min_wavelength_m,
                self.max_wavelength_m
            );
            std::mem::swap(&mut self.min_wavelength_m, &mut self.max_wavelength_m);
        }

        self.steepness_at_min_wavelength = clamp_unit(self.steepness_at_min_wavelength);
        self.steepness_at_max_wavelength = clamp_unit(self.steepness_at_max_wavelength);

        self.wave_speed = non_negative("wave_speed", self.wave_speed, defaults.wave_speed);
        self.height_scale = non_negative("height_scale", self.height_scale, defaults.height_scale);
        self.steepness_scale = non_negative(
            "steepness_scale",
            self.steepness_scale,
            defaults.steepness_scale,
        );
        self.speed_scale = non_negative("speed_scale", self.speed_scale, defaults.speed_scale);

        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            log::warn!("gravity {} is not positive, using {}", self.gravity, DEFAULT_GRAVITY);
            self.gravity = DEFAULT_GRAVITY;
        }
        if !self.sea_level_m.is_finite() {
            self.sea_level_m = defaults.sea_level_m;
        }
        if !self.direction_spread_rad.is_finite() {
            self.direction_spread_rad = defaults.direction_spread_rad;
        }
        self.direction_spread_rad = self.direction_spread_rad.abs();

        self
    }
}

fn clamp_wavelength(name: &str, value: f32) -> f32 {
    if value.is_finite() && value >= SAFE_MIN_WAVELENGTH_M {
        value
    } else {
        log::warn!("{name} {value} below minimum, clamping to {SAFE_MIN_WAVELENGTH_M}");
        SAFE_MIN_WAVELENGTH_M
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn non_negative(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{name} {value} is invalid, using {fallback}");
        fallback
    }
}
