//! Default wave set generation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::uniforms::MAX_GPU_WAVES;
use super::wave::{WaveDescriptor, WaveFieldState};
use crate::params::WaveFieldParams;

/// Builds wave sets from [`WaveFieldParams`].
///
/// Wavelengths are spread linearly from ripples to swells, steepness falls off
/// as wavelength grows, and directions come from an injectable RNG. Changing
/// the wave count regenerates the whole set.
#[derive(Debug, Clone)]
pub struct WaveFieldConfig {
    params: WaveFieldParams,
}

impl Default for WaveFieldConfig {
    fn default() -> Self {
        Self::new(WaveFieldParams::default())
    }
}

impl WaveFieldConfig {
    pub fn new(params: WaveFieldParams) -> Self {
        Self {
            params: params.normalized(),
        }
    }

    pub fn params(&self) -> &WaveFieldParams {
        &self.params
    }

    pub fn wave_count(&self) -> usize {
        self.params.wave_count
    }

    /// Generate `count` descriptors, drawing directions from `rng`.
    pub fn generate_defaults<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Vec<WaveDescriptor> {
        let count = count.max(1);
        let p = &self.params;

        (0..count)
            .map(|i| {
                // A lone wave is a swell
                let t = if count == 1 {
                    1.0
                } else {
                    i as f32 / (count - 1) as f32
                };
                let wavelength = lerp(p.min_wavelength_m, p.max_wavelength_m, t);
                let steepness = lerp(
                    p.steepness_at_min_wavelength,
                    p.steepness_at_max_wavelength,
                    t,
                );
                let angle = match p.prevailing_direction_rad {
                    Some(base) => {
                        base + rng.gen_range(-p.direction_spread_rad..=p.direction_spread_rad)
                    }
                    None => rng.gen_range(0.0..TAU),
                };
                WaveDescriptor::new(
                    Vec2::from_angle(angle),
                    steepness,
                    wavelength,
                    p.wave_speed,
                    count,
                )
            })
            .collect()
    }

    /// Generate `count` descriptors from the configured seed.
    pub fn generate_seeded(&self, count: usize) -> Vec<WaveDescriptor> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);
        self.generate_defaults(count, &mut rng)
    }

    /// Build the full wave field state for the configured wave count.
    pub fn build_state(&self) -> WaveFieldState {
        let p = &self.params;
        let state = WaveFieldState::new(self.generate_seeded(p.wave_count))
            .with_scales(p.height_scale, p.steepness_scale, p.speed_scale)
            .with_gravity(p.gravity)
            .with_sea_level(p.sea_level_m);

        if let Err(err) = state.validate() {
            log::warn!("generated wave field: {err}");
        }
        log::debug!(
            "built wave field: {} waves, {:.1}-{:.1} m",
            state.waves().len(),
            p.min_wavelength_m,
            p.max_wavelength_m
        );
        state
    }

    /// Apply a new requested wave count. Returns a regenerated state when the
    /// count actually changed. Counts are clamped to `1..=MAX_GPU_WAVES`.
    pub fn resync(&mut self, count: usize) -> Option<WaveFieldState> {
        let count = if count > MAX_GPU_WAVES {
            log::warn!(
                "requested {count} waves exceeds the renderer limit, using {MAX_GPU_WAVES}"
            );
            MAX_GPU_WAVES
        } else {
            count.max(1)
        };
        if count == self.params.wave_count {
            return None;
        }
        log::info!(
            "wave count changed {} -> {}, regenerating",
            self.params.wave_count,
            count
        );
        self.params.wave_count = count;
        Some(self.build_state())
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wavelengths_spread_from_ripples_to_swells() {
        let config = WaveFieldConfig::default();
        let p = config.params().clone();
        let waves = config.generate_seeded(5);

        assert_eq!(waves.len(), 5);
        assert!((waves[0].wavelength() - p.min_wavelength_m).abs() < 1e-5);
        assert!((waves[4].wavelength() - p.max_wavelength_m).abs() < 1e-4);
        assert!(waves
            .windows(2)
            .all(|pair| pair[0].wavelength() < pair[1].wavelength()));
    }

    #[test]
    fn test_steepness_decreases_with_wavelength() {
        let waves = WaveFieldConfig::default().generate_seeded(6);
        assert!(waves
            .windows(2)
            .all(|pair| pair[0].steepness() >= pair[1].steepness()));
    }

    #[test]
    fn test_amplitude_uses_total_count() {
        let waves = WaveFieldConfig::default().generate_seeded(4);
        for wave in &waves {
            let expected = wave.steepness() / (wave.wavenumber() * 4.0);
            assert!((wave.amplitude() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_count_is_clamped_to_one() {
        let waves = WaveFieldConfig::default().generate_seeded(0);
        assert_eq!(waves.len(), 1);
    }

    #[test]
    fn test_same_seed_same_directions() {
        let config = WaveFieldConfig::default();
        assert_eq!(config.generate_seeded(8), config.generate_seeded(8));

        let other = WaveFieldConfig::new(WaveFieldParams {
            seed: 7,
            ..Default::default()
        });
        assert_ne!(config.generate_seeded(8), other.generate_seeded(8));
    }

    #[test]
    fn test_prevailing_direction_bounds_spread() {
        let config = WaveFieldConfig::new(WaveFieldParams {
            prevailing_direction_rad: Some(0.0),
            direction_spread_rad: 0.25,
            ..Default::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for wave in config.generate_defaults(32, &mut rng) {
            let angle = wave.direction().to_angle();
            assert!(angle.abs() <= 0.25 + 1e-5, "angle {angle}");
        }
    }

    #[test]
    fn test_build_state_applies_global_factors() {
        let config = WaveFieldConfig::new(WaveFieldParams {
            height_scale: 0.5,
            speed_scale: 2.0,
            gravity: 3.7,
            sea_level_m: 12.0,
            ..Default::default()
        });
        let state = config.build_state();
        assert_eq!(state.waves().len(), config.wave_count());
        assert_eq!(state.height_scale, 0.5);
        assert_eq!(state.speed_scale, 2.0);
        assert_eq!(state.gravity, 3.7);
        assert_eq!(state.sea_level, 12.0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_resync_regenerates_only_on_change() {
        let mut config = WaveFieldConfig::default();
        let count = config.wave_count();
        assert!(config.resync(count).is_none());

        let state = config.resync(count + 3).expect("count changed");
        assert_eq!(state.waves().len(), count + 3);
        assert_eq!(config.wave_count(), count + 3);
    }

    #[test]
    fn test_resync_caps_at_renderer_limit() {
        let mut config = WaveFieldConfig::default();
        let state = config.resync(MAX_GPU_WAVES * 2).expect("count changed");

        assert_eq!(state.waves().len(), MAX_GPU_WAVES);
        assert_eq!(config.wave_count(), MAX_GPU_WAVES);
        assert!(state.validate().is_ok());
        assert!(config.resync(MAX_GPU_WAVES + 1).is_none());
    }
}
