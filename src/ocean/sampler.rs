//! Height/normal queries for gameplay and physics collaborators.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use glam::{Vec2, Vec3};

use super::wave::WaveField;

/// Outcome of a surface query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// False when no wave configuration is bound; height and normal are then
    /// sea level and straight up.
    pub success: bool,
    pub height: f32,
    pub normal: Vec3,
}

impl SurfaceSample {
    pub fn flat(sea_level: f32, success: bool) -> Self {
        Self {
            success,
            height: sea_level,
            normal: Vec3::Y,
        }
    }
}

/// Anything that can report water height and normal at a world position.
pub trait WaterSampler: Send + Sync {
    fn sample_height_and_normal(&self, world_position: Vec3) -> SurfaceSample;
}

/// Simulation time shared between the frame driver and samplers.
#[derive(Debug, Default)]
pub struct SimulationClock {
    bits: AtomicU32,
}

impl SimulationClock {
    pub fn new(time: f32) -> Self {
        Self {
            bits: AtomicU32::new(time.to_bits()),
        }
    }

    pub fn set(&self, time: f32) {
        self.bits.store(time.to_bits(), Ordering::Release);
    }

    pub fn advance(&self, dt: f32) -> f32 {
        let time = self.get() + dt;
        self.set(time);
        time
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Water surface backends.
#[derive(Debug)]
pub enum WaterSurface {
    /// Gerstner wave field evaluated at the shared simulation time
    Gerstner {
        field: Arc<WaveField>,
        clock: Arc<SimulationClock>,
    },
    /// No wave configuration bound. Every query fails closed.
    Unbound { sea_level: f32, reported: AtomicBool },
}

impl WaterSurface {
    pub fn gerstner(field: Arc<WaveField>, clock: Arc<SimulationClock>) -> Self {
        Self::Gerstner { field, clock }
    }

    pub fn unbound(sea_level: f32) -> Self {
        Self::Unbound {
            sea_level,
            reported: AtomicBool::new(false),
        }
    }
}

impl WaterSampler for WaterSurface {
    fn sample_height_and_normal(&self, world_position: Vec3) -> SurfaceSample {
        match self {
            Self::Gerstner { field, clock } => {
                let state = field.snapshot();
                let xz = Vec2::new(world_position.x, world_position.z);
                let sample = state.evaluate_at_world(xz, clock.get());
                SurfaceSample {
                    success: true,
                    height: sample.height,
                    normal: sample.normal,
                }
            }
            Self::Unbound {
                sea_level,
                reported,
            } => {
                if !reported.swap(true, Ordering::Relaxed) {
                    log::warn!("water queried with no wave configuration bound");
                }
                SurfaceSample::flat(*sea_level, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::{WaveFieldConfig, WaveFieldState};

    #[test]
    fn test_unbound_fails_closed() {
        let surface = WaterSurface::unbound(-1.5);
        for _ in 0..3 {
            let sample = surface.sample_height_and_normal(Vec3::new(10.0, 5.0, -3.0));
            assert!(!sample.success);
            assert_eq!(sample.height, -1.5);
            assert_eq!(sample.normal, Vec3::Y);
        }
    }

    #[test]
    fn test_gerstner_samples_at_clock_time() {
        let state = WaveFieldConfig::default().build_state();
        let field = Arc::new(WaveField::new(state.clone()));
        let clock = Arc::new(SimulationClock::new(0.0));
        let surface = WaterSurface::gerstner(Arc::clone(&field), Arc::clone(&clock));

        clock.set(4.0);
        let p = Vec3::new(7.0, 0.0, 3.0);
        let sample = surface.sample_height_and_normal(p);
        let expected = state.evaluate_at_world(Vec2::new(7.0, 3.0), 4.0);

        assert!(sample.success);
        assert_eq!(sample.height, expected.height);
        assert_eq!(sample.normal, expected.normal);
    }

    #[test]
    fn test_replaced_field_is_seen_by_sampler() {
        let field = Arc::new(WaveField::new(WaveFieldConfig::default().build_state()));
        let surface = WaterSurface::gerstner(Arc::clone(&field), Arc::default());

        field.replace(WaveFieldState::calm(2.0));
        let sample = surface.sample_height_and_normal(Vec3::ZERO);
        assert_eq!(sample.height, 2.0);
        assert_eq!(sample.normal, Vec3::Y);
    }

    #[test]
    fn test_clock_advance() {
        let clock = SimulationClock::default();
        assert_eq!(clock.get(), 0.0);
        clock.advance(0.5);
        assert_eq!(clock.advance(0.25), 0.75);
    }
}
