//! Procedural flight paths that anchor the ocean tile grid.

use glam::Vec3;

use crate::params::{CruisePath, FlightPreset, HoverPath, SweepPath};

/// Camera flight driven by one of the [`FlightPreset`] paths
#[derive(Debug, Clone)]
pub struct CameraSystem {
    preset: FlightPreset,
}

impl CameraSystem {
    pub fn new(preset: FlightPreset) -> Self {
        Self { preset }
    }

    /// Camera position at `time_s`. This is the anchor the tile grid follows.
    pub fn position(&self, time_s: f32) -> Vec3 {
        match &self.preset {
            FlightPreset::Hover(params) => Self::compute_hover_path(params),
            FlightPreset::Cruise(params) => Self::compute_cruise_path(params, time_s),
            FlightPreset::Sweep(params) => Self::compute_sweep_path(params, time_s),
        }
    }

    fn compute_hover_path(p: &HoverPath) -> Vec3 {
        Vec3::from_array(p.position)
    }

    fn compute_cruise_path(p: &CruisePath, time_s: f32) -> Vec3 {
        let heading = Vec3::new(p.heading_rad.cos(), 0.0, p.heading_rad.sin());
        heading * (p.speed_m_per_s * time_s) + Vec3::Y * p.altitude_m
    }

    fn compute_sweep_path(p: &SweepPath, time_s: f32) -> Vec3 {
        // X axis: wide arcs with a faster weave on top
        let x = (time_s * p.arc_freq_hz).sin() * p.arc_amplitude_m
            + (time_s * p.weave_freq_hz).cos() * p.weave_amplitude_m;

        let z = time_s * p.forward_speed_m_per_s;

        // Y axis: base altitude with swoops, clamped above the water
        let y_swoop = (time_s * p.swoop_freq_hz).sin() * p.swoop_amplitude_m;
        let y = (p.base_altitude_m + y_swoop).max(p.min_altitude_m);

        Vec3::new(x, y, z)
    }
}
