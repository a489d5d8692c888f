//! Flight path presets that drive the tile grid anchor.

/// Stationary anchor (debugging, cache warm-up)
#[derive(Debug, Clone)]
pub struct HoverPath {
    /// Anchor position (meters)
    pub position: [f32; 3],
}

impl Default for HoverPath {
    fn default() -> Self {
        Self {
            position: [0.0, 20.0, 0.0],
        }
    }
}

/// Straight-line flight at constant altitude
#[derive(Debug, Clone)]
pub struct CruisePath {
    /// Constant altitude (meters)
    pub altitude_m: f32,

    /// Ground speed (meters per second)
    pub speed_m_per_s: f32,

    /// Heading in the XZ plane (radians, 0 = +X)
    pub heading_rad: f32,
}

impl Default for CruisePath {
    fn default() -> Self {
        Self {
            altitude_m: 30.0,
            speed_m_per_s: 40.0,
            heading_rad: 0.0,
        }
    }
}

/// Procedural sweeping path: forward progression with layered lateral arcs
#[derive(Debug, Clone)]
pub struct SweepPath {
    /// Forward speed along +Z (meters per second)
    pub forward_speed_m_per_s: f32,

    /// Lateral arc frequency (Hz)
    pub arc_freq_hz: f32,

    /// Lateral arc amplitude (meters)
    pub arc_amplitude_m: f32,

    /// Secondary weave frequency (Hz)
    pub weave_freq_hz: f32,

    /// Secondary weave amplitude (meters)
    pub weave_amplitude_m: f32,

    /// Base altitude (meters)
    pub base_altitude_m: f32,

    /// Altitude swoop frequency (Hz)
    pub swoop_freq_hz: f32,

    /// Altitude swoop amplitude (meters, ±)
    pub swoop_amplitude_m: f32,

    /// Minimum altitude clamp (meters)
    pub min_altitude_m: f32,
}

impl Default for SweepPath {
    fn default() -> Self {
        Self {
            forward_speed_m_per_s: 25.0,
            arc_freq_hz: 0.05,
            arc_amplitude_m: 120.0,
            weave_freq_hz: 0.3,
            weave_amplitude_m: 15.0,
            base_altitude_m: 40.0,
            swoop_freq_hz: 0.1,
            swoop_amplitude_m: 25.0,
            min_altitude_m: 10.0,
        }
    }
}

/// Flight path selection
#[derive(Debug, Clone)]
pub enum FlightPreset {
    /// Stationary anchor
    Hover(HoverPath),

    /// Straight line at constant altitude
    Cruise(CruisePath),

    /// Sweeping arcs with altitude changes
    Sweep(SweepPath),
}

impl Default for FlightPreset {
    fn default() -> Self {
        Self::Cruise(CruisePath::default())
    }
}
