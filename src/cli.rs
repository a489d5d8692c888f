//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{CruisePath, FlightPreset, HoverPath, SweepPath};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "swellgrid")]
#[command(about = "Headless Gerstner ocean and LOD tile streaming flight", long_about = None)]
pub struct Args {
    /// Ocean configuration JSON (defaults to the built-in configuration)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Flight preset: hover, cruise (default), sweep
    #[arg(long, value_name = "PRESET", default_value = "cruise")]
    pub preset: String,

    /// Number of simulated frames
    #[arg(long, value_name = "COUNT", default_value = "600")]
    pub frames: u32,

    /// Frame time step (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "0.016666668")]
    pub dt: f32,

    /// Number of buoys sampled along the flight path each frame
    #[arg(long, value_name = "COUNT", default_value = "4")]
    pub buoys: usize,

    /// Altitude for the hover preset (meters)
    #[arg(long, value_name = "METERS", default_value = "20")]
    pub altitude: f32,
}

impl Args {
    /// Parse flight preset from command-line arguments
    pub fn parse_flight_preset(&self) -> FlightPreset {
        match self.preset.to_lowercase().as_str() {
            "hover" => {
                log::info!("flight: hover ({} m)", self.altitude);
                let mut hover = HoverPath::default();
                hover.position[1] = self.altitude;
                FlightPreset::Hover(hover)
            }
            "cruise" => {
                log::info!("flight: cruise (straight line)");
                FlightPreset::Cruise(CruisePath::default())
            }
            "sweep" => {
                log::info!("flight: sweep (procedural arcs)");
                FlightPreset::Sweep(SweepPath::default())
            }
            other => {
                log::warn!("unknown flight preset '{other}', using cruise");
                FlightPreset::Cruise(CruisePath::default())
            }
        }
    }
}
