//! Swellgrid - headless flight over an infinite Gerstner ocean
//!
//! Flies a camera along a preset path, streams LOD tiles around it, and
//! samples a row of buoys through the water query interface every frame.

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use glam::Vec3;

use swellgrid::camera::CameraSystem;
use swellgrid::cli::Args;
use swellgrid::ocean::{
    SimulationClock, WaterSampler, WaterSurface, WaveField, WaveFieldConfig, WaveUniforms,
};
use swellgrid::params::OceanConfig;
use swellgrid::tiles::TileGridManager;

/// Spacing between buoys across the flight path (meters)
const BUOY_SPACING_M: f32 = 12.0;

/// Running totals for the end-of-flight summary
#[derive(Debug, Default)]
struct FlightStats {
    tiles_created: usize,
    tiles_destroyed: usize,
    peak_active: usize,
    refreshes: usize,
    buoy_samples: usize,
    buoy_failures: usize,
    min_height: f32,
    max_height: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => OceanConfig::load(path)?,
        None => OceanConfig::builtin()?,
    };

    let wave_config = WaveFieldConfig::new(config.waves.clone());
    let field = Arc::new(WaveField::new(wave_config.build_state()));
    let clock = Arc::new(SimulationClock::new(0.0));
    let water = WaterSurface::gerstner(Arc::clone(&field), Arc::clone(&clock));

    let camera = CameraSystem::new(args.parse_flight_preset());
    let mut tiles = TileGridManager::new(config.tiles.clone());

    let initial = tiles.generate_initial_tiles(camera.position(0.0));
    let mut stats = FlightStats {
        tiles_created: initial.created.len(),
        peak_active: tiles.active_count(),
        min_height: f32::INFINITY,
        max_height: f32::NEG_INFINITY,
        ..Default::default()
    };

    println!(
        "swellgrid: {} waves, {} initial tiles, {} frames at dt {:.4} s",
        field.snapshot().waves().len(),
        tiles.active_count(),
        args.frames,
        args.dt
    );

    let mut uniforms = WaveUniforms::from_state(&field.snapshot(), 0.0);
    for _ in 0..args.frames {
        let time = clock.advance(args.dt);
        let anchor = camera.position(time);

        let delta = tiles.tick(Some(anchor), args.dt);
        if !delta.is_empty() {
            stats.refreshes += 1;
            stats.tiles_created += delta.created.len();
            stats.tiles_destroyed += delta.destroyed.len();
        }
        stats.peak_active = stats.peak_active.max(tiles.active_count());

        for buoy in buoy_positions(anchor, args.buoys) {
            let sample = water.sample_height_and_normal(buoy);
            stats.buoy_samples += 1;
            if !sample.success {
                stats.buoy_failures += 1;
                continue;
            }
            stats.min_height = stats.min_height.min(sample.height);
            stats.max_height = stats.max_height.max(sample.height);
        }

        uniforms = WaveUniforms::from_state(&field.snapshot(), time);
    }

    print_summary(&stats, &tiles, &uniforms, clock.get());
    tiles.teardown();
    Ok(())
}

/// Buoys in a line across the camera's ground position, along X
fn buoy_positions(anchor: Vec3, count: usize) -> impl Iterator<Item = Vec3> {
    let half = count.saturating_sub(1) as f32 / 2.0;
    (0..count).map(move |i| {
        Vec3::new(
            anchor.x + (i as f32 - half) * BUOY_SPACING_M,
            0.0,
            anchor.z,
        )
    })
}

fn print_summary(stats: &FlightStats, tiles: &TileGridManager, uniforms: &WaveUniforms, time: f32) {
    let cache = tiles.cache().stats();
    println!("\nflight finished at t = {time:.2} s");
    println!(
        "  tiles: {} active (peak {}), {} created, {} destroyed over {} refreshes",
        tiles.active_count(),
        stats.peak_active,
        stats.tiles_created,
        stats.tiles_destroyed,
        stats.refreshes
    );
    println!(
        "  mesh cache: {} entries, {} hits, {} misses",
        cache.entries, cache.hits, cache.misses
    );
    if stats.buoy_samples > stats.buoy_failures {
        println!(
            "  buoys: {} samples, height range {:.2} .. {:.2} m",
            stats.buoy_samples, stats.min_height, stats.max_height
        );
    } else {
        println!("  buoys: {} samples, none succeeded", stats.buoy_samples);
    }
    println!("  gpu waves uploaded: {}", uniforms.wave_count);
}
