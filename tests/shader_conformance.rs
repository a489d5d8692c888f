//! The embedded WGSL evaluator must parse, validate, and agree with the CPU
//! uniform layouts byte for byte.

use glam::{Vec2, Vec3};
use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use swellgrid::ocean::{
    GpuWave, TileUniforms, WaveDescriptor, WaveFieldConfig, WaveFieldState, WaveUniforms,
    MAX_GPU_WAVES, OCEAN_WAVES_WGSL,
};
use swellgrid::params::WaveFieldParams;

fn parse() -> naga::Module {
    wgsl::parse_str(OCEAN_WAVES_WGSL).expect("ocean shader should parse")
}

fn struct_span(module: &naga::Module, name: &str) -> u32 {
    module
        .types
        .iter()
        .find_map(|(_, ty)| match &ty.inner {
            naga::TypeInner::Struct { span, .. } if ty.name.as_deref() == Some(name) => {
                Some(*span)
            }
            _ => None,
        })
        .unwrap_or_else(|| panic!("struct {name} missing from shader"))
}

#[test]
fn test_shader_validates() {
    let module = parse();
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::empty());
    validator
        .validate(&module)
        .expect("ocean shader should validate");
}

#[test]
fn test_entry_points() {
    let module = parse();
    let stages: Vec<_> = module
        .entry_points
        .iter()
        .map(|ep| (ep.name.as_str(), ep.stage))
        .collect();

    assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn test_uniform_layouts_match_cpu_structs() {
    let module = parse();
    assert_eq!(
        struct_span(&module, "GpuWave") as usize,
        std::mem::size_of::<GpuWave>()
    );
    assert_eq!(
        struct_span(&module, "WaveUniforms") as usize,
        std::mem::size_of::<WaveUniforms>()
    );
    assert_eq!(
        struct_span(&module, "TileUniforms") as usize,
        std::mem::size_of::<TileUniforms>()
    );
}

#[test]
fn test_wave_slot_count_matches() {
    let module = parse();
    let max_waves = module
        .constants
        .iter()
        .find(|(_, c)| c.name.as_deref() == Some("MAX_WAVES"))
        .map(|(_, c)| &module.global_expressions[c.init]);

    match max_waves {
        Some(naga::Expression::Literal(naga::Literal::U32(n))) => {
            assert_eq!(*n as usize, MAX_GPU_WAVES)
        }
        other => panic!("unexpected MAX_WAVES definition: {other:?}"),
    }
}

/// `evaluate_waves` from the WGSL, driven only by the uploaded uniforms.
/// Returns (world position, normal) for a vertex at rest position `rest`.
fn shader_vertex(ocean: &WaveUniforms, rest: Vec2) -> (Vec3, Vec3) {
    let mut displacement = Vec3::ZERO;
    let mut normal = Vec3::Y;

    let count = (ocean.wave_count as usize).min(MAX_GPU_WAVES);
    for wave in &ocean.waves[..count] {
        let k = wave.wavenumber;
        if k <= 0.0 {
            continue;
        }
        let d = Vec2::from_array(wave.direction);
        let a = wave.amplitude;
        let c = (ocean.gravity / k).sqrt();
        let f = k * d.dot(rest) - k * c * wave.speed * ocean.speed_scale * ocean.time;
        let (s, co) = f.sin_cos();
        let ka = k * a;

        displacement += Vec3::new(
            d.x * a * ocean.steepness_scale * co,
            a * ocean.height_scale * s,
            d.y * a * ocean.steepness_scale * co,
        );
        normal += Vec3::new(
            -d.x * ka * ocean.height_scale * co,
            -ka * ocean.steepness_scale * s,
            -d.y * ka * ocean.height_scale * co,
        );
    }

    let world = Vec3::new(rest.x, ocean.sea_level, rest.y) + displacement;
    (world, normal.normalize())
}

fn assert_fields_agree(state: &WaveFieldState) {
    let points = [
        Vec2::ZERO,
        Vec2::new(3.5, -7.25),
        Vec2::new(-120.0, 41.0),
        Vec2::new(512.0, 512.0),
    ];
    for time in [0.0, 0.7, 13.2] {
        let uniforms = WaveUniforms::from_state(state, time);
        for rest in points {
            let cpu = state.evaluate(rest, time);
            let (world, normal) = shader_vertex(&uniforms, rest);

            let expected = state.displaced_position(rest, time);
            assert!(
                (world - expected).abs().max_element() < 1e-4,
                "position at {rest} t={time}: shader {world}, cpu {expected}"
            );
            assert!((world.y - cpu.height).abs() < 1e-4);
            assert!(
                (normal - cpu.normal).abs().max_element() < 1e-4,
                "normal at {rest} t={time}: shader {normal}, cpu {}",
                cpu.normal
            );
        }
    }
}

#[test]
fn test_shader_formula_matches_cpu_default_field() {
    assert_fields_agree(&WaveFieldConfig::default().build_state());
}

#[test]
fn test_shader_formula_matches_cpu_scaled_field() {
    let config = WaveFieldConfig::new(WaveFieldParams {
        wave_count: 5,
        height_scale: 1.7,
        steepness_scale: 0.4,
        speed_scale: 2.5,
        gravity: 3.7,
        sea_level_m: -4.0,
        prevailing_direction_rad: Some(1.2),
        ..Default::default()
    });
    assert_fields_agree(&config.build_state());
}

#[test]
fn test_shader_formula_matches_cpu_at_wave_limit() {
    // An oversized request is capped, so every CPU wave is uploaded
    let config = WaveFieldConfig::new(WaveFieldParams {
        wave_count: MAX_GPU_WAVES + 8,
        ..Default::default()
    });
    let state = config.build_state();
    assert_eq!(state.waves().len(), MAX_GPU_WAVES);
    assert_eq!(
        WaveUniforms::from_state(&state, 0.0).wave_count as usize,
        MAX_GPU_WAVES
    );
    assert_fields_agree(&state);
}

#[test]
fn test_shader_formula_skips_dead_waves_like_cpu() {
    let state = WaveFieldState::new(vec![
        WaveDescriptor::new(Vec2::X, 0.5, 12.0, 1.0, 3),
        WaveDescriptor::new(Vec2::Y, 0.8, 0.0, 1.0, 3),
        WaveDescriptor::new(Vec2::new(1.0, 1.0), 0.3, 30.0, 0.5, 3),
    ])
    .with_scales(1.2, 0.9, 1.0);
    assert_fields_agree(&state);
}
