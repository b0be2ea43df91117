use climasim_common::IssueKind;

use super::*;
use crate::device::RecordingDevice;
use crate::sphere::matrix::{self as mat, IDENTITY};
use crate::sphere::SphereLod;
use crate::texture::{SynthOptions, TextureSources};

fn settings() -> GlobeSettings {
    GlobeSettings {
        lod: SphereLod {
            rings: 8,
            sectors: 16,
        },
        atmosphere_lod: SphereLod {
            rings: 4,
            sectors: 8,
        },
        ..GlobeSettings::default()
    }
}

fn synth() -> SynthOptions {
    SynthOptions {
        seed: 7,
        resolution: Some(16),
        write_back: false,
    }
}

fn globe(device: &mut RecordingDevice) -> Globe {
    Globe::new(device, &settings(), &TextureSources::none(), &synth()).unwrap()
}

fn read_float(globe: &Globe, data: &[u8], name: &str) -> f32 {
    globe
        .program()
        .unwrap()
        .block()
        .layout()
        .read_float(data, name)
        .unwrap()
}

fn read_int(globe: &Globe, data: &[u8], name: &str) -> i32 {
    globe
        .program()
        .unwrap()
        .block()
        .layout()
        .read_int(data, name)
        .unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn new_uploads_two_meshes_seven_textures_one_program() {
    let mut device = RecordingDevice::new();
    let globe = globe(&mut device);
    assert_eq!(device.live_meshes(), 2);
    assert_eq!(device.live_textures(), 7);
    assert_eq!(device.live_programs(), 1);
    assert!(!globe.is_torn_down());
    assert_eq!(globe.state().rotation_speed, 8.0);
}

#[test]
fn link_failure_is_fatal_and_leaks_nothing() {
    let mut device = RecordingDevice::failing_link("adapter lost");
    let result = Globe::new(
        &mut device,
        &settings(),
        &TextureSources::none(),
        &synth(),
    );
    assert!(matches!(result, Err(GlobeError::Shader(_))));
    assert_eq!(device.live_meshes(), 0);
    assert_eq!(device.live_textures(), 0);
    assert_eq!(device.live_programs(), 0);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn render_draws_surface_then_shell() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.tick(0.0);
    globe.render(&mut device, &IDENTITY, &IDENTITY, 1.0).unwrap();

    let draws = device.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].variant, SURFACE_VARIANT);
    assert_eq!(draws[1].variant, SHELL_VARIANT);
    assert_ne!(draws[0].mesh, draws[1].mesh);
    for draw in draws {
        assert_eq!(draw.textures.len(), 7);
    }
    assert_eq!(read_int(&globe, &draws[0].uniforms, "atmosphere_pass"), 0);
    assert_eq!(read_int(&globe, &draws[1].uniforms, "atmosphere_pass"), 1);

    let stats = globe.last_frame();
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(stats.triangles, 8 * 16 * 2 + 4 * 8 * 2);
}

#[test]
fn atmosphere_pass_can_be_disabled() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.set_atmosphere_pass(false);
    globe.render(&mut device, &IDENTITY, &IDENTITY, 1.0).unwrap();
    assert_eq!(device.draws().len(), 1);
    assert_eq!(globe.last_frame().draw_calls, 1);
}

#[test]
fn brightness_scales_sun_without_mutating_state() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    let before = globe.state().clone();

    globe.render(&mut device, &IDENTITY, &IDENTITY, 0.5).unwrap();
    let sun = read_float(&globe, &device.draws()[0].uniforms, "sun_intensity");
    assert!((sun - before.sun_intensity * 0.5).abs() < 1e-6);
    assert_eq!(globe.state(), &before);

    device.take_draws();
    globe.render(&mut device, &IDENTITY, &IDENTITY, 100.0).unwrap();
    let sun = read_float(&globe, &device.draws()[0].uniforms, "sun_intensity");
    assert!((sun - before.sun_intensity * MAX_BRIGHTNESS).abs() < 1e-5);
}

#[test]
fn camera_position_comes_from_inverse_view() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    let view = mat::look_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    globe.render(&mut device, &view, &IDENTITY, 1.0).unwrap();

    let camera = globe
        .program()
        .unwrap()
        .block()
        .layout()
        .read_vec3(&device.draws()[0].uniforms, "camera_position")
        .unwrap();
    assert!(camera[0].abs() < 1e-4);
    assert!(camera[1].abs() < 1e-4);
    assert!((camera[2] - 5.0).abs() < 1e-4);
}

#[test]
fn singular_view_uses_origin_camera() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.render(&mut device, &[0.0; 16], &IDENTITY, 1.0).unwrap();
    let camera = globe
        .program()
        .unwrap()
        .block()
        .vec3("camera_position")
        .unwrap();
    assert_eq!(camera, [0.0; 3]);
}

#[test]
fn climate_changes_reach_uniforms() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.apply_year(2100);
    globe.apply_issue_kind(IssueKind::Pollution, 1.0);
    globe.render(&mut device, &IDENTITY, &IDENTITY, 1.0).unwrap();

    let uniforms = &device.draws()[0].uniforms;
    assert!((read_float(&globe, uniforms, "temperature_change") - 3.0).abs() < 1e-5);
    assert_eq!(read_float(&globe, uniforms, "pollution_level"), 1.0);
}

#[test]
fn model_matrix_follows_transform() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.set_position([1.0, 2.0, -3.0]);
    globe.set_scale(2.0);
    let model = globe.model_matrix();
    assert_eq!(mat::translation(&model), [1.0, 2.0, -3.0]);

    let spun = {
        globe.set_rotation_speed(90.0);
        globe.tick(1.0);
        globe.model_matrix()
    };
    assert_ne!(model, spun);
}

// =============================================================================
// Teardown
// =============================================================================

#[test]
fn teardown_releases_everything_once() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.teardown(&mut device);
    assert!(globe.is_torn_down());
    assert_eq!(device.live_meshes(), 0);
    assert_eq!(device.live_textures(), 0);
    assert_eq!(device.live_programs(), 0);

    globe.teardown(&mut device);
    assert!(globe.is_torn_down());
}

#[test]
fn render_after_teardown_is_an_error() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.teardown(&mut device);
    let err = globe
        .render(&mut device, &IDENTITY, &IDENTITY, 1.0)
        .unwrap_err();
    assert!(matches!(err, GlobeError::TornDown));
    assert!(device.draws().is_empty());
}

#[test]
fn state_transitions_still_work_after_teardown() {
    let mut device = RecordingDevice::new();
    let mut globe = globe(&mut device);
    globe.teardown(&mut device);
    globe.tick(1.0);
    globe.apply_year(2050);
    assert!(globe.apply_issue("ice_melting", 0.5));
    assert_eq!(globe.state().year, Some(2050));
}
