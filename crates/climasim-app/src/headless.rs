//! Windowless run against the recording device.

use std::fmt;

use climasim_config::ClimaSimConfig;
use climasim_renderer::{
    Globe, GlobeError, GlobeSettings, RecordingDevice, SynthOptions, TextureSources,
};

use crate::camera::OrbitCamera;
use crate::startup::StartupClimate;

const TICK: f32 = 1.0 / 60.0;

/// What a headless run drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessReport {
    pub frames: u32,
    pub draw_calls: usize,
    pub triangles: usize,
    pub final_time: f32,
    pub final_rotation: f32,
}

impl fmt::Display for HeadlessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames, {} draws, {} triangles, t={:.2}s, rotation {:.1} deg",
            self.frames, self.draw_calls, self.triangles, self.final_time, self.final_rotation
        )
    }
}

/// Build a globe, drive it for `frames` ticks at 60 Hz, then tear it down.
pub fn run(
    config: &ClimaSimConfig,
    start: &StartupClimate,
    frames: u32,
) -> Result<HeadlessReport, GlobeError> {
    let mut device = RecordingDevice::new();
    let mut globe = Globe::new(
        &mut device,
        &GlobeSettings::from_config(config),
        &TextureSources::from_paths(&config.textures.resolved_paths()),
        &SynthOptions::from_config(&config.textures),
    )?;
    start.apply(&mut globe);

    let camera = OrbitCamera::default();
    let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
    let view = camera.view();
    let projection = camera.projection(aspect);

    let mut report = HeadlessReport {
        frames: 0,
        draw_calls: 0,
        triangles: 0,
        final_time: 0.0,
        final_rotation: 0.0,
    };
    for frame in 0..frames {
        globe.tick(TICK);
        globe.render(&mut device, &view, &projection, 1.0)?;
        let stats = globe.last_frame();
        report.draw_calls += device.take_draws().len();
        report.triangles += stats.triangles;
        report.frames += 1;
        if frame == 0 {
            tracing::debug!(
                "first headless frame: {} draws, {} triangles, eye {:?}",
                stats.draw_calls,
                stats.triangles,
                camera.eye()
            );
        }
    }

    let state = globe.state();
    report.final_time = state.elapsed as f32;
    report.final_rotation = state.rotation_angle;
    tracing::info!(
        "final state: year {:?}, +{:.2} C, ice caps {:.2}, forest loss {:.2}, pollution {:.2}",
        state.year,
        state.temperature_change,
        state.ice_cap_intensity,
        state.forest_loss,
        state.pollution_level
    );
    globe.teardown(&mut device);
    Ok(report)
}
