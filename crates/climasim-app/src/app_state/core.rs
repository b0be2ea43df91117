//! ClimaSimApp struct definition and constructor.

use std::sync::Arc;

use winit::window::Window;

use climasim_common::IssueKind;
use climasim_config::ClimaSimConfig;
use climasim_renderer::{FrameTimer, Globe, RenderState};

use crate::camera::OrbitCamera;
use crate::startup::StartupClimate;

/// Top-level application state.
pub struct ClimaSimApp {
    pub(super) config: ClimaSimConfig,
    pub(super) start: StartupClimate,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) render_state: Option<RenderState>,

    // Scene
    pub(super) globe: Option<Globe>,
    pub(super) camera: OrbitCamera,
    pub(super) timer: FrameTimer,

    // Climate shown in the title
    pub(super) year: i32,
    pub(super) last_issue: Option<IssueKind>,

    // Dimmed until the user first interacts
    pub(super) welcome: bool,

    // Mouse orbit
    pub(super) dragging: bool,
    pub(super) last_cursor: Option<(f64, f64)>,

    pub(super) should_exit: bool,
}

impl ClimaSimApp {
    pub fn new(config: ClimaSimConfig, start: StartupClimate) -> Self {
        Self {
            year: start.year,
            last_issue: start.issue.map(|(kind, _)| kind),
            config,
            start,
            window: None,
            render_state: None,
            globe: None,
            camera: OrbitCamera::default(),
            timer: FrameTimer::new(),
            welcome: true,
            dragging: false,
            last_cursor: None,
            should_exit: false,
        }
    }

    /// Sun brightness multiplier for the current frame.
    pub(super) fn brightness(&self) -> f32 {
        if self.welcome {
            self.config.globe.welcome_brightness as f32
        } else {
            1.0
        }
    }

    /// The first input of any kind lifts the welcome dimming.
    pub(super) fn note_interaction(&mut self) {
        if self.welcome {
            self.welcome = false;
            tracing::debug!("welcome dimming lifted");
        }
    }

    pub(super) fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
