//! Window creation, renderer initialization, and globe construction.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use climasim_renderer::{Globe, GlobeSettings, RenderState, SynthOptions, TextureSources};

use super::core::ClimaSimApp;

/// Deep-space backdrop behind the globe.
const SPACE_COLOR: (f64, f64, f64) = (0.002, 0.003, 0.01);

impl ClimaSimApp {
    /// Create the window, initialize the GPU renderer, and build the globe.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_config = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width as f64,
                window_config.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let mut rs = match pollster::block_on(RenderState::new(window.clone())) {
            Ok(rs) => rs,
            Err(e) => {
                tracing::error!("Failed to initialize renderer: {e}");
                return false;
            }
        };
        let (r, g, b) = SPACE_COLOR;
        rs.set_clear_color(r, g, b);

        let settings = GlobeSettings::from_config(&self.config);
        let sources = TextureSources::from_paths(&self.config.textures.resolved_paths());
        let synth = SynthOptions::from_config(&self.config.textures);
        let globe = {
            let mut device = rs.graphics();
            Globe::new(&mut device, &settings, &sources, &synth)
        };
        let mut globe = match globe {
            Ok(globe) => globe,
            Err(e) => {
                tracing::error!("Failed to build globe: {e}");
                return false;
            }
        };
        self.start.apply(&mut globe);

        self.window = Some(window);
        self.render_state = Some(rs);
        self.globe = Some(globe);
        true
    }
}
