//! Frame rendering logic.

use super::core::ClimaSimApp;

impl ClimaSimApp {
    /// Advance the globe by the frame delta, draw it, and present.
    pub(super) fn render_frame(&mut self) {
        self.timer.begin_frame();
        let dt = self.timer.delta_seconds();
        let brightness = self.brightness();

        let (Some(rs), Some(globe)) = (self.render_state.as_mut(), self.globe.as_mut()) else {
            return;
        };

        globe.tick(dt);
        let view = self.camera.view();
        let projection = self.camera.projection(rs.aspect());

        let drawn = {
            let mut device = rs.graphics();
            globe.render(&mut device, &view, &projection, brightness)
        };
        if let Err(e) = drawn {
            tracing::error!("Globe render error: {e}");
            rs.discard_frame();
            return;
        }

        if let Err(e) = rs.present() {
            tracing::error!("Render error: {e}");
        }
    }
}
