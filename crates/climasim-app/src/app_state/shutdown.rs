//! Graceful shutdown: release globe resources before the GPU goes away.

use super::core::ClimaSimApp;

impl ClimaSimApp {
    /// Safe to call more than once.
    pub(super) fn shutdown(&mut self) {
        if self.render_state.is_none() && self.globe.is_none() {
            return;
        }
        tracing::info!("Initiating graceful shutdown");

        if let (Some(rs), Some(globe)) = (self.render_state.as_mut(), self.globe.as_mut()) {
            let mut device = rs.graphics();
            globe.teardown(&mut device);
        }
        self.globe = None;
        self.render_state = None;

        tracing::info!(
            "Shutdown after {} frames ({:.1} fps recently)",
            self.timer.frame_count(),
            self.timer.fps()
        );
    }
}
