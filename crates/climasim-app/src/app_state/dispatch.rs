//! Keyboard command dispatch.

use climasim_renderer::climate::{MAX_YEAR, MIN_YEAR};

use crate::input::Command;

use super::core::ClimaSimApp;

/// Move `year` by `steps` increments of `step`, staying inside the
/// supported range.
pub(super) fn step_year(year: i32, steps: i32, step: u32) -> i32 {
    let step = i32::try_from(step).unwrap_or(i32::MAX);
    year.saturating_add(steps.saturating_mul(step))
        .clamp(MIN_YEAR, MAX_YEAR)
}

impl ClimaSimApp {
    pub(super) fn dispatch(&mut self, command: Command) {
        tracing::debug!("dispatch {command:?}");
        match command {
            Command::StepYear(steps) => {
                let year = step_year(self.year, steps, self.config.climate.year_step);
                if year != self.year {
                    self.year = year;
                    if let Some(ref mut globe) = self.globe {
                        globe.apply_year(year);
                    }
                    tracing::info!("Year {year}");
                }
            }
            Command::ApplyIssue(kind) => {
                let intensity = self.config.climate.issue_intensity as f32;
                if let Some(ref mut globe) = self.globe {
                    globe.apply_issue_kind(kind, intensity);
                }
                self.last_issue = Some(kind);
                tracing::info!("{} at {intensity:.2}", kind.display_name());
            }
            Command::PureTextures => {
                if let Some(ref mut globe) = self.globe {
                    globe.state_mut().enable_pure_texture_mode();
                }
            }
            Command::HybridTextures => {
                if let Some(ref mut globe) = self.globe {
                    globe.state_mut().enable_hybrid_mode();
                }
            }
            Command::Quit => {
                self.should_exit = true;
            }
        }
        self.update_window_title();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use climasim_common::IssueKind;
    use climasim_config::ClimaSimConfig;

    use crate::startup::StartupClimate;

    fn app() -> ClimaSimApp {
        ClimaSimApp::new(
            ClimaSimConfig::default(),
            StartupClimate {
                year: 2024,
                issue: None,
            },
        )
    }

    #[test]
    fn step_year_clamps_to_range() {
        assert_eq!(step_year(2024, 1, 5), 2029);
        assert_eq!(step_year(2024, -1, 5), 2019);
        assert_eq!(step_year(2098, 1, 5), MAX_YEAR);
        assert_eq!(step_year(1902, -1, 5), MIN_YEAR);
        assert_eq!(step_year(2000, i32::MAX, u32::MAX), MAX_YEAR);
    }

    #[test]
    fn dispatch_without_globe_tracks_year_and_issue() {
        let mut app = app();
        app.dispatch(Command::StepYear(1));
        assert_eq!(app.year, 2029);
        app.dispatch(Command::ApplyIssue(IssueKind::Deforestation));
        assert_eq!(app.last_issue, Some(IssueKind::Deforestation));
        assert!(!app.should_exit);
    }

    #[test]
    fn quit_sets_exit_flag() {
        let mut app = app();
        app.dispatch(Command::Quit);
        assert!(app.should_exit);
    }
}
