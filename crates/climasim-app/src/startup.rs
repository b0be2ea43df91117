//! Climate applied to the globe before the first frame.

use climasim_common::IssueKind;
use climasim_config::ClimaSimConfig;
use climasim_renderer::Globe;

use crate::cli::Args;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupClimate {
    pub year: i32,
    pub issue: Option<(IssueKind, f32)>,
}

impl StartupClimate {
    /// Command-line values win over config.
    pub fn resolve(args: &Args, config: &ClimaSimConfig) -> Self {
        let intensity = args
            .intensity
            .unwrap_or(config.climate.issue_intensity as f32);
        Self {
            year: args.year.unwrap_or(config.climate.start_year),
            issue: args.issue.map(|kind| (kind, intensity)),
        }
    }

    pub fn apply(&self, globe: &mut Globe) {
        globe.apply_year(self.year);
        if let Some((kind, intensity)) = self.issue {
            globe.apply_issue_kind(kind, intensity);
        }
        tracing::info!(
            "Startup climate: year {}{}",
            self.year,
            self.issue
                .map(|(kind, i)| format!(", {} at {i:.2}", kind.display_name()))
                .unwrap_or_default()
        );
    }
}
