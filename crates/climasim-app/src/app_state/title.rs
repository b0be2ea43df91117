//! Window title management: reflects the year and the last issue.

use climasim_common::IssueKind;

use super::core::ClimaSimApp;

pub(super) fn format_title(base: &str, year: i32, issue: Option<IssueKind>) -> String {
    match issue {
        Some(kind) => format!("{base} | {year} | {}", kind.display_name()),
        None => format!("{base} | {year}"),
    }
}

impl ClimaSimApp {
    pub(super) fn update_window_title(&self) {
        let Some(ref window) = self.window else {
            return;
        };
        window.set_title(&format_title(
            &self.config.window.title,
            self.year,
            self.last_issue,
        ));
    }
}

// =============================================================================
// Tests
// =============================================================================
