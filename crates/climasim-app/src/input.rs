//! Keyboard commands.

use climasim_common::IssueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the year by this many steps.
    StepYear(i32),
    ApplyIssue(IssueKind),
    PureTextures,
    HybridTextures,
    Quit,
}

/// Convert a winit key name to the short form commands match on.
pub fn normalize_winit_key(key: &str) -> String {
    match key {
        "ArrowUp" => "Up".to_string(),
        "ArrowDown" => "Down".to_string(),
        "ArrowLeft" => "Left".to_string(),
        "ArrowRight" => "Right".to_string(),
        " " => "Space".to_string(),
        _ => {
            if key.chars().count() == 1 {
                key.to_uppercase()
            } else {
                key.to_string()
            }
        }
    }
}

/// The command bound to a normalized key, if any.
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "Left" => Some(Command::StepYear(-1)),
        "Right" => Some(Command::StepYear(1)),
        "1" | "2" | "3" | "4" | "5" => {
            let index = key.parse::<usize>().ok()? - 1;
            IssueKind::ALL.get(index).copied().map(Command::ApplyIssue)
        }
        "P" => Some(Command::PureTextures),
        "H" => Some(Command::HybridTextures),
        "Escape" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_arrows_and_letters() {
        assert_eq!(normalize_winit_key("ArrowLeft"), "Left");
        assert_eq!(normalize_winit_key("p"), "P");
        assert_eq!(normalize_winit_key("Escape"), "Escape");
        assert_eq!(normalize_winit_key(" "), "Space");
    }

    #[test]
    fn year_keys() {
        assert_eq!(command_for_key("Left"), Some(Command::StepYear(-1)));
        assert_eq!(command_for_key("Right"), Some(Command::StepYear(1)));
    }

    #[test]
    fn number_keys_select_issues_in_order() {
        for (i, kind) in IssueKind::ALL.iter().enumerate() {
            let key = (i + 1).to_string();
            assert_eq!(command_for_key(&key), Some(Command::ApplyIssue(*kind)));
        }
        assert_eq!(command_for_key("6"), None);
    }

    #[test]
    fn mode_and_quit_keys() {
        assert_eq!(command_for_key(&normalize_winit_key("p")), Some(Command::PureTextures));
        assert_eq!(command_for_key(&normalize_winit_key("h")), Some(Command::HybridTextures));
        assert_eq!(command_for_key("Escape"), Some(Command::Quit));
        assert_eq!(command_for_key("Q"), None);
    }
}
