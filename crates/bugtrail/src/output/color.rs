//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green   (Closed, completed actions)
//!   - Active:         yellow  (Working, Verifying)
//!   - Attention:      red     (bugs, errors)
//!   - Info/Reference: cyan    (issue ids, Confirmed)
//!   - Muted:          dimmed  (field labels, note tags)
//!   - Emphasis:       bold    (section headers)

use crate::domain::{IssueType, State};
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply color to a state name.
pub(crate) fn colorize_state(state: State, config: &OutputConfig) -> String {
    let text = state.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match state {
        State::New => text.white().to_string(),
        State::Confirmed => text.cyan().to_string(),
        State::Working | State::Verifying => text.yellow().to_string(),
        State::Closed => text.green().to_string(),
    }
}

/// Apply color to an issue type.
pub(crate) fn colorize_type(issue_type: IssueType, config: &OutputConfig) -> String {
    let text = issue_type.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match issue_type {
        IssueType::Bug => text.red().to_string(),
        IssueType::Enhancement => text.magenta().to_string(),
    }
}

/// Colorize an issue id (cyan), prefixed with `#`.
pub(crate) fn colorize_id(id: impl std::fmt::Display, config: &OutputConfig) -> String {
    let text = format!("#{id}");
    if !config.use_colors {
        return text;
    }
    text.cyan().to_string()
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
