//! Text formatting for task fields shown in tables and detail panels.

use super::task::Priority;
use super::view_state::Theme;
use chrono::{DateTime, Local, Utc};

/// Longest description shown in the task table before it is cut.
pub const DESCRIPTION_WIDTH: usize = 40;

/// Timestamp in local time, minutes precision.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_deadline(deadline: &Option<DateTime<Utc>>) -> String {
    deadline.as_ref().map(format_timestamp).unwrap_or_else(|| "-".to_string())
}

pub fn completion_mark(completed: bool) -> &'static str {
    if completed {
        "✔"
    } else {
        " "
    }
}

/// Cuts `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// prettytable cell style for a priority, e.g. `Fr` or `FR`.
///
/// The dark theme uses the bright variants of the same colors.
pub fn priority_style(priority: Priority, theme: Theme) -> &'static str {
    match (priority, theme) {
        (Priority::High, Theme::Light) => "Fr",
        (Priority::High, Theme::Dark) => "FR",
        (Priority::Medium, Theme::Light) => "Fy",
        (Priority::Medium, Theme::Dark) => "FY",
        (Priority::Low, Theme::Light) => "Fg",
        (Priority::Low, Theme::Dark) => "FG",
    }
}

pub fn format_importance(percent: Option<u8>) -> String {
    percent.map(|p| format!("{}%", p)).unwrap_or_else(|| "-".to_string())
}
