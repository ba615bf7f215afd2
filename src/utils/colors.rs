/// ANSI color helper utilities for terminal output.
use crate::models::alert_level::AlertLevel;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Color for an alert level:
/// danger → red, near → yellow, ok → green.
pub fn color_for_level(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Danger => RED,
        AlertLevel::Near => YELLOW,
        AlertLevel::Ok => GREEN,
    }
}

/// Colored rendering of a placeholder-able value.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
