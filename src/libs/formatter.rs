//! Time and progress formatting for console output.
//!
//! ## Formats
//!
//! - Countdown: `MM:SS`, minutes unbounded (`90:00` for a 90 minute session)
//! - Focus totals: `HH:MM`, negative values clamped to `00:00`
//! - Timestamps: `YYYY-MM-DD HH:MM`
//! - Progress: a fixed-width bar such as `[######----]`
//!
//! ```rust
//! use tomatobox::libs::formatter::{format_remaining, progress_bar};
//!
//! assert_eq!(format_remaining(1499), "24:59");
//! assert_eq!(progress_bar(0.5, 10), "[#####-----]");
//! ```

use chrono::{Duration, NaiveDateTime};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Seconds left on a countdown as `MM:SS`.
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// `HH:MM`, never negative.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

pub fn format_minutes(minutes: u32) -> String {
    format_duration(&Duration::minutes(i64::from(minutes)))
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Empty string for `None`, so optional columns render as blank cells.
pub fn format_optional_datetime(value: Option<&NaiveDateTime>) -> String {
    value.map(format_datetime).unwrap_or_default()
}

/// Text bar for a ratio in `[0, 1]`. Out-of-range ratios are clamped.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Whole percent of a ratio, for messages.
pub fn percent(ratio: f64) -> u32 {
    if ratio.is_nan() {
        return 0;
    }
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u32
}
