//! X-axis tick label formatting for timelines expressed in epoch seconds.
//!
//! [`format_axis_label`] is the plain `HH:MM:SS` contract handed to rendering
//! backends. [`TimeAxisFormatter`] adds a date prefix when the visible range spans
//! more than one calendar day, which happens for logs that cross midnight.

use std::fmt::Write;

use chrono::{DateTime, Local};

pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Render `timestamp_secs` as local wall-clock `HH:MM:SS`.
///
/// Returns an empty string for `NaN`, infinities and timestamps chrono cannot represent.
///
/// ```
/// # use sensorplot::data::x_formatter::format_axis_label;
/// assert_eq!(format_axis_label(f64::NAN), "");
/// assert_eq!(format_axis_label(0.0).len(), 8);
/// ```
pub fn format_axis_label(timestamp_secs: f64) -> String {
    secs_to_local(timestamp_secs)
        .map(|dt| render(&dt, DEFAULT_TIME_FORMAT))
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// TimeAxisFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Range-aware formatter for time axes.
///
/// # Date prefix
/// When [`show_date_on_day_change`](Self::show_date_on_day_change) is set and the
/// visible range starts and ends on different local calendar days, labels are
/// prefixed with `MM-DD `, so ticks on either side of midnight stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxisFormatter {
    /// chrono format string for the time part.
    pub time_format: String,
    pub show_date_on_day_change: bool,
}

impl Default for TimeAxisFormatter {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            show_date_on_day_change: true,
        }
    }
}

impl TimeAxisFormatter {
    pub fn with_time_format(time_format: impl Into<String>) -> Self {
        Self {
            time_format: time_format.into(),
            ..Self::default()
        }
    }

    /// Format `value` given the visible range `x_range` (both in epoch seconds).
    pub fn format(&self, value: f64, x_range: (f64, f64)) -> String {
        let Some(value_dt) = secs_to_local(value) else {
            return String::new();
        };
        let time = render(&value_dt, &self.time_format);
        if self.show_date_on_day_change && crosses_day(x_range) {
            format!("{} {}", render(&value_dt, "%m-%d"), time)
        } else {
            time
        }
    }
}

fn crosses_day(x_range: (f64, f64)) -> bool {
    let (lo, hi) = if x_range.0 <= x_range.1 {
        x_range
    } else {
        (x_range.1, x_range.0)
    };
    match (secs_to_local(lo), secs_to_local(hi)) {
        (Some(a), Some(b)) => a.date_naive() != b.date_naive(),
        _ => false,
    }
}

/// chrono reports a bad format string as a `fmt::Error`; render that as "".
fn render(dt: &DateTime<Local>, fmt: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", dt.format(fmt)) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

/// Convert epoch seconds to a local `DateTime`, `None` if not representable.
fn secs_to_local(secs: f64) -> Option<DateTime<Local>> {
    if !secs.is_finite() || secs.abs() > i64::MAX as f64 {
        return None;
    }
    let s = secs.floor() as i64;
    let ns_frac = (((secs - s as f64) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(s, ns_frac).map(|dt| dt.with_timezone(&Local))
}
