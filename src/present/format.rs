//! Text formatting for quiz data

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fmt;

/// Rendered for date strings that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Render a backend timestamp as `"Jan 15, 2024"`.
///
/// Accepts RFC 3339 (converted to local time), naive ISO date-times and plain
/// `YYYY-MM-DD` dates. Empty input gives an empty string.
pub fn format_date(date_str: &str) -> String {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return String::new();
    }

    match parse_date(date_str) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Render elapsed seconds as `M:SS`; negatives count as zero
pub fn format_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Accuracy band used to style results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    /// 80% and above
    Excellent,
    /// 60% up to 80%
    Good,
    /// Below 60%
    NeedsWork,
}

impl PerformanceTier {
    /// CSS class name
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "excellent",
            PerformanceTier::Good => "good",
            PerformanceTier::NeedsWork => "needs-work",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an accuracy percentage. Lower bounds are inclusive.
pub fn performance_class(accuracy: f64) -> PerformanceTier {
    if accuracy >= 80.0 {
        PerformanceTier::Excellent
    } else if accuracy >= 60.0 {
        PerformanceTier::Good
    } else {
        PerformanceTier::NeedsWork
    }
}

/// Name shown in the profile badge: the user's `name`, or "User"
pub fn display_name(user: Option<&Value>) -> String {
    user.and_then(|u| u.get("name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or("User")
        .to_string()
}
