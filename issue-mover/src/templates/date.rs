//! Human-readable timestamps for attribution headers.

use chrono::{DateTime, Datelike, Utc};

/// Formats a timestamp as `January 1st 2020, 12:00 am`.
#[must_use]
pub fn pretty_date(timestamp: &DateTime<Utc>) -> String {
    let day = timestamp.day();
    format!(
        "{} {}{} {}",
        timestamp.format("%B"),
        day,
        ordinal_suffix(day),
        timestamp.format("%Y, %-I:%M %P")
    )
}

/// Formats an RFC 3339 string, passing it through unchanged if it does not parse.
pub(crate) fn pretty_rfc3339(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => pretty_date(&parsed.with_timezone(&Utc)),
        Err(_) => raw.to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
