//! FILENAME: core/engine/src/date_format.rs
//! PURPOSE: Datetime formatting for `format=datetime` columns.
//! CONTEXT: Timestamps arrive as text from the query executor. They are parsed
//! with chrono and rendered through a token pattern (yyyy MM dd HH mm ss).
//!
//! Each token is substituted once only, first occurrence, in the order
//! yyyy, MM, dd, HH, mm, ss. Saved directives rely on this, so "dd-dd" renders
//! as "28-dd".

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Naive layouts tried in order after RFC 3339.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp. Offset-bearing values keep their own wall clock.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(dt);
        }
    }

    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Substitute the pattern tokens with zero-padded components.
pub fn format_datetime(dt: &NaiveDateTime, pattern: &str) -> String {
    pattern
        .replacen("yyyy", &format!("{:04}", dt.year()), 1)
        .replacen("MM", &format!("{:02}", dt.month()), 1)
        .replacen("dd", &format!("{:02}", dt.day()), 1)
        .replacen("HH", &format!("{:02}", dt.hour()), 1)
        .replacen("mm", &format!("{:02}", dt.minute()), 1)
        .replacen("ss", &format!("{:02}", dt.second()), 1)
}
