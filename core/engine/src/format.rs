//! FILENAME: core/engine/src/format.rs
//! PURPOSE: Formats a single result value according to its column directive.
//! CONTEXT: Used by every renderer. Null handling is decided by the caller:
//! the live table shows a marker, exports show nothing.
//!
//! Formatting never fails. Values that cannot be read as a number (or a
//! timestamp) are returned as their original string.

use parser::{ColumnDirective, FormatKind};
use serde::{Deserialize, Serialize};

use crate::date_format::{format_datetime, parse_timestamp};
use crate::number_format::format_number;
use crate::result_set::Value;

/// Marker shown for null cells in the live table and the saved-result TSV.
pub const NULL_MARKER: &str = "NULL";

/// What a null value renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NullPolicy {
    /// Explicit `NULL` marker (live table).
    Marker,
    /// Empty string (delimited text, clipboard markup).
    Empty,
}

/// Format a value for display. Without a directive the raw string form is used.
pub fn format_value(value: &Value, directive: Option<&ColumnDirective>, nulls: NullPolicy) -> String {
    if value.is_null() {
        return match nulls {
            NullPolicy::Marker => NULL_MARKER.to_string(),
            NullPolicy::Empty => String::new(),
        };
    }

    let Some(directive) = directive else {
        return value.to_raw_string();
    };

    match directive.format {
        Some(FormatKind::Number) => format_as_number(value, directive),
        Some(FormatKind::Datetime) => format_as_datetime(value, directive),
        Some(FormatKind::Text) | None => value.to_raw_string(),
    }
}

fn format_as_number(value: &Value, directive: &ColumnDirective) -> String {
    match value.as_number() {
        Some(n) => format_number(n, directive.decimal, directive.comma),
        None => value.to_raw_string(),
    }
}

fn format_as_datetime(value: &Value, directive: &ColumnDirective) -> String {
    let raw = value.to_raw_string();
    let Some(pattern) = directive.pattern.as_deref() else {
        return raw;
    };
    match parse_timestamp(&raw) {
        Some(dt) => format_datetime(&dt, pattern),
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::parse_directives;

    fn directive(spec: &str) -> ColumnDirective {
        parse_directives(&format!("/** @column c {} */", spec))
            .column("c")
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_null_policies() {
        assert_eq!(format_value(&Value::Null, None, NullPolicy::Marker), "NULL");
        assert_eq!(format_value(&Value::Null, None, NullPolicy::Empty), "");
    }

    #[test]
    fn test_number_format_from_text_and_number() {
        let d = directive("format=number comma=true decimal=2");
        assert_eq!(format_value(&Value::Number(1234567.5), Some(&d), NullPolicy::Marker), "1,234,567.50");
        assert_eq!(format_value(&Value::text("1234567.5"), Some(&d), NullPolicy::Marker), "1,234,567.50");
    }

    #[test]
    fn test_unparseable_number_returns_original() {
        let d = directive("format=number comma=true");
        assert_eq!(format_value(&Value::text("n/a"), Some(&d), NullPolicy::Marker), "n/a");
    }

    #[test]
    fn test_malformed_decimal_falls_back_to_default_form() {
        let d = directive("format=number decimal=abc");
        assert_eq!(format_value(&Value::Number(3.25), Some(&d), NullPolicy::Marker), "3.25");
    }

    #[test]
    fn test_datetime_format() {
        let d = directive("format=datetime pattern=yyyy/MM/dd_HH:mm:ss");
        assert_eq!(
            format_value(&Value::text("2025-12-28T14:30:00"), Some(&d), NullPolicy::Marker),
            "2025/12/28_14:30:00"
        );
        let twice = directive("format=datetime pattern=dd-dd");
        assert_eq!(
            format_value(&Value::text("2025-12-28T14:30:00"), Some(&twice), NullPolicy::Marker),
            "28-dd"
        );
    }

    #[test]
    fn test_datetime_without_pattern_or_unparseable() {
        let no_pattern = directive("format=datetime");
        assert_eq!(format_value(&Value::text("2025-12-28"), Some(&no_pattern), NullPolicy::Marker), "2025-12-28");
        let d = directive("format=datetime pattern=yyyy");
        assert_eq!(format_value(&Value::text("yesterday"), Some(&d), NullPolicy::Marker), "yesterday");
    }

    #[test]
    fn test_text_format_and_no_directive() {
        let d = directive("format=text");
        assert_eq!(format_value(&Value::Number(1000.0), Some(&d), NullPolicy::Marker), "1000");
        assert_eq!(format_value(&Value::Boolean(true), None, NullPolicy::Marker), "true");
    }
}
