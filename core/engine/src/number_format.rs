//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting for `format=number` columns.
//! CONTEXT: Handles fixed decimal precision and thousands grouping. Parsing of
//! the raw value happens in format.rs; this module only deals with f64 -> text.

use crate::result_set::number_to_string;

/// Format a number with optional fixed precision and optional grouping.
/// Without a precision the default string form of the number is used.
pub fn format_number(value: f64, decimal: Option<u8>, comma: bool) -> String {
    let formatted = match decimal {
        Some(places) => format_decimal(value, places),
        None => number_to_string(value),
    };

    if comma {
        add_thousands_separator(&formatted)
    } else {
        formatted
    }
}

/// Largest scaled magnitude that still has a fractional part in f64.
const MAX_EXACT_SCALED: f64 = 4_503_599_627_370_496.0;

/// Round half away from zero to `decimal_places` digits.
/// `format!` alone would round ties to even (2.5 -> "2").
fn round_half_away(value: f64, decimal_places: u8) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_SCALED {
        return value;
    }
    scaled.round() / factor
}

/// Round/pad to exactly `decimal_places` fractional digits.
fn format_decimal(value: f64, decimal_places: u8) -> String {
    let rounded = format!(
        "{:.prec$}",
        round_half_away(value, decimal_places),
        prec = decimal_places as usize
    );
    // "-0.00" reads oddly for values that round to zero
    if rounded.starts_with('-') && rounded[1..].chars().all(|c| c == '0' || c == '.') {
        rounded[1..].to_string()
    } else {
        rounded
    }
}

/// Add thousands separators to the integer part of a numeric string.
/// The fractional part is left untouched.
pub fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234.567, 2), "1234.57");
        assert_eq!(format_decimal(2.0, 3), "2.000");
        assert_eq!(format_decimal(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_decimal_rounds_ties_up() {
        assert_eq!(format_decimal(2.5, 0), "3");
        assert_eq!(format_decimal(0.125, 2), "0.13");
        assert_eq!(format_decimal(-2.5, 0), "-3");
        assert_eq!(format_number(1234.5, Some(0), true), "1,235");
    }

    #[test]
    fn test_format_number_with_comma_and_decimal() {
        assert_eq!(format_number(1234567.5, Some(2), true), "1,234,567.50");
        assert_eq!(format_number(1000000.0, Some(0), true), "1,000,000");
    }

    #[test]
    fn test_format_number_default_form() {
        assert_eq!(format_number(2000000.0, None, true), "2,000,000");
        assert_eq!(format_number(1234.5678, None, true), "1,234.5678");
        assert_eq!(format_number(0.25, None, false), "0.25");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(add_thousands_separator("1234567"), "1,234,567");
        assert_eq!(add_thousands_separator("123"), "123");
        assert_eq!(add_thousands_separator("-1234.56"), "-1,234.56");
        assert_eq!(add_thousands_separator("1234.56789"), "1,234.56789");
    }
}
