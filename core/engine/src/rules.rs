//! FILENAME: core/engine/src/rules.rs
//! PURPOSE: Evaluates conditional cell rules and row rules against result data.
//! CONTEXT: Produces StyleProperties patches consumed by the table renderers.
//! Rules are evaluated in declaration order; every matching rule is applied
//! with `StyleProperties::merge`, so the last match wins per property.

use std::cmp::Ordering;

use parser::{ColumnDirective, ComparisonOperator, Literal, RowStyleRule};

use crate::result_set::{Row, Value};
use crate::style::{apply_patches, StyleProperties};

// ============================================================================
// COMPARISON
// ============================================================================

/// Applies an operator to an ordering.
fn holds(operator: ComparisonOperator, ordering: Ordering) -> bool {
    match operator {
        ComparisonOperator::LessThan => ordering == Ordering::Less,
        ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
        ComparisonOperator::LessEqual => ordering != Ordering::Greater,
        ComparisonOperator::GreaterEqual => ordering != Ordering::Less,
        ComparisonOperator::Equal => ordering == Ordering::Equal,
        ComparisonOperator::NotEqual => ordering != Ordering::Equal,
    }
}

/// Numeric comparison. Equality is tested within f64::EPSILON.
pub fn compare_numbers(left: f64, operator: ComparisonOperator, right: f64) -> bool {
    let ordering = if (left - right).abs() < f64::EPSILON {
        Ordering::Equal
    } else if left < right {
        Ordering::Less
    } else {
        Ordering::Greater
    };
    holds(operator, ordering)
}

/// Typed comparison of a cell against a rule literal.
///
/// The literal decides the comparator: a number literal compares numerically
/// (a cell that is not numeric never matches), a text literal compares the
/// cell's raw string lexicographically. Null cells never match.
pub fn compare(cell: &Value, operator: ComparisonOperator, literal: &Literal) -> bool {
    if cell.is_null() {
        return false;
    }
    match literal {
        Literal::Number(expected) => match cell.as_number() {
            Some(actual) => compare_numbers(actual, operator, *expected),
            None => false,
        },
        Literal::Text(expected) => {
            let actual = cell.to_raw_string();
            holds(operator, actual.as_str().cmp(expected.as_str()))
        }
    }
}

// ============================================================================
// CELL RESOLUTION
// ============================================================================

/// Resolves the style of one cell from its column directive.
///
/// A column without conditional rules uses its base style. A column with rules
/// uses only the matching rules; the base style is not layered underneath.
/// When the value is not numeric no rule can match and the base style applies.
pub fn resolve_cell_style(value: &Value, directive: &ColumnDirective) -> StyleProperties {
    let base = StyleProperties::from(&directive.base_style());
    if !directive.has_rules() {
        return base;
    }

    let Some(number) = value.as_number() else {
        return base;
    };

    let patches: Vec<StyleProperties> = directive
        .rules
        .iter()
        .filter(|rule| compare_numbers(number, rule.operator, rule.value))
        .map(|rule| StyleProperties::from(&rule.styles))
        .collect();
    apply_patches(&patches)
}

// ============================================================================
// ROW RESOLUTION
// ============================================================================

/// Returns true when a row rule matches the row.
pub fn row_rule_matches(row: &Row, rule: &RowStyleRule) -> bool {
    match row.get(&rule.column_name) {
        Some(cell) => compare(cell, rule.operator, &rule.value),
        None => false,
    }
}

/// Resolves the style of a whole row. Later matching rules overwrite earlier
/// ones per property, whatever column they test.
pub fn resolve_row_style(row: &Row, rules: &[RowStyleRule]) -> StyleProperties {
    let patches: Vec<StyleProperties> = rules
        .iter()
        .filter(|rule| row_rule_matches(row, rule))
        .map(|rule| StyleProperties::from(&rule.styles))
        .collect();
    apply_patches(&patches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::{ConditionalStyleRule, FontWeight, StylePayload};

    fn row_rule(column: &str, operator: ComparisonOperator, value: Literal, styles: StylePayload) -> RowStyleRule {
        RowStyleRule {
            column_name: column.to_string(),
            operator,
            value,
            styles,
        }
    }

    fn cell_rule(operator: ComparisonOperator, value: f64, styles: StylePayload) -> ConditionalStyleRule {
        ConditionalStyleRule { operator, value, styles }
    }

    #[test]
    fn test_numeric_comparisons() {
        assert!(compare(&Value::Number(5.0), ComparisonOperator::GreaterThan, &Literal::Number(3.0)));
        assert!(compare(&Value::text("5"), ComparisonOperator::LessEqual, &Literal::Number(5.0)));
        assert!(!compare(&Value::text("five"), ComparisonOperator::NotEqual, &Literal::Number(5.0)));
        assert!(compare(&Value::Number(0.1 + 0.2), ComparisonOperator::Equal, &Literal::Number(0.3)));
    }

    #[test]
    fn test_text_comparisons_are_lexicographic() {
        assert!(compare(&Value::text("error"), ComparisonOperator::Equal, &Literal::Text("error".into())));
        assert!(compare(&Value::text("apple"), ComparisonOperator::LessThan, &Literal::Text("banana".into())));
        // "10" sorts before "9" as text
        assert!(compare(&Value::Number(10.0), ComparisonOperator::LessThan, &Literal::Text("9".into())));
    }

    #[test]
    fn test_null_never_matches() {
        assert!(!compare(&Value::Null, ComparisonOperator::NotEqual, &Literal::Text("x".into())));
        assert!(!compare(&Value::Null, ComparisonOperator::NotEqual, &Literal::Number(1.0)));
    }

    #[test]
    fn test_cell_base_style_without_rules() {
        let mut directive = ColumnDirective::new("sales");
        directive.color = Some("blue".to_string());
        let style = resolve_cell_style(&Value::Number(1.0), &directive);
        assert_eq!(style.color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_cell_rules_replace_base_style() {
        let mut directive = ColumnDirective::new("sales");
        directive.color = Some("blue".to_string());
        directive.background_color = Some("#eee".to_string());
        directive.rules.push(cell_rule(
            ComparisonOperator::GreaterThan,
            100.0,
            StylePayload::default().with_color("red"),
        ));

        let matched = resolve_cell_style(&Value::Number(500.0), &directive);
        assert_eq!(matched.color.as_deref(), Some("red"));
        assert_eq!(matched.background_color, None);

        let unmatched = resolve_cell_style(&Value::Number(5.0), &directive);
        assert!(unmatched.is_empty());

        let not_numeric = resolve_cell_style(&Value::text("n/a"), &directive);
        assert_eq!(not_numeric.color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_cell_rules_last_match_wins() {
        let mut directive = ColumnDirective::new("sales");
        directive.rules.push(cell_rule(
            ComparisonOperator::GreaterEqual,
            0.0,
            StylePayload::default().with_color("green").with_font_weight(FontWeight::Bold),
        ));
        directive.rules.push(cell_rule(
            ComparisonOperator::GreaterEqual,
            1000.0,
            StylePayload::default().with_color("red"),
        ));

        let style = resolve_cell_style(&Value::Number(2000.0), &directive);
        assert_eq!(style.color.as_deref(), Some("red"));
        assert_eq!(style.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn test_row_rule_error_status() {
        let rules = vec![row_rule(
            "status",
            ComparisonOperator::Equal,
            Literal::Text("error".into()),
            StylePayload::default().with_background("#ff0000"),
        )];

        let error_row = Row::new().with("status", "error");
        assert_eq!(resolve_row_style(&error_row, &rules).to_css(), "background-color: #ff0000");

        let ok_row = Row::new().with("status", "ok");
        assert!(resolve_row_style(&ok_row, &rules).is_empty());
    }

    #[test]
    fn test_row_rules_overwrite_across_columns() {
        let rules = vec![
            row_rule(
                "status",
                ComparisonOperator::Equal,
                Literal::Text("error".into()),
                StylePayload::default().with_background("#ff0000").with_color("white"),
            ),
            row_rule(
                "amount",
                ComparisonOperator::GreaterThan,
                Literal::Number(10.0),
                StylePayload::default().with_background("#00ff00"),
            ),
        ];
        let row = Row::new().with("status", "error").with("amount", 50.0);
        let style = resolve_row_style(&row, &rules);
        assert_eq!(style.background_color.as_deref(), Some("#00ff00"));
        assert_eq!(style.color.as_deref(), Some("white"));
    }

    #[test]
    fn test_row_rule_on_absent_or_null_cell() {
        let rules = vec![row_rule(
            "missing",
            ComparisonOperator::NotEqual,
            Literal::Text("x".into()),
            StylePayload::default().with_color("red"),
        )];
        assert!(resolve_row_style(&Row::new(), &rules).is_empty());
        let null_row = Row::new().with("missing", Value::Null);
        assert!(resolve_row_style(&null_row, &rules).is_empty());
    }
}
