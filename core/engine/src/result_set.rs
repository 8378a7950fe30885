//! FILENAME: core/engine/src/result_set.rs
//! PURPOSE: Defines the tabular query result consumed by the renderers.
//! CONTEXT: A ResultSet is produced by the external query executor and is
//! read-only here. Column order is the authoritative render order; rows map
//! column names to scalar values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static NULL_VALUE: Value = Value::Null;

/// A scalar cell value as delivered by the query executor.
/// Temporal values arrive as text and are only interpreted by the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Strict numeric coercion: numbers as-is, text only if the whole trimmed
    /// string parses as a finite float. A numeric prefix is not enough:
    /// "12abc" is not a number and is shown unformatted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// The unformatted string form. Null becomes the empty string.
    pub fn to_raw_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Default string form of a number: integral values print without a fraction.
pub fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        // Covers -0.0 as well
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// One result row: column name -> value. Absent columns read as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Raw lookup; `None` means the column is absent from the row.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Lookup that folds "absent" into null.
    pub fn value(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&NULL_VALUE)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The complete result of one query execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        ResultSet { columns, rows }
    }

    /// Builds a result set from positional rows. Missing trailing values are null.
    pub fn from_positional(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|values| {
                columns
                    .iter()
                    .cloned()
                    .zip(values.into_iter().chain(std::iter::repeat(Value::Null)))
                    .collect()
            })
            .collect();
        ResultSet { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(2000000.0), "2000000");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(-42.0), "-42");
    }

    #[test]
    fn test_numeric_coercion_is_strict() {
        assert_eq!(Value::text(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Value::text("12abc").as_number(), None);
        assert_eq!(Value::text("NaN").as_number(), None);
        assert_eq!(Value::Boolean(true).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_absent_column_reads_as_null() {
        let row = Row::new().with("id", 1.0);
        assert!(row.get("missing").is_none());
        assert!(row.value("missing").is_null());
    }

    #[test]
    fn test_from_positional_pads_with_null() {
        let rs = ResultSet::from_positional(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Value::from(1.0)]],
        );
        assert_eq!(rs.rows[0].value("a"), &Value::Number(1.0));
        assert!(rs.rows[0].value("b").is_null());
    }

    #[test]
    fn test_value_deserializes_untagged() {
        let row: Row = serde_json::from_str(r#"{"id": 1, "name": "x", "note": null, "ok": true}"#).unwrap();
        assert_eq!(row.value("id"), &Value::Number(1.0));
        assert_eq!(row.value("name"), &Value::text("x"));
        assert!(row.value("note").is_null());
        assert_eq!(row.value("ok"), &Value::Boolean(true));
    }
}
