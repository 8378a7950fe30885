//! FILENAME: core/engine/src/export.rs
//! PURPOSE: JSON record export of a result set.
//! CONTEXT: One object per row, keys in result column order. Values are the
//! raw values (no directive formatting), nulls stay null.

use serde_json::{Map, Value as JsonValue};

use crate::result_set::{ResultSet, Value};

fn to_json_value(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        // Non-finite numbers have no JSON form
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Text(s) => JsonValue::String(s.clone()),
    }
}

/// Converts the result into an array of row objects.
pub fn to_json_records(result: &ResultSet) -> JsonValue {
    let records = result
        .rows
        .iter()
        .map(|row| {
            let object: Map<String, JsonValue> = result
                .columns
                .iter()
                .map(|column| (column.clone(), to_json_value(row.value(column))))
                .collect();
            JsonValue::Object(object)
        })
        .collect();
    JsonValue::Array(records)
}
