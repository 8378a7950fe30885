//! FILENAME: core/engine/src/tsv.rs
//! PURPOSE: Saved-result TSV codec.
//! CONTEXT: Results are saved as tab-separated text and reopened later without
//! re-running the query. This module is string-in, string-out; reading and
//! writing files belongs to the host.
//!
//! FORMAT:
//! - line 1: column names joined by TAB
//! - following lines: one row each, fields joined by TAB
//! - null is written as `NULL`
//! - backslash, TAB, LF and CR inside a field are written as `\\`, `\t`, `\n`, `\r`

use std::collections::HashSet;

use crate::error::TsvError;
use crate::format::NULL_MARKER;
use crate::result_set::{ResultSet, Row, Value};
use crate::{log_debug, log_error};

// ============================================================================
// FIELD ESCAPING
// ============================================================================

/// Escapes one field so it fits on a single TSV line.
pub fn escape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses `escape_field`. Unknown escapes are kept as written.
pub fn unescape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ============================================================================
// WRITE
// ============================================================================

/// Serializes a result set. Rows follow the result's column order.
pub fn write_tsv(result: &ResultSet) -> String {
    let mut lines = Vec::with_capacity(result.rows.len() + 1);

    lines.push(
        result
            .columns
            .iter()
            .map(|c| escape_field(c))
            .collect::<Vec<_>>()
            .join("\t"),
    );

    for row in &result.rows {
        let fields: Vec<String> = result
            .columns
            .iter()
            .map(|column| match row.value(column) {
                Value::Null => NULL_MARKER.to_string(),
                value => escape_field(&value.to_raw_string()),
            })
            .collect();
        lines.push(fields.join("\t"));
    }

    log_debug!("TSV", "wrote {} rows x {} columns", result.rows.len(), result.columns.len());
    lines.join("\n")
}

// ============================================================================
// READ
// ============================================================================

/// Parses TSV text back into a result set. All non-null values come back as text.
pub fn read_tsv(content: &str) -> Result<ResultSet, TsvError> {
    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(TsvError::Empty)?;
    let columns: Vec<String> = header.split('\t').map(unescape_field).collect();

    let mut seen = HashSet::new();
    for column in &columns {
        if !seen.insert(column.as_str()) {
            log_error!("TSV", "duplicate column '{}' in header", column);
            return Err(TsvError::DuplicateColumn(column.clone()));
        }
    }

    let mut rows = Vec::new();
    for (index, line) in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() > columns.len() {
            log_error!("TSV", "line {} has {} fields for {} columns", index + 1, fields.len(), columns.len());
            return Err(TsvError::RaggedRow {
                line: index + 1,
                expected: columns.len(),
                found: fields.len(),
            });
        }

        let row: Row = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = match fields.get(i) {
                    None => Value::Null,
                    Some(&field) if field == NULL_MARKER => Value::Null,
                    Some(&field) => Value::Text(unescape_field(field)),
                };
                (column.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    log_debug!("TSV", "read {} rows x {} columns", rows.len(), columns.len());
    Ok(ResultSet::new(columns, rows))
}
