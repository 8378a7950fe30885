//! FILENAME: core/engine/src/render.rs
//! PURPOSE: Produces the table outputs of a query result.
//! CONTEXT: Three independent artifacts are derived from the same ResultSet and
//! DirectiveSet:
//! - the live table (HTML shown in the result panel, nulls as a NULL marker)
//! - delimited text (raw values, TAB separated, nulls empty)
//! - clipboard markup (inline-styled HTML with zebra striping, nulls empty)
//!
//! Each artifact runs the formatter and rule evaluator itself. None of them is
//! derived from another, so null policies and escaping never leak across.

use parser::{parse_directives, Align, DirectiveSet};
use serde::{Deserialize, Serialize};

use crate::format::{format_value, NullPolicy};
use crate::result_set::{ResultSet, Row, Value};
use crate::rules::{resolve_cell_style, resolve_row_style};
use crate::style::{column_layout_css, join_css, StyleProperties};
use crate::{log_debug, log_enter, log_exit};

// ============================================================================
// OPTIONS
// ============================================================================

/// Host-adjustable presentation settings. Missing JSON fields use the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableRenderOptions {
    /// CSS class of the live table element.
    pub table_class: String,
    /// CSS class wrapping the NULL marker in the live table.
    pub null_class: String,
    /// Background of every second body row in clipboard markup.
    pub zebra_background: String,
    /// Background of header cells in clipboard markup.
    pub header_background: String,
    /// Cell border in clipboard markup.
    pub border: String,
}

impl Default for TableRenderOptions {
    fn default() -> Self {
        TableRenderOptions {
            table_class: "result-table".to_string(),
            null_class: "null-value".to_string(),
            zebra_background: "#f7f7f7".to_string(),
            header_background: "#e8e8e8".to_string(),
            border: "1px solid #cccccc".to_string(),
        }
    }
}

// ============================================================================
// LIVE TABLE MODEL
// ============================================================================

/// Header cell of the live table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveHeader {
    pub name: String,
    pub layout: Vec<String>,
}

/// One formatted and styled body cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveCell {
    pub column: String,
    pub text: String,
    pub is_null: bool,
    pub align: Option<Align>,
    /// Column layout declarations (alignment, width).
    pub layout: Vec<String>,
    pub style: StyleProperties,
}

/// One body row. The row style sits under the cell styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRow {
    pub style: StyleProperties,
    pub cells: Vec<LiveCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveTable {
    pub headers: Vec<LiveHeader>,
    pub rows: Vec<LiveRow>,
}

impl LiveTable {
    /// Looks up a cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&LiveCell> {
        self.rows.get(row)?.cells.iter().find(|c| c.column == column)
    }
}

/// Outputs handed to the clipboard: rich markup plus its plain-text twin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardPayload {
    pub html: String,
    pub text: String,
}

/// Everything the result panel needs after one query execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOutputs {
    pub directives: DirectiveSet,
    pub live: LiveTable,
    pub live_html: String,
    pub clipboard: ClipboardPayload,
}

// ============================================================================
// HELPERS
// ============================================================================

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn style_attr(css: &str) -> String {
    if css.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_html(css))
    }
}

/// Escapes TAB, LF and CR as two-character sequences.
fn escape_delimited(value: &str) -> String {
    value
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

fn build_cell(row: &Row, column: &str, directives: &DirectiveSet) -> LiveCell {
    let value = row.value(column);
    let directive = directives.column(column);

    let (align, layout, style) = match directive {
        Some(d) => (d.align, column_layout_css(d), resolve_cell_style(value, d)),
        None => (None, Vec::new(), StyleProperties::new()),
    };

    LiveCell {
        column: column.to_string(),
        text: format_value(value, directive, NullPolicy::Marker),
        is_null: value.is_null(),
        align,
        layout,
        style,
    }
}

fn header_layout(column: &str, directives: &DirectiveSet) -> Vec<String> {
    directives
        .column(column)
        .map(column_layout_css)
        .unwrap_or_default()
}

// ============================================================================
// LIVE TABLE
// ============================================================================

/// Builds the live table model in result column order.
pub fn build_live_table(result: &ResultSet, directives: &DirectiveSet) -> LiveTable {
    let headers = result
        .columns
        .iter()
        .map(|name| LiveHeader {
            name: name.clone(),
            layout: header_layout(name, directives),
        })
        .collect();

    let rows = result
        .rows
        .iter()
        .map(|row| LiveRow {
            style: resolve_row_style(row, &directives.row_rules),
            cells: result
                .columns
                .iter()
                .map(|column| build_cell(row, column, directives))
                .collect(),
        })
        .collect();

    LiveTable { headers, rows }
}

/// Renders the live table model as HTML.
pub fn live_table_html(table: &LiveTable, options: &TableRenderOptions) -> String {
    let mut html = format!("<table class=\"{}\">\n<thead><tr>", escape_html(&options.table_class));

    for header in &table.headers {
        html.push_str(&format!(
            "<th{}>{}</th>",
            style_attr(&header.layout.join("; ")),
            escape_html(&header.name)
        ));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str(&format!("<tr{}>", style_attr(&row.style.to_css())));
        for cell in &row.cells {
            let css = join_css([cell.layout.clone(), cell.style.css_declarations()]);
            let content = if cell.is_null {
                format!(
                    "<span class=\"{}\">{}</span>",
                    escape_html(&options.null_class),
                    escape_html(&cell.text)
                )
            } else {
                escape_html(&cell.text)
            };
            html.push_str(&format!("<td{}>{}</td>", style_attr(&css), content));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// Builds and renders the live table in one step.
pub fn render_live_table(result: &ResultSet, directives: &DirectiveSet, options: &TableRenderOptions) -> String {
    live_table_html(&build_live_table(result, directives), options)
}

// ============================================================================
// DELIMITED TEXT
// ============================================================================

/// Raw TAB separated export. Directives are ignored; nulls are empty.
pub fn render_delimited_text(result: &ResultSet) -> String {
    let mut lines = Vec::with_capacity(result.rows.len() + 1);
    lines.push(
        result
            .columns
            .iter()
            .map(|c| escape_delimited(c))
            .collect::<Vec<_>>()
            .join("\t"),
    );

    for row in &result.rows {
        let fields: Vec<String> = result
            .columns
            .iter()
            .map(|column| escape_delimited(&row.value(column).to_raw_string()))
            .collect();
        lines.push(fields.join("\t"));
    }

    lines.join("\n")
}

// ============================================================================
// CLIPBOARD MARKUP
// ============================================================================

/// Inline-styled HTML for pasting into documents and spreadsheets.
///
/// Body cell style is the merge of, in order: zebra background (odd rows),
/// row rule style, cell style. Later layers win per property.
pub fn render_clipboard_markup(result: &ResultSet, directives: &DirectiveSet, options: &TableRenderOptions) -> String {
    let border = format!("border: {}", options.border);
    let mut html = String::from("<table style=\"border-collapse: collapse\">\n<thead><tr>");

    let header_style = StyleProperties::new()
        .with_background(options.header_background.clone())
        .with_bold(true);
    for column in &result.columns {
        let style = match directives.column(column) {
            Some(d) => header_style.merge(&StyleProperties::from(&d.base_style())),
            None => header_style.clone(),
        };
        let css = join_css([
            vec![border.clone()],
            header_layout(column, directives),
            style.css_declarations(),
        ]);
        html.push_str(&format!("<th{}>{}</th>", style_attr(&css), escape_html(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    let zebra = StyleProperties::new().with_background(options.zebra_background.clone());
    let plain = StyleProperties::new();

    for (index, row) in result.rows.iter().enumerate() {
        let stripe = if index % 2 == 1 { &zebra } else { &plain };
        let row_style = stripe.merge(&resolve_row_style(row, &directives.row_rules));

        html.push_str("<tr>");
        for column in &result.columns {
            let value: &Value = row.value(column);
            let directive = directives.column(column);
            let (layout, cell_style) = match directive {
                Some(d) => (column_layout_css(d), resolve_cell_style(value, d)),
                None => (Vec::new(), StyleProperties::new()),
            };
            let merged = row_style.merge(&cell_style);
            let css = join_css([vec![border.clone()], layout, merged.css_declarations()]);
            let text = format_value(value, directive, NullPolicy::Empty);
            html.push_str(&format!("<td{}>{}</td>", style_attr(&css), escape_html(&text)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// Rich and plain representations for one clipboard copy.
pub fn build_clipboard_payload(
    result: &ResultSet,
    directives: &DirectiveSet,
    options: &TableRenderOptions,
) -> ClipboardPayload {
    ClipboardPayload {
        html: render_clipboard_markup(result, directives, options),
        text: render_delimited_text(result),
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Parses the directives of `query` and renders every table artifact for `result`.
pub fn render_table_outputs(query: &str, result: &ResultSet, options: &TableRenderOptions) -> TableOutputs {
    log_enter!("RENDER", "render_table_outputs", "rows={} cols={}", result.row_count(), result.columns.len());

    let directives = parse_directives(query);
    for directive in &directives.columns {
        if !result.has_column(&directive.column_name) {
            log_debug!("RENDER", "directive for unknown column {} is inert", directive.column_name);
        }
    }

    let live = build_live_table(result, &directives);
    let live_html = live_table_html(&live, options);
    let clipboard = build_clipboard_payload(result, &directives, options);

    log_exit!("RENDER", "render_table_outputs", "directives={}", directives.columns.len());
    TableOutputs {
        directives,
        live,
        live_html,
        clipboard,
    }
}
