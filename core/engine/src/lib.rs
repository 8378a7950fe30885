//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the result display engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//!
//! PIPELINE: ResultSet + DirectiveSet --> format/rules --> render (live, text, clipboard)

pub mod date_format;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod number_format;
pub mod render;
pub mod result_set;
pub mod rules;
pub mod style;
pub mod tsv;

// Re-export commonly used types at the crate root
pub use error::TsvError;
pub use export::to_json_records;
pub use format::{format_value, NullPolicy, NULL_MARKER};
pub use number_format::{add_thousands_separator, format_number};
pub use render::{
    build_clipboard_payload, build_live_table, escape_html, live_table_html, render_clipboard_markup,
    render_delimited_text, render_live_table, render_table_outputs, ClipboardPayload, LiveCell,
    LiveHeader, LiveRow, LiveTable, TableOutputs, TableRenderOptions,
};
pub use result_set::{number_to_string, ResultSet, Row, Value};
pub use rules::{compare, resolve_cell_style, resolve_row_style};
pub use style::StyleProperties;
pub use tsv::{read_tsv, write_tsv};
