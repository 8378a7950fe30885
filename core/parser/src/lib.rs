//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the display directive parser.
//! CONTEXT: This module exposes the lexer, parser, and directive types needed
//! to turn the doc comment of a query into a validated DirectiveSet.
//!
//! PIPELINE: Query String --> first /** */ block --> Lexer (per line) --> Parser --> DirectiveSet
//!
//! SUPPORTED DIRECTIVES:
//! - @column <name> align=right format=number comma=true decimal=2 ...
//! - @cell sales >= 1000 color=#008000 bold=true
//! - @row status == "error" bg=#ff0000
//! - @chart type=bar x=month y=sales,profit colors=#4e79a7,#f28e2b

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;


// Re-export commonly used types for convenience
pub use ast::{
    Align, ChartDirective, ChartKind, ColumnDirective, ColumnOption, ComparisonOperator,
    ConditionalStyleRule, DirectiveSet, FontWeight, FormatKind, Literal, RowStyleRule,
    StylePayload,
};
pub use lexer::Lexer;
pub use parser::{extract_doc_comment, parse_directives, DirectiveParser};
pub use token::Token;
