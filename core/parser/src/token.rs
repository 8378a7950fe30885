//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the directive lexer.
//! CONTEXT: Tokens are produced per directive line by the lexer and consumed by the parser.

use crate::ast::ComparisonOperator;

/// Tokens recognized inside a directive line.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// Directive keyword without the leading '@': `@column` -> Directive("column")
    Directive(String),
    /// Bare word: column names, keys, unquoted values.
    Word(String),
    /// Value wrapped in single or double quotes (quotes removed).
    Quoted(String),

    // Operators
    Assign,
    Compare(ComparisonOperator),

    // Special
    EOL,
    Illegal(char),
}

impl Token {
    /// Text content of a Word or Quoted token.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Word(s) | Token::Quoted(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Directive(s) => write!(f, "@{}", s),
            Token::Word(s) => write!(f, "{}", s),
            Token::Quoted(s) => write!(f, "\"{}\"", s),
            Token::Assign => write!(f, "="),
            Token::Compare(op) => write!(f, "{}", op.symbol()),
            Token::EOL => write!(f, "EOL"),
            Token::Illegal(c) => write!(f, "ILLEGAL({})", c),
        }
    }
}
