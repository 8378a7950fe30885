//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Converts the directive lines of a query's doc comment into a DirectiveSet.
//! CONTEXT: This is the second stage of the directive pipeline. The first `/** ... */`
//! block of the query is split into lines; each line is tokenized by the Lexer and
//! the first directive keyword on it decides how the remaining tokens are read.
//!
//! GRAMMAR (per line, tokens separated by whitespace):
//!   line       --> ... directive
//!   directive  --> "@column" NAME pair*
//!                | "@cell"   NAME OP NUMBER pair*
//!                | "@row"    NAME OP LITERAL pair*
//!                | "@chart"  pair*
//!   pair       --> WORD "=" (WORD | QUOTED)
//!   OP         --> "<" | ">" | "<=" | ">=" | "==" | "!="
//!
//! Parsing never fails: unknown directives, unknown keys and malformed values are
//! dropped and the affected option keeps its default.

use crate::ast::{
    ChartDirective, ChartKind, ColumnDirective, ColumnOption, ComparisonOperator,
    ConditionalStyleRule, DirectiveSet, FontWeight, Literal, RowStyleRule, StylePayload,
};
use crate::lexer::Lexer;
use crate::token::Token;

const COMMENT_OPEN: &str = "/**";
const COMMENT_CLOSE: &str = "*/";
const LOG_TARGET: &str = "result_display";

/// Returns the body of the first `/** ... */` block, if any.
pub fn extract_doc_comment(query: &str) -> Option<&str> {
    let open = query.find(COMMENT_OPEN)?;
    let body_start = open + COMMENT_OPEN.len();
    let close = query[body_start..].find(COMMENT_CLOSE)?;
    Some(&query[body_start..body_start + close])
}

/// Parses every directive found in the query text.
/// A query without a doc comment yields an empty set.
pub fn parse_directives(query: &str) -> DirectiveSet {
    let mut set = DirectiveSet::default();

    let Some(comment) = extract_doc_comment(query) else {
        return set;
    };

    for line in comment.lines() {
        let line = line.trim().trim_start_matches('*');
        if line.contains('@') {
            DirectiveParser::new(line).parse_into(&mut set);
        }
    }

    set
}

/// A (key, value) pair as written in the directive.
type RawPair = (String, String);

/// Line-level parser. Holds the lexer and the current token.
pub struct DirectiveParser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> DirectiveParser<'a> {
    pub fn new(line: &'a str) -> Self {
        let mut lexer = Lexer::new(line);
        let current_token = lexer.next_token();
        DirectiveParser {
            lexer,
            current_token,
        }
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    /// Parses the line and merges its directive into `set`.
    pub fn parse_into(&mut self, set: &mut DirectiveSet) {
        // Anything before the first directive keyword is decoration.
        let name = loop {
            match &self.current_token {
                Token::Directive(name) => break name.clone(),
                Token::EOL => return,
                _ => self.advance(),
            }
        };
        self.advance();

        match name.as_str() {
            "column" => self.parse_column(set),
            "cell" => self.parse_cell_rule(set),
            "row" => self.parse_row_rule(set),
            "chart" => self.parse_chart(set),
            other => log::debug!(target: LOG_TARGET, "ignoring unknown directive @{}", other),
        }
    }

    // ========================================================================
    // DIRECTIVES
    // ========================================================================

    fn parse_column(&mut self, set: &mut DirectiveSet) {
        let Some(column_name) = self.take_name() else {
            return;
        };

        let mut directive = ColumnDirective::new(column_name.clone());
        for (key, value) in self.parse_pairs() {
            match ColumnOption::from_pair(&key, &value) {
                Some(option) => directive.apply(option),
                None => log::debug!(
                    target: LOG_TARGET,
                    "@column {}: dropped option {}={}",
                    column_name,
                    key,
                    value
                ),
            }
        }

        // Last write wins for the base options; accumulated @cell rules survive.
        let existing = set.column_mut_or_insert(&column_name);
        directive.rules = std::mem::take(&mut existing.rules);
        *existing = directive;
    }

    fn parse_cell_rule(&mut self, set: &mut DirectiveSet) {
        let Some((column_name, operator, literal)) = self.parse_condition() else {
            return;
        };
        // Cell rules are numeric only.
        let Literal::Number(value) = literal else {
            log::debug!(target: LOG_TARGET, "@cell {}: non-numeric threshold dropped", column_name);
            return;
        };
        let styles = style_from_pairs(self.parse_pairs());

        set.column_mut_or_insert(&column_name)
            .rules
            .push(ConditionalStyleRule {
                operator,
                value,
                styles,
            });
    }

    fn parse_row_rule(&mut self, set: &mut DirectiveSet) {
        let Some((column_name, operator, value)) = self.parse_condition() else {
            return;
        };
        let styles = style_from_pairs(self.parse_pairs());

        set.row_rules.push(RowStyleRule {
            column_name,
            operator,
            value,
            styles,
        });
    }

    fn parse_chart(&mut self, set: &mut DirectiveSet) {
        let mut kind = ChartKind::Line;
        let mut x_column: Option<String> = None;
        let mut y_columns = Vec::new();
        let mut series_kinds = Vec::new();
        let mut colors = Vec::new();
        let mut curve = false;
        let mut stacked = false;
        let mut legend = true;
        let mut grid = true;
        let mut title = None;

        for (key, value) in self.parse_pairs() {
            match key.as_str() {
                "type" | "kind" => {
                    if let Some(parsed) = ChartKind::parse(&value) {
                        kind = parsed;
                    }
                }
                "x" => x_column = Some(value).filter(|v| !v.is_empty()),
                "y" => y_columns = split_list(&value),
                "types" => {
                    series_kinds = split_list(&value)
                        .iter()
                        .filter_map(|v| ChartKind::parse(v))
                        .collect()
                }
                "colors" => colors = split_list(&value),
                "curve" | "smooth" => curve = value == "true",
                "stack" | "stacked" => stacked = value == "true",
                "legend" => legend = value != "false",
                "grid" => grid = value != "false",
                "title" => title = Some(value),
                _ => {}
            }
        }

        let Some(x_column) = x_column else {
            log::debug!(target: LOG_TARGET, "@chart without x column dropped");
            return;
        };
        if y_columns.is_empty() {
            log::debug!(target: LOG_TARGET, "@chart without y columns dropped");
            return;
        }

        let mut chart = ChartDirective::new(kind, x_column, y_columns);
        chart.series_kinds = series_kinds;
        chart.colors = colors;
        chart.curve = curve;
        chart.stacked = stacked;
        chart.legend = legend;
        chart.grid = grid;
        chart.title = title;
        set.chart = Some(chart);
    }

    // ========================================================================
    // TOKEN HELPERS
    // ========================================================================

    /// Takes a column name (bare or quoted).
    fn take_name(&mut self) -> Option<String> {
        let name = self.current_token.text()?.to_string();
        self.advance();
        Some(name)
    }

    /// Reads `NAME OP LITERAL`. Quoted literals are always text.
    fn parse_condition(&mut self) -> Option<(String, ComparisonOperator, Literal)> {
        let column_name = self.take_name()?;

        let Token::Compare(operator) = self.current_token else {
            return None;
        };
        self.advance();

        let literal = match &self.current_token {
            Token::Quoted(text) => Literal::Text(text.clone()),
            Token::Word(text) => Literal::from_bare(text),
            _ => return None,
        };
        self.advance();

        Some((column_name, operator, literal))
    }

    /// Collects key=value pairs until end of line, skipping stray tokens.
    fn parse_pairs(&mut self) -> Vec<RawPair> {
        let mut pairs = Vec::new();

        while self.current_token != Token::EOL {
            let Token::Word(key) = &self.current_token else {
                self.advance();
                continue;
            };
            let key = key.clone();
            self.advance();

            if self.current_token != Token::Assign {
                continue;
            }
            self.advance();

            if let Some(value) = self.current_token.text() {
                pairs.push((key, value.to_string()));
                self.advance();
            }
        }

        pairs
    }
}

/// Builds a rule style from `color`, `bg|backgroundColor` and `bold` pairs.
fn style_from_pairs(pairs: Vec<RawPair>) -> StylePayload {
    let mut styles = StylePayload::default();
    for (key, value) in pairs {
        match key.as_str() {
            "color" => styles.color = Some(value),
            "bg" | "backgroundColor" => styles.background_color = Some(value),
            "bold" => {
                styles.font_weight = Some(if value == "true" {
                    FontWeight::Bold
                } else {
                    FontWeight::Normal
                })
            }
            _ => {}
        }
    }
    styles
}

/// Splits a comma separated list, dropping empty entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
