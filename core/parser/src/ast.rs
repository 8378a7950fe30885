//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the structured directive set produced from a query's doc comment.
//! CONTEXT: After the Lexer tokenizes a directive line, the Parser validates every
//! key=value pair into one of the closed types below. Consumers (formatter, style
//! evaluator, chart deriver) never see raw strings for enumerated options.
//!
//! SUPPORTED DIRECTIVES:
//! - @column <name> key=value ...            -> ColumnDirective
//! - @cell   <name> <op> <number> styles ...  -> ConditionalStyleRule (column scoped)
//! - @row    <name> <op> <literal> styles ... -> RowStyleRule (whole row)
//! - @chart  key=value ...                    -> ChartDirective

use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMERATED OPTIONS
// ============================================================================

/// Horizontal text alignment for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// How a column's values are formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatKind {
    Number,
    Datetime,
    Text,
}

impl FormatKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "number" => Some(FormatKind::Number),
            "datetime" => Some(FormatKind::Datetime),
            "text" => Some(FormatKind::Text),
            _ => None,
        }
    }
}

/// Font weight applied by a directive or rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Comparison operators shared by cell and row rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl ComparisonOperator {
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(ComparisonOperator::LessThan),
            ">" => Some(ComparisonOperator::GreaterThan),
            "<=" => Some(ComparisonOperator::LessEqual),
            ">=" => Some(ComparisonOperator::GreaterEqual),
            "==" => Some(ComparisonOperator::Equal),
            "!=" => Some(ComparisonOperator::NotEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
        }
    }
}

/// The right-hand side of a rule. The declared type decides the comparator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    /// Classifies an unquoted token: numeric text becomes a number literal.
    pub fn from_bare(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Literal::Number(n),
            _ => Literal::Text(raw.to_string()),
        }
    }

    /// The literal as display text (numbers without a trailing ".0").
    pub fn to_text(&self) -> String {
        match self {
            Literal::Number(n) if n.fract() == 0.0 && n.abs() < 1e21 => format!("{:.0}", n),
            Literal::Number(n) => n.to_string(),
            Literal::Text(s) => s.clone(),
        }
    }
}

/// Chart types understood by the chart directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Area,
    Mixed,
}

impl ChartKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "line" => Some(ChartKind::Line),
            "bar" => Some(ChartKind::Bar),
            "pie" => Some(ChartKind::Pie),
            "area" => Some(ChartKind::Area),
            "mixed" => Some(ChartKind::Mixed),
            _ => None,
        }
    }
}

// ============================================================================
// STYLE PAYLOAD
// ============================================================================

/// Style carried by a rule. Unset fields leave earlier values untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
}

impl StylePayload {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.background_color.is_none() && self.font_weight.is_none()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Numeric threshold rule scoped to a single cell of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalStyleRule {
    pub operator: ComparisonOperator,
    pub value: f64,
    pub styles: StylePayload,
}

/// Rule that styles the whole row when one of its cells passes the test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowStyleRule {
    pub column_name: String,
    pub operator: ComparisonOperator,
    pub value: Literal,
    pub styles: StylePayload,
}

// ============================================================================
// COLUMN DIRECTIVE
// ============================================================================

/// One validated `@column` option. Each recognized key maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOption {
    Align(Align),
    Format(FormatKind),
    Comma(bool),
    /// `None` when the token was not a usable integer.
    Decimal(Option<u8>),
    Pattern(String),
    Width(String),
    Background(String),
    Color(String),
    Bold(bool),
}

impl ColumnOption {
    /// Validates a raw key=value pair. Unknown keys and invalid enum values yield `None`.
    pub fn from_pair(key: &str, value: &str) -> Option<Self> {
        match key {
            "align" => Align::parse(value).map(ColumnOption::Align),
            "format" => FormatKind::parse(value).map(ColumnOption::Format),
            "comma" => Some(ColumnOption::Comma(value == "true")),
            "decimal" => Some(ColumnOption::Decimal(value.parse::<u8>().ok().filter(|d| *d <= 100))),
            "pattern" => Some(ColumnOption::Pattern(strip_quotes(value))),
            "width" => Some(ColumnOption::Width(value.to_string())),
            "bg" | "backgroundColor" => Some(ColumnOption::Background(value.to_string())),
            "color" => Some(ColumnOption::Color(value.to_string())),
            "bold" => Some(ColumnOption::Bold(value == "true")),
            _ => None,
        }
    }
}

/// Formatting and styling options bound to one result column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDirective {
    pub column_name: String,
    pub align: Option<Align>,
    pub format: Option<FormatKind>,
    pub comma: bool,
    pub decimal: Option<u8>,
    pub pattern: Option<String>,
    pub width: Option<String>,
    pub background_color: Option<String>,
    pub color: Option<String>,
    pub font_weight: Option<FontWeight>,
    /// Conditional rules in declaration order.
    pub rules: Vec<ConditionalStyleRule>,
}

impl ColumnDirective {
    pub fn new(column_name: impl Into<String>) -> Self {
        ColumnDirective {
            column_name: column_name.into(),
            ..Default::default()
        }
    }

    /// Applies one validated option. Later options overwrite earlier ones.
    pub fn apply(&mut self, option: ColumnOption) {
        match option {
            ColumnOption::Align(align) => self.align = Some(align),
            ColumnOption::Format(format) => self.format = Some(format),
            ColumnOption::Comma(comma) => self.comma = comma,
            ColumnOption::Decimal(decimal) => self.decimal = decimal,
            ColumnOption::Pattern(pattern) => self.pattern = Some(pattern),
            ColumnOption::Width(width) => self.width = Some(width),
            ColumnOption::Background(color) => self.background_color = Some(color),
            ColumnOption::Color(color) => self.color = Some(color),
            ColumnOption::Bold(true) => self.font_weight = Some(FontWeight::Bold),
            ColumnOption::Bold(false) => {}
        }
    }

    /// The unconditional style of the column.
    pub fn base_style(&self) -> StylePayload {
        StylePayload {
            color: self.color.clone(),
            background_color: self.background_color.clone(),
            font_weight: self.font_weight,
        }
    }

    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }
}

// ============================================================================
// CHART DIRECTIVE
// ============================================================================

/// Chart configuration declared with `@chart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDirective {
    pub kind: ChartKind,
    pub x_column: String,
    /// Series columns; order is series order.
    pub y_columns: Vec<String>,
    /// Per-series kind override used by mixed charts (by series index).
    pub series_kinds: Vec<ChartKind>,
    pub colors: Vec<String>,
    pub curve: bool,
    pub stacked: bool,
    pub legend: bool,
    pub grid: bool,
    pub title: Option<String>,
}

impl ChartDirective {
    pub fn new(kind: ChartKind, x_column: impl Into<String>, y_columns: Vec<String>) -> Self {
        ChartDirective {
            kind,
            x_column: x_column.into(),
            y_columns,
            series_kinds: Vec::new(),
            colors: Vec::new(),
            curve: false,
            stacked: false,
            legend: true,
            grid: true,
            title: None,
        }
    }
}

// ============================================================================
// DIRECTIVE SET
// ============================================================================

/// Everything parsed from one query. Never mutated after parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveSet {
    /// Column directives in declaration order, unique by column name.
    pub columns: Vec<ColumnDirective>,
    /// Row rules in declaration order.
    pub row_rules: Vec<RowStyleRule>,
    pub chart: Option<ChartDirective>,
}

impl DirectiveSet {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.row_rules.is_empty() && self.chart.is_none()
    }

    /// Looks up the directive bound to a column name.
    pub fn column(&self, name: &str) -> Option<&ColumnDirective> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    pub(crate) fn column_mut_or_insert(&mut self, name: &str) -> &mut ColumnDirective {
        let index = match self.columns.iter().position(|c| c.column_name == name) {
            Some(index) => index,
            None => {
                self.columns.push(ColumnDirective::new(name));
                self.columns.len() - 1
            }
        };
        &mut self.columns[index]
    }
}

/// Removes every single and double quote, matching how quoted patterns are written.
pub(crate) fn strip_quotes(value: &str) -> String {
    value.chars().filter(|c| *c != '"' && *c != '\'').collect()
}
