//! FILENAME: core/chart-engine/src/derive.rs
//! PURPOSE: Maps a chart directive and result rows to a ChartConfig.
//! CONTEXT: Categories are the x column values in row order (never re-sorted).
//! Each y column becomes one dataset; values that are missing or not numeric
//! plot as 0.
//!
//! COLOR PRECEDENCE:
//! - series: column `color` directive > chart `colors` (cycled) > default palette
//! - pie points: matching `@row <x> == <category>` rule > chart `colors` by row
//!   position > default palette by row position

use engine::{log_debug, ResultSet};
use parser::{ChartDirective, ChartKind, ComparisonOperator, DirectiveSet};

use crate::config::{
    palette_color, ChartConfig, ChartOptions, ColorSpec, Dataset, SeriesKind, CURVE_TENSION,
    STACK_GROUP,
};

/// Derives the chart for a query, if it declared one.
pub fn derive_chart(directives: &DirectiveSet, result: &ResultSet) -> Option<ChartConfig> {
    let chart = directives.chart.as_ref()?;
    Some(derive_chart_config(chart, directives, result))
}

/// Derives a chart from an explicit directive.
pub fn derive_chart_config(chart: &ChartDirective, directives: &DirectiveSet, result: &ResultSet) -> ChartConfig {
    if !result.has_column(&chart.x_column) {
        log_debug!("CHART", "x column {} not in result", chart.x_column);
    }

    let labels: Vec<String> = result
        .rows
        .iter()
        .map(|row| row.value(&chart.x_column).to_raw_string())
        .collect();

    let datasets = if chart.kind == ChartKind::Pie {
        pie_dataset(chart, directives, result, &labels).into_iter().collect()
    } else {
        chart
            .y_columns
            .iter()
            .enumerate()
            .map(|(index, column)| series_dataset(chart, directives, result, index, column))
            .collect()
    };

    ChartConfig {
        kind: chart.kind,
        labels,
        datasets,
        options: ChartOptions {
            legend: chart.legend,
            grid: chart.grid,
            title: chart.title.clone(),
            stacked: chart.stacked,
        },
    }
}

fn column_values(result: &ResultSet, column: &str) -> Vec<f64> {
    result
        .rows
        .iter()
        .map(|row| row.value(column).as_number().unwrap_or(0.0))
        .collect()
}

/// Resolved (kind, fill) for one series of a non-pie chart.
fn series_kind(chart: &ChartDirective, index: usize) -> (SeriesKind, bool) {
    let kind = match chart.kind {
        ChartKind::Mixed => chart.series_kinds.get(index).copied().unwrap_or(ChartKind::Bar),
        other => other,
    };
    match kind {
        ChartKind::Line => (SeriesKind::Line, false),
        ChartKind::Area => (SeriesKind::Line, true),
        // Pie or nested mixed inside a mixed chart fall back to bars
        ChartKind::Bar | ChartKind::Pie | ChartKind::Mixed => (SeriesKind::Bar, false),
    }
}

fn series_color(chart: &ChartDirective, directives: &DirectiveSet, index: usize, column: &str) -> String {
    if let Some(color) = directives.column(column).and_then(|d| d.color.clone()) {
        return color;
    }
    if !chart.colors.is_empty() {
        return chart.colors[index % chart.colors.len()].clone();
    }
    palette_color(index).to_string()
}

fn series_dataset(
    chart: &ChartDirective,
    directives: &DirectiveSet,
    result: &ResultSet,
    index: usize,
    column: &str,
) -> Dataset {
    let (kind, fill) = series_kind(chart, index);
    let color = series_color(chart, directives, index, column);

    Dataset {
        label: column.to_string(),
        data: column_values(result, column),
        kind,
        background_color: ColorSpec::Single(color.clone()),
        border_color: ColorSpec::Single(color),
        fill,
        tension: if chart.curve { CURVE_TENSION } else { 0.0 },
        stack: chart.stacked.then(|| STACK_GROUP.to_string()),
    }
}

// ============================================================================
// PIE
// ============================================================================

/// Color declared for a category by row rules on the x column. Last match wins.
fn rule_color_for_category(chart: &ChartDirective, directives: &DirectiveSet, category: &str) -> Option<String> {
    directives
        .row_rules
        .iter()
        .filter(|rule| {
            rule.column_name == chart.x_column
                && rule.operator == ComparisonOperator::Equal
                && rule.value.to_text() == category
        })
        .filter_map(|rule| {
            rule.styles
                .background_color
                .clone()
                .or_else(|| rule.styles.color.clone())
        })
        .last()
}

/// Per-point colors for a pie chart.
pub fn pie_point_colors(chart: &ChartDirective, directives: &DirectiveSet, labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(index, category)| {
            rule_color_for_category(chart, directives, category).unwrap_or_else(|| {
                if chart.colors.is_empty() {
                    palette_color(index).to_string()
                } else {
                    chart.colors[index % chart.colors.len()].clone()
                }
            })
        })
        .collect()
}

fn pie_dataset(
    chart: &ChartDirective,
    directives: &DirectiveSet,
    result: &ResultSet,
    labels: &[String],
) -> Option<Dataset> {
    // Pie charts plot the first y column only
    let column = chart.y_columns.first()?;
    if chart.y_columns.len() > 1 {
        log_debug!("CHART", "pie uses {} only; {} extra y columns ignored", column, chart.y_columns.len() - 1);
    }

    Some(Dataset {
        label: column.clone(),
        data: column_values(result, column),
        kind: SeriesKind::Pie,
        background_color: ColorSpec::PerPoint(pie_point_colors(chart, directives, labels)),
        border_color: ColorSpec::Single("#ffffff".to_string()),
        fill: false,
        tension: 0.0,
        stack: None,
    })
}
