//! FILENAME: core/chart-engine/src/config.rs
//! PURPOSE: Chart configuration handed to the charting surface.
//! CONTEXT: Modelled on a Chart.js style description: one category axis,
//! one dataset per series, and a small options block. Serialized camelCase.

use parser::ChartKind;
use serde::{Deserialize, Serialize};

/// Fallback colors, cycled by series index (or row index for pie charts).
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Tension used when `curve=true`.
pub const CURVE_TENSION: f64 = 0.4;

/// Stack group shared by every dataset of a stacked chart.
pub const STACK_GROUP: &str = "stack0";

pub fn palette_color(index: usize) -> &'static str {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

/// How a single dataset is drawn. Area series are lines with `fill` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    Line,
    Bar,
    Pie,
}

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

impl ColorSpec {
    /// Color of the data point at `index`.
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            ColorSpec::Single(color) => Some(color.as_str()),
            ColorSpec::PerPoint(colors) => colors.get(index).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub kind: SeriesKind,
    pub background_color: ColorSpec,
    pub border_color: ColorSpec,
    pub fill: bool,
    pub tension: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub legend: bool,
    pub grid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub stacked: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            legend: true,
            grid: true,
            title: None,
            stacked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub kind: ChartKind,
    /// Category axis values in result row order.
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn is_pie(&self) -> bool {
        self.kind == ChartKind::Pie
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
