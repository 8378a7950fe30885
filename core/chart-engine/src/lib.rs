//! FILENAME: core/chart-engine/src/lib.rs
//! PURPOSE: Chart support for query results.
//! CONTEXT: Turns the `@chart` directive and the result rows into a chart
//! configuration, and for pie charts computes segment geometry, outside label
//! placement and drawing instructions.
//!
//! PIPELINE: DirectiveSet + ResultSet --> derive_chart --> ChartConfig --> ChartSurface::render

pub mod config;
pub mod derive;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod measure;
pub mod pie_labels;
pub mod registry;
pub mod surface;

pub use config::{
    palette_color, ChartConfig, ChartOptions, ColorSpec, Dataset, SeriesKind, DEFAULT_PALETTE,
};
pub use derive::{derive_chart, derive_chart_config, pie_point_colors};
pub use draw::{to_draw_commands, DrawCommand};
pub use error::ChartError;
pub use geometry::{draw_order, percentages, pie_segments, PieSegment, PieSizing};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use pie_labels::{
    label_text, layout_pie_labels, LabelPlacement, LabelSide, PieLabelLayoutConfig, TextAlign,
};
pub use registry::{global_registry, is_registered, register_plugin, PluginId, PluginRegistry};
pub use surface::{ChartSurface, RenderedChart};
