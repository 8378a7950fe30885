//! FILENAME: core/chart-engine/src/error.rs

use thiserror::Error;

/// Failures that reach the caller. Everything else in this crate degrades.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Chart plugin not registered: {0}")]
    PluginMissing(String),

    #[error("Chart has no data series")]
    NoSeries,
}
