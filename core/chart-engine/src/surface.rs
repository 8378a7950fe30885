//! FILENAME: core/chart-engine/src/surface.rs
//! PURPOSE: Chart surface lifecycle.
//! CONTEXT: A surface owns at most one rendered chart. Rendering always tears
//! down the previous chart first; if the new render fails the surface is left
//! empty. Pie charts get segment geometry, label layout and draw commands;
//! other kinds are passed through for the host's charting library.

use engine::{log_debug, log_info, log_warn};

use crate::config::{ChartConfig, ColorSpec};
use crate::draw::{to_draw_commands, DrawCommand};
use crate::error::ChartError;
use crate::geometry::{pie_segments, PieSegment, PieSizing};
use crate::measure::TextMeasurer;
use crate::pie_labels::{layout_pie_labels, LabelPlacement, PieLabelLayoutConfig};
use crate::registry::{global_registry, PluginId, PluginRegistry};

/// The chart currently shown on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub config: ChartConfig,
    /// Pie only.
    pub segments: Vec<PieSegment>,
    /// Pie only.
    pub labels: Vec<LabelPlacement>,
    /// Pie only.
    pub commands: Vec<DrawCommand>,
}

pub struct ChartSurface<'r> {
    width: f64,
    height: f64,
    registry: &'r PluginRegistry,
    sizing: PieSizing,
    label_config: PieLabelLayoutConfig,
    current: Option<RenderedChart>,
}

impl ChartSurface<'static> {
    /// Creates a surface backed by the process-wide plugin registry and
    /// registers the built-in plugins (once per process).
    pub fn new(width: f64, height: f64) -> Result<Self, ChartError> {
        let registry = global_registry();
        registry.register_builtins();
        ChartSurface::with_registry(width, height, registry)
    }
}

impl<'r> ChartSurface<'r> {
    /// Creates a surface backed by `registry`. No plugins are registered.
    pub fn with_registry(width: f64, height: f64, registry: &'r PluginRegistry) -> Result<Self, ChartError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ChartError::InvalidCanvas { width, height });
        }
        Ok(ChartSurface {
            width,
            height,
            registry,
            sizing: PieSizing::default(),
            label_config: PieLabelLayoutConfig::default(),
            current: None,
        })
    }

    pub fn with_sizing(mut self, sizing: PieSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_label_config(mut self, config: PieLabelLayoutConfig) -> Self {
        self.label_config = config;
        self
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn current(&self) -> Option<&RenderedChart> {
        self.current.as_ref()
    }

    /// Tears down the current chart, if any.
    pub fn destroy(&mut self) {
        if let Some(previous) = self.current.take() {
            log_info!("CHART", "destroyed {:?} chart", previous.config.kind);
        }
    }

    /// Replaces the current chart with `config`.
    pub fn render(&mut self, config: ChartConfig, measurer: &dyn TextMeasurer) -> Result<&RenderedChart, ChartError> {
        self.destroy();

        if config.datasets.is_empty() {
            log_warn!("CHART", "refusing to render {:?} chart without series", config.kind);
            return Err(ChartError::NoSeries);
        }

        let rendered = if config.is_pie() {
            self.render_pie(config, measurer)?
        } else {
            RenderedChart {
                config,
                segments: Vec::new(),
                labels: Vec::new(),
                commands: Vec::new(),
            }
        };

        log_debug!(
            "CHART",
            "rendered {:?} chart: {} datasets, {} draw commands",
            rendered.config.kind,
            rendered.config.datasets.len(),
            rendered.commands.len()
        );
        Ok(self.current.insert(rendered))
    }

    fn require(&self, id: PluginId) -> Result<(), ChartError> {
        if self.registry.contains(id) {
            Ok(())
        } else {
            Err(ChartError::PluginMissing(id.as_str().to_string()))
        }
    }

    fn render_pie(&self, config: ChartConfig, measurer: &dyn TextMeasurer) -> Result<RenderedChart, ChartError> {
        self.require(PluginId::PieSize)?;
        self.require(PluginId::LabelLine)?;

        let dataset = config.datasets.first().ok_or(ChartError::NoSeries)?;
        let colors: Vec<String> = match &dataset.background_color {
            ColorSpec::PerPoint(colors) => colors.clone(),
            ColorSpec::Single(color) => vec![color.clone(); dataset.data.len()],
        };

        let center = self.sizing.center(self.width, self.height);
        let outer = self.sizing.outer_radius(self.width, self.height);
        let inner = self.sizing.inner_radius(self.width, self.height);
        let segments = pie_segments(&dataset.data, center, inner, outer);

        let labels = layout_pie_labels(
            &segments,
            &config.labels,
            self.width,
            self.height,
            &self.label_config,
            measurer,
        );
        let commands = to_draw_commands(&segments, &labels, &colors, &self.label_config);

        Ok(RenderedChart {
            config,
            segments,
            labels,
            commands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartOptions, Dataset, SeriesKind};
    use crate::measure::HeuristicTextMeasurer;
    use parser::ChartKind;

    fn pie_config(values: Vec<f64>) -> ChartConfig {
        let labels = (0..values.len()).map(|i| format!("p{}", i)).collect();
        ChartConfig {
            kind: ChartKind::Pie,
            labels,
            datasets: vec![Dataset {
                label: "n".to_string(),
                data: values,
                kind: SeriesKind::Pie,
                background_color: ColorSpec::Single("#123456".to_string()),
                border_color: ColorSpec::Single("#ffffff".to_string()),
                fill: false,
                tension: 0.0,
                stack: None,
            }],
            options: ChartOptions::default(),
        }
    }

    #[test]
    fn test_invalid_canvas() {
        assert_eq!(
            ChartSurface::new(0.0, 100.0).err(),
            Some(ChartError::InvalidCanvas { width: 0.0, height: 100.0 })
        );
        assert!(ChartSurface::new(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_render_replaces_previous_chart() {
        let mut surface = ChartSurface::new(600.0, 400.0).unwrap();
        surface.render(pie_config(vec![1.0, 2.0]), &HeuristicTextMeasurer).unwrap();
        let second = surface.render(pie_config(vec![3.0]), &HeuristicTextMeasurer).unwrap();
        assert_eq!(second.segments.len(), 1);
        assert_eq!(surface.current().map(|c| c.config.labels.len()), Some(1));

        surface.destroy();
        assert!(surface.current().is_none());
    }

    #[test]
    fn test_no_series_clears_surface() {
        let mut surface = ChartSurface::new(600.0, 400.0).unwrap();
        surface.render(pie_config(vec![1.0]), &HeuristicTextMeasurer).unwrap();

        let mut empty = pie_config(vec![]);
        empty.datasets.clear();
        assert_eq!(surface.render(empty, &HeuristicTextMeasurer).err(), Some(ChartError::NoSeries));
        assert!(surface.current().is_none());
    }

    #[test]
    fn test_pie_requires_plugins() {
        let registry = PluginRegistry::new();
        registry.register(PluginId::PieSize);
        let mut surface = ChartSurface::with_registry(600.0, 400.0, &registry).unwrap();
        assert_eq!(
            surface.render(pie_config(vec![1.0]), &HeuristicTextMeasurer).err(),
            Some(ChartError::PluginMissing("labelLine".to_string()))
        );

        registry.register(PluginId::LabelLine);
        assert!(surface.render(pie_config(vec![1.0]), &HeuristicTextMeasurer).is_ok());
    }

    #[test]
    fn test_non_pie_passes_through() {
        let registry = PluginRegistry::new();
        let mut surface = ChartSurface::with_registry(600.0, 400.0, &registry).unwrap();
        let mut config = pie_config(vec![1.0, 2.0]);
        config.kind = ChartKind::Bar;
        let rendered = surface.render(config, &HeuristicTextMeasurer).unwrap();
        assert!(rendered.commands.is_empty());
    }
}
