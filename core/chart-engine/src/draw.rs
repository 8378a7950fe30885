//! FILENAME: core/chart-engine/src/draw.rs
//! PURPOSE: Literal drawing instructions for a rendered pie.
//! CONTEXT: The host paints these in order. Sectors come first, largest
//! value first; then each label's leader line, swatch and text.

use kurbo::{BezPath, Circle, Point, Rect, Shape};

use crate::geometry::{draw_order, PieSegment};
use crate::pie_labels::{LabelPlacement, PieLabelLayoutConfig, TextAlign};

/// Color of label text.
pub const LABEL_TEXT_COLOR: &str = "#333333";
/// Width of leader lines.
pub const LEADER_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sector {
        index: usize,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        fill: String,
    },
    Polyline {
        points: Vec<Point>,
        stroke: String,
        width: f64,
    },
    FillRect {
        rect: Rect,
        fill: String,
    },
    Text {
        position: Point,
        text: String,
        align: TextAlign,
        font_size: f64,
        color: String,
    },
}

impl DrawCommand {
    /// Outline of a sector command, flattened with `tolerance`.
    pub fn sector_path(&self, tolerance: f64) -> Option<BezPath> {
        match self {
            DrawCommand::Sector {
                center,
                inner_radius,
                outer_radius,
                start_angle,
                sweep_angle,
                ..
            } => {
                let circle = Circle::new(*center, *outer_radius);
                let segment = circle.segment(*inner_radius, *start_angle, *sweep_angle);
                Some(segment.path_elements(tolerance).collect())
            }
            _ => None,
        }
    }
}

fn color_at(colors: &[String], index: usize) -> String {
    colors
        .get(index)
        .cloned()
        .unwrap_or_else(|| crate::config::palette_color(index).to_string())
}

/// Builds the paint list for a pie. `colors` are indexed by data point.
pub fn to_draw_commands(
    segments: &[PieSegment],
    placements: &[LabelPlacement],
    colors: &[String],
    config: &PieLabelLayoutConfig,
) -> Vec<DrawCommand> {
    let values: Vec<f64> = segments.iter().map(|s| s.value).collect();
    let order = draw_order(&values);
    let mut commands = Vec::with_capacity(segments.len() + placements.len() * 3);

    for &i in &order {
        let segment = &segments[i];
        if segment.sweep() <= 0.0 {
            continue;
        }
        commands.push(DrawCommand::Sector {
            index: segment.index,
            center: segment.center,
            inner_radius: segment.inner_radius,
            outer_radius: segment.outer_radius,
            start_angle: segment.start_angle,
            sweep_angle: segment.sweep(),
            fill: color_at(colors, segment.index),
        });
    }

    for &i in &order {
        let index = segments[i].index;
        let Some(placement) = placements.iter().find(|p| p.segment_index == index) else {
            continue;
        };
        let color = color_at(colors, index);
        commands.push(DrawCommand::Polyline {
            points: placement.leader.clone(),
            stroke: color.clone(),
            width: LEADER_WIDTH,
        });
        commands.push(DrawCommand::FillRect {
            rect: placement.swatch,
            fill: color,
        });
        commands.push(DrawCommand::Text {
            position: placement.text_anchor,
            text: placement.text.clone(),
            align: placement.align,
            font_size: config.font_size,
            color: LABEL_TEXT_COLOR.to_string(),
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::pie_segments;
    use crate::measure::HeuristicTextMeasurer;
    use crate::pie_labels::layout_pie_labels;

    fn commands(values: &[f64]) -> Vec<DrawCommand> {
        let segments = pie_segments(values, Point::new(300.0, 200.0), 0.0, 100.0);
        let labels: Vec<String> = (0..values.len()).map(|i| format!("c{}", i)).collect();
        let config = PieLabelLayoutConfig::default();
        let placements = layout_pie_labels(&segments, &labels, 600.0, 400.0, &config, &HeuristicTextMeasurer);
        let colors = vec!["#a".to_string(), "#b".to_string(), "#c".to_string()];
        to_draw_commands(&segments, &placements, &colors, &config)
    }

    #[test]
    fn test_sectors_first_in_value_order() {
        let cmds = commands(&[1.0, 5.0, 3.0]);
        let sector_indices: Vec<usize> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sector { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(sector_indices, vec![1, 2, 0]);
        assert!(matches!(cmds[3], DrawCommand::Polyline { .. }));
        assert_eq!(cmds.len(), 3 + 3 * 3);
    }

    #[test]
    fn test_label_commands_use_segment_color() {
        let cmds = commands(&[1.0, 5.0, 3.0]);
        match &cmds[4] {
            DrawCommand::FillRect { fill, .. } => assert_eq!(fill, "#b"),
            other => panic!("unexpected command {:?}", other),
        }
        match &cmds[5] {
            DrawCommand::Text { text, .. } => assert_eq!(text, "c1 (55.6%)"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_sector_path_bounds() {
        let cmds = commands(&[1.0]);
        let path = cmds[0].sector_path(0.1).unwrap();
        let bounds = path.bounding_box();
        assert!(bounds.width() > 190.0 && bounds.width() < 210.0);
        assert!(cmds[1].sector_path(0.1).is_none());
    }
}
