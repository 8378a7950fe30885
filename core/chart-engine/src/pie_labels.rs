//! FILENAME: core/chart-engine/src/pie_labels.rs
//! PURPOSE: Leader lines and label placement for pie charts (label-line plugin).
//! CONTEXT: Runs after the pie segments are laid out. Labels sit outside the
//! pie: right-side labels start at a fixed offset from the canvas right edge,
//! left-side labels end at least a fixed gap left of the pie bounding box.
//! On both sides the label end lies at or beyond the elbow, so the horizontal
//! part of a leader always runs away from the pie.
//!
//! ALGORITHM (per segment):
//! 1. elbow = center + (outer radius + extension) along the bisector
//! 2. side = sign of the bisector's horizontal component
//! 3. label y = elbow y clamped to [top margin, height - bottom margin]
//! 4. leader = edge -> elbow -> (vertical jog if clamped) -> label end
//!
//! There is no collision handling between neighbouring labels beyond the
//! vertical clamp. Close small slices can overlap.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::geometry::{percentages, PieSegment};
use crate::measure::TextMeasurer;

/// Layout constants, overridable by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieLabelLayoutConfig {
    /// Distance of the elbow beyond the outer radius.
    pub extension: f64,
    /// Right-side label anchor, measured from the canvas right edge.
    pub right_edge_offset: f64,
    /// Minimum gap between a left-side label and the pie bounding box. Also
    /// applied on the right when the canvas is too narrow for the anchor.
    pub left_min_gap: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub swatch_size: f64,
    pub swatch_gap: f64,
    pub font_size: f64,
}

impl Default for PieLabelLayoutConfig {
    fn default() -> Self {
        PieLabelLayoutConfig {
            extension: 20.0,
            right_edge_offset: 120.0,
            left_min_gap: 24.0,
            top_margin: 16.0,
            bottom_margin: 16.0,
            swatch_size: 10.0,
            swatch_gap: 6.0,
            font_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Right,
}

/// Where one segment's label goes and how it is connected.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub segment_index: usize,
    /// Polyline from the pie edge to the label.
    pub leader: Vec<Point>,
    pub side: LabelSide,
    /// Text baseline anchor; meaning depends on `align`.
    pub text_anchor: Point,
    pub align: TextAlign,
    pub swatch: Rect,
    pub text: String,
    /// Share of the total, one decimal.
    pub percentage: f64,
    /// True when the label was moved vertically to stay on the canvas.
    pub clamped: bool,
}

/// `"<label> (<pct>%)"` with one decimal.
pub fn label_text(label: &str, percentage: f64) -> String {
    format!("{} ({:.1}%)", label, percentage)
}

/// Places labels for every segment with a non-zero sweep.
///
/// `labels` are the category labels by data index; a missing label renders
/// as an empty name.
pub fn layout_pie_labels(
    segments: &[PieSegment],
    labels: &[String],
    canvas_width: f64,
    canvas_height: f64,
    config: &PieLabelLayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<LabelPlacement> {
    let values: Vec<f64> = segments.iter().map(|s| s.value).collect();
    let shares = percentages(&values);

    let min_y = config.top_margin;
    let max_y = (canvas_height - config.bottom_margin).max(min_y);

    segments
        .iter()
        .zip(shares)
        .filter(|(segment, _)| segment.sweep() > 0.0)
        .map(|(segment, percentage)| {
            let name = labels.get(segment.index).map(String::as_str).unwrap_or("");
            let text = label_text(name, percentage);

            let edge = segment.point_at(segment.outer_radius);
            let elbow = segment.point_at(segment.outer_radius + config.extension);

            let side = if segment.bisector_direction().x >= 0.0 {
                LabelSide::Right
            } else {
                LabelSide::Left
            };

            let y = elbow.y.clamp(min_y, max_y);
            let clamped = y != elbow.y;

            let half = config.swatch_size / 2.0;
            let (end, swatch, text_anchor, align) = match side {
                LabelSide::Right => {
                    // [end] gap [swatch] gap [text...]
                    let bbox_right = segment.center.x + segment.outer_radius;
                    let end_x = (canvas_width - config.right_edge_offset)
                        .max(elbow.x)
                        .max(bbox_right + config.left_min_gap);
                    let swatch_x = end_x + config.swatch_gap;
                    let text_x = swatch_x + config.swatch_size + config.swatch_gap;
                    (
                        Point::new(end_x, y),
                        Rect::new(swatch_x, y - half, swatch_x + config.swatch_size, y + half),
                        Point::new(text_x, y),
                        TextAlign::Left,
                    )
                }
                LabelSide::Left => {
                    // [swatch] gap [...text] gap [end]
                    let (text_width, _) = measurer.measure(&text, config.font_size);
                    let bbox_left = segment.center.x - segment.outer_radius;
                    let text_right = (bbox_left - config.left_min_gap).min(elbow.x - config.swatch_gap);
                    let swatch_right = text_right - text_width - config.swatch_gap;
                    (
                        Point::new(text_right + config.swatch_gap, y),
                        Rect::new(swatch_right - config.swatch_size, y - half, swatch_right, y + half),
                        Point::new(text_right, y),
                        TextAlign::Right,
                    )
                }
            };

            let mut leader = vec![edge, elbow];
            if clamped {
                leader.push(Point::new(elbow.x, y));
            }
            leader.push(end);

            LabelPlacement {
                segment_index: segment.index,
                leader,
                side,
                text_anchor,
                align,
                swatch,
                text,
                percentage,
                clamped,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::pie_segments;
    use crate::measure::HeuristicTextMeasurer;

    const W: f64 = 600.0;
    const H: f64 = 400.0;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn layout(values: &[f64], names: &[&str]) -> Vec<LabelPlacement> {
        let segments = pie_segments(values, Point::new(W / 2.0, H / 2.0), 0.0, 150.0);
        layout_pie_labels(
            &segments,
            &labels(names),
            W,
            H,
            &PieLabelLayoutConfig::default(),
            &HeuristicTextMeasurer,
        )
    }

    #[test]
    fn test_sides_follow_bisector() {
        // Two halves: first on the right, second on the left
        let placements = layout(&[1.0, 1.0], &["a", "b"]);
        assert_eq!(placements[0].side, LabelSide::Right);
        assert_eq!(placements[1].side, LabelSide::Left);
    }

    #[test]
    fn test_right_label_anchored_from_canvas_edge() {
        let placements = layout(&[1.0, 1.0], &["a", "b"]);
        let right = &placements[0];
        assert_eq!(right.align, TextAlign::Left);
        assert_eq!(right.leader.last().map(|p| p.x), Some(W - 120.0));
        assert_eq!(right.swatch.x0, W - 120.0 + 6.0);
        assert_eq!(right.text_anchor.x, W - 120.0 + 6.0 + 10.0 + 6.0);
    }

    #[test]
    fn test_left_label_stays_clear_of_pie() {
        let placements = layout(&[1.0, 1.0], &["b"; 2]);
        let left = &placements[1];
        let bbox_left = W / 2.0 - 150.0;
        assert_eq!(left.align, TextAlign::Right);
        assert!(left.text_anchor.x <= bbox_left - 24.0);
        // The elbow is 20 past the pie; the text keeps a swatch gap beyond it
        assert!((left.text_anchor.x - (bbox_left - 26.0)).abs() < 1e-9);

        let (width, _) = HeuristicTextMeasurer.measure(&left.text, 12.0);
        assert!(left.swatch.x1 <= left.text_anchor.x - width);
    }

    #[test]
    fn test_clamped_label_gets_vertical_jog() {
        // Pie centered high on the canvas
        let segments = pie_segments(&[1.0, 1.0], Point::new(W / 2.0, 100.0), 0.0, 150.0);
        let placements = layout_pie_labels(
            &segments,
            &labels(&["a", "b"]),
            W,
            H,
            &PieLabelLayoutConfig::default(),
            &HeuristicTextMeasurer,
        );
        // Bisectors at 3 and 9 o'clock: no clamping
        assert!(placements.iter().all(|p| !p.clamped && p.leader.len() == 3));

        // A thin first slice points almost straight up; its elbow lands above the canvas
        let tiny_first = pie_segments(&[1.0, 100.0], Point::new(W / 2.0, 100.0), 0.0, 150.0);
        let placements = layout_pie_labels(
            &tiny_first,
            &labels(&["a", "b"]),
            W,
            H,
            &PieLabelLayoutConfig::default(),
            &HeuristicTextMeasurer,
        );
        let top = &placements[0];
        assert!(top.clamped);
        assert_eq!(top.leader.len(), 4);
        assert_eq!(top.text_anchor.y, 16.0);
        // The final segment of the leader is horizontal
        let n = top.leader.len();
        assert_eq!(top.leader[n - 1].y, top.leader[n - 2].y);
        assert_eq!(top.leader[n - 2].x, top.leader[1].x);
    }

    fn assert_leader_runs_outward(placement: &LabelPlacement) {
        let elbow = placement.leader[1];
        let end = placement.leader[placement.leader.len() - 1];
        match placement.side {
            LabelSide::Right => assert!(end.x >= elbow.x - 1e-9, "{:?}", placement.leader),
            LabelSide::Left => assert!(end.x <= elbow.x + 1e-9, "{:?}", placement.leader),
        }
    }

    #[test]
    fn test_narrow_canvas_keeps_labels_outside_pie() {
        use crate::geometry::PieSizing;

        let (w, h) = (250.0, 300.0);
        let sizing = PieSizing::default();
        let outer = sizing.outer_radius(w, h);
        let center = sizing.center(w, h);
        let segments = pie_segments(&[1.0, 1.0], center, 0.0, outer);
        let placements = layout_pie_labels(
            &segments,
            &labels(&["a", "b"]),
            w,
            h,
            &PieLabelLayoutConfig::default(),
            &HeuristicTextMeasurer,
        );

        let right = &placements[0];
        assert_eq!(right.side, LabelSide::Right);
        assert!(right.swatch.x0 >= center.x + outer);
        assert_leader_runs_outward(right);

        let left = &placements[1];
        assert_eq!(left.side, LabelSide::Left);
        assert!(left.text_anchor.x <= center.x - outer - 24.0);
        assert_leader_runs_outward(left);
    }

    #[test]
    fn test_long_extension_keeps_elbow_clear_of_text() {
        let config = PieLabelLayoutConfig {
            extension: 40.0,
            ..PieLabelLayoutConfig::default()
        };
        let segments = pie_segments(&[1.0, 1.0], Point::new(W / 2.0, H / 2.0), 0.0, 150.0);
        let placements = layout_pie_labels(&segments, &labels(&["a", "b"]), W, H, &config, &HeuristicTextMeasurer);

        let left = &placements[1];
        assert!(left.text_anchor.x < left.leader[1].x);
        for placement in &placements {
            assert_leader_runs_outward(placement);
        }
    }

    #[test]
    fn test_text_and_percentage() {
        let placements = layout(&[1.0, 3.0], &["small", "large"]);
        assert_eq!(placements[0].text, "small (25.0%)");
        assert_eq!(placements[1].percentage, 75.0);
    }

    #[test]
    fn test_zero_segments_are_not_labelled() {
        let placements = layout(&[0.0, 2.0], &["none", "all"]);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].segment_index, 1);
    }
}
