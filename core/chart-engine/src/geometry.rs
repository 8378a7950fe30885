//! FILENAME: core/chart-engine/src/geometry.rs
//! PURPOSE: Pie segment geometry and the pie-size plugin.
//! CONTEXT: Canvas coordinates, y pointing down. Angles are radians; an angle
//! `a` maps to `center + r * (cos a, sin a)`, so increasing angles sweep
//! clockwise on screen. The first segment starts at 12 o'clock (-PI/2).

use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Angle of 12 o'clock.
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// One slice of a pie or donut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSegment {
    /// Index of the data point (row) this segment plots.
    pub index: usize,
    pub value: f64,
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle halfway between start and end.
    pub fn bisector(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Unit direction of the bisector.
    pub fn bisector_direction(&self) -> Vec2 {
        Vec2::from_angle(self.bisector())
    }

    /// Point at `radius` along the bisector.
    pub fn point_at(&self, radius: f64) -> Point {
        self.center + self.bisector_direction() * radius
    }
}

/// Lays out segments proportional to `values`, clockwise from 12 o'clock.
/// Non-positive values get a zero sweep.
pub fn pie_segments(values: &[f64], center: Point, inner_radius: f64, outer_radius: f64) -> Vec<PieSegment> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();

    let mut angle = START_ANGLE;
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let sweep = if value > 0.0 && total > 0.0 {
                value / total * TAU
            } else {
                0.0
            };
            let segment = PieSegment {
                index,
                value,
                center,
                inner_radius,
                outer_radius,
                start_angle: angle,
                end_angle: angle + sweep,
            };
            angle += sweep;
            segment
        })
        .collect()
}

/// Share of each value in percent, rounded to one decimal.
/// Non-positive values count as 0.
pub fn percentages(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    values
        .iter()
        .map(|&v| {
            if v > 0.0 && total > 0.0 {
                (v / total * 1000.0).round() / 10.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Indices ordered by value, largest first. Ties keep data order.
pub fn draw_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order
}

// ============================================================================
// PIE SIZE PLUGIN
// ============================================================================

/// Sizes the pie so the outside labels have room on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieSizing {
    /// Horizontal room reserved for labels on each side.
    pub label_room: f64,
    pub top: f64,
    pub bottom: f64,
    pub min_radius: f64,
    /// Inner radius as a fraction of the outer radius (0 for a pie).
    pub cutout: f64,
}

impl Default for PieSizing {
    fn default() -> Self {
        PieSizing {
            label_room: 140.0,
            top: 24.0,
            bottom: 24.0,
            min_radius: 20.0,
            cutout: 0.0,
        }
    }
}

impl PieSizing {
    /// Outer radius for a canvas of the given size.
    pub fn outer_radius(&self, width: f64, height: f64) -> f64 {
        let available = (width - 2.0 * self.label_room).min(height - self.top - self.bottom);
        (available / 2.0).max(self.min_radius)
    }

    pub fn inner_radius(&self, width: f64, height: f64) -> f64 {
        self.outer_radius(width, height) * self.cutout.clamp(0.0, 1.0)
    }

    pub fn center(&self, width: f64, height: f64) -> Point {
        Point::new(width / 2.0, height / 2.0)
    }
}
