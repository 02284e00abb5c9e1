//! Label placement around points, segments and angle arcs.
//!
//! Each helper returns the baseline origin for a text label, pushed away from
//! the primitive it annotates so the text does not sit on top of the stroke.

use super::Point;
use crate::config::Config;

/// Fixed label offsets, copied out of the `[labels]` configuration section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOffsets {
    pub index_shift: f64,
    pub distance_shift: f64,
    pub degree_shift_base: f64,
    pub degree_shift_more: f64,
    pub eps: f64,
}

impl LabelOffsets {
    pub fn from_config(config: &Config) -> Self {
        Self {
            index_shift: config.labels.index_shift,
            distance_shift: config.labels.distance_shift,
            degree_shift_base: config.labels.degree_shift_base,
            degree_shift_more: config.labels.degree_shift_more,
            eps: config.geometry.eps,
        }
    }

    /// Returns the offsets multiplied by `ratio`, for rendering at another scale.
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            index_shift: self.index_shift * ratio,
            distance_shift: self.distance_shift * ratio,
            degree_shift_base: self.degree_shift_base * ratio,
            degree_shift_more: self.degree_shift_more * ratio,
            eps: self.eps,
        }
    }

    /// Index label: up and to the right of the point.
    pub fn index_label(&self, point: Point) -> Point {
        point.offset(self.index_shift, -self.index_shift)
    }

    /// Distance label for segment AB, anchored at `anchor` (normally the midpoint).
    pub fn distance_label(&self, a: Point, b: Point, anchor: Point) -> Point {
        let shift = self.distance_shift;
        // Vertical segment
        if (a.x - b.x).abs() < self.eps {
            return anchor.offset(shift, 0.0);
        }
        // Horizontal segment
        if (a.y - b.y).abs() < self.eps {
            return anchor.offset(0.0, -shift);
        }
        // Rising on screen ("/"): put the text below-right of the stroke.
        if (a.x - b.x) * (a.y - b.y) < 0.0 {
            return anchor.offset(shift, shift);
        }
        anchor.offset(shift, -shift)
    }

    /// Degree label for an angle whose vertex is `vertex`, anchored at the arc
    /// midpoint `arc`.
    ///
    /// Dispatches on where the vertex lies relative to the arc midpoint: four
    /// axis-aligned cases, then four quadrants. Text grows to the right, so the
    /// leftward placements use the larger shift.
    pub fn degree_label(&self, vertex: Point, arc: Point) -> Point {
        let eps = self.eps;
        let base = self.degree_shift_base;
        let more = self.degree_shift_more;
        let same_x = (vertex.x - arc.x).abs() < eps;
        let same_y = (vertex.y - arc.y).abs() < eps;
        let vertex_below = vertex.y > arc.y + eps;
        let vertex_above = vertex.y + eps < arc.y;
        let vertex_right = vertex.x > arc.x + eps;
        let vertex_left = vertex.x + eps < arc.x;

        if vertex_below && same_x {
            return arc.offset(0.0, -base);
        }
        if vertex_above && same_x {
            return arc.offset(0.0, base);
        }
        if vertex_right && same_y {
            return arc.offset(-more, 0.0);
        }
        if vertex_left && same_y {
            return arc.offset(base, 0.0);
        }
        if vertex_left && vertex_below {
            return arc.offset(base, -base);
        }
        if vertex_right && vertex_below {
            return arc.offset(-more, -base);
        }
        if vertex_right && vertex_above {
            return arc.offset(-more, base);
        }
        arc.offset(base, base)
    }
}

impl Default for LabelOffsets {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
