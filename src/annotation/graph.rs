//! Index-keyed annotation graph.

use super::error::AnnotationError;
use super::keys::{AngleKey, CircleKey, LineKey};
use crate::draw::Color;
use crate::geometry::{Kernel, Point};
use std::collections::{BTreeMap, BTreeSet};

/// A placed point: view-space position plus its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedPoint {
    pub position: Point,
    pub color: Color,
}

/// Points and everything built on them.
///
/// Lines, angles, circles and pivots refer to points by index only. Every
/// mutation keeps those references valid: erasing a point cascades, renaming
/// a point rewrites every key that mentions it.
///
/// While no image is loaded (`is_active() == false`) every mutation is a
/// silent no-op.
#[derive(Debug, Clone, Default)]
pub struct AnnotationGraph {
    active: bool,
    points: BTreeMap<usize, AnnotatedPoint>,
    lines: BTreeMap<LineKey, Color>,
    angles: BTreeMap<AngleKey, Color>,
    circles: BTreeMap<CircleKey, Color>,
    pivots: BTreeSet<usize>,
}

impl AnnotationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enables or disables editing. Deactivating also drops every annotation.
    pub fn set_active(&mut self, active: bool) {
        if !active {
            self.clear();
        }
        self.active = active;
    }

    /// Removes all points, lines, angles, circles and pivots.
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.angles.clear();
        self.circles.clear();
        self.pivots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Next free index: one past the largest in use, or 1 for an empty graph.
    pub fn next_index(&self) -> usize {
        self.points.keys().next_back().map_or(1, |last| last + 1)
    }

    pub fn point(&self, index: usize) -> Option<&AnnotatedPoint> {
        self.points.get(&index)
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.points.get(&index).map(|point| point.position)
    }

    pub fn contains_point(&self, index: usize) -> bool {
        self.points.contains_key(&index)
    }

    pub fn points(&self) -> impl Iterator<Item = (usize, &AnnotatedPoint)> {
        self.points.iter().map(|(index, point)| (*index, point))
    }

    pub fn lines(&self) -> impl Iterator<Item = (LineKey, Color)> + '_ {
        self.lines.iter().map(|(key, color)| (*key, *color))
    }

    pub fn angles(&self) -> impl Iterator<Item = (AngleKey, Color)> + '_ {
        self.angles.iter().map(|(key, color)| (*key, *color))
    }

    pub fn circles(&self) -> impl Iterator<Item = (CircleKey, Color)> + '_ {
        self.circles.iter().map(|(key, color)| (*key, *color))
    }

    pub fn pivots(&self) -> impl Iterator<Item = usize> + '_ {
        self.pivots.iter().copied()
    }

    pub fn is_pivot(&self, index: usize) -> bool {
        self.pivots.contains(&index)
    }

    pub fn has_line(&self, a: usize, b: usize) -> bool {
        self.lines.contains_key(&LineKey::new(a, b))
    }

    pub fn has_angle(&self, a: usize, vertex: usize, c: usize) -> bool {
        self.angles.contains_key(&AngleKey::new(a, vertex, c))
    }

    pub fn has_circle(&self, center: usize, rim: usize) -> bool {
        self.circles.contains_key(&CircleKey::new(center, rim))
    }

    /// Adds a point under the next free index.
    pub fn add_point(&mut self, position: Point, color: Color) -> Option<usize> {
        if !self.active {
            return None;
        }
        let index = self.next_index();
        self.points.insert(index, AnnotatedPoint { position, color });
        Some(index)
    }

    pub fn set_point_color(&mut self, index: usize, color: Color) -> bool {
        match self.points.get_mut(&index) {
            Some(point) if self.active => {
                point.color = color;
                true
            }
            _ => false,
        }
    }

    pub fn set_point_position(&mut self, index: usize, position: Point) -> bool {
        match self.points.get_mut(&index) {
            Some(point) if self.active => {
                point.position = position;
                true
            }
            _ => false,
        }
    }

    /// Connects two distinct existing points.
    pub fn add_line(&mut self, a: usize, b: usize, color: Color) -> bool {
        if !self.active || a == b || !self.contains_point(a) || !self.contains_point(b) {
            return false;
        }
        self.lines.insert(LineKey::new(a, b), color);
        true
    }

    /// Adds ∠A-vertex-C. Both arms must already exist as lines.
    pub fn add_angle(&mut self, a: usize, vertex: usize, c: usize, color: Color) -> bool {
        if !self.active || a == c || !self.has_line(a, vertex) || !self.has_line(vertex, c) {
            return false;
        }
        self.angles.insert(AngleKey::new(a, vertex, c), color);
        true
    }

    pub fn add_circle(&mut self, center: usize, rim: usize, color: Color) -> bool {
        if !self.active
            || center == rim
            || !self.contains_point(center)
            || !self.contains_point(rim)
        {
            return false;
        }
        self.circles.insert(CircleKey::new(center, rim), color);
        true
    }

    /// Removes a point and every line, angle, circle and pivot entry using it.
    pub fn erase(&mut self, index: usize) -> bool {
        if !self.active || self.points.remove(&index).is_none() {
            return false;
        }
        self.lines.retain(|key, _| !key.contains(index));
        self.angles.retain(|key, _| !key.contains(index));
        self.circles.retain(|key, _| !key.contains(index));
        self.pivots.remove(&index);
        log::debug!("Erased point {index}");
        true
    }

    /// Moves point `old` to the user-chosen index `requested`.
    ///
    /// Every key mentioning `old` is rewritten in one pass; the opposite
    /// endpoints and canonical ordering are preserved. On error nothing changes.
    pub fn rename(&mut self, old: usize, requested: i64) -> Result<(), AnnotationError> {
        if !self.active {
            return Ok(());
        }
        if !self.contains_point(old) {
            return Err(AnnotationError::UnknownIndex(old));
        }
        if requested <= 0 {
            return Err(AnnotationError::InvalidIndex(requested));
        }
        let new = usize::try_from(requested).map_err(|_| AnnotationError::InvalidIndex(requested))?;
        if new == old {
            return Ok(());
        }
        if self.contains_point(new) {
            return Err(AnnotationError::IndexConflict(new));
        }

        if let Some(point) = self.points.remove(&old) {
            self.points.insert(new, point);
        }
        self.lines = std::mem::take(&mut self.lines)
            .into_iter()
            .map(|(key, color)| (key.renamed(old, new), color))
            .collect();
        self.angles = std::mem::take(&mut self.angles)
            .into_iter()
            .map(|(key, color)| (key.renamed(old, new), color))
            .collect();
        self.circles = std::mem::take(&mut self.circles)
            .into_iter()
            .map(|(key, color)| (key.renamed(old, new), color))
            .collect();
        if self.pivots.remove(&old) {
            self.pivots.insert(new);
        }
        log::debug!("Renamed point {old} to {new}");
        Ok(())
    }

    /// Flips pivot membership; returns the new state, or `None` if nothing changed.
    pub fn toggle_pivot(&mut self, index: usize) -> Option<bool> {
        if !self.active || !self.contains_point(index) {
            return None;
        }
        if self.pivots.remove(&index) {
            Some(false)
        } else {
            self.pivots.insert(index);
            Some(true)
        }
    }

    /// Multiplies every point position by `ratio`.
    pub fn rescale(&mut self, ratio: f64) {
        for point in self.points.values_mut() {
            point.position = point.position.scaled(ratio);
        }
    }

    /// Index of the point nearest to `position` and strictly closer than `radius`.
    ///
    /// Points are visited in ascending index order and a candidate only wins
    /// when strictly closer, so equidistant ties go to the smallest index.
    pub fn point_at(&self, position: Point, radius: f64, kernel: &Kernel) -> Option<usize> {
        if !self.active {
            return None;
        }
        let mut best = radius;
        let mut found = None;
        for (index, point) in &self.points {
            let distance = kernel.distance(position, point.position);
            if distance < best {
                best = distance;
                found = Some(*index);
            }
        }
        found
    }

    /// Side-panel text: one `index: (x, y)` line per pivot, ascending.
    ///
    /// `to_source` maps stored view-space positions to source pixels.
    pub fn pivot_listing(&self, to_source: impl Fn(Point) -> Point, precision: usize) -> String {
        let mut listing = String::new();
        for index in &self.pivots {
            if let Some(point) = self.points.get(index) {
                let source = to_source(point.position);
                listing.push_str(&format!(
                    "{index}: ({:.precision$}, {:.precision$})\n",
                    source.x, source.y
                ));
            }
        }
        listing
    }
}
