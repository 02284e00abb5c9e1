//! Per-mode pointer handlers.
//!
//! Every handler sees the same [`ModeContext`]; positions are in view space.
//! Handlers only touch points through their indices, so a drag rewrites the
//! position stored in the graph rather than holding on to a point.

use super::armed::ArmedIndices;
use super::events::PointerEvent;
use crate::annotation::AnnotationGraph;
use crate::draw::Color;
use crate::geometry::{Kernel, Point, midpoint};
use crate::view::ViewTransform;

/// Everything a mode handler may read or mutate while handling one event.
pub struct ModeContext<'a> {
    pub graph: &'a mut AnnotationGraph,
    pub armed: &'a mut ArmedIndices,
    pub hovered: &'a mut Option<usize>,
    pub view: &'a ViewTransform,
    pub kernel: Kernel,
    pub color: Color,
    pub point_width: f64,
}

impl ModeContext<'_> {
    /// Point under `position`, within `point_width - eps`.
    pub fn hit(&self, position: Point) -> Option<usize> {
        self.graph
            .point_at(position, self.point_width - self.kernel.eps, &self.kernel)
    }

    pub fn out_of_bounds(&self, position: Point) -> bool {
        self.view.is_out_of_bounds(position, self.point_width)
    }

    fn position(&self, index: usize) -> Option<Point> {
        self.graph.position(index)
    }

    /// Commits the construction and leaves `index` hover-highlighted.
    fn end_with(&mut self, index: usize) {
        self.armed.clear();
        *self.hovered = Some(index);
    }

    /// Commits the construction and keeps `index` armed for the next one.
    fn chain_from(&mut self, index: usize) {
        self.armed.clear();
        self.armed.arm(index);
        *self.hovered = Some(index);
    }

    /// Drops every armed index but `index` and arms it alone.
    fn restart_with(&mut self, index: usize) {
        self.armed.clear();
        self.armed.arm(index);
    }
}

/// Interprets primary-button pointer events for one mode.
///
/// Returns whether anything visible changed.
pub trait ModeHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool;
}

/// `Default` and `Drag`: annotations are left alone.
pub struct IdleHandler;

impl ModeHandler for IdleHandler {
    fn handle_event(&self, _event: &PointerEvent, _cx: &mut ModeContext<'_>) -> bool {
        false
    }
}

pub struct PointHandler;

impl ModeHandler for PointHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        let PointerEvent::Press { position, .. } = *event else {
            return false;
        };
        match cx.hit(position) {
            Some(index) => cx.graph.set_point_color(index, cx.color),
            None => cx.graph.add_point(position, cx.color).is_some(),
        }
    }
}

pub struct LineHandler;

impl ModeHandler for LineHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        let PointerEvent::Press { position, .. } = *event else {
            return false;
        };
        let index = match cx.hit(position) {
            Some(index) => index,
            None => match cx.graph.add_point(position, cx.color) {
                Some(index) => index,
                None => return false,
            },
        };
        cx.armed.arm(index);
        if let (Some(a), Some(b)) = (cx.armed.first(), cx.armed.second()) {
            cx.graph.add_line(a, b, cx.color);
            log::debug!("Line {a}-{b}");
            cx.chain_from(b);
        }
        true
    }
}

pub struct AngleHandler;

impl ModeHandler for AngleHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        let PointerEvent::Press { position, .. } = *event else {
            return false;
        };
        let Some(index) = cx.hit(position) else {
            return false;
        };
        cx.armed.arm(index);
        match (cx.armed.first(), cx.armed.second(), cx.armed.third()) {
            (Some(a), Some(b), None) if !cx.graph.has_line(a, b) => {
                cx.armed.arm(a);
            }
            (Some(a), Some(b), Some(c)) => {
                if cx.graph.has_line(b, c) {
                    cx.graph.add_angle(a, b, c, cx.color);
                    log::debug!("Angle {a}-{b}-{c}");
                    cx.chain_from(c);
                } else {
                    cx.restart_with(c);
                }
            }
            _ => {}
        }
        true
    }
}

pub struct CircleHandler;

impl ModeHandler for CircleHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        match *event {
            PointerEvent::Press { position, .. } => match cx.armed.count() {
                0 => {
                    let center = match cx.hit(position) {
                        Some(index) => {
                            cx.armed.arm(index);
                            index
                        }
                        None => {
                            let Some(index) = cx.graph.add_point(position, cx.color) else {
                                return false;
                            };
                            cx.armed.arm_placeholder(index);
                            index
                        }
                    };
                    let delta = 2.0 * cx.kernel.eps;
                    let rim_position = position.offset(delta, delta);
                    let Some(rim) = cx.graph.add_point(rim_position, cx.color) else {
                        return false;
                    };
                    cx.armed.arm_placeholder(rim);
                    cx.graph.add_circle(center, rim, cx.color);
                    log::debug!("Circle {center}-{rim} started");
                    true
                }
                2 => {
                    let Some(rim) = cx.armed.second() else {
                        return false;
                    };
                    cx.end_with(rim);
                    true
                }
                _ => false,
            },
            PointerEvent::Move { position } => {
                if cx.armed.count() != 2 || cx.out_of_bounds(position) {
                    return false;
                }
                match cx.armed.second() {
                    Some(rim) => cx.graph.set_point_position(rim, position),
                    None => false,
                }
            }
            PointerEvent::Release { .. } => false,
        }
    }
}

pub struct MidpointHandler;

impl ModeHandler for MidpointHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        let PointerEvent::Press { position, .. } = *event else {
            return false;
        };
        let Some(index) = cx.hit(position) else {
            return false;
        };
        cx.armed.arm(index);
        let (Some(a), Some(b)) = (cx.armed.first(), cx.armed.second()) else {
            return true;
        };
        if !cx.graph.has_line(a, b) {
            cx.armed.arm(a);
            return true;
        }
        let (Some(pa), Some(pb)) = (cx.position(a), cx.position(b)) else {
            return true;
        };
        if let Some(m) = cx.graph.add_point(midpoint(pa, pb), cx.color) {
            cx.graph.add_line(a, m, cx.color);
            cx.graph.add_line(b, m, cx.color);
            log::debug!("Midpoint {m} of {a}-{b}");
        }
        cx.end_with(b);
        true
    }
}

pub struct PerpendicularHandler;

impl ModeHandler for PerpendicularHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        let PointerEvent::Press { position, .. } = *event else {
            return false;
        };
        let Some(index) = cx.hit(position) else {
            return false;
        };
        cx.armed.arm(index);
        match (cx.armed.first(), cx.armed.second(), cx.armed.third()) {
            (Some(a), Some(b), None) => {
                if !cx.graph.has_line(a, b) {
                    cx.armed.arm(a);
                }
            }
            (Some(a), Some(b), Some(c)) => {
                let positions = (cx.position(a), cx.position(b), cx.position(c));
                let (Some(pa), Some(pb), Some(pc)) = positions else {
                    return true;
                };
                let kernel = cx.kernel;
                if kernel.is_collinear(pa, pb, pc) {
                    if cx.graph.has_line(b, c) {
                        cx.armed.arm(a);
                    } else {
                        cx.restart_with(c);
                    }
                    return true;
                }
                let foot = kernel.foot_of_perpendicular(pa, pb, pc);
                if let Some(d) = cx.graph.add_point(foot, cx.color) {
                    if !kernel.is_between(pa, pb, foot) {
                        let nearer = if kernel.distance(pa, foot) < kernel.distance(pb, foot) {
                            a
                        } else {
                            b
                        };
                        cx.graph.add_line(nearer, d, cx.color);
                    }
                    cx.graph.add_line(c, d, cx.color);
                    log::debug!("Perpendicular foot {d} from {c} onto {a}-{b}");
                }
                cx.end_with(c);
            }
            _ => {}
        }
        true
    }
}

pub struct MovePointHandler;

impl ModeHandler for MovePointHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        match *event {
            PointerEvent::Press { position, .. } if cx.armed.is_empty() => match cx.hit(position) {
                Some(index) => cx.armed.arm(index),
                None => false,
            },
            PointerEvent::Move { position } if cx.armed.count() == 1 => {
                if cx.out_of_bounds(position) {
                    return false;
                }
                match cx.armed.first() {
                    Some(index) => cx.graph.set_point_position(index, position),
                    None => false,
                }
            }
            PointerEvent::Release { .. } if cx.armed.count() == 1 => {
                if let Some(index) = cx.armed.first() {
                    cx.armed.arm(index);
                }
                true
            }
            _ => false,
        }
    }
}

pub struct ClearPointHandler;

impl ModeHandler for ClearPointHandler {
    fn handle_event(&self, event: &PointerEvent, cx: &mut ModeContext<'_>) -> bool {
        let PointerEvent::Press { position, .. } = *event else {
            return false;
        };
        let Some(index) = cx.hit(position) else {
            return false;
        };
        if *cx.hovered == Some(index) {
            *cx.hovered = None;
        }
        cx.graph.erase(index)
    }
}
