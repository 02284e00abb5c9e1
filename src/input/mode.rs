//! Interaction mode selection.

use super::modes::{
    AngleHandler, CircleHandler, ClearPointHandler, IdleHandler, LineHandler, MidpointHandler,
    ModeHandler, MovePointHandler, PerpendicularHandler, PointHandler,
};
use std::fmt;
use std::str::FromStr;

/// Interaction mode.
///
/// Exactly one mode is active at a time. The mode decides how primary-button
/// pointer events turn into annotation edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No interactive effect beyond hover highlighting (default)
    #[default]
    Default,
    /// Panning the view; behaves like `Default` towards the annotations
    Drag,
    /// Place a point, or recolor the point under the cursor
    Point,
    /// Connect two points, chaining from the last one
    Line,
    /// Mark the angle between two connected segments
    Angle,
    /// Circle around a centre, radius follows the pointer until committed
    Circle,
    /// Midpoint of an existing segment
    Midpoint,
    /// Foot of the perpendicular from a point onto a segment
    Perpendicular,
    /// Drag an existing point
    MovePoint,
    /// Erase the point under the cursor
    ClearPoint,
}

impl Mode {
    pub const ALL: [Mode; 10] = [
        Mode::Default,
        Mode::Drag,
        Mode::Point,
        Mode::Line,
        Mode::Angle,
        Mode::Circle,
        Mode::Midpoint,
        Mode::Perpendicular,
        Mode::MovePoint,
        Mode::ClearPoint,
    ];

    /// Maps an action-list entry to its mode.
    pub fn from_action_name(name: &str) -> Option<Self> {
        let mode = match name.trim().to_lowercase().as_str() {
            "none" => Self::Default,
            "drag" => Self::Drag,
            "point" => Self::Point,
            "line" => Self::Line,
            "angle" => Self::Angle,
            "circle" => Self::Circle,
            "midpoint" => Self::Midpoint,
            "perpendicular" => Self::Perpendicular,
            "move point" => Self::MovePoint,
            "delete point" => Self::ClearPoint,
            _ => return None,
        };
        Some(mode)
    }

    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Default => "none",
            Self::Drag => "drag",
            Self::Point => "point",
            Self::Line => "line",
            Self::Angle => "angle",
            Self::Circle => "circle",
            Self::Midpoint => "midpoint",
            Self::Perpendicular => "perpendicular",
            Self::MovePoint => "move point",
            Self::ClearPoint => "delete point",
        }
    }

    /// The handler that interprets pointer events in this mode.
    pub fn handler(&self) -> &'static dyn ModeHandler {
        match self {
            Self::Default | Self::Drag => &IdleHandler,
            Self::Point => &PointHandler,
            Self::Line => &LineHandler,
            Self::Angle => &AngleHandler,
            Self::Circle => &CircleHandler,
            Self::Midpoint => &MidpointHandler,
            Self::Perpendicular => &PerpendicularHandler,
            Self::MovePoint => &MovePointHandler,
            Self::ClearPoint => &ClearPointHandler,
        }
    }

    /// Whether a line with both endpoints armed is drawn emphasised.
    pub fn highlights_armed_lines(&self) -> bool {
        matches!(self, Self::Angle | Self::Perpendicular)
    }

    /// Whether a circle with both points armed is drawn emphasised.
    pub fn highlights_armed_circles(&self) -> bool {
        matches!(self, Self::Circle)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_action_name(s).ok_or_else(|| format!("unknown mode '{s}'"))
    }
}
