//! Pointer events as delivered by the front-end, already mapped to view space.

use crate::geometry::Point;
use serde::Deserialize;

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left mouse button (drives the active mode)
    Left,
    /// Right mouse button (opens the point context menu)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}

/// A single pointer event in view-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { button: MouseButton, position: Point },
    Move { position: Point },
    Release { button: MouseButton, position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            Self::Press { position, .. }
            | Self::Move { position }
            | Self::Release { position, .. } => *position,
        }
    }

    /// The button involved, if any. Moves carry no button.
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            Self::Press { button, .. } | Self::Release { button, .. } => Some(*button),
            Self::Move { .. } => None,
        }
    }

    /// Whether the event belongs to the primary button stream (left press/release or any move).
    pub fn is_primary(&self) -> bool {
        matches!(self.button(), None | Some(MouseButton::Left))
    }

    /// The same event moved to another position.
    pub fn with_position(self, position: Point) -> Self {
        match self {
            Self::Press { button, .. } => Self::Press { button, position },
            Self::Move { .. } => Self::Move { position },
            Self::Release { button, .. } => Self::Release { button, position },
        }
    }
}
