//! Pointer input and the annotation mode state machine.
//!
//! Pointer events (already in view space) flow through an explicit pipeline:
//! the active mode's handler, then hover tracking, then the context menu
//! trigger. The mode handlers turn clicks into points, lines, angles, circles,
//! midpoints and perpendicular feet in the [`AnnotationGraph`](crate::annotation::AnnotationGraph).

pub mod armed;
pub mod events;
pub mod mode;
pub mod modes;
pub mod state;

pub use armed::ArmedIndices;
pub use events::{MouseButton, PointerEvent};
pub use mode::Mode;
pub use modes::{ModeContext, ModeHandler};
pub use state::{ContextAction, ContextMenuRequest, Effects, InputState};
