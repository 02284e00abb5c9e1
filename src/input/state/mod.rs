mod actions;
mod core;
mod mouse;
#[cfg(test)]
mod tests;

pub use actions::{ContextAction, ContextMenuRequest};
pub use core::{Effects, InputState};
pub use mouse::{PIPELINE, Stage};
