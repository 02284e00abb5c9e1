use crate::annotation::{AnnotationError, AnnotationGraph};

use super::InputState;

/// Action picked from a point's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    /// Move the point to a user-chosen index
    Rename(i64),
    /// Add to or remove from the pivot panel
    TogglePivot,
    /// Erase the point and everything built on it
    Erase,
}

/// A context menu opened on point `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenuRequest {
    pub index: usize,
    pub is_pivot: bool,
}

impl ContextMenuRequest {
    /// Menu entries in display order, with their labels.
    pub fn entries(&self) -> [(&'static str, ContextAction); 3] {
        let pivot_label = if self.is_pivot {
            "hide point info"
        } else {
            "show point info"
        };
        [
            ("change index", ContextAction::Rename(self.index as i64)),
            (pivot_label, ContextAction::TogglePivot),
            ("erase point", ContextAction::Erase),
        ]
    }
}

impl InputState {
    /// Applies a context-menu action to point `index`.
    ///
    /// Returns whether the graph changed. Rejected renames leave everything
    /// untouched and are reported to the caller.
    pub fn apply_context_action(
        &mut self,
        index: usize,
        action: ContextAction,
        graph: &mut AnnotationGraph,
    ) -> Result<bool, AnnotationError> {
        match action {
            ContextAction::Rename(requested) => {
                if requested == index as i64 {
                    return Ok(false);
                }
                graph.rename(index, requested)?;
                if self.hovered == Some(index) {
                    self.hovered = usize::try_from(requested).ok();
                }
                Ok(true)
            }
            ContextAction::TogglePivot => Ok(graph.toggle_pivot(index).is_some()),
            ContextAction::Erase => {
                if self.hovered == Some(index) {
                    self.hovered = None;
                }
                Ok(graph.erase(index))
            }
        }
    }
}
