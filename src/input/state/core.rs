//! Interaction state and the effects it reports back to the front-end.

use super::actions::ContextMenuRequest;
use crate::annotation::AnnotationGraph;
use crate::config::Config;
use crate::draw::Color;
use crate::geometry::Kernel;
use crate::input::{armed::ArmedIndices, mode::Mode};

/// What the front-end has to do after an event was processed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// Whether the preview must be regenerated
    pub redraw: bool,
    /// Transient status-bar text (pointer position)
    pub status: Option<String>,
    /// Context menu to open for a point
    pub context_menu: Option<ContextMenuRequest>,
}

impl Effects {
    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }
}

/// Interaction state driving the annotation graph.
///
/// Holds the active mode, the armed indices of the construction in progress,
/// the hovered point and the current color. The graph itself is owned by the
/// session and lent to every call.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Active interaction mode
    pub(super) mode: Mode,
    /// Points of the construction in progress
    pub(super) armed: ArmedIndices,
    /// Point under the pointer, emphasised in the preview
    pub(super) hovered: Option<usize>,
    /// Color given to new points and primitives
    pub current_color: Color,
    pub(super) kernel: Kernel,
    pub(super) point_width: f64,
    pub(super) precision: usize,
}

impl InputState {
    pub fn new(config: &Config) -> Self {
        Self {
            mode: Mode::Default,
            armed: ArmedIndices::new(),
            hovered: None,
            current_color: config.default_color(),
            kernel: Kernel::from_config(config),
            point_width: config.stroke.point_width,
            precision: config.labels.precision,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches mode, abandoning the construction in progress.
    pub fn set_mode(&mut self, mode: Mode, graph: &mut AnnotationGraph) -> bool {
        if mode == self.mode {
            return false;
        }
        self.abandon(graph);
        log::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
    }

    pub fn armed(&self) -> &ArmedIndices {
        &self.armed
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether `index` is drawn emphasised (hovered or armed).
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.hovered == Some(index) || self.armed.contains(index)
    }

    /// Hit radius around each point.
    pub fn hit_radius(&self) -> f64 {
        self.point_width - self.kernel.eps
    }

    /// Drops the construction in progress and erases the points it synthesised.
    ///
    /// Returns whether anything was discarded.
    pub fn abandon(&mut self, graph: &mut AnnotationGraph) -> bool {
        let had_construction = !self.armed.is_empty();
        let placeholders = self.armed.abandon();
        for index in &placeholders {
            graph.erase(*index);
        }
        if let Some(hovered) = self.hovered {
            if !graph.contains_point(hovered) {
                self.hovered = None;
            }
        }
        if !placeholders.is_empty() {
            log::debug!("Abandoned construction, erased placeholders {placeholders:?}");
        }
        had_construction || !placeholders.is_empty()
    }

    /// Forgets all transient state without touching the graph (image reload, clear).
    pub fn reset(&mut self) {
        self.armed.clear();
        self.hovered = None;
    }
}
