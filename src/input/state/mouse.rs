use crate::annotation::AnnotationGraph;
use crate::input::events::{MouseButton, PointerEvent};
use crate::input::modes::ModeContext;
use crate::view::ViewTransform;

use super::actions::ContextMenuRequest;
use super::{Effects, InputState};

/// Stages every pointer event passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The active mode's handler (primary button and moves only)
    Mode,
    /// Hovered point and status text (moves only)
    Hover,
    /// Context menu trigger (secondary button presses only)
    ContextMenu,
}

pub const PIPELINE: [Stage; 3] = [Stage::Mode, Stage::Hover, Stage::ContextMenu];

impl InputState {
    /// Runs a view-space pointer event through the pipeline.
    ///
    /// Without a loaded image (inactive graph) nothing happens.
    pub fn on_pointer_event(
        &mut self,
        event: PointerEvent,
        graph: &mut AnnotationGraph,
        view: &ViewTransform,
    ) -> Effects {
        let mut effects = Effects::default();
        if !graph.is_active() {
            return effects;
        }
        for stage in PIPELINE {
            match stage {
                Stage::Mode => self.run_mode_stage(&event, graph, view, &mut effects),
                Stage::Hover => self.run_hover_stage(&event, graph, &mut effects),
                Stage::ContextMenu => self.run_context_menu_stage(&event, graph, &mut effects),
            }
        }
        effects
    }

    fn run_mode_stage(
        &mut self,
        event: &PointerEvent,
        graph: &mut AnnotationGraph,
        view: &ViewTransform,
        effects: &mut Effects,
    ) {
        if !event.is_primary() {
            return;
        }
        let handler = self.mode.handler();
        let mut cx = ModeContext {
            graph,
            armed: &mut self.armed,
            hovered: &mut self.hovered,
            view,
            kernel: self.kernel,
            color: self.current_color,
            point_width: self.point_width,
        };
        if handler.handle_event(event, &mut cx) {
            log::debug!("{} handled {:?}, armed {:?}", self.mode, event, self.armed.as_slice());
            effects.redraw = true;
        }
    }

    fn run_hover_stage(
        &mut self,
        event: &PointerEvent,
        graph: &AnnotationGraph,
        effects: &mut Effects,
    ) {
        let PointerEvent::Move { position } = *event else {
            return;
        };
        let hovered = graph.point_at(position, self.hit_radius(), &self.kernel);
        if hovered != self.hovered {
            self.hovered = hovered;
            effects.redraw = true;
        }
        let precision = self.precision;
        effects.status = Some(format!(
            "position: {:.precision$}, {:.precision$}",
            position.x, position.y
        ));
    }

    fn run_context_menu_stage(
        &mut self,
        event: &PointerEvent,
        graph: &mut AnnotationGraph,
        effects: &mut Effects,
    ) {
        let PointerEvent::Press {
            button: MouseButton::Right,
            position,
        } = *event
        else {
            return;
        };
        let Some(index) = graph.point_at(position, self.hit_radius(), &self.kernel) else {
            return;
        };
        self.abandon(graph);
        // The construction may have owned the point under the cursor.
        if !graph.contains_point(index) {
            effects.redraw = true;
            return;
        }
        self.hovered = Some(index);
        effects.redraw = true;
        effects.context_menu = Some(ContextMenuRequest {
            index,
            is_pivot: graph.is_pivot(index),
        });
    }
}
