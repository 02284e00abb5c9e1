use super::*;
use crate::annotation::{AnnotationError, AnnotationGraph};
use crate::config::Config;
use crate::draw::color::{BLUE, RED};
use crate::geometry::{Kernel, Point};
use crate::input::{Mode, MouseButton, PointerEvent};
use crate::view::ViewTransform;

struct Harness {
    state: InputState,
    graph: AnnotationGraph,
    view: ViewTransform,
}

impl Harness {
    fn new() -> Self {
        let config = Config::default();
        let mut graph = AnnotationGraph::new();
        graph.set_active(true);
        Self {
            state: InputState::new(&config),
            graph,
            view: ViewTransform::new((1000, 1000), 0.0),
        }
    }

    fn mode(&mut self, mode: Mode) {
        self.state.set_mode(mode, &mut self.graph);
    }

    fn send(&mut self, event: PointerEvent) -> Effects {
        self.state.on_pointer_event(event, &mut self.graph, &self.view)
    }

    fn press(&mut self, x: f64, y: f64) -> Effects {
        self.send(PointerEvent::Press {
            button: MouseButton::Left,
            position: Point::new(x, y),
        })
    }

    fn right_press(&mut self, x: f64, y: f64) -> Effects {
        self.send(PointerEvent::Press {
            button: MouseButton::Right,
            position: Point::new(x, y),
        })
    }

    fn move_to(&mut self, x: f64, y: f64) -> Effects {
        self.send(PointerEvent::Move {
            position: Point::new(x, y),
        })
    }

    fn release(&mut self, x: f64, y: f64) -> Effects {
        self.send(PointerEvent::Release {
            button: MouseButton::Left,
            position: Point::new(x, y),
        })
    }

    fn position(&self, index: usize) -> Point {
        self.graph.position(index).unwrap()
    }

    fn points(&mut self, positions: &[(f64, f64)]) {
        self.mode(Mode::Point);
        for (x, y) in positions {
            self.press(*x, *y);
        }
    }

    /// Draws a chain of lines through fresh or existing points.
    fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.mode(Mode::Line);
        self.press(from.0, from.1);
        self.press(to.0, to.1);
        self.mode(Mode::Default);
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn inactive_graph_ignores_events() {
    let mut h = Harness::new();
    h.graph.set_active(false);
    h.mode(Mode::Point);
    assert_eq!(h.press(10.0, 10.0), Effects::default());
    assert!(h.graph.is_empty());
}

#[test]
fn point_mode_adds_then_recolors() {
    let mut h = Harness::new();
    h.mode(Mode::Point);
    assert!(h.press(10.0, 10.0).redraw);
    assert_eq!(h.graph.point(1).unwrap().color, RED);

    h.state.set_color(BLUE);
    h.press(12.0, 10.0);
    assert_eq!(h.graph.points().count(), 1);
    assert_eq!(h.graph.point(1).unwrap().color, BLUE);
    assert_eq!(h.position(1), Point::new(10.0, 10.0));
}

#[test]
fn right_button_never_drives_the_mode() {
    let mut h = Harness::new();
    h.mode(Mode::Point);
    let effects = h.right_press(10.0, 10.0);
    assert!(h.graph.is_empty());
    assert_eq!(effects.context_menu, None);
}

#[test]
fn line_mode_chains_from_the_last_point() {
    let mut h = Harness::new();
    h.mode(Mode::Line);
    h.press(100.0, 100.0);
    h.press(200.0, 100.0);
    assert!(h.graph.has_line(1, 2));
    assert_eq!(h.state.armed().as_slice(), &[2]);

    h.press(200.0, 200.0);
    assert!(h.graph.has_line(2, 3));
    assert_eq!(h.state.armed().as_slice(), &[3]);
}

#[test]
fn right_angle_scenario() {
    let mut h = Harness::new();
    h.points(&[(300.0, 200.0), (200.0, 200.0), (300.0, 300.0)]);

    h.mode(Mode::Line);
    h.press(200.0, 200.0);
    h.press(300.0, 200.0);
    h.press(300.0, 300.0);
    assert!(h.graph.has_line(1, 2));
    assert!(h.graph.has_line(1, 3));

    h.mode(Mode::Angle);
    assert!(h.state.armed().is_empty());
    h.press(200.0, 200.0);
    h.press(300.0, 200.0);
    h.press(300.0, 300.0);
    assert!(h.graph.has_angle(2, 1, 3));
    assert_eq!(h.state.armed().as_slice(), &[3]);

    let kernel = Kernel::default();
    let (a, b, c) = (h.position(2), h.position(1), h.position(3));
    assert!(approx(kernel.angle_degrees(a, b, c), 90.0));
    assert!(approx(kernel.arc_start_degrees(a, b, c), 180.0));
}

#[test]
fn angle_mode_restarts_without_a_segment() {
    let mut h = Harness::new();
    h.points(&[(100.0, 100.0), (200.0, 100.0), (200.0, 200.0)]);
    h.mode(Mode::Angle);

    h.press(100.0, 100.0);
    h.press(200.0, 100.0);
    assert_eq!(h.state.armed().as_slice(), &[2]);

    h.line((100.0, 100.0), (200.0, 100.0));
    h.mode(Mode::Angle);
    h.press(100.0, 100.0);
    h.press(200.0, 100.0);
    h.press(200.0, 200.0);
    assert_eq!(h.state.armed().as_slice(), &[3]);
    assert_eq!(h.graph.angles().count(), 0);
}

#[test]
fn angle_mode_ignores_empty_clicks() {
    let mut h = Harness::new();
    h.mode(Mode::Angle);
    assert!(!h.press(500.0, 500.0).redraw);
    assert!(h.graph.is_empty());
}

#[test]
fn circle_mode_places_centre_and_rim() {
    let mut h = Harness::new();
    let eps = Kernel::default().eps;
    h.mode(Mode::Circle);
    h.press(100.0, 100.0);

    assert_eq!(h.position(1), Point::new(100.0, 100.0));
    let rim = h.position(2);
    assert!(approx(rim.x, 100.0 + 2.0 * eps) && approx(rim.y, 100.0 + 2.0 * eps));
    assert!(h.graph.has_circle(1, 2));
    assert_eq!(h.state.armed().count(), 2);

    h.move_to(130.0, 100.0);
    assert_eq!(h.position(2), Point::new(130.0, 100.0));
    assert_eq!(h.position(1), Point::new(100.0, 100.0));

    h.press(130.0, 100.0);
    assert!(h.state.armed().is_empty());
    assert_eq!(h.state.hovered(), Some(2));

    h.move_to(160.0, 100.0);
    assert_eq!(h.position(2), Point::new(130.0, 100.0));
}

#[test]
fn circle_rim_stops_at_the_image_edge() {
    let mut h = Harness::new();
    h.mode(Mode::Circle);
    h.press(100.0, 100.0);
    h.move_to(120.0, 100.0);
    h.move_to(1.0, 100.0);
    assert_eq!(h.position(2), Point::new(120.0, 100.0));
}

#[test]
fn abandoning_a_circle_erases_only_placeholders() {
    let mut h = Harness::new();
    h.mode(Mode::Circle);
    h.press(100.0, 100.0);
    h.mode(Mode::Point);
    assert!(h.graph.is_empty());
    assert_eq!(h.graph.circles().count(), 0);

    h.press(50.0, 50.0);
    h.mode(Mode::Circle);
    h.press(50.0, 50.0);
    assert!(h.graph.has_circle(1, 2));
    h.mode(Mode::Default);
    assert!(h.graph.contains_point(1));
    assert!(!h.graph.contains_point(2));
    assert_eq!(h.graph.circles().count(), 0);
}

#[test]
fn midpoint_of_a_segment() {
    let mut h = Harness::new();
    h.line((100.0, 100.0), (200.0, 100.0));
    h.mode(Mode::Midpoint);
    h.press(100.0, 100.0);
    h.press(200.0, 100.0);

    assert_eq!(h.position(3), Point::new(150.0, 100.0));
    assert!(h.graph.has_line(1, 3));
    assert!(h.graph.has_line(2, 3));
    assert!(h.state.armed().is_empty());
    assert_eq!(h.state.hovered(), Some(2));
}

#[test]
fn midpoint_restarts_with_the_latest_point() {
    let mut h = Harness::new();
    h.points(&[(100.0, 100.0), (200.0, 100.0)]);
    h.mode(Mode::Midpoint);
    h.press(100.0, 100.0);
    h.press(200.0, 100.0);
    assert_eq!(h.state.armed().as_slice(), &[2]);
    assert_eq!(h.graph.points().count(), 2);
}

#[test]
fn perpendicular_foot_inside_the_segment() {
    let mut h = Harness::new();
    h.line((100.0, 100.0), (200.0, 100.0));
    h.points(&[(150.0, 50.0)]);

    h.mode(Mode::Perpendicular);
    h.press(100.0, 100.0);
    h.press(200.0, 100.0);
    h.press(150.0, 50.0);

    let foot = h.position(4);
    assert!(approx(foot.x, 150.0) && approx(foot.y, 100.0));
    assert!(h.graph.has_line(3, 4));
    assert!(!h.graph.has_line(1, 4));
    assert!(!h.graph.has_line(2, 4));
    assert_eq!(h.graph.lines().count(), 2);
    assert_eq!(h.graph.points().count(), 4);
    assert!(h.state.armed().is_empty());
}

#[test]
fn perpendicular_foot_outside_joins_the_nearer_end() {
    let mut h = Harness::new();
    h.line((100.0, 100.0), (200.0, 100.0));
    h.points(&[(250.0, 50.0)]);

    h.mode(Mode::Perpendicular);
    h.press(100.0, 100.0);
    h.press(200.0, 100.0);
    h.press(250.0, 50.0);

    let foot = h.position(4);
    assert!(approx(foot.x, 250.0) && approx(foot.y, 100.0));
    assert!(h.graph.has_line(3, 4));
    assert!(h.graph.has_line(2, 4));
    assert!(!h.graph.has_line(1, 4));
}

#[test]
fn perpendicular_on_vertical_segment() {
    let mut h = Harness::new();
    h.line((100.0, 100.0), (100.0, 200.0));
    h.points(&[(150.0, 300.0)]);

    h.mode(Mode::Perpendicular);
    h.press(100.0, 100.0);
    h.press(100.0, 200.0);
    h.press(150.0, 300.0);

    let foot = h.position(4);
    assert!(approx(foot.x, 100.0) && approx(foot.y, 300.0));
    assert!(h.graph.has_line(2, 4));
    assert!(h.graph.has_line(3, 4));
}

#[test]
fn perpendicular_on_collinear_points_restarts() {
    let mut h = Harness::new();
    h.line((100.0, 100.0), (200.0, 100.0));
    h.points(&[(300.0, 100.0)]);

    h.mode(Mode::Perpendicular);
    h.press(100.0, 100.0);
    h.press(200.0, 100.0);
    h.press(300.0, 100.0);
    assert_eq!(h.state.armed().as_slice(), &[3]);
    assert_eq!(h.graph.points().count(), 3);
}

#[test]
fn move_point_drags_through_the_index() {
    let mut h = Harness::new();
    h.line((100.0, 100.0), (200.0, 100.0));
    h.mode(Mode::MovePoint);

    h.press(100.0, 100.0);
    assert_eq!(h.state.armed().as_slice(), &[1]);
    h.move_to(150.0, 120.0);
    assert_eq!(h.position(1), Point::new(150.0, 120.0));
    h.move_to(-10.0, 50.0);
    assert_eq!(h.position(1), Point::new(150.0, 120.0));
    h.release(150.0, 120.0);
    assert!(h.state.armed().is_empty());
    assert!(h.graph.has_line(1, 2));
}

#[test]
fn clear_point_cascades() {
    let mut h = Harness::new();
    h.line((100.0, 100.0), (200.0, 100.0));
    h.mode(Mode::ClearPoint);
    h.press(100.0, 100.0);
    assert!(!h.graph.contains_point(1));
    assert_eq!(h.graph.lines().count(), 0);
    assert!(h.graph.contains_point(2));
}

#[test]
fn hover_updates_status_and_highlight() {
    let mut h = Harness::new();
    h.points(&[(100.0, 100.0)]);
    let effects = h.move_to(12.25, 6.5);
    assert_eq!(effects.status.as_deref(), Some("position: 12.25, 6.50"));
    assert_eq!(h.state.hovered(), None);

    let effects = h.move_to(101.0, 100.0);
    assert!(effects.redraw);
    assert_eq!(h.state.hovered(), Some(1));
    assert!(h.state.is_highlighted(1));
}

#[test]
fn context_menu_opens_on_a_point() {
    let mut h = Harness::new();
    h.points(&[(300.0, 300.0)]);
    h.mode(Mode::Circle);
    h.press(100.0, 100.0);

    let effects = h.right_press(300.0, 300.0);
    let request = effects.context_menu.unwrap();
    assert_eq!(request.index, 1);
    assert_eq!(request.entries()[1].0, "show point info");
    // The circle under construction was abandoned.
    assert_eq!(h.graph.points().count(), 1);
    assert_eq!(h.state.hovered(), Some(1));
}

fn renamable_graph() -> Harness {
    let mut h = Harness::new();
    h.points(&[(100.0, 100.0), (200.0, 100.0), (200.0, 200.0), (300.0, 200.0)]);
    assert!(h.graph.add_line(2, 3, RED));
    assert!(h.graph.add_line(3, 4, RED));
    assert!(h.graph.add_angle(2, 3, 4, RED));
    assert!(h.graph.add_circle(3, 1, RED));
    h.state
        .apply_context_action(3, ContextAction::TogglePivot, &mut h.graph)
        .unwrap();
    h
}

#[test]
fn rename_three_to_free_five() {
    let mut h = renamable_graph();
    assert_eq!(
        h.state.apply_context_action(3, ContextAction::Rename(5), &mut h.graph),
        Ok(true)
    );
    assert!(h.graph.has_line(2, 5));
    assert!(h.graph.has_line(5, 4));
    assert!(h.graph.has_angle(2, 5, 4));
    assert!(h.graph.has_circle(5, 1));
    assert!(h.graph.is_pivot(5));
    assert!(!h.graph.contains_point(3));
}

#[test]
fn rename_three_to_occupied_five() {
    let mut h = renamable_graph();
    h.points(&[(400.0, 400.0)]);
    assert!(h.graph.contains_point(5));

    assert_eq!(
        h.state.apply_context_action(3, ContextAction::Rename(5), &mut h.graph),
        Err(AnnotationError::IndexConflict(5))
    );
    assert!(h.graph.has_line(2, 3));
    assert!(h.graph.has_angle(2, 3, 4));
    assert!(h.graph.has_circle(3, 1));
    assert!(h.graph.is_pivot(3));
    assert!(!h.graph.is_pivot(5));
}

#[test]
fn erase_from_context_menu() {
    let mut h = renamable_graph();
    assert_eq!(
        h.state.apply_context_action(3, ContextAction::Erase, &mut h.graph),
        Ok(true)
    );
    assert_eq!(h.graph.lines().count(), 0);
    assert_eq!(h.graph.angles().count(), 0);
    assert_eq!(h.graph.circles().count(), 0);
    assert_eq!(h.graph.pivot_listing(|p| p, 2), "");
}

#[test]
fn pipeline_order_is_fixed() {
    assert_eq!(PIPELINE, [Stage::Mode, Stage::Hover, Stage::ContextMenu]);
}
