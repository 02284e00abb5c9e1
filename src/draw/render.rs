//! Cairo rendering of the annotation graph.
//!
//! The same pass serves the on-screen preview (view space, with hover and
//! construction emphasis) and the export (source space, every size scaled by
//! the source/view ratio, no emphasis).

use super::color::Color;
use super::error::RenderError;
use super::font::FontDescriptor;
use crate::annotation::AnnotationGraph;
use crate::config::Config;
use crate::geometry::{Kernel, LabelOffsets, Point, midpoint};
use crate::input::InputState;
use crate::view::ViewTransform;

/// `Color::lighter` factor for emphasised primitives.
pub const HIGHLIGHT_FACTOR: f64 = 150.0;

/// Sizes and constants the renderer needs, all at the same scale.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationStyle {
    pub point_width: f64,
    pub line_width: f64,
    pub angle_width: f64,
    pub font: FontDescriptor,
    pub offsets: LabelOffsets,
    pub kernel: Kernel,
    pub precision: usize,
}

impl AnnotationStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            point_width: config.stroke.point_width,
            line_width: config.stroke.line_width,
            angle_width: config.stroke.angle_width,
            font: FontDescriptor::from_config(config),
            offsets: LabelOffsets::from_config(config),
            kernel: Kernel::from_config(config),
            precision: config.labels.precision,
        }
    }

    /// Stroke widths, font size and label offsets multiplied by `ratio`.
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            point_width: self.point_width * ratio,
            line_width: self.line_width * ratio,
            angle_width: self.angle_width * ratio,
            font: self.font.scaled(ratio),
            offsets: self.offsets.scaled(ratio),
            kernel: self.kernel,
            precision: self.precision,
        }
    }
}

/// Where the annotations are drawn.
#[derive(Clone, Copy)]
pub enum RenderTarget<'a> {
    /// View-sized preview; `input` supplies hover and armed emphasis
    Preview { input: &'a InputState },
    /// Source-sized export
    Export,
}

/// Draws points, lines, angles and circles, in that order.
///
/// `style` is given at view scale; the export target scales it itself.
pub fn render_annotations(
    ctx: &cairo::Context,
    graph: &AnnotationGraph,
    view: &ViewTransform,
    style: &AnnotationStyle,
    target: RenderTarget<'_>,
) -> Result<(), RenderError> {
    let (style, input) = match target {
        RenderTarget::Preview { input } => (style.clone(), Some(input)),
        RenderTarget::Export => (style.scaled(view.ratio_to_source()), None),
    };
    let place: Box<dyn Fn(Point) -> Point + '_> = match target {
        RenderTarget::Preview { .. } => Box::new(|p: Point| p),
        RenderTarget::Export => Box::new(|p: Point| view.to_source(p)),
    };

    ctx.save()?;
    ctx.set_antialias(cairo::Antialias::Best);
    ctx.set_line_cap(cairo::LineCap::Round);

    render_points(ctx, graph, &style, &*place, input)?;
    render_lines(ctx, graph, view, &style, &*place, input)?;
    render_angles(ctx, graph, &style, &*place)?;
    render_circles(ctx, graph, &style, &*place, input)?;

    ctx.restore()?;
    Ok(())
}

fn set_color(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

fn emphasised(color: Color, highlight: bool) -> Color {
    if highlight {
        color.lighter(HIGHLIGHT_FACTOR)
    } else {
        color
    }
}

fn render_points(
    ctx: &cairo::Context,
    graph: &AnnotationGraph,
    style: &AnnotationStyle,
    place: &dyn Fn(Point) -> Point,
    input: Option<&InputState>,
) -> Result<(), RenderError> {
    for (index, point) in graph.points() {
        let highlight = input.is_some_and(|input| input.is_highlighted(index));
        let color = emphasised(point.color, highlight);
        let at = place(point.position);

        set_color(ctx, color);
        ctx.new_path();
        ctx.arc(at.x, at.y, style.point_width / 2.0, 0.0, std::f64::consts::TAU);
        ctx.fill()?;

        render_label(ctx, style.offsets.index_label(at), &index.to_string(), color, &style.font)?;
    }
    Ok(())
}

fn render_lines(
    ctx: &cairo::Context,
    graph: &AnnotationGraph,
    view: &ViewTransform,
    style: &AnnotationStyle,
    place: &dyn Fn(Point) -> Point,
    input: Option<&InputState>,
) -> Result<(), RenderError> {
    ctx.set_line_width(style.line_width);
    for (key, color) in graph.lines() {
        let (Some(a), Some(b)) = (graph.position(key.first()), graph.position(key.second())) else {
            continue;
        };
        let highlight = input.is_some_and(|input| {
            input.mode().highlights_armed_lines()
                && input.armed().contains(key.first())
                && input.armed().contains(key.second())
        });
        let color = emphasised(color, highlight);
        let (pa, pb) = (place(a), place(b));

        set_color(ctx, color);
        ctx.move_to(pa.x, pa.y);
        ctx.line_to(pb.x, pb.y);
        ctx.stroke()?;

        let length = style.kernel.distance(view.to_source(a), view.to_source(b));
        let text = format!("{length:.precision$}", precision = style.precision);
        let anchor = style.offsets.distance_label(pa, pb, midpoint(pa, pb));
        render_label(ctx, anchor, &text, color, &style.font)?;
    }
    Ok(())
}

fn render_angles(
    ctx: &cairo::Context,
    graph: &AnnotationGraph,
    style: &AnnotationStyle,
    place: &dyn Fn(Point) -> Point,
) -> Result<(), RenderError> {
    ctx.set_line_width(style.angle_width);
    let kernel = style.kernel;
    for (key, color) in graph.angles() {
        let (Some(a), Some(b), Some(c)) = (
            graph.position(key.first()),
            graph.position(key.vertex()),
            graph.position(key.last()),
        ) else {
            continue;
        };
        let (a, b, c) = (place(a), place(b), place(c));
        let degrees = kernel.angle_degrees(a, b, c);
        let start = kernel.arc_start_degrees(a, b, c);
        let radius = kernel.arc_radius(a, b, c);

        // Screen angles run counter-clockwise; cairo's run clockwise with y down.
        set_color(ctx, color);
        ctx.new_path();
        ctx.arc_negative(
            b.x,
            b.y,
            radius,
            -start.to_radians(),
            -(start + degrees).to_radians(),
        );
        ctx.stroke()?;

        let text = format!("{degrees:.precision$}°", precision = style.precision);
        let anchor = style.offsets.degree_label(b, kernel.arc_midpoint(a, b, c));
        render_label(ctx, anchor, &text, color, &style.font)?;
    }
    Ok(())
}

fn render_circles(
    ctx: &cairo::Context,
    graph: &AnnotationGraph,
    style: &AnnotationStyle,
    place: &dyn Fn(Point) -> Point,
    input: Option<&InputState>,
) -> Result<(), RenderError> {
    ctx.set_line_width(style.line_width);
    for (key, color) in graph.circles() {
        let (Some(center), Some(rim)) = (graph.position(key.center), graph.position(key.rim)) else {
            continue;
        };
        let highlight = input.is_some_and(|input| {
            input.mode().highlights_armed_circles()
                && input.armed().contains(key.center)
                && input.armed().contains(key.rim)
        });
        let bounds = style.kernel.min_bounding_square(place(center), place(rim));
        let centre = bounds.center();

        set_color(ctx, emphasised(color, highlight));
        ctx.new_path();
        ctx.arc(centre.x, centre.y, bounds.width / 2.0, 0.0, std::f64::consts::TAU);
        ctx.stroke()?;
    }
    Ok(())
}

/// Draws `text` with its baseline starting at `origin`.
pub fn render_label(
    ctx: &cairo::Context,
    origin: Point,
    text: &str,
    color: Color,
    font: &FontDescriptor,
) -> Result<(), RenderError> {
    ctx.save()?;

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string());
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    // Pango lays out from the top-left corner; labels are anchored at the baseline.
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.new_path();
    ctx.move_to(origin.x, origin.y - baseline);
    set_color(ctx, color);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    #[test]
    fn export_style_scales_every_size() {
        let style = AnnotationStyle::from_config(&Config::default());
        let scaled = style.scaled(2.0);
        assert_eq!(scaled.point_width, 14.0);
        assert_eq!(scaled.line_width, 6.0);
        assert_eq!(scaled.angle_width, 4.0);
        assert_eq!(scaled.font.size, 20.0);
        assert_eq!(scaled.offsets.index_shift, 6.0);
        assert_eq!(scaled.kernel, style.kernel);
    }

    #[test]
    fn emphasis_only_when_requested() {
        assert_eq!(emphasised(RED, false), RED);
        assert_ne!(emphasised(RED, true), RED);
    }
}
