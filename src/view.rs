//! Mapping between widget, view and source pixel coordinates.
//!
//! *Source space* is the decoded image. *View space* is the scaled bitmap shown
//! on screen; annotation points are stored in view space. *Widget space* is the
//! viewport the pointer events arrive in, where the bitmap is framed and
//! centred.

use crate::geometry::{Point, Rect};

/// Zoom level, in percent, at which the image just fits the viewport.
pub const FIT_ZOOM: u32 = 100;

/// Scales `source` to the largest size that fits `target` without distorting it.
///
/// Integer arithmetic, truncating; never returns a zero dimension.
pub fn keep_aspect_ratio(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (u64::from(source.0.max(1)), u64::from(source.1.max(1)));
    let (tw, th) = (u64::from(target.0), u64::from(target.1));
    let scaled_width = th * sw / sh;
    let (w, h) = if scaled_width <= tw {
        (scaled_width, th)
    } else {
        (tw, tw * sh / sw)
    };
    let clamp = |v: u64| u32::try_from(v).unwrap_or(u32::MAX).max(1);
    (clamp(w), clamp(h))
}

/// Current view of the source image.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    source: (u32, u32),
    image: (u32, u32),
    viewport: (u32, u32),
    frame_width: f64,
    zoom: u32,
    ratio_to_source: f64,
}

impl ViewTransform {
    /// Unfitted transform: the view equals the source until [`fit`](Self::fit) runs.
    pub fn new(source: (u32, u32), frame_width: f64) -> Self {
        let source = (source.0.max(1), source.1.max(1));
        Self {
            source,
            image: source,
            viewport: source,
            frame_width,
            zoom: FIT_ZOOM,
            ratio_to_source: 1.0,
        }
    }

    /// Recomputes the view size for `viewport` and `zoom` percent.
    ///
    /// Returns the new-to-old view width ratio that stored view-space
    /// positions must be multiplied by.
    pub fn fit(&mut self, viewport: (u32, u32), zoom: u32) -> f64 {
        let scale = f64::from(zoom) / 100.0;
        let inner =
            |extent: u32| ((f64::from(extent) - 2.0 * self.frame_width).max(0.0) * scale) as u32;
        let target = (inner(viewport.0), inner(viewport.1));
        let image = keep_aspect_ratio(self.source, target);

        let ratio_from_old = f64::from(image.0) / f64::from(self.image.0);
        self.image = image;
        self.viewport = viewport;
        self.zoom = zoom;
        self.ratio_to_source = f64::from(self.source.0) / f64::from(image.0);
        log::debug!(
            "View fitted to {}x{} (zoom {}%, ratio from old {:.4}, to source {:.4})",
            image.0,
            image.1,
            zoom,
            ratio_from_old,
            self.ratio_to_source
        );
        ratio_from_old
    }

    pub fn source_size(&self) -> (u32, u32) {
        self.source
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Source width divided by view width.
    pub fn ratio_to_source(&self) -> f64 {
        self.ratio_to_source
    }

    pub fn to_source(&self, point: Point) -> Point {
        point.scaled(self.ratio_to_source)
    }

    pub fn to_view(&self, point: Point) -> Point {
        point.scaled(1.0 / self.ratio_to_source)
    }

    /// Top-left corner of the bitmap inside the widget.
    fn origin(&self) -> Point {
        let centre = |extent: u32, image: u32| {
            let inner = f64::from(extent) - 2.0 * self.frame_width;
            self.frame_width + ((inner - f64::from(image)) / 2.0).max(0.0)
        };
        Point::new(
            centre(self.viewport.0, self.image.0),
            centre(self.viewport.1, self.image.1),
        )
    }

    pub fn widget_to_view(&self, point: Point) -> Point {
        let origin = self.origin();
        point.offset(-origin.x, -origin.y)
    }

    pub fn view_to_widget(&self, point: Point) -> Point {
        let origin = self.origin();
        point.offset(origin.x, origin.y)
    }

    /// The bitmap's extent in view space.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: f64::from(self.image.0),
            height: f64::from(self.image.1),
        }
    }

    /// True when a point of width `point_width` at `point` would reach past an edge.
    pub fn is_out_of_bounds(&self, point: Point, point_width: f64) -> bool {
        let margin = point_width / 2.0;
        let bounds = self.bounds();
        point.x < margin
            || point.x > bounds.width - margin
            || point.y < margin
            || point.y > bounds.height - margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn keep_aspect_ratio_fits_inside_target() {
        assert_eq!(keep_aspect_ratio((2000, 1000), (1024, 768)), (1024, 512));
        assert_eq!(keep_aspect_ratio((1000, 2000), (1024, 768)), (384, 768));
        assert_eq!(keep_aspect_ratio((640, 480), (640, 480)), (640, 480));
        assert_eq!(keep_aspect_ratio((640, 480), (0, 0)), (1, 1));
    }

    #[test]
    fn fit_accounts_for_frame_and_zoom() {
        let mut view = ViewTransform::new((2000, 1000), 1.0);
        let ratio = view.fit((1026, 770), 100);
        assert_eq!(view.image_size(), (1024, 512));
        assert!(approx(ratio, 1024.0 / 2000.0));
        assert!(approx(view.ratio_to_source(), 2000.0 / 1024.0));

        let ratio = view.fit((1026, 770), 50);
        assert_eq!(view.image_size(), (512, 256));
        assert!(approx(ratio, 0.5));
    }

    #[test]
    fn source_view_round_trip() {
        let mut view = ViewTransform::new((1500, 900), 1.0);
        view.fit((802, 602), 100);
        let p = Point::new(123.25, 77.5);
        let back = view.to_view(view.to_source(p));
        assert!(approx(back.x, p.x) && approx(back.y, p.y));
    }

    #[test]
    fn widget_offset_centres_small_images() {
        let mut view = ViewTransform::new((100, 100), 1.0);
        view.fit((202, 102), 100);
        assert_eq!(view.image_size(), (100, 100));
        let p = view.widget_to_view(Point::new(51.0, 1.0));
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0));
        assert_eq!(view.view_to_widget(p), Point::new(51.0, 1.0));
    }

    #[test]
    fn bounds_keep_half_a_point_margin() {
        let view = ViewTransform::new((100, 100), 0.0);
        assert!(view.is_out_of_bounds(Point::new(3.0, 50.0), 7.0));
        assert!(!view.is_out_of_bounds(Point::new(3.5, 50.0), 7.0));
        assert!(view.is_out_of_bounds(Point::new(50.0, 97.0), 7.0));
        assert!(!view.is_out_of_bounds(Point::new(50.0, 50.0), 7.0));
    }
}
