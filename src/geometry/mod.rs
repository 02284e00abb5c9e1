//! Geometry kernel shared by the interaction state machine and the renderer.
//!
//! All functions are pure. Operands must live in the same coordinate space
//! (view space while interacting, source space while exporting); conversion is
//! the caller's job, see [`crate::view::ViewTransform`].

pub mod layout;

pub use layout::LabelOffsets;

use crate::config::Config;

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Multiplies both coordinates by `ratio` (uniform rescale around the origin).
    pub fn scaled(self, ratio: f64) -> Self {
        Self::new(self.x * ratio, self.y * ratio)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle with floating point extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds the rectangle spanned by two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Midpoint of segment AB.
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Dot product BA · BC.
pub fn dot(a: Point, b: Point, c: Point) -> f64 {
    let (bax, bay) = (a.x - b.x, a.y - b.y);
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);
    bax * bcx + bay * bcy
}

/// Cross product BA × BC (z component).
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    let (bax, bay) = (a.x - b.x, a.y - b.y);
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);
    bax * bcy - bcx * bay
}

/// Numeric constants the kernel needs, copied out of [`Config`].
///
/// `Kernel` is `Copy` so every component can hold its own value without
/// borrowing the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    /// Tolerance used for every "is zero" comparison and as distance floor
    pub eps: f64,
    /// Length of the probe segments used for arc direction and arc label anchors
    pub probe_distance: f64,
    /// Angle arc radius as a fraction of the shorter arm
    pub radius_ratio: f64,
}

impl Kernel {
    pub fn from_config(config: &Config) -> Self {
        Self {
            eps: config.geometry.eps,
            probe_distance: config.geometry.probe_distance,
            radius_ratio: config.geometry.radius_ratio,
        }
    }

    /// Euclidean distance, floored at `eps` so it can always be divided by.
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
        if distance > self.eps {
            distance
        } else {
            self.eps
        }
    }

    /// Angle ∠ABC in degrees, always within `[0, 180]`.
    ///
    /// The cosine is clamped to `[-1, 1]` before `acos`; rounding on nearly
    /// collinear inputs would otherwise produce NaN.
    pub fn angle_degrees(&self, a: Point, b: Point, c: Point) -> f64 {
        let cosine = dot(a, b, c) / self.distance(b, a) / self.distance(b, c);
        cosine.clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Start angle (degrees, counter-clockwise from the positive x axis as seen
    /// on screen) of the arc marking ∠ABC.
    ///
    /// The arm on the positive side of BA × BC is chosen as the start so that a
    /// counter-clockwise sweep of [`Kernel::angle_degrees`] covers the interior.
    pub fn arc_start_degrees(&self, a: Point, b: Point, c: Point) -> f64 {
        let start = if cross(a, b, c) > 0.0 { c } else { a };
        let degrees = self.angle_degrees(start, b, b.offset(self.probe_distance, 0.0));
        // Screen y grows downwards: an arm below the vertex is in the lower half-turn.
        if start.y > b.y { 360.0 - degrees } else { degrees }
    }

    /// Point on the ray A→B at distance `dist` from A.
    pub fn point_at_distance(&self, a: Point, b: Point, dist: f64) -> Point {
        let ratio = dist / self.distance(a, b);
        Point::new(a.x + (b.x - a.x) * ratio, a.y + (b.y - a.y) * ratio)
    }

    /// Radius of the arc drawn for ∠ABC.
    pub fn arc_radius(&self, a: Point, b: Point, c: Point) -> f64 {
        self.distance(b, a).min(self.distance(b, c)) * self.radius_ratio
    }

    /// Bounding square of the arc drawn for ∠ABC, centred on the vertex.
    pub fn arc_bounds(&self, a: Point, b: Point, c: Point) -> Rect {
        let r = self.arc_radius(a, b, c);
        Rect::from_corners(b.offset(-r, -r), b.offset(r, r))
    }

    /// Point on the arc of ∠ABC halfway between both arms; anchors the degree label.
    pub fn arc_midpoint(&self, a: Point, b: Point, c: Point) -> Point {
        let toward_a = self.point_at_distance(b, a, self.probe_distance);
        let toward_c = self.point_at_distance(b, c, self.probe_distance);
        self.point_at_distance(b, midpoint(toward_a, toward_c), self.arc_radius(a, b, c))
    }

    /// Orthogonal projection of C onto the line through A and B.
    ///
    /// Uses the implicit form `ax + by + c = 0` of line AB. A degenerate line
    /// (A == B) projects everything onto A.
    pub fn foot_of_perpendicular(&self, a: Point, b: Point, c: Point) -> Point {
        let la = a.y - b.y;
        let lb = b.x - a.x;
        let lc = -la * a.x - lb * a.y;
        let norm = la * la + lb * lb;
        if norm < self.eps {
            return a;
        }
        Point::new(
            (lb * lb * c.x - la * lb * c.y - la * lc) / norm,
            (la * la * c.y - la * lb * c.x - lb * lc) / norm,
        )
    }

    pub fn is_collinear(&self, a: Point, b: Point, c: Point) -> bool {
        ((a.x - c.x) * (a.y - b.y) - (a.x - b.x) * (a.y - c.y)).abs() < self.eps
    }

    /// Whether C's projection falls within segment AB (inclusive, eps tolerant).
    ///
    /// The test runs along the segment's dominant axis, so near-vertical
    /// segments are checked on y rather than on a degenerate x range.
    pub fn is_between(&self, a: Point, b: Point, c: Point) -> bool {
        let (lo, hi, value) = if (b.x - a.x).abs() >= (b.y - a.y).abs() {
            (a.x.min(b.x), a.x.max(b.x), c.x)
        } else {
            (a.y.min(b.y), a.y.max(b.y), c.y)
        };
        lo < value + self.eps && value < hi + self.eps
    }

    /// Smallest axis-aligned square enclosing the circle centred on `center`
    /// that passes through `rim`.
    pub fn min_bounding_square(&self, center: Point, rim: Point) -> Rect {
        let r = self.distance(center, rim);
        Rect::from_corners(center.offset(-r, -r), center.offset(r, r))
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn distance_is_floored_at_eps() {
        let kernel = Kernel::default();
        let p = Point::new(3.0, 4.0);
        assert_eq!(kernel.distance(p, p), kernel.eps);
        assert!(approx(kernel.distance(Point::new(0.0, 0.0), p), 5.0));
    }

    #[test]
    fn right_angle_and_arc_start() {
        let kernel = Kernel::default();
        let vertex = Point::new(300.0, 200.0);
        let left = Point::new(200.0, 200.0);
        let below = Point::new(300.0, 300.0);

        assert!(approx(kernel.angle_degrees(left, vertex, below), 90.0));
        assert!(approx(kernel.arc_start_degrees(left, vertex, below), 180.0));
        // Swapping the arms keeps the same arc.
        assert!(approx(kernel.arc_start_degrees(below, vertex, left), 180.0));
    }

    #[test]
    fn angle_survives_nearly_collinear_input() {
        let kernel = Kernel::default();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1e-12);
        let c = Point::new(2.0, 0.0);
        let degrees = kernel.angle_degrees(a, b, c);
        assert!(!degrees.is_nan());
        assert!((0.0..=180.0).contains(&degrees));

        let straight = kernel.angle_degrees(
            Point::new(0.1, 0.3),
            Point::new(0.2, 0.6),
            Point::new(0.3, 0.9),
        );
        assert!(!straight.is_nan());
    }

    #[test]
    fn arc_start_below_vertex_wraps() {
        let kernel = Kernel::default();
        let vertex = Point::new(0.0, 0.0);
        // Arm pointing down-right on screen (positive y).
        let a = Point::new(10.0, 10.0);
        let c = Point::new(10.0, -10.0);
        let start = kernel.arc_start_degrees(a, vertex, c);
        assert!(approx(start, 315.0));
        assert!(approx(kernel.angle_degrees(a, vertex, c), 90.0));
    }

    #[test]
    fn point_at_distance_walks_the_ray() {
        let kernel = Kernel::default();
        let p = kernel.point_at_distance(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0);
        assert!(approx(p.x, 4.0) && approx(p.y, 0.0));
    }

    #[test]
    fn arc_midpoint_bisects_the_angle() {
        let kernel = Kernel::default();
        let b = Point::new(0.0, 0.0);
        let a = Point::new(100.0, 0.0);
        let c = Point::new(0.0, 100.0);
        let mid = kernel.arc_midpoint(a, b, c);
        let r = kernel.arc_radius(a, b, c);
        assert!(approx(r, 20.0));
        assert!(approx(mid.x, mid.y));
        assert!(approx(kernel.distance(b, mid), r));
    }

    #[test]
    fn foot_of_perpendicular_projects_onto_line() {
        let kernel = Kernel::default();
        let foot = kernel.foot_of_perpendicular(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        );
        assert!(approx(foot.x, 5.0) && approx(foot.y, 5.0));

        let horizontal = kernel.foot_of_perpendicular(
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, -3.0),
        );
        assert!(approx(horizontal.x, 20.0) && approx(horizontal.y, 5.0));
    }

    #[test]
    fn collinearity() {
        let kernel = Kernel::default();
        assert!(kernel.is_collinear(
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 4.0)
        ));
        assert!(!kernel.is_collinear(
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 5.0)
        ));
    }

    #[test]
    fn is_between_uses_dominant_axis() {
        let kernel = Kernel::default();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(kernel.is_between(a, b, Point::new(5.0, 0.0)));
        assert!(kernel.is_between(a, b, Point::new(10.0, 0.0)));
        assert!(!kernel.is_between(a, b, Point::new(12.0, 0.0)));

        // Vertical segment: x is degenerate, y decides.
        let top = Point::new(5.0, 0.0);
        let bottom = Point::new(5.0, 10.0);
        assert!(kernel.is_between(top, bottom, Point::new(5.0, 4.0)));
        assert!(!kernel.is_between(top, bottom, Point::new(5.0, 15.0)));
    }

    #[test]
    fn bounding_square_of_circle() {
        let kernel = Kernel::default();
        let rect = kernel.min_bounding_square(Point::new(10.0, 10.0), Point::new(13.0, 14.0));
        assert_eq!(rect, Rect { x: 5.0, y: 5.0, width: 10.0, height: 10.0 });
        assert_eq!(rect.center(), Point::new(10.0, 10.0));
    }
}
