//! RGBA color type and predefined color constants.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use labeldcm::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Returns a lighter variant used for hover and selection emphasis.
    ///
    /// Works in HSV: the value is multiplied by `factor / 100`; whatever
    /// overflows the value range is taken off the saturation instead, so
    /// saturated colors wash out towards white while keeping their hue.
    /// A `factor` of 150 gives the usual highlight.
    pub fn lighter(&self, factor: f64) -> Self {
        if factor <= 0.0 {
            return *self;
        }
        let (h, mut s, v) = rgb_to_hsv(self.r, self.g, self.b);
        let mut v = v * factor / 100.0;
        if v > 1.0 {
            s = (s - (v - 1.0)).max(0.0);
            v = 1.0;
        }
        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self::new(r, g, b, self.a)
    }
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= f64::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max <= f64::EPSILON { 0.0 } else { delta / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let c = v * s;
    let sector = (h / 60.0).rem_euclid(6.0);
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}

// ============================================================================
// Predefined Color Constants (CSS/SVG named colors)
// ============================================================================

/// Predefined red color (#ff0000)
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Predefined green color (#008000)
pub const GREEN: Color = Color::new(0.0, 128.0 / 255.0, 0.0, 1.0);

/// Predefined blue color (#0000ff)
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Predefined cyan color (#00ffff)
pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);

/// Predefined yellow color (#ffff00)
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Predefined black color (#000000)
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Predefined white color (#ffffff)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Predefined gray color (#808080)
pub const GRAY: Color = Color::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0);

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "cyan", "yellow", "black", "white", "gray"/"grey"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "cyan" => Some(CYAN),
        "yellow" => Some(YELLOW),
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "gray" | "grey" => Some(GRAY),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-9
            && (a.g - b.g).abs() < 1e-9
            && (a.b - b.b).abs() < 1e-9
            && (a.a - b.a).abs() < 1e-9
    }

    #[test]
    fn lighter_red_trades_saturation_for_value() {
        assert!(close(RED.lighter(150.0), Color::new(1.0, 0.5, 0.5, 1.0)));
    }

    #[test]
    fn lighter_keeps_black_and_alpha() {
        assert!(close(BLACK.lighter(150.0), BLACK));
        let translucent = Color::new(0.2, 0.4, 0.2, 0.5);
        let lighter = translucent.lighter(150.0);
        assert_eq!(lighter.a, 0.5);
        assert!(lighter.g > translucent.g);
    }

    #[test]
    fn lighter_green_stays_green() {
        let lighter = GREEN.lighter(150.0);
        assert!(lighter.g > GREEN.g);
        assert!(lighter.r.abs() < 1e-9 && lighter.b.abs() < 1e-9);
    }

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(name_to_color("CYAN"), Some(CYAN));
        assert_eq!(name_to_color("grey"), Some(GRAY));
        assert_eq!(name_to_color("orange"), None);
    }
}
