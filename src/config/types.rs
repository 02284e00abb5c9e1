//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Label font settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FontConfig {
    /// Font family used for index, distance and degree labels.
    /// Falls back to the system default if the family is not installed.
    #[serde(default = "default_font_family")]
    pub family: String,

    /// Label font size in points at 100% zoom (valid range: 4.0 - 96.0)
    #[serde(default = "default_font_size")]
    pub size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            size: default_font_size(),
        }
    }
}

/// Stroke widths in view pixels (valid range: 1.0 - 50.0).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrokeConfig {
    /// Diameter of a point marker; also the hit-test radius
    #[serde(default = "default_point_width")]
    pub point_width: f64,

    /// Width of lines and circles
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Width of angle arcs
    #[serde(default = "default_angle_width")]
    pub angle_width: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            point_width: default_point_width(),
            line_width: default_line_width(),
            angle_width: default_angle_width(),
        }
    }
}

/// Label placement offsets and number formatting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LabelConfig {
    /// Index label shift (right and up) from its point
    #[serde(default = "default_index_shift")]
    pub index_shift: f64,

    /// Distance label shift away from the segment midpoint
    #[serde(default = "default_distance_shift")]
    pub distance_shift: f64,

    /// Degree label shift when the label grows away from the arc
    #[serde(default = "default_degree_shift_base")]
    pub degree_shift_base: f64,

    /// Degree label shift when the label has to clear its own width (leftward placements)
    #[serde(default = "default_degree_shift_more")]
    pub degree_shift_more: f64,

    /// Decimal places for distances, degrees and coordinates
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            index_shift: default_index_shift(),
            distance_shift: default_distance_shift(),
            degree_shift_base: default_degree_shift_base(),
            degree_shift_more: default_degree_shift_more(),
            precision: default_precision(),
        }
    }
}

/// Annotation colors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColorConfig {
    /// Color selected when the application starts
    #[serde(default = "default_color")]
    pub default: ColorSpec,

    /// Selectable colors, in the order they are offered
    #[serde(default = "default_palette")]
    pub palette: Vec<ColorSpec>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            default: default_color(),
            palette: default_palette(),
        }
    }
}

/// Numeric constants of the geometry kernel.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeometryConfig {
    /// Tolerance for zero comparisons and distance floor (valid range: 1e-9 - 1e-2)
    #[serde(default = "default_eps")]
    pub eps: f64,

    /// Probe segment length used for arc direction and label anchoring
    #[serde(default = "default_probe_distance")]
    pub probe_distance: f64,

    /// Angle arc radius as a fraction of the shorter arm (valid range: 0.01 - 1.0)
    #[serde(default = "default_radius_ratio")]
    pub radius_ratio: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            eps: default_eps(),
            probe_distance: default_probe_distance(),
            radius_ratio: default_radius_ratio(),
        }
    }
}

/// Image view settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewConfig {
    /// Frame border of the image view, subtracted on every side before fitting
    #[serde(default = "default_frame_width")]
    pub frame_width: f64,

    /// Smallest zoom level in percent
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u32,

    /// Largest zoom level in percent
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,

    /// Zoom change per zoom-in/zoom-out step, in percent
    #[serde(default = "default_zoom_step")]
    pub zoom_step: u32,

    /// Initial viewport size [width, height] in widget pixels
    #[serde(default = "default_viewport")]
    pub viewport: [u32; 2],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            frame_width: default_frame_width(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            viewport: default_viewport(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_font_family() -> String {
    "Monospace".to_string()
}

fn default_font_size() -> f64 {
    10.0
}

fn default_point_width() -> f64 {
    7.0
}

fn default_line_width() -> f64 {
    3.0
}

fn default_angle_width() -> f64 {
    2.0
}

fn default_index_shift() -> f64 {
    3.0
}

fn default_distance_shift() -> f64 {
    8.0
}

fn default_degree_shift_base() -> f64 {
    15.0
}

fn default_degree_shift_more() -> f64 {
    30.0
}

fn default_precision() -> usize {
    2
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

pub(super) fn default_palette() -> Vec<ColorSpec> {
    [
        "red", "green", "blue", "cyan", "yellow", "black", "white", "gray",
    ]
    .into_iter()
    .map(|name| ColorSpec::Name(name.to_string()))
    .collect()
}

fn default_eps() -> f64 {
    1e-5
}

fn default_probe_distance() -> f64 {
    128.0 // 2^7
}

fn default_radius_ratio() -> f64 {
    0.2
}

fn default_frame_width() -> f64 {
    1.0
}

fn default_min_zoom() -> u32 {
    50
}

fn default_max_zoom() -> u32 {
    200
}

fn default_zoom_step() -> u32 {
    10
}

fn default_viewport() -> [u32; 2] {
    [1024, 768]
}
