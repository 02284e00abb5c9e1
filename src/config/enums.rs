//! Configuration enum types.

use crate::draw::{Color, color::RED};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default = "red"
///
/// # Custom RGB color (0-255 per component)
/// palette = ["red", [255, 128, 0]]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, cyan, yellow, black, white, gray
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names default to red with a warning. RGB arrays are
    /// converted from 0-255 range to 0.0-1.0 range with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::draw::color::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Display label: the name for named colors, `#rrggbb` otherwise.
    pub fn label(&self) -> String {
        match self {
            ColorSpec::Name(name) => name.to_lowercase(),
            ColorSpec::Rgb([r, g, b]) => format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, GRAY};

    #[test]
    fn named_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::Name("Blue".into()).to_color(), BLUE);
        assert_eq!(ColorSpec::Name("gray".into()).to_color(), GRAY);
        assert_eq!(ColorSpec::Name("no-such-color".into()).to_color(), RED);
        assert_eq!(
            ColorSpec::Rgb([255, 0, 0]).to_color(),
            Color::new(1.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn labels() {
        assert_eq!(ColorSpec::Name("Red".into()).label(), "red");
        assert_eq!(ColorSpec::Rgb([255, 128, 0]).label(), "#ff8000");
    }
}
