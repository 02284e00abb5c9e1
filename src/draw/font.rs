//! Font descriptor for label rendering.

use crate::config::Config;

/// Font used for index, distance and degree labels.
///
/// The same descriptor serves the on-screen preview and the export; the export
/// scales the size by the source/view ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Monospace", "Sans", "JetBrains Mono")
    pub family: String,
    /// Size in points at view scale
    pub size: f64,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.font.family.clone(), config.font.size)
    }

    /// Returns this descriptor with its size multiplied by `ratio`.
    pub fn scaled(&self, ratio: f64) -> Self {
        Self::new(self.family.clone(), self.size * ratio)
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Size", size rounded to one decimal.
    /// Example: "Monospace 10" or "Sans 12.5"
    pub fn to_pango_string(&self) -> String {
        let size = (self.size * 10.0).round() / 10.0;
        if size.fract() == 0.0 {
            format!("{} {}", self.family, size as i64)
        } else {
            format!("{} {:.1}", self.family, size)
        }
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
