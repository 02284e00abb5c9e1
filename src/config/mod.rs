//! Configuration file support for labeldcm.
//!
//! This module handles loading and validating settings from the configuration
//! file located at `~/.config/labeldcm/config.toml`. Settings cover label fonts,
//! stroke widths, label offsets, the color palette, geometry tolerances and
//! zoom limits.
//!
//! If no config file exists, the built-in defaults are used. Once loaded the
//! configuration is never mutated; components borrow it or copy the values
//! they need.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{ColorConfig, FontConfig, GeometryConfig, LabelConfig, StrokeConfig, ViewConfig};

use crate::draw::Color;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all settings.
///
/// # Example TOML
/// ```toml
/// [font]
/// family = "Monospace"
/// size = 10.0
///
/// [stroke]
/// point_width = 7.0
/// line_width = 3.0
/// angle_width = 2.0
///
/// [colors]
/// default = "red"
/// palette = ["red", "green", [255, 128, 0]]
///
/// [view]
/// min_zoom = 50
/// max_zoom = 200
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Label font
    #[serde(default)]
    pub font: FontConfig,

    /// Point, line and angle stroke widths
    #[serde(default)]
    pub stroke: StrokeConfig,

    /// Label offsets and number formatting
    #[serde(default)]
    pub labels: LabelConfig,

    /// Default color and palette
    #[serde(default)]
    pub colors: ColorConfig,

    /// Geometry kernel constants
    #[serde(default)]
    pub geometry: GeometryConfig,

    /// Image view and zoom settings
    #[serde(default)]
    pub view: ViewConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged.
    ///
    /// Validated ranges:
    /// - stroke widths: 1.0 - 50.0
    /// - `font.size`: 4.0 - 96.0
    /// - `geometry.eps`: 1e-9 - 1e-2
    /// - `geometry.radius_ratio`: 0.01 - 1.0
    /// - zoom limits: 10 - 400 percent, `min_zoom <= max_zoom`, `zoom_step >= 1`
    fn validate_and_clamp(&mut self) {
        for (name, width) in [
            ("point_width", &mut self.stroke.point_width),
            ("line_width", &mut self.stroke.line_width),
            ("angle_width", &mut self.stroke.angle_width),
        ] {
            if !(1.0..=50.0).contains(&*width) {
                log::warn!("Invalid {name} {:.1}, clamping to 1.0-50.0 range", *width);
                *width = width.clamp(1.0, 50.0);
            }
        }

        if !(4.0..=96.0).contains(&self.font.size) {
            log::warn!(
                "Invalid font size {:.1}, clamping to 4.0-96.0 range",
                self.font.size
            );
            self.font.size = self.font.size.clamp(4.0, 96.0);
        }

        if !(1e-9..=1e-2).contains(&self.geometry.eps) {
            log::warn!(
                "Invalid eps {:e}, clamping to 1e-9-1e-2 range",
                self.geometry.eps
            );
            self.geometry.eps = self.geometry.eps.clamp(1e-9, 1e-2);
        }

        if !(0.01..=1.0).contains(&self.geometry.radius_ratio) {
            log::warn!(
                "Invalid radius_ratio {:.3}, clamping to 0.01-1.0 range",
                self.geometry.radius_ratio
            );
            self.geometry.radius_ratio = self.geometry.radius_ratio.clamp(0.01, 1.0);
        }

        if self.geometry.probe_distance <= 0.0 {
            log::warn!(
                "Invalid probe_distance {:.1}, falling back to 128",
                self.geometry.probe_distance
            );
            self.geometry.probe_distance = 128.0;
        }

        self.view.min_zoom = self.view.min_zoom.clamp(10, 400);
        self.view.max_zoom = self.view.max_zoom.clamp(10, 400);
        if self.view.min_zoom > self.view.max_zoom {
            log::warn!(
                "min_zoom {} exceeds max_zoom {}, swapping",
                self.view.min_zoom,
                self.view.max_zoom
            );
            std::mem::swap(&mut self.view.min_zoom, &mut self.view.max_zoom);
        }
        if self.view.zoom_step == 0 {
            log::warn!("zoom_step must be at least 1, using 10");
            self.view.zoom_step = 10;
        }

        if self.colors.palette.is_empty() {
            log::warn!("Empty color palette, falling back to the default palette");
            self.colors.palette = types::default_palette();
        }
    }

    /// Parses a TOML document and validates the result.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source).context("Failed to parse config")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/labeldcm/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("labeldcm");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// The color selected at startup.
    pub fn default_color(&self) -> Color {
        self.colors.default.to_color()
    }

    /// Resolved palette colors, in configuration order.
    pub fn palette(&self) -> Vec<Color> {
        self.colors.palette.iter().map(ColorSpec::to_color).collect()
    }

    /// Looks a palette entry up by its label (case-insensitive).
    pub fn palette_color(&self, label: &str) -> Option<Color> {
        let wanted = label.to_lowercase();
        self.colors
            .palette
            .iter()
            .find(|spec| spec.label() == wanted)
            .map(ColorSpec::to_color)
    }
}
