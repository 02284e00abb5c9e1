//! Writing the annotated raster to disk.

use super::ImageError;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::Path;

/// Output formats chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    /// `jpg`/`jpeg`/`jpe` → JPEG, `png` → PNG (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" | "jpe" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(ImageError::UnsupportedFormat(if extension.is_empty() {
                path.display().to_string()
            } else {
                extension
            })),
        }
    }
}

/// Saves `raster` in the format implied by `path`. JPEG output drops alpha.
pub fn save_raster(raster: &RgbaImage, path: &Path) -> Result<ExportFormat, ImageError> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(raster.clone()).to_rgb8();
            rgb.save_with_format(path, ImageFormat::Jpeg)?;
        }
        ExportFormat::Png => raster.save_with_format(path, ImageFormat::Png)?,
    }
    log::info!(
        "Exported {}x{} {:?} to {}",
        raster.width(),
        raster.height(),
        format,
        path.display()
    );
    Ok(format)
}
