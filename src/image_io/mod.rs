//! Image source and export collaborators.
//!
//! Sources decode a file into an RGBA raster plus an optional metadata block
//! (DICOM only). Export writes a raster back as JPEG or PNG.

pub mod dicom;
pub mod error;
pub mod export;

pub use error::ImageError;
pub use export::{ExportFormat, save_raster};

use image::{ImageReader, RgbaImage};
use std::fs::File;
use std::path::Path;

/// A decoded source image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub raster: RgbaImage,
    /// Patient/study text for DICOM inputs
    pub metadata: Option<String>,
}

impl SourceImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }
}

/// Abstraction over how images are read, so sessions can be driven by fixtures.
pub trait ImageSource {
    fn load(&self, path: &Path) -> Result<SourceImage, ImageError>;
}

/// Reads DICOM, JPEG and PNG files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn load(&self, path: &Path) -> Result<SourceImage, ImageError> {
        if !is_readable(path) {
            return Err(ImageError::Unreadable(path.to_path_buf()));
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let image = match extension.as_str() {
            "dcm" => dicom::load_dicom(path)?,
            "jpg" | "jpeg" | "jpe" | "png" => SourceImage {
                raster: ImageReader::open(path)?
                    .with_guessed_format()?
                    .decode()?
                    .to_rgba8(),
                metadata: None,
            },
            other => return Err(ImageError::UnsupportedFormat(other.to_string())),
        };
        let (width, height) = image.dimensions();
        log::info!("Loaded {} ({}x{})", path.display(), width, height);
        Ok(image)
    }
}

/// Whether `path` is a regular file this process can open.
pub fn is_readable(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}
