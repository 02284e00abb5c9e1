//! Conversions between `image` rasters and cairo surfaces.
//!
//! cairo's ARGB32 stores one native-endian `u32` per pixel with premultiplied
//! alpha; rows may be padded, so every access goes through the stride.

use super::error::RenderError;
use image::{Rgba, RgbaImage};

fn dimension(value: u32) -> Result<i32, RenderError> {
    i32::try_from(value).map_err(|_| RenderError::Raster(format!("dimension {value} too large")))
}

/// Copies an RGBA raster into a fresh ARGB32 surface.
pub fn surface_from_rgba(raster: &RgbaImage) -> Result<cairo::ImageSurface, RenderError> {
    let (width, height) = raster.dimensions();
    let mut surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, dimension(width)?, dimension(height)?)?;
    let stride = surface.stride() as usize;
    {
        let mut data = surface.data()?;
        for (x, y, pixel) in raster.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let premultiply = |c: u8| ((u32::from(c) * u32::from(a) + 127) / 255) as u8;
            let value = u32::from_be_bytes([a, premultiply(r), premultiply(g), premultiply(b)]);
            let offset = y as usize * stride + x as usize * 4;
            data[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
        }
    }
    Ok(surface)
}

/// Reads an ARGB32 surface back into an RGBA raster.
///
/// Every context drawing onto `surface` must have been dropped.
pub fn rgba_from_surface(surface: &mut cairo::ImageSurface) -> Result<RgbaImage, RenderError> {
    surface.flush();
    let width = u32::try_from(surface.width())
        .map_err(|_| RenderError::Raster("negative width".into()))?;
    let height =
        u32::try_from(surface.height()).map_err(|_| RenderError::Raster("negative height".into()))?;
    let stride = surface.stride() as usize;
    let data = surface.data()?;

    let mut raster = RgbaImage::new(width, height);
    for (x, y, pixel) in raster.enumerate_pixels_mut() {
        let offset = y as usize * stride + x as usize * 4;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&data[offset..offset + 4]);
        let [a, r, g, b] = u32::from_ne_bytes(bytes).to_be_bytes();
        let unpremultiply = |c: u8| {
            if a == 0 {
                0
            } else {
                ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
            }
        };
        *pixel = Rgba([unpremultiply(r), unpremultiply(g), unpremultiply(b), a]);
    }
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_pixels_survive_the_round_trip() {
        let mut raster = RgbaImage::new(3, 2);
        raster.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        raster.put_pixel(1, 0, Rgba([0, 128, 0, 255]));
        raster.put_pixel(2, 1, Rgba([12, 34, 56, 255]));

        let mut surface = surface_from_rgba(&raster).unwrap();
        let back = rgba_from_surface(&mut surface).unwrap();
        assert_eq!(back, raster);
    }

    #[test]
    fn transparent_pixels_read_back_as_zero() {
        let raster = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 0]));
        let mut surface = surface_from_rgba(&raster).unwrap();
        let back = rgba_from_surface(&mut surface).unwrap();
        assert_eq!(back.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }
}
