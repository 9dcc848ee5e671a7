use std::path::Path;

use image::RgbaImage;

use crate::error::{Result, WeedCountError};
use crate::geometry::Size;

/// A photograph handed over by the capture flow. Immutable once created.
#[derive(Clone, Debug)]
pub struct CapturedImage {
    rgba: RgbaImage,
}

impl CapturedImage {
    /// Decode a photo from disk, converting it to 8-bit RGBA.
    pub fn open(path: &Path) -> Result<Self> {
        let rgba = image::open(path)?.to_rgba8();
        Self::from_rgba_image(rgba)
    }

    /// Wrap raw RGBA8 pixels (row-major, 4 bytes per pixel).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let rgba = RgbaImage::from_raw(width, height, pixels)
            .ok_or(WeedCountError::InvalidDimensions { width, height })?;
        Self::from_rgba_image(rgba)
    }

    pub fn from_rgba_image(rgba: RgbaImage) -> Result<Self> {
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(WeedCountError::InvalidDimensions { width, height });
        }
        Ok(Self { rgba })
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    pub fn rgba(&self) -> &[u8] {
        self.rgba.as_raw()
    }
}

/// Read just the pixel dimensions of an image file.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    let (width, height) = image::image_dimensions(path)?;
    if width == 0 || height == 0 {
        return Err(WeedCountError::InvalidDimensions { width, height });
    }
    Ok((width, height))
}
