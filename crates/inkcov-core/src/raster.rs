//! Page raster representation handed over by the rendering collaborator.

use image::{Rgb, RgbImage};

use crate::error::{AnalysisError, Result};

/// One rendered page as a row-major grid of 8-bit RGB triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Pixel data, `width × height` entries, row-major.
    pub pixels: Vec<[u8; 3]>,
}

impl Raster {
    /// Wrap an existing pixel buffer, checking that its length matches the
    /// declared dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(AnalysisError::InvalidRaster {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// A raster with every pixel set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb; width as usize * height as usize],
        }
    }

    /// Copy an `image` crate RGB buffer into a raster.
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let pixels = image.pixels().map(|px| px.0).collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// Copy the raster into an `image` crate RGB buffer for re-rendering.
    /// Pixels missing from a short buffer come out as paper white.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let idx = y as usize * self.width as usize + x as usize;
            Rgb(self.pixels.get(idx).copied().unwrap_or([255, 255, 255]))
        })
    }
}

impl From<&RgbImage> for Raster {
    fn from(image: &RgbImage) -> Self {
        Self::from_rgb_image(image)
    }
}
