use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::domain::errors::DomainError;

/// How a scaled side length is rounded to whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleRounding {
    /// Used while searching for a scale that fits the budget
    Floor,
    /// Used when preparing the raster the user actually sees
    Nearest,
}

impl ScaleRounding {
    fn apply(&self, value: f64) -> u32 {
        let rounded = match self {
            ScaleRounding::Floor => value.floor(),
            ScaleRounding::Nearest => value.round(),
        };
        rounded.max(1.0) as u32
    }
}

/// Row-major RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// Wrap a raw RGBA8 buffer, checking its length against the dimensions
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DomainError> {
        let expected = width as usize * height as usize * 4;
        let actual = pixels.len();
        if expected != actual {
            return Err(DomainError::InvalidRaster {
                width,
                height,
                expected,
                actual,
            });
        }

        RgbaImage::from_raw(width, height, pixels)
            .map(|image| Self { image })
            .ok_or(DomainError::InvalidRaster {
                width,
                height,
                expected,
                actual,
            })
    }

    /// Single-colour raster, mostly useful in tests and benches
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// RGBA channels of the pixel at `(x, y)`; callers stay in bounds
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.image.put_pixel(x, y, Rgba(rgba));
    }

    /// A pixel is visible when its alpha is strictly above the cutoff
    #[inline]
    pub fn is_visible(&self, x: u32, y: u32, alpha_cutoff: u8) -> bool {
        self.pixel(x, y)[3] > alpha_cutoff
    }

    /// Clear every pixel whose alpha is at or below the cutoff
    pub fn apply_alpha_cutoff(&mut self, alpha_cutoff: u8) {
        for pixel in self.image.pixels_mut() {
            if pixel.0[3] <= alpha_cutoff {
                pixel.0 = [0, 0, 0, 0];
            }
        }
    }

    pub fn visible_count(&self, alpha_cutoff: u8) -> usize {
        self.image
            .pixels()
            .filter(|pixel| pixel.0[3] > alpha_cutoff)
            .count()
    }

    pub fn has_visible(&self, alpha_cutoff: u8) -> bool {
        self.image.pixels().any(|pixel| pixel.0[3] > alpha_cutoff)
    }

    /// Nearest-neighbour rescale to `percent` of the original size.
    ///
    /// Each side is clamped to at least one pixel.
    pub fn scaled(&self, percent: f64, rounding: ScaleRounding) -> Raster {
        if self.is_empty() {
            return self.clone();
        }

        let factor = percent / 100.0;
        let width = rounding.apply(self.width() as f64 * factor);
        let height = rounding.apply(self.height() as f64 * factor);
        if width == self.width() && height == self.height() {
            return self.clone();
        }

        Self {
            image: imageops::resize(&self.image, width, height, FilterType::Nearest),
        }
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }
}

impl From<RgbaImage> for Raster {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Raster::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidRaster {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_pixel_is_row_major_rgba() {
        let mut pixels = vec![0; 2 * 2 * 4];
        // (1, 1) is the fourth pixel
        pixels[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let raster = Raster::new(2, 2, pixels).unwrap();
        assert_eq!(raster.pixel(1, 1), [1, 2, 3, 4]);
        assert_eq!(raster.pixel(0, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_alpha_cutoff_clears_at_or_below() {
        let mut raster = Raster::filled(3, 1, [9, 9, 9, 100]);
        raster.set_pixel(1, 0, [9, 9, 9, 101]);
        raster.apply_alpha_cutoff(100);

        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(raster.pixel(1, 0), [9, 9, 9, 101]);
        assert_eq!(raster.visible_count(100), 1);
        assert_eq!(raster.visible_count(0), 1);
    }

    #[test]
    fn test_scaled_floor_and_nearest() {
        let raster = Raster::filled(10, 5, [255, 0, 0, 255]);

        let floor = raster.scaled(55.0, ScaleRounding::Floor);
        assert_eq!((floor.width(), floor.height()), (5, 2));

        let nearest = raster.scaled(55.0, ScaleRounding::Nearest);
        assert_eq!((nearest.width(), nearest.height()), (6, 3));
        assert_eq!(nearest.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_scaled_clamps_to_one_pixel() {
        let raster = Raster::filled(10, 10, [0, 0, 0, 255]);
        let tiny = raster.scaled(1.0, ScaleRounding::Floor);
        assert_eq!((tiny.width(), tiny.height()), (1, 1));
    }

    #[test]
    fn test_has_visible() {
        assert!(!Raster::filled(2, 2, [1, 1, 1, 0]).has_visible(0));
        assert!(Raster::filled(2, 2, [1, 1, 1, 1]).has_visible(0));
    }
}
