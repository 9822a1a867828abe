//! Colour to greyscale conversion.

use image::DynamicImage;
use spotcount_core::Raster;

/// Red channel weight.
pub const RED_WEIGHT: f64 = 0.299;
/// Green channel weight.
pub const GREEN_WEIGHT: f64 = 0.587;
/// Blue channel weight.
pub const BLUE_WEIGHT: f64 = 0.114;

/// Weighted luma of an RGB triple, before truncation.
#[inline]
#[must_use]
pub fn luma(red: u8, green: u8, blue: u8) -> f64 {
    f64::from(red) * RED_WEIGHT + f64::from(green) * GREEN_WEIGHT + f64::from(blue) * BLUE_WEIGHT
}

/// Converts a decoded image to a single-channel raster.
///
/// The weighted average is truncated toward zero. Alpha is ignored.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_greyscale(image: &DynamicImage) -> Raster {
    let rgb = image.to_rgb8();
    let width = rgb.width() as usize;
    Raster::from_fn(width, rgb.height() as usize, |x, y| {
        let [r, g, b] = rgb.get_pixel(x as u32, y as u32).0;
        luma(r, g, b) as u8
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_luma_weights() {
        assert_relative_eq!(luma(255, 255, 255), 255.0, epsilon = 1e-9);
        assert_relative_eq!(luma(100, 0, 0), 29.9, epsilon = 1e-9);
        assert_relative_eq!(luma(0, 0, 200), 22.8, epsilon = 1e-9);
    }

    #[test]
    fn test_to_greyscale_truncates() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        let raster = to_greyscale(&DynamicImage::ImageRgb8(img));
        // 2.99 + 11.74 + 3.42 = 18.15
        assert_eq!(raster.get(0, 0), 18);
        assert_eq!(raster.get(1, 0), 255);
    }
}
