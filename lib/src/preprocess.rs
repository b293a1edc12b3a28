//! Resizing and optional pre-blur ahead of [`render`](crate::render)
//!
//! The renderer expects one pixel per cell. These helpers shrink a decoded
//! image to the grid size, correcting for glyphs being taller than wide.

use crate::error::RenderError;
use image::{RgbaImage, imageops};
use imageproc::filter::gaussian_blur_f32;

/// Width / height of a monospace glyph cell
pub const FONT_ASPECT_RATIO: f64 = 0.55;

/// Row count that keeps the source aspect ratio at `ascii_width` columns
///
/// Never returns less than 1.
pub fn grid_height(src_width: u32, src_height: u32, ascii_width: u32) -> u32 {
    if src_width == 0 {
        return 1;
    }
    let rows = (f64::from(src_height) / f64::from(src_width)
        * f64::from(ascii_width)
        * FONT_ASPECT_RATIO)
        .round();
    (rows as u32).max(1)
}

/// Resize `input` to `ascii_width` × [`grid_height`] and blur it
///
/// # Arguments
/// * `input` - Decoded source image
/// * `ascii_width` - Target column count
/// * `blur` - Gaussian blur sigma in output pixels, 0 disables it
///
/// # Errors
/// Rejects a zero `ascii_width`, an empty source image or a negative or
/// non-finite `blur`.
pub fn prepare(input: &RgbaImage, ascii_width: u32, blur: f32) -> Result<RgbaImage, RenderError> {
    if ascii_width == 0 {
        return Err(RenderError::InvalidConfig(
            "ascii_width must be at least 1".to_string(),
        ));
    }
    if !blur.is_finite() || blur < 0.0 {
        return Err(RenderError::InvalidConfig(format!(
            "blur must be finite and >= 0, got {}",
            blur
        )));
    }

    let (src_width, src_height) = input.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(RenderError::InvalidConfig(format!(
            "source image is empty ({}x{})",
            src_width, src_height
        )));
    }

    let height = grid_height(src_width, src_height, ascii_width);
    log::debug!(
        "resizing {}x{} to {}x{} (blur {})",
        src_width,
        src_height,
        ascii_width,
        height,
        blur
    );

    let resized = imageops::resize(input, ascii_width, height, imageops::FilterType::Triangle);
    if blur > 0.0 {
        Ok(gaussian_blur_f32(&resized, blur))
    } else {
        Ok(resized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_grid_height() {
        // 200x100 at 100 columns: 100/200 * 100 * 0.55 = 27.5 -> 28
        assert_eq!(grid_height(200, 100, 100), 28);
        assert_eq!(grid_height(100, 100, 100), 55);
        assert_eq!(grid_height(1000, 10, 10), 1);
        assert_eq!(grid_height(0, 10, 10), 1);
    }

    #[test]
    fn test_prepare_dimensions() {
        let img = RgbaImage::new(64, 32);
        let out = prepare(&img, 20, 0.0).unwrap();
        assert_eq!(out.dimensions(), (20, 6));
    }

    #[test]
    fn test_prepare_blur_keeps_uniform_image() {
        let img = RgbaImage::from_pixel(40, 40, Rgba([90, 90, 90, 255]));
        let out = prepare(&img, 10, 1.5).unwrap();
        assert_eq!(out.dimensions(), (10, 6));
        for pixel in out.pixels() {
            assert!((i32::from(pixel[0]) - 90).abs() <= 1);
        }
    }

    #[test]
    fn test_prepare_blur_softens_step() {
        let img = RgbaImage::from_fn(20, 40, |x, _| {
            if x < 10 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let sharp = prepare(&img, 20, 0.0).unwrap();
        let soft = prepare(&img, 20, 2.0).unwrap();
        assert_eq!(sharp.get_pixel(9, 5)[0], 0);
        assert!(soft.get_pixel(9, 5)[0] > 0);
    }

    #[test]
    fn test_prepare_rejects_bad_input() {
        let img = RgbaImage::new(8, 8);
        assert!(prepare(&img, 0, 0.0).is_err());
        assert!(prepare(&img, 4, -1.0).is_err());
        assert!(prepare(&img, 4, f32::NAN).is_err());
        assert!(prepare(&RgbaImage::new(0, 0), 4, 0.0).is_err());
    }
}
