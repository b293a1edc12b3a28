use crate::buffer::{GradientField, PixelBuffer};
use crate::config::RenderConfig;
use crate::error::RenderError;
use image::RgbaImage;
use std::f64::consts::PI;

/// Sobel kernels
/// Gx (horizontal):     Gy (vertical):
/// [-1  0  1]           [-1 -2 -1]
/// [-2  0  2]           [ 0  0  0]
/// [-1  0  1]           [ 1  2  1]
pub const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
pub const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Calculate luminance from 8-bit RGB using the BT.601 weights
///
/// Formula: L = 0.299*R + 0.587*G + 0.114*B
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// Multiplicative contrast factor for a contrast setting
///
/// Formula: 259 * (c + 255) / (255 * (259 - c))
/// A contrast of 0 yields exactly 1.0.
pub fn contrast_factor(contrast: f64) -> f64 {
    (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}

/// Map one luminance value through invert, contrast and brightness
///
/// # Arguments
/// * `lum` - Luminance in [0, 255]
/// * `factor` - Result of [`contrast_factor`]
/// * `brightness` - Additive offset
/// * `invert` - Flip luminance before contrast
///
/// # Returns
/// Adjusted tone clamped to [0, 255]
pub fn adjust_tone(lum: f64, factor: f64, brightness: f64, invert: bool) -> f64 {
    let lum = if invert { 255.0 - lum } else { lum };
    (factor * (lum - 128.0) + 128.0 + brightness).clamp(0.0, 255.0)
}

/// Convert an RGBA image into a tone-mapped field
///
/// Alpha is ignored. Brightness, contrast and invert are taken from `config`.
///
/// # Returns
/// One tone value in [0, 255] per pixel
pub fn tone_map(img: &RgbaImage, config: &RenderConfig) -> PixelBuffer {
    let (width, height) = img.dimensions();
    let factor = contrast_factor(config.contrast);

    PixelBuffer::from_fn(width as usize, height as usize, |x, y| {
        let pixel = img.get_pixel(x as u32, y as u32);
        let lum = luminance(pixel[0], pixel[1], pixel[2]);
        adjust_tone(lum, factor, config.brightness, config.invert)
    })
}

/// Square convolution kernel with odd side length and weights summing to 1
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a normalized 2D Gaussian kernel
    ///
    /// Formula: w(x, y) = exp(-(x² + y²) / (2σ²)) for x, y in [-half, half],
    /// then every weight is divided by the total.
    ///
    /// # Errors
    /// [`RenderError::InvalidSigma`] for non-positive or non-finite sigma,
    /// [`RenderError::InvalidKernelSize`] for even or zero size.
    pub fn gaussian(sigma: f64, size: usize) -> Result<Self, RenderError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(RenderError::InvalidSigma(sigma));
        }
        if size == 0 || size % 2 == 0 {
            return Err(RenderError::InvalidKernelSize(size));
        }

        let half = (size / 2) as i64;
        let mut weights = Vec::with_capacity(size * size);
        let mut sum = 0.0;
        for y in -half..=half {
            for x in -half..=half {
                let value = (-((x * x + y * y) as f64) / (2.0 * sigma * sigma)).exp();
                weights.push(value);
                sum += value;
            }
        }
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self { size, weights })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at row `ky`, column `kx`.
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f64 {
        self.weights[ky * self.size + kx]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Convolve a field with a square kernel
///
/// Samples outside the field count as 0 (zero padding), which darkens
/// values near the border. Output has the same dimensions as the input.
pub fn convolve(field: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let size = kernel.size();
    let half = (size / 2) as isize;

    PixelBuffer::from_fn(field.width(), field.height(), |x, y| {
        let mut sum = 0.0;
        for ky in 0..size {
            for kx in 0..size {
                let yy = y as isize + ky as isize - half;
                let xx = x as isize + kx as isize - half;
                let pixel = field.get_checked(xx, yy).unwrap_or(0.0);
                sum += pixel * kernel.weight(kx, ky);
            }
        }
        sum
    })
}

/// Compute the Difference of Gaussians of a field
///
/// DoG = blur(sigma1) - blur(sigma2), both blurs with the same kernel size.
///
/// # Errors
/// Propagates kernel construction errors.
pub fn difference_of_gaussians(
    field: &PixelBuffer,
    sigma1: f64,
    sigma2: f64,
    kernel_size: usize,
) -> Result<PixelBuffer, RenderError> {
    let kernel1 = Kernel::gaussian(sigma1, kernel_size)?;
    let kernel2 = Kernel::gaussian(sigma2, kernel_size)?;

    let blurred1 = convolve(field, &kernel1);
    let blurred2 = convolve(field, &kernel2);

    blurred1.zip_map(&blurred2, |a, b| a - b)
}

/// Sobel responses (Gx, Gy) at an interior cell
///
/// The caller guarantees `1 <= x < width - 1` and `1 <= y < height - 1`.
#[inline]
pub fn sobel_at(field: &PixelBuffer, x: usize, y: usize) -> (f64, f64) {
    let mut gx = 0.0;
    let mut gy = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            let pixel = field.get(x + kx - 1, y + ky - 1);
            gx += pixel * SOBEL_X[ky][kx];
            gy += pixel * SOBEL_Y[ky][kx];
        }
    }
    (gx, gy)
}

/// Fold an `atan2` result in degrees into [0, 180)
#[inline]
pub fn fold_angle(degrees: f64) -> f64 {
    let mut theta = degrees;
    if theta < 0.0 {
        theta += 180.0;
    }
    if theta >= 180.0 {
        theta -= 180.0;
    }
    theta
}

/// Apply the Sobel operator to get gradient magnitude and direction
///
/// Border cells (1 pixel) keep magnitude 0 and angle 0.
///
/// # Returns
/// GradientField with magnitude = sqrt(Gx² + Gy²) and
/// angle = atan2(Gy, Gx) in degrees folded into [0, 180)
pub fn sobel_gradient(field: &PixelBuffer) -> GradientField {
    let (width, height) = (field.width(), field.height());
    let mut gradient = GradientField::zeros(width, height);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (gx, gy) = sobel_at(field, x, y);
            gradient.magnitude.set(x, y, (gx * gx + gy * gy).sqrt());
            gradient.angle.set(x, y, fold_angle(gy.atan2(gx) * (180.0 / PI)));
        }
    }

    gradient
}
