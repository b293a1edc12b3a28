//! Scalar fields owned by a single render.
//!
//! A [`PixelBuffer`] holds one `f64` per grid cell in row-major order. Tone
//! values live in [0, 255] once mapped, but the same type carries blurred
//! fields, DoG differences (which go negative) and gradient magnitudes.

use crate::error::RenderError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Dense row-major 2D field of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single value.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Create a zero-filled buffer.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Wrap existing row-major samples. Returns `None` if the length does not
    /// match `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every cell.
    ///
    /// With the `parallel` feature, rows are evaluated on the rayon pool.
    /// Each cell is computed independently, so both paths produce identical
    /// output.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let mut out = Self::zeros(width, height);
        if width == 0 || height == 0 {
            return out;
        }

        let fill_row = |(y, row): (usize, &mut [f64])| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = f(x, y);
            }
        };

        #[cfg(feature = "parallel")]
        out.data.par_chunks_mut(width).enumerate().for_each(fill_row);
        #[cfg(not(feature = "parallel"))]
        out.data.chunks_mut(width).enumerate().for_each(fill_row);

        out
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Sample at signed coordinates, `None` outside the field.
    #[inline]
    pub fn get_checked(&self, x: isize, y: isize) -> Option<f64> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(self.get(x as usize, y as usize))
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] = value;
    }

    /// Raw row-major samples.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Combine two equally sized fields cell by cell.
    ///
    /// # Errors
    /// [`RenderError::FieldSizeMismatch`] if the dimensions differ.
    pub fn zip_map(
        &self,
        other: &PixelBuffer,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<PixelBuffer, RenderError> {
        self.check_same_size(other)?;
        Ok(PixelBuffer {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Fails unless `other` has the same width and height.
    pub fn check_same_size(&self, other: &PixelBuffer) -> Result<(), RenderError> {
        if (self.width, self.height) != (other.width, other.height) {
            return Err(RenderError::FieldSizeMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            });
        }
        Ok(())
    }
}

/// Gradient magnitude and direction, one entry per cell.
///
/// Magnitudes are never negative; angles are in degrees within [0, 180).
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    pub magnitude: PixelBuffer,
    pub angle: PixelBuffer,
}

impl GradientField {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            magnitude: PixelBuffer::zeros(width, height),
            angle: PixelBuffer::zeros(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.magnitude.width()
    }

    pub fn height(&self) -> usize {
        self.magnitude.height()
    }
}
