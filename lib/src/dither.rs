//! Tone quantization and dithering
//!
//! Every strategy maps a tone in [0, 255] to a palette level. The plain
//! mapping is `round(tone / 255 · (n - 1))`. Error-diffusion strategies push
//! the quantization error into cells that have not been visited yet, so the
//! scan order (row-major) is part of the result.
//!
//! The working buffer is taken by value: it is mutated during the scan and
//! dropped with the call.

use crate::ascii::CharacterGrid;
use crate::buffer::PixelBuffer;
use crate::config::DitherAlgorithm;
use crate::error::RenderError;
use crate::lut::Palette;

/// Bayer 4x4 threshold matrix, values 0-15
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Original tone that the ignore-white rule turns into a space
pub const WHITE: f64 = 255.0;

/// Error diffusion tap: (dx, dy, fraction of the error)
pub type Tap = (isize, isize, f64);

/// Floyd–Steinberg: right 7/16, bottom-left 3/16, bottom 5/16, bottom-right 1/16
pub const FLOYD_STEINBERG: [Tap; 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Atkinson: 1/8 to six neighbours, 2/8 of the error is dropped
pub const ATKINSON: [Tap; 6] = [
    (1, 0, 1.0 / 8.0),
    (2, 0, 1.0 / 8.0),
    (-1, 1, 1.0 / 8.0),
    (0, 1, 1.0 / 8.0),
    (1, 1, 1.0 / 8.0),
    (0, 2, 1.0 / 8.0),
];

/// Plain quantization level for a tone
///
/// With a single level the result is always 0.
#[inline]
pub fn quantize_level(tone: f64, levels: usize) -> usize {
    if levels <= 1 {
        return 0;
    }
    let max_level = levels - 1;
    let level = ((tone / 255.0) * max_level as f64).round();
    (level.max(0.0) as usize).min(max_level)
}

/// Tone a level stands for (inverse of [`quantize_level`])
#[inline]
pub fn reconstruct(level: usize, levels: usize) -> f64 {
    if levels <= 1 {
        return 0.0;
    }
    (level as f64 / (levels - 1) as f64) * 255.0
}

/// Ordered (Bayer 4x4) level for a tone at grid position `(x, y)`
///
/// threshold t = (bayer[y % 4][x % 4] + 0.5) / 16, then
/// level = floor(clamp(tone/255 + t - 0.5, 0, 1) · n), capped at n - 1.
pub fn ordered_level(tone: f64, x: usize, y: usize, levels: usize) -> usize {
    if levels <= 1 {
        return 0;
    }
    let p = tone / 255.0;
    let t = (f64::from(BAYER_4X4[y % 4][x % 4]) + 0.5) / 16.0;
    let value = (p + t - 0.5).clamp(0.0, 1.0);
    let level = (value * levels as f64).floor() as usize;
    level.min(levels - 1)
}

/// Spread `error` from `(x, y)` to the in-bounds taps, clamping to [0, 255]
fn diffuse(buffer: &mut PixelBuffer, x: usize, y: usize, error: f64, taps: &[Tap]) {
    for &(dx, dy, weight) in taps {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if let Some(value) = buffer.get_checked(nx, ny) {
            buffer.set(
                nx as usize,
                ny as usize,
                (value + error * weight).clamp(0.0, 255.0),
            );
        }
    }
}

/// Quantize a tone field into glyphs
///
/// # Arguments
/// * `working` - Tone field to quantize; consumed, diffusion writes into it
/// * `original` - Tone before any edge override or diffusion, used by the
///   ignore-white rule
/// * `palette` - Target glyphs
/// * `strategy` - `None` for plain quantization
/// * `ignore_white` - Emit a space wherever `original` is exactly 255
/// * `rng` - Noise source, only read by [`DitherAlgorithm::Noise`]
///
/// # Errors
/// [`RenderError::FieldSizeMismatch`] if `working` and `original` differ in
/// size.
pub fn quantize(
    mut working: PixelBuffer,
    original: &PixelBuffer,
    palette: &Palette,
    strategy: Option<DitherAlgorithm>,
    ignore_white: bool,
    rng: &mut fastrand::Rng,
) -> Result<CharacterGrid, RenderError> {
    original.check_same_size(&working)?;

    let levels = palette.levels();
    let (width, height) = (working.width(), working.height());
    let noise_amplitude = 255.0 / levels as f64;

    Ok(CharacterGrid::from_fn(width, height, |x, y| {
        if ignore_white && original.get(x, y) == WHITE {
            return ' ';
        }

        let tone = working.get(x, y);
        let level = match strategy {
            None => quantize_level(tone, levels),
            Some(DitherAlgorithm::Floyd) => {
                let level = quantize_level(tone, levels);
                if levels > 1 {
                    let error = tone - reconstruct(level, levels);
                    diffuse(&mut working, x, y, error, &FLOYD_STEINBERG);
                }
                level
            }
            Some(DitherAlgorithm::Atkinson) => {
                let level = quantize_level(tone, levels);
                if levels > 1 {
                    let error = tone - reconstruct(level, levels);
                    diffuse(&mut working, x, y, error, &ATKINSON);
                }
                level
            }
            Some(DitherAlgorithm::Noise) => {
                let noise = (rng.f64() - 0.5) * noise_amplitude;
                quantize_level((tone + noise).clamp(0.0, 255.0), levels)
            }
            Some(DitherAlgorithm::Ordered) => ordered_level(tone, x, y, levels),
        };

        palette.glyph(level)
    }))
}
