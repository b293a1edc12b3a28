use crate::ascii::CharacterGrid;
use crate::buffer::{GradientField, PixelBuffer};
use crate::error::RenderError;
use crate::filters::{difference_of_gaussians, sobel_at, sobel_gradient};
use crate::lut::get_edge_char;

/// Sigma of the narrow Gaussian in contour mode
pub const DOG_SIGMA1: f64 = 0.5;
/// Sigma of the wide Gaussian in contour mode
pub const DOG_SIGMA2: f64 = 1.0;
/// Kernel side length of both contour-mode Gaussians
pub const DOG_KERNEL_SIZE: usize = 3;

/// Normalization constant of the binary Sobel detector
///
/// Approximately 4·255·√2. Thresholds are calibrated against this exact
/// value, so it is not recomputed.
pub const SOBEL_MAX_MAGNITUDE: f64 = 1442.0;

/// Tone written for edge cells in binary Sobel mode
pub const EDGE_TONE: f64 = 0.0;
/// Tone written for cells without an edge in binary Sobel mode
pub const NO_EDGE_TONE: f64 = 255.0;

/// Orientation bins shared by non-maximum suppression and glyph selection
///
/// Discriminants index [`crate::lut::EDGE_CHARS`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal = 0,  // [0, 22.5) and [157.5, 180]
    Diagonal45 = 1,  // [22.5, 67.5)
    Vertical = 2,    // [67.5, 112.5)
    Diagonal135 = 3, // [112.5, 157.5)
}

impl Orientation {
    /// Classify an angle in degrees into one of the four bins
    ///
    /// Angles outside [0, 180] fall back to horizontal.
    pub fn from_degrees(theta: f64) -> Self {
        if (0.0..22.5).contains(&theta) || (157.5..=180.0).contains(&theta) {
            Orientation::Horizontal
        } else if (22.5..67.5).contains(&theta) {
            Orientation::Diagonal45
        } else if (67.5..112.5).contains(&theta) {
            Orientation::Vertical
        } else if (112.5..157.5).contains(&theta) {
            Orientation::Diagonal135
        } else {
            Orientation::Horizontal
        }
    }

    /// The two neighbour offsets compared during suppression
    fn neighbours(self) -> [(isize, isize); 2] {
        match self {
            Orientation::Horizontal => [(-1, 0), (1, 0)],
            Orientation::Diagonal45 => [(1, -1), (-1, 1)],
            Orientation::Vertical => [(0, -1), (0, 1)],
            Orientation::Diagonal135 => [(-1, -1), (1, 1)],
        }
    }
}

/// Thin a gradient field with non-maximum suppression
///
/// An interior cell keeps its magnitude only if it is >= both neighbours
/// along its orientation bin, otherwise it becomes 0. Border cells are 0.
/// Every output cell is either 0 or the unchanged input magnitude.
pub fn non_max_suppression(gradient: &GradientField) -> PixelBuffer {
    let (width, height) = (gradient.width(), gradient.height());
    let mag = &gradient.magnitude;
    let mut suppressed = PixelBuffer::zeros(width, height);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let current = mag.get(x, y);
            let orientation = Orientation::from_degrees(gradient.angle.get(x, y));
            let is_max = orientation.neighbours().iter().all(|&(dx, dy)| {
                let nx = (x as isize + dx) as usize;
                let ny = (y as isize + dy) as usize;
                current >= mag.get(nx, ny)
            });
            if is_max {
                suppressed.set(x, y, current);
            }
        }
    }

    suppressed
}

/// Binary Sobel edge detection on a tone field
///
/// For interior cells the gradient magnitude is normalized by
/// [`SOBEL_MAX_MAGNITUDE`] to [0, 255]; cells above `threshold` become
/// [`EDGE_TONE`], all others (border included) [`NO_EDGE_TONE`].
///
/// # Arguments
/// * `tone` - Tone-mapped field in [0, 255]
/// * `threshold` - Normalized magnitude a cell must exceed to count as edge
///
/// # Returns
/// Field containing only 0 and 255
pub fn binary_edges(tone: &PixelBuffer, threshold: f64) -> PixelBuffer {
    let (width, height) = (tone.width(), tone.height());
    let mut edges = PixelBuffer::filled(width, height, NO_EDGE_TONE);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (gx, gy) = sobel_at(tone, x, y);
            let magnitude = (gx * gx + gy * gy).sqrt();
            let normalized = (magnitude / SOBEL_MAX_MAGNITUDE) * 255.0;
            if normalized > threshold {
                edges.set(x, y, EDGE_TONE);
            }
        }
    }

    edges
}

/// Glyph for a cell that passed the contour threshold
///
/// The gradient angle is rotated by 90° so the glyph follows the edge
/// rather than the gradient.
pub fn contour_glyph(gradient_angle: f64) -> char {
    let edge_angle = (gradient_angle + 90.0) % 180.0;
    get_edge_char(Orientation::from_degrees(edge_angle))
}

/// Render directional contours from a tone field
///
/// 1. Difference of Gaussians with [`DOG_SIGMA1`] and [`DOG_SIGMA2`]
/// 2. Sobel gradient of the DoG field
/// 3. Non-maximum suppression
/// 4. Cells with suppressed magnitude above `threshold` get a directional
///    glyph, everything else a space
///
/// # Errors
/// Only if the fixed kernel constants were invalid, which they are not.
pub fn detect_contours(tone: &PixelBuffer, threshold: f64) -> Result<CharacterGrid, RenderError> {
    let dog = difference_of_gaussians(tone, DOG_SIGMA1, DOG_SIGMA2, DOG_KERNEL_SIZE)?;
    log::trace!("contours: difference of gaussians done");
    let gradient = sobel_gradient(&dog);
    let suppressed = non_max_suppression(&gradient);
    log::trace!("contours: non-maximum suppression done");

    Ok(CharacterGrid::from_fn(tone.width(), tone.height(), |x, y| {
        if suppressed.get(x, y) > threshold {
            contour_glyph(gradient.angle.get(x, y))
        } else {
            ' '
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize, lo: f64, hi: f64) -> PixelBuffer {
        let (a, b) = (size / 4, size - size / 4);
        PixelBuffer::from_fn(size, size, |x, y| {
            if (a..b).contains(&x) && (a..b).contains(&y) {
                hi
            } else {
                lo
            }
        })
    }

    #[test]
    fn test_orientation_bins() {
        assert_eq!(Orientation::from_degrees(0.0), Orientation::Horizontal);
        assert_eq!(Orientation::from_degrees(22.4), Orientation::Horizontal);
        assert_eq!(Orientation::from_degrees(22.5), Orientation::Diagonal45);
        assert_eq!(Orientation::from_degrees(67.5), Orientation::Vertical);
        assert_eq!(Orientation::from_degrees(112.5), Orientation::Diagonal135);
        assert_eq!(Orientation::from_degrees(157.5), Orientation::Horizontal);
        assert_eq!(Orientation::from_degrees(180.0), Orientation::Horizontal);
    }

    #[test]
    fn test_contour_glyph_rotates_gradient() {
        // Horizontal gradient (vertical edge) draws '|'.
        assert_eq!(contour_glyph(0.0), '|');
        // Vertical gradient (horizontal edge) draws '-'.
        assert_eq!(contour_glyph(90.0), '-');
        assert_eq!(contour_glyph(45.0), '\\');
        assert_eq!(contour_glyph(135.0), '/');
    }

    #[test]
    fn test_nms_keeps_ridge_only() {
        // Vertical ridge of magnitude at x = 2, horizontal gradient direction.
        let mut gradient = GradientField::zeros(5, 3);
        for (x, m) in [(1, 5.0), (2, 9.0), (3, 4.0)] {
            gradient.magnitude.set(x, 1, m);
        }
        let suppressed = non_max_suppression(&gradient);
        assert_eq!(suppressed.get(2, 1), 9.0);
        assert_eq!(suppressed.get(1, 1), 0.0);
        assert_eq!(suppressed.get(3, 1), 0.0);
    }

    #[test]
    fn test_nms_ties_are_kept() {
        let mut gradient = GradientField::zeros(5, 3);
        for x in 1..4 {
            gradient.magnitude.set(x, 1, 3.0);
        }
        let suppressed = non_max_suppression(&gradient);
        assert_eq!(suppressed.get(2, 1), 3.0);
    }

    #[test]
    fn test_nms_only_zero_or_original() {
        let mut rng = fastrand::Rng::with_seed(3);
        let data = (0..16 * 12).map(|_| rng.f64() * 255.0).collect();
        let field = PixelBuffer::from_vec(16, 12, data).unwrap();
        let gradient = sobel_gradient(&field);
        let suppressed = non_max_suppression(&gradient);

        for (s, m) in suppressed
            .as_slice()
            .iter()
            .zip(gradient.magnitude.as_slice())
        {
            assert!(*s == 0.0 || s == m);
        }
    }

    #[test]
    fn test_nms_border_is_zero() {
        let gradient = GradientField {
            magnitude: PixelBuffer::filled(4, 4, 10.0),
            angle: PixelBuffer::zeros(4, 4),
        };
        let suppressed = non_max_suppression(&gradient);
        for i in 0..4 {
            assert_eq!(suppressed.get(i, 0), 0.0);
            assert_eq!(suppressed.get(0, i), 0.0);
            assert_eq!(suppressed.get(i, 3), 0.0);
            assert_eq!(suppressed.get(3, i), 0.0);
        }
        assert_eq!(suppressed.get(1, 1), 10.0);
    }

    #[test]
    fn test_binary_edges_uniform_has_no_edges() {
        let tone = PixelBuffer::filled(8, 6, 77.0);
        for threshold in [0.0, 1.0, 100.0] {
            let edges = binary_edges(&tone, threshold);
            assert!(edges.as_slice().iter().all(|&v| v == NO_EDGE_TONE));
        }
    }

    #[test]
    fn test_binary_edges_step() {
        let tone = PixelBuffer::from_fn(6, 4, |x, _| if x < 3 { 0.0 } else { 255.0 });
        let edges = binary_edges(&tone, 100.0);
        // 1020 / 1442 * 255 ≈ 180 > 100
        assert_eq!(edges.get(2, 1), EDGE_TONE);
        assert_eq!(edges.get(3, 1), EDGE_TONE);
        assert_eq!(edges.get(1, 1), NO_EDGE_TONE);
        // Border row is never an edge.
        assert_eq!(edges.get(2, 0), NO_EDGE_TONE);

        let edges = binary_edges(&tone, 200.0);
        assert_eq!(edges.get(2, 1), NO_EDGE_TONE);
    }

    #[test]
    fn test_binary_edges_tiny_field() {
        let tone = PixelBuffer::from_fn(2, 5, |x, _| x as f64 * 255.0);
        let edges = binary_edges(&tone, 0.0);
        assert!(edges.as_slice().iter().all(|&v| v == NO_EDGE_TONE));
    }

    #[test]
    fn test_contours_uniform_black_is_blank() {
        let tone = PixelBuffer::zeros(10, 7);
        let grid = detect_contours(&tone, 0.0).unwrap();
        assert_eq!(grid.height(), 7);
        assert!(grid.lines().iter().all(|line| line.chars().all(|c| c == ' ')));
    }

    #[test]
    fn test_contours_uniform_grey_zero_padding_ring() {
        // Zero padding makes the DoG non-zero along the border, which shows
        // up as a ring one cell inside the frame (~85.8, ~109.8 at corners).
        let tone = PixelBuffer::filled(10, 7, 128.0);

        let grid = detect_contours(&tone, 0.0).unwrap();
        assert_eq!(grid.line(3).chars().nth(1), Some('|'));
        assert_eq!(grid.line(1).chars().nth(4), Some('-'));
        assert_eq!(grid.line(3).chars().nth(4), Some(' '));
        assert_eq!(grid.line(0), " ".repeat(10));

        let grid = detect_contours(&tone, 120.0).unwrap();
        assert!(grid.lines().iter().all(|line| line.chars().all(|c| c == ' ')));
    }

    #[test]
    fn test_contours_square_outline() {
        let tone = square(16, 0.0, 255.0);
        let grid = detect_contours(&tone, 10.0).unwrap();
        let glyphs: String = grid.lines().concat();

        assert!(glyphs.contains('|'));
        assert!(glyphs.contains('-'));
        // Centre of the flat square carries no contour.
        assert_eq!(grid.line(8).chars().nth(8), Some(' '));
    }

    #[test]
    fn test_contours_only_edge_glyphs() {
        let tone = square(12, 30.0, 220.0);
        let grid = detect_contours(&tone, 0.0).unwrap();
        for line in grid.lines() {
            assert_eq!(line.chars().count(), 12);
            assert!(line.chars().all(|c| " -/|\\".contains(c)));
        }
    }
}
