use crate::ascii::CharacterGrid;
use crate::config::{DitherAlgorithm, EdgeMethod, RenderConfig};
use crate::dither::quantize;
use crate::edges::{binary_edges, detect_contours};
use crate::error::RenderError;
use crate::filters::tone_map;
use image::RgbaImage;

/// The three mutually exclusive render strategies
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RenderMode {
    /// Tone quantization, dithered with the given strategy when `Some`
    Plain(Option<DitherAlgorithm>),
    /// Binary Sobel edges, quantized without dithering
    Sobel { threshold: i32 },
    /// DoG contours with directional glyphs
    Contour { threshold: i32 },
}

impl RenderMode {
    pub fn from_config(config: &RenderConfig) -> Self {
        match config.edge_method {
            EdgeMethod::None => {
                RenderMode::Plain(config.dithering_enabled.then_some(config.dither_algorithm))
            }
            EdgeMethod::Sobel => RenderMode::Sobel {
                threshold: config.edge_threshold,
            },
            EdgeMethod::Dog => RenderMode::Contour {
                threshold: config.dog_edge_threshold,
            },
        }
    }
}

/// Converts a pre-resized image into a character grid
///
/// Pipeline:
/// 1. Validate the config and check the image is `ascii_width` wide
/// 2. Tone-map every pixel (luminance, invert, contrast, brightness)
/// 3. Run the mode selected by [`RenderMode::from_config`]
///
/// # Arguments
/// * `pixels` - RGBA samples, one per output cell
/// * `config` - Render parameters; never modified
///
/// # Returns
/// A grid with one line per pixel row and `ascii_width` glyphs per line
///
/// # Note
/// The noise strategy draws from `config.noise_seed` when set, otherwise
/// from a freshly seeded generator, so its output varies between calls.
pub fn render(pixels: &RgbaImage, config: &RenderConfig) -> Result<CharacterGrid, RenderError> {
    let mut rng = config
        .noise_seed
        .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    render_with_rng(pixels, config, &mut rng)
}

/// Same as [`render`] but with a caller-owned noise source
pub fn render_with_rng(
    pixels: &RgbaImage,
    config: &RenderConfig,
    rng: &mut fastrand::Rng,
) -> Result<CharacterGrid, RenderError> {
    config.validate()?;

    let (width, height) = pixels.dimensions();
    if width != config.ascii_width {
        return Err(RenderError::DimensionMismatch {
            expected: config.ascii_width,
            actual: width,
        });
    }

    let mode = RenderMode::from_config(config);
    log::debug!("rendering {}x{} cells in {:?} mode", width, height, mode);

    let tone = tone_map(pixels, config);
    let palette = config.palette();
    log::trace!("palette has {} levels", palette.levels());

    let grid = match mode {
        RenderMode::Plain(strategy) => quantize(
            tone.clone(),
            &tone,
            &palette,
            strategy,
            config.ignore_white,
            rng,
        )?,
        RenderMode::Sobel { threshold } => {
            let edges = binary_edges(&tone, f64::from(threshold));
            quantize(edges, &tone, &palette, None, config.ignore_white, rng)?
        }
        RenderMode::Contour { threshold } => detect_contours(&tone, f64::from(threshold))?,
    };

    Ok(grid)
}
