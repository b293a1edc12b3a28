use std::path::PathBuf;

use ascii_grid::{Charset, DitherAlgorithm, EdgeMethod, RenderConfig};
use clap::Parser;

/// ascii-grid - convert an image into a grid of characters.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image to convert (any format the `image` crate decodes).
    pub input: PathBuf,

    /// Output column count.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Additive tone offset.
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<f64>,

    /// Contrast, -255 to 255.
    #[arg(long, allow_hyphen_values = true)]
    pub contrast: Option<f64>,

    /// Gaussian pre-blur sigma in output cells, 0 disables it.
    #[arg(long, default_value_t = 0.0)]
    pub blur: f32,

    /// Flip luminance before contrast.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Render pure white cells with the palette instead of a space.
    #[arg(long, default_value_t = false)]
    pub keep_white: bool,

    /// Plain quantization without dithering.
    #[arg(long, default_value_t = false, conflicts_with = "dither")]
    pub no_dither: bool,

    /// Dithering strategy: floyd, atkinson, noise, ordered.
    #[arg(long)]
    pub dither: Option<DitherAlgorithm>,

    /// Palette: standard, blocks, binary, manual, hex, detailed.
    #[arg(long)]
    pub charset: Option<Charset>,

    /// Character for the manual charset.
    #[arg(long)]
    pub manual_char: Option<String>,

    /// Edge mode: none, sobel, dog.
    #[arg(long)]
    pub edge: Option<EdgeMethod>,

    /// Threshold for sobel mode.
    #[arg(long)]
    pub edge_threshold: Option<i32>,

    /// Threshold for dog mode.
    #[arg(long)]
    pub dog_threshold: Option<i32>,

    /// Seed for noise dithering.
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML file with render settings. Flags override it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the grid to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply every flag that was given on top of `config`.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.ascii_width = width;
        }
        if let Some(brightness) = self.brightness {
            config.brightness = brightness;
        }
        if let Some(contrast) = self.contrast {
            config.contrast = contrast;
        }
        if self.invert {
            config.invert = true;
        }
        if self.keep_white {
            config.ignore_white = false;
        }
        if self.no_dither {
            config.dithering_enabled = false;
        }
        if let Some(algorithm) = self.dither {
            config.dithering_enabled = true;
            config.dither_algorithm = algorithm;
        }
        if let Some(charset) = self.charset {
            config.charset = charset;
        }
        if let Some(ref ch) = self.manual_char {
            config.manual_char = ch.clone();
        }
        if let Some(edge) = self.edge {
            config.edge_method = edge;
        }
        if let Some(threshold) = self.edge_threshold {
            config.edge_threshold = threshold;
        }
        if let Some(threshold) = self.dog_threshold {
            config.dog_edge_threshold = threshold;
        }
        if let Some(seed) = self.seed {
            config.noise_seed = Some(seed);
        }
    }
}
