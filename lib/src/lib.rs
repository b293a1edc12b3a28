//! ASCII Grid - image to character grid converter
//!
//! This library turns a small RGBA image, one pixel per output cell, into a
//! grid of glyphs. Three render modes are available: plain tone quantization
//! with optional dithering, binary Sobel edges, and directional contours
//! built from a Difference of Gaussians.
//!
//! # Example
//! ```no_run
//! use ascii_grid::{RenderConfig, preprocess, render};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let config = RenderConfig::default();
//! let cells = preprocess::prepare(&input, config.ascii_width, 0.0).unwrap();
//! let grid = render(&cells, &config).unwrap();
//! println!("{}", grid);
//! ```

pub mod ascii;
pub mod buffer;
pub mod config;
pub mod dither;
pub mod edges;
pub mod error;
pub mod filters;
pub mod lut;
pub mod preprocess;
pub mod processor;

// Re-export main types for convenience
pub use ascii::CharacterGrid;
pub use config::{Charset, DitherAlgorithm, EdgeMethod, RenderConfig};
pub use error::RenderError;
pub use lut::Palette;
pub use processor::{RenderMode, render, render_with_rng};
