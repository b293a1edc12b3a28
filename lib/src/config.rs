use crate::error::RenderError;
use crate::lut::Palette;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error-diffusion or threshold strategy used when dithering is enabled
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DitherAlgorithm {
    #[default]
    Floyd,
    Atkinson,
    Noise,
    Ordered,
}

/// Built-in glyph palettes
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Charset {
    Standard,
    Blocks,
    Binary,
    /// User-supplied character followed by a space
    Manual,
    Hex,
    #[default]
    Detailed,
}

/// Which edge treatment the renderer applies
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EdgeMethod {
    /// Plain tone quantization, optionally dithered
    #[default]
    None,
    /// Binary Sobel threshold
    Sobel,
    /// Difference-of-Gaussians contours
    Dog,
}

macro_rules! named_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = RenderError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(RenderError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

named_enum!(DitherAlgorithm, "dither algorithm", {
    Floyd => "floyd",
    Atkinson => "atkinson",
    Noise => "noise",
    Ordered => "ordered",
});

named_enum!(Charset, "charset", {
    Standard => "standard",
    Blocks => "blocks",
    Binary => "binary",
    Manual => "manual",
    Hex => "hex",
    Detailed => "detailed",
});

named_enum!(EdgeMethod, "edge method", {
    None => "none",
    Sobel => "sobel",
    Dog => "dog",
});

/// Configuration for one render
///
/// A render never mutates its config; build a new value for every call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Output column count; the pixel buffer must already be this wide
    pub ascii_width: u32,

    /// Tone adjustments
    pub brightness: f64,         // additive, default 0
    pub contrast: f64,           // -255..=255, default 0
    pub invert: bool,            // default false
    pub ignore_white: bool,      // default true

    /// Dithering (plain mode only)
    pub dithering_enabled: bool, // default true
    pub dither_algorithm: DitherAlgorithm,
    /// Seed for the noise strategy; `None` draws from entropy
    pub noise_seed: Option<u64>,

    /// Palette
    pub charset: Charset,        // default detailed
    pub manual_char: String,     // used by Charset::Manual, "0" when empty

    /// Edge detection
    pub edge_method: EdgeMethod,
    pub edge_threshold: i32,     // Sobel mode, default 100
    pub dog_edge_threshold: i32, // DoG mode, default 100
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ascii_width: 100,

            brightness: 0.0,
            contrast: 0.0,
            invert: false,
            ignore_white: true,

            dithering_enabled: true,
            dither_algorithm: DitherAlgorithm::Floyd,
            noise_seed: None,

            charset: Charset::Detailed,
            manual_char: String::new(),

            edge_method: EdgeMethod::None,
            edge_threshold: 100,
            dog_edge_threshold: 100,
        }
    }
}

impl RenderConfig {
    /// Validates the configuration parameters
    ///
    /// Contrast is limited to [-255, 255] on purpose: the factor formula
    /// divides by zero at 259 and flips sign beyond it, and the slider the
    /// settings come from never leaves that range.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.ascii_width == 0 {
            return Err(RenderError::InvalidConfig(
                "ascii_width must be at least 1".to_string(),
            ));
        }
        if !self.brightness.is_finite() {
            return Err(RenderError::InvalidConfig(format!(
                "brightness must be finite, got {}",
                self.brightness
            )));
        }
        if !self.contrast.is_finite() || !(-255.0..=255.0).contains(&self.contrast) {
            return Err(RenderError::InvalidConfig(format!(
                "contrast must be between -255 and 255, got {}",
                self.contrast
            )));
        }
        Ok(())
    }

    /// Palette selected by `charset` (and `manual_char` for the manual set)
    pub fn palette(&self) -> Palette {
        Palette::from_charset(self.charset, &self.manual_char)
    }
}
