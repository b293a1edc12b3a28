//! Glyph lookup tables
//!
//! Tone palettes are ordered from the glyph used for tone 0 to the glyph used
//! for tone 255. Contour mode has its own fixed four-glyph table.

use crate::config::Charset;
use crate::edges::Orientation;

pub const STANDARD: &str = "@%#*+=-:.";
pub const BLOCKS: &str = "█▓▒░ ";
pub const BINARY: &str = "01";
pub const HEX: &str = "0123456789ABCDEF";
pub const DETAILED: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'.";

/// Character used by the manual charset when the user leaves it empty
pub const MANUAL_FALLBACK: char = '0';

/// Contour glyphs indexed by [`Orientation`]
///
/// Horizontal, 45°, vertical, 135°.
pub const EDGE_CHARS: [char; 4] = ['-', '/', '|', '\\'];

/// Ordered, non-empty glyph sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Build a palette from a string, one level per char.
    ///
    /// An empty string falls back to the manual default `"0 "`.
    pub fn new(glyphs: &str) -> Self {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Self::manual("");
        }
        Self { glyphs }
    }

    /// Single user character followed by a space.
    ///
    /// Only the first char of `input` is used; empty input uses
    /// [`MANUAL_FALLBACK`].
    pub fn manual(input: &str) -> Self {
        let ch = input.chars().next().unwrap_or(MANUAL_FALLBACK);
        Self {
            glyphs: vec![ch, ' '],
        }
    }

    pub fn from_charset(charset: Charset, manual_char: &str) -> Self {
        match charset {
            Charset::Standard => Self::new(STANDARD),
            Charset::Blocks => Self::new(BLOCKS),
            Charset::Binary => Self::new(BINARY),
            Charset::Manual => Self::manual(manual_char),
            Charset::Hex => Self::new(HEX),
            Charset::Detailed => Self::new(DETAILED),
        }
    }

    /// Number of tone levels (`nLevels`), always at least 1
    pub fn levels(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph for a quantization level, clamped to the last level
    pub fn glyph(&self, level: usize) -> char {
        self.glyphs[level.min(self.glyphs.len() - 1)]
    }
}

/// Get the contour glyph for an edge orientation
pub fn get_edge_char(orientation: Orientation) -> char {
    EDGE_CHARS[orientation as usize]
}
