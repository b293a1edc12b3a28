use std::fmt;

/// Rendered output: one text line per row, every line `width` chars long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterGrid {
    width: usize,
    lines: Vec<String>,
}

impl CharacterGrid {
    /// Build a grid by asking `glyph(x, y)` for every cell
    ///
    /// Cells are visited in row-major order, so `glyph` may carry state from
    /// earlier cells into later ones (error diffusion relies on this).
    pub fn from_fn(width: usize, height: usize, mut glyph: impl FnMut(usize, usize) -> char) -> Self {
        let lines = (0..height)
            .map(|y| (0..width).map(|x| glyph(x, y)).collect::<String>())
            .collect();
        Self { width, lines }
    }

    /// Column count
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row count
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Row `y`. Panics when out of bounds.
    pub fn line(&self, y: usize) -> &str {
        &self.lines[y]
    }

    /// Lines joined with `'\n'`, no trailing newline
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for CharacterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
