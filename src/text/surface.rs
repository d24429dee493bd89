//! Surface: a shaped line of text, before it becomes a texture.

use crate::buffer::{Modifiers, Rgba};

/// One grapheme cluster and the columns it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// The cluster as UTF-8.
    pub symbol: String,
    /// Display width in columns (1 or 2 for anything visible).
    pub width: u8,
}

/// A single-line run of glyphs drawn in one color.
///
/// Width and height are in cells. Height is always 1: text is never wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    glyphs: Vec<Glyph>,
    width: u16,
    color: Rgba,
    modifiers: Modifiers,
}

impl Surface {
    /// Build a surface; the width is the sum of the glyph widths.
    pub fn new(glyphs: Vec<Glyph>, color: Rgba, modifiers: Modifiers) -> Self {
        let width = glyphs
            .iter()
            .fold(0u16, |acc, g| acc.saturating_add(u16::from(g.width)));
        Self {
            glyphs,
            width,
            color,
            modifiers,
        }
    }

    /// Glyphs left to right.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Natural width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Natural height in rows.
    pub const fn height(&self) -> u16 {
        1
    }

    /// Draw color, alpha not yet applied.
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Style the glyphs are drawn with.
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The glyphs joined back into a string.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.symbol.as_str()).collect()
    }
}
