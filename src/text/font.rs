//! Text shaping: turning strings into [`Surface`]s.

use super::surface::{Glyph, Surface};
use crate::buffer::{grapheme_width, Modifiers, Rgba};
use crate::error::ShapeError;
use unicode_segmentation::UnicodeSegmentation;

/// Something that can shape a UTF-8 string into a surface.
pub trait TextShaper {
    /// Shape `text` in `color`, alpha kept for blending at texture time.
    fn render_blended(&self, text: &str, color: Rgba) -> Result<Surface, ShapeError>;
}

/// The console's bundled cell font.
///
/// The terminal does the actual rasterizing; the font decides which clusters
/// reach it, how wide they are, and in what style. Captured command output
/// is untrusted, so escape sequences are stripped and control characters
/// dropped before shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFont {
    point_size: u16,
    modifiers: Modifiers,
    tab_width: u16,
}

impl CellFont {
    /// The face shipped with the console: bold, 12 pt nominal, tabs of 4.
    pub const fn bundled() -> Self {
        Self {
            point_size: 12,
            modifiers: Modifiers::BOLD,
            tab_width: 4,
        }
    }

    /// Nominal point size. Informational; terminals pick their own.
    pub const fn point_size(&self) -> u16 {
        self.point_size
    }

    /// Style every surface is drawn with.
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Use a different style.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl Default for CellFont {
    fn default() -> Self {
        Self::bundled()
    }
}

impl TextShaper for CellFont {
    fn render_blended(&self, text: &str, color: Rgba) -> Result<Surface, ShapeError> {
        if let Some(pos) = text.find('\0') {
            return Err(ShapeError::InteriorNul(pos));
        }

        let cleaned = strip_controls(text);
        let tab_width = self.tab_width.max(1);
        let mut glyphs = Vec::new();
        let mut column = 0u16;

        for cluster in cleaned.graphemes(true) {
            if cluster == "\t" {
                let pad = tab_width - column % tab_width;
                for _ in 0..pad {
                    glyphs.push(Glyph {
                        symbol: String::from(" "),
                        width: 1,
                    });
                }
                column = column.saturating_add(pad);
                continue;
            }

            let width = grapheme_width(cluster);
            if width == 0 {
                continue;
            }
            glyphs.push(Glyph {
                symbol: cluster.to_string(),
                width,
            });
            column = column.saturating_add(u16::from(width));
        }

        if glyphs.is_empty() {
            return Err(ShapeError::ZeroWidth);
        }
        Ok(Surface::new(glyphs, color, self.modifiers))
    }
}

/// Remove CSI/escape sequences and every control character except tab.
fn strip_controls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                // CSI: parameters and intermediates up to a final byte
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                // OSC: up to BEL or ST
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
            continue;
        }
        if c == '\t' || !c.is_control() {
            out.push(c);
        }
    }
    out
}
