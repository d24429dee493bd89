//! Cell: one character position of the console frame.
//!
//! Colors come in two flavours. [`Rgba`] is what text is *drawn* with: the
//! shaper attaches it to every glyph of a surface. [`Rgb`] is what a cell
//! *stores*: by the time a glyph reaches the frame its alpha has been blended
//! against the backdrop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Cell Layout (16 bytes)                                          │
//! ├───────────┬────────────┬─────────┬─────────┬─────┬───────┬───────┤
//! │ grapheme  │ len + width│   fg    │   bg    │ mod │ flags │  pad  │
//! │ [u8; 4]   │  u8 + u8   │ [u8; 3] │ [u8; 3] │ u8  │  u8   │ [u8;2]│
//! └───────────┴────────────┴─────────┴─────────┴─────┴───────┴───────┘
//! ```

use bitflags::bitflags;
use unicode_width::UnicodeWidthStr;

/// Columns a grapheme occupies on screen: its Unicode width capped at two.
///
/// Emoji sequences can sum to more than two columns; terminals draw them in
/// two. Zero means the grapheme draws nothing.
pub fn grapheme_width(grapheme: &str) -> u8 {
    u8::try_from(grapheme.width().min(2)).unwrap_or(2)
}

/// An opaque 24-bit color.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xC8C8C8).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A color with coverage, used when drawing text.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    #[inline]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b, 255)
    }

    /// Drop the alpha channel without blending.
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Blend this color over an opaque backdrop.
    #[inline]
    pub const fn blend_over(self, backdrop: Rgb) -> Rgb {
        Rgb::new(
            blend_channel(self.r, backdrop.r, self.a),
            blend_channel(self.g, backdrop.g, self.a),
            blend_channel(self.b, backdrop.b, self.a),
        )
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    ((src as u16 * a + dst as u16 * (255 - a) + 127) / 255) as u8
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

bitflags! {
    /// Text style modifiers.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level flags.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Grapheme did not fit inline; the bytes hold an overflow index.
        const OVERFLOW = 0b0000_0001;
        /// Right half of a wide character.
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single frame cell.
///
/// Graphemes up to four UTF-8 bytes are stored inline. Longer clusters
/// (emoji ZWJ sequences and the like) are parked in the owning
/// [`Buffer`](super::Buffer)'s overflow table and the cell keeps the index.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    grapheme: [u8; 4],
    grapheme_len: u8,
    display_width: u8,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
    flags: CellFlags,
    _padding: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<Cell>() == 16, "Cell must stay 16 bytes");

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell: space, white on black.
    pub const EMPTY: Self = Self {
        grapheme: [b' ', 0, 0, 0],
        grapheme_len: 1,
        display_width: 1,
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        modifiers: Modifiers::empty(),
        flags: CellFlags::empty(),
        _padding: [0, 0],
    };

    /// A blank cell painted with the given background.
    #[inline]
    pub const fn blank(bg: Rgb) -> Self {
        Self::EMPTY.with_bg(bg)
    }

    /// Create a cell from a grapheme string.
    ///
    /// Returns `None` when the grapheme needs more than four bytes; the
    /// caller must go through overflow storage instead.
    pub fn from_grapheme(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return None;
        }

        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);
        let width = grapheme_width(s);

        Some(Self {
            grapheme,
            grapheme_len: u8::try_from(bytes.len()).unwrap_or(4),
            display_width: width,
            ..Self::EMPTY
        })
    }

    /// Create an overflow cell pointing at external storage.
    #[inline]
    pub const fn overflow(index: u32, display_width: u8) -> Self {
        Self {
            grapheme: index.to_le_bytes(),
            grapheme_len: 0,
            display_width,
            flags: CellFlags::OVERFLOW,
            ..Self::EMPTY
        }
    }

    /// The right half of a two-column character.
    #[inline]
    pub const fn wide_continuation() -> Self {
        Self {
            grapheme: [0; 4],
            grapheme_len: 0,
            display_width: 0,
            flags: CellFlags::WIDE_CONTINUATION,
            ..Self::EMPTY
        }
    }

    /// The inline grapheme, or `None` for overflow and continuation cells.
    #[inline]
    pub fn grapheme(&self) -> Option<&str> {
        if self.flags.intersects(CellFlags::OVERFLOW | CellFlags::WIDE_CONTINUATION) {
            return None;
        }
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).ok()
    }

    /// The overflow index if this is an overflow cell.
    #[inline]
    pub const fn overflow_index(&self) -> Option<u32> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            Some(u32::from_le_bytes(self.grapheme))
        } else {
            None
        }
    }

    /// Whether the grapheme lives in overflow storage.
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        self.flags.contains(CellFlags::OVERFLOW)
    }

    /// Whether this cell is the right half of a wide character.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Display width in columns (0, 1 or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Style modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grapheme = self.grapheme().unwrap_or("<ext>");
        f.debug_struct("Cell")
            .field("grapheme", &grapheme)
            .field("width", &self.display_width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 16);
    }

    #[test]
    fn test_rgb_from_hex() {
        let rgb = Rgb::from_u32(0x00C8_0000);
        assert_eq!(rgb, Rgb::new(200, 0, 0));
    }

    #[test]
    fn test_blend_opaque_keeps_source() {
        let c = Rgba::new(200, 200, 200, 255);
        assert_eq!(c.blend_over(Rgb::BLACK), Rgb::new(200, 200, 200));
    }

    #[test]
    fn test_blend_transparent_keeps_backdrop() {
        let c = Rgba::new(200, 10, 10, 0);
        assert_eq!(c.blend_over(Rgb::new(1, 2, 3)), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_blend_half() {
        let c = Rgba::new(255, 255, 255, 128);
        let out = c.blend_over(Rgb::BLACK);
        assert_eq!(out, Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_cell_from_grapheme_wide() {
        let cell = Cell::from_grapheme("日").unwrap();
        assert_eq!(cell.grapheme(), Some("日"));
        assert_eq!(cell.display_width(), 2);
    }

    #[test]
    fn test_grapheme_width_capped_at_two() {
        assert_eq!(grapheme_width("a"), 1);
        assert_eq!(grapheme_width("日"), 2);
        assert_eq!(grapheme_width("日本"), 2);
        assert_eq!(grapheme_width("\u{301}"), 0);
        assert_eq!(Cell::from_grapheme("ab").unwrap().display_width(), 2);
    }

    #[test]
    fn test_cell_from_grapheme_rejects_long_and_empty() {
        assert!(Cell::from_grapheme("👨‍👩‍👧").is_none());
        assert!(Cell::from_grapheme("").is_none());
    }

    #[test]
    fn test_cell_overflow() {
        let cell = Cell::overflow(42, 2);
        assert!(cell.is_overflow());
        assert_eq!(cell.overflow_index(), Some(42));
        assert_eq!(cell.grapheme(), None);
    }

    #[test]
    fn test_cell_builder() {
        let cell = Cell::from_grapheme("x")
            .unwrap()
            .with_fg(Rgb::new(200, 0, 0))
            .with_modifiers(Modifiers::BOLD);
        assert_eq!(cell.fg(), Rgb::new(200, 0, 0));
        assert_eq!(cell.bg(), Rgb::BLACK);
        assert!(cell.modifiers().contains(Modifiers::BOLD));
        assert_ne!(cell, Cell::EMPTY);
    }

    #[test]
    fn test_blank_cell() {
        let cell = Cell::blank(Rgb::new(1, 2, 3));
        assert_eq!(cell.grapheme(), Some(" "));
        assert_eq!(cell.bg(), Rgb::new(1, 2, 3));
    }
}
