//! Buffer: the console frame as a grid of cells.
//!
//! Cells are stored row-major in one contiguous `Vec`. Graphemes longer than
//! four bytes spill into a small overflow table owned by the buffer.

use super::cell::{grapheme_width, Cell, Modifiers, Rgb};
use std::collections::HashMap;

/// A grid of cells the size of the display.
#[derive(Clone)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    overflow: HashMap<u32, String>,
    next_overflow_index: u32,
}

impl Buffer {
    /// Create a new buffer filled with [`Cell::EMPTY`].
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        Self {
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            width,
            height,
            overflow: HashMap::new(),
            next_overflow_index: 0,
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) to a linear index, or `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at (x, y). Returns `false` when out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Write a grapheme at (x, y), spilling to overflow storage if needed.
    ///
    /// The width follows [`grapheme_width`], the same rule the shaper lays
    /// glyphs out by, with a floor of one column.
    /// A two-column grapheme also claims (x + 1, y) as a continuation cell,
    /// unless it would straddle the right edge, in which case nothing is
    /// written. Returns the columns consumed, 0 when nothing was written.
    pub fn set_grapheme(
        &mut self,
        x: u16,
        y: u16,
        grapheme: &str,
        fg: Rgb,
        bg: Rgb,
        modifiers: Modifiers,
    ) -> u8 {
        let Some(idx) = self.index_of(x, y) else {
            return 0;
        };

        let width = grapheme_width(grapheme).max(1);
        if width == 2 && x.saturating_add(1) >= self.width {
            return 0;
        }

        let cell = Cell::from_grapheme(grapheme).unwrap_or_else(|| {
            let overflow_idx = self.next_overflow_index;
            self.next_overflow_index += 1;
            self.overflow.insert(overflow_idx, grapheme.to_string());
            Cell::overflow(overflow_idx, width)
        });
        self.cells[idx] = cell.with_fg(fg).with_bg(bg).with_modifiers(modifiers);

        if width == 2 {
            self.cells[idx + 1] = Cell::wide_continuation().with_bg(bg);
        }

        width
    }

    /// Grapheme at (x, y), resolving overflow storage.
    ///
    /// Returns `None` when out of bounds or on a continuation cell.
    pub fn get_grapheme(&self, x: u16, y: u16) -> Option<&str> {
        let cell = self.get(x, y)?;
        match cell.overflow_index() {
            Some(idx) => self.get_overflow(idx),
            None => cell.grapheme(),
        }
    }

    /// Overflow grapheme by index.
    #[inline]
    pub fn get_overflow(&self, index: u32) -> Option<&str> {
        self.overflow.get(&index).map(String::as_str)
    }

    /// Read back the visible text of one row, starting at `x`, for `width`
    /// columns. Continuation cells are skipped.
    pub fn row_text(&self, x: u16, y: u16, width: u16) -> String {
        let end = x.saturating_add(width).min(self.width);
        (x..end).filter_map(|col| self.get_grapheme(col, y)).collect()
    }

    /// Fill the whole buffer with `cell`, dropping overflow storage.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
        self.overflow.clear();
        self.next_overflow_index = 0;
    }

    /// Resize, discarding content. The next frame repaints everything anyway.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width.max(1), height.max(1));
    }

    /// Copy content from a buffer of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
        self.overflow.clone_from(&other.overflow);
        self.next_overflow_index = other.next_overflow_index;
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("overflow_count", &self.overflow.len())
            .finish()
    }
}
