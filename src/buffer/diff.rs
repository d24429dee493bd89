//! Diffing: turn a frame into the fewest ANSI bytes that reproduce it.
//!
//! [`render_diff`] compares the frame on screen with the next one and emits
//! cursor moves, SGR changes and graphemes only for cells that differ.
//! [`render_full`] repaints everything and is used for the first frame and
//! after a resize. Colors are written as 24-bit SGR or, when the terminal
//! cannot do true color, mapped onto the xterm 256-color palette.

use super::{Buffer, Cell, Modifiers, Rgb};
use std::io::Write;

/// How colors are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// `38;2;r;g;b` sequences.
    #[default]
    TrueColor,
    /// `38;5;n` sequences, nearest palette entry.
    Indexed,
}

/// What the terminal is believed to show right now.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Fresh state; the cursor is assumed at home.
    pub const fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything; the next write re-emits position and style.
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        self.modifiers = None;
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Counters describing one diff pass.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Cells that differed.
    pub cells_changed: usize,
    /// Explicit cursor moves emitted.
    pub cursor_moves: usize,
    /// Color sequences emitted.
    pub color_changes: usize,
}

/// Emit the changes needed to go from `current` to `next`.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    mode: ColorMode,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let width = usize::from(next.width());

    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        // Overflow indices are per-frame, so an equal overflow cell may still
        // name a different grapheme.
        if (old == new && !new.is_overflow()) || new.is_wide_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);

        result.cells_changed += 1;

        if state.cursor_y != y || state.cursor_x != x {
            emit_cursor_move(output, x, y);
            state.cursor_x = x;
            state.cursor_y = y;
            result.cursor_moves += 1;
        }

        result.color_changes += emit_style(output, new, mode, state);
        emit_grapheme(output, new, next);
        state.cursor_x = state.cursor_x.saturating_add(u16::from(new.display_width().max(1)));
    }

    result
}

/// Repaint the whole frame from the top-left corner.
pub fn render_full(buffer: &Buffer, mode: ColorMode, output: &mut Vec<u8>, state: &mut DiffState) {
    state.reset();
    output.extend_from_slice(b"\x1b[0m\x1b[H");
    state.cursor_x = 0;
    state.cursor_y = 0;

    for y in 0..buffer.height() {
        if y > 0 {
            emit_cursor_move(output, 0, y);
            state.cursor_x = 0;
            state.cursor_y = y;
        }
        for x in 0..buffer.width() {
            let Some(cell) = buffer.get(x, y) else { continue };
            if cell.is_wide_continuation() {
                continue;
            }
            emit_style(output, cell, mode, state);
            emit_grapheme(output, cell, buffer);
            state.cursor_x = state.cursor_x.saturating_add(u16::from(cell.display_width().max(1)));
        }
    }
}

/// Bring fg, bg and modifiers in line with `cell`. Returns color sequences
/// written.
fn emit_style(output: &mut Vec<u8>, cell: &Cell, mode: ColorMode, state: &mut DiffState) -> usize {
    let mods = cell.modifiers();
    let active = state.modifiers.unwrap_or(Modifiers::empty());

    // SGR has no portable per-attribute off switch; a removal means reset.
    if !active.difference(mods).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
    }

    let mut changes = 0;
    if state.fg != Some(cell.fg()) {
        emit_color(output, 38, cell.fg(), mode);
        state.fg = Some(cell.fg());
        changes += 1;
    }
    if state.bg != Some(cell.bg()) {
        emit_color(output, 48, cell.bg(), mode);
        state.bg = Some(cell.bg());
        changes += 1;
    }
    if state.modifiers != Some(mods) {
        let added = mods.difference(state.modifiers.unwrap_or(Modifiers::empty()));
        emit_modifier_set(output, added);
        state.modifiers = Some(mods);
    }
    changes
}

/// 1-indexed absolute move, shortest form.
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

#[inline]
fn emit_color(output: &mut Vec<u8>, layer: u8, color: Rgb, mode: ColorMode) {
    match mode {
        ColorMode::TrueColor => {
            let _ = write!(output, "\x1b[{layer};2;{};{};{}m", color.r, color.g, color.b);
        }
        ColorMode::Indexed => {
            let _ = write!(output, "\x1b[{layer};5;{}m", rgb_to_ansi256(color));
        }
    }
}

fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    if modifiers.contains(Modifiers::BOLD) {
        output.extend_from_slice(b"\x1b[1m");
    }
    if modifiers.contains(Modifiers::DIM) {
        output.extend_from_slice(b"\x1b[2m");
    }
    if modifiers.contains(Modifiers::ITALIC) {
        output.extend_from_slice(b"\x1b[3m");
    }
    if modifiers.contains(Modifiers::UNDERLINE) {
        output.extend_from_slice(b"\x1b[4m");
    }
}

#[inline]
fn emit_grapheme(output: &mut Vec<u8>, cell: &Cell, buffer: &Buffer) {
    if let Some(idx) = cell.overflow_index() {
        match buffer.get_overflow(idx) {
            Some(grapheme) => output.extend_from_slice(grapheme.as_bytes()),
            None => output.extend_from_slice("\u{FFFD}".as_bytes()),
        }
    } else if let Some(grapheme) = cell.grapheme() {
        output.extend_from_slice(grapheme.as_bytes());
    } else {
        output.push(b' ');
    }
}

/// Nearest xterm 256-color palette index for a true color.
///
/// Picks between the 6x6x6 cube (16..=231) and the gray ramp (232..=255)
/// by squared distance.
pub fn rgb_to_ansi256(color: Rgb) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    fn cube_index(v: u8) -> u8 {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            _ => (v - 35) / 40,
        }
    }

    fn distance(a: Rgb, b: Rgb) -> u32 {
        let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).unsigned_abs().pow(2);
        d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
    }

    let (ri, gi, bi) = (cube_index(color.r), cube_index(color.g), cube_index(color.b));
    let cube = Rgb::new(LEVELS[ri as usize], LEVELS[gi as usize], LEVELS[bi as usize]);
    let cube_idx = 16 + 36 * ri + 6 * gi + bi;

    let avg = (u16::from(color.r) + u16::from(color.g) + u16::from(color.b)) / 3;
    #[allow(clippy::cast_possible_truncation)]
    let gray_step = if avg > 238 { 23 } else { avg.saturating_sub(3) / 10 } as u8;
    let gray_level = 8 + gray_step * 10;
    let gray = Rgb::new(gray_level, gray_level, gray_level);

    if distance(color, gray) < distance(color, cube) {
        232 + gray_step
    } else {
        cube_idx
    }
}
