//! Terminal renderer: composes frames in a cell buffer and flushes the
//! difference to the terminal.

use crate::buffer::diff::{render_diff, render_full, ColorMode, DiffState};
use crate::buffer::{Buffer, Cell, Modifiers, Rgb};
use crate::error::RenderError;
use crate::layout::Rect;
use crate::platform::Renderer;
use crate::text::{Glyph, Surface};
use std::env;
use std::io::{self, Stdout, Write};
use tracing::{debug, info, warn};

/// A surface with its colors resolved against the backdrop it was created
/// on, ready to be stamped into the frame.
#[derive(Debug, Clone)]
pub struct CellTexture {
    glyphs: Vec<Glyph>,
    width: u16,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl CellTexture {
    /// Width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Resolved foreground color.
    pub const fn fg(&self) -> Rgb {
        self.fg
    }
}

/// Double-buffered renderer writing ANSI sequences to `W`.
///
/// Frames are composed into `next`. [`present`](Renderer::present) writes a
/// full repaint on the first frame and after a resize, otherwise only the
/// cells that differ from `current`.
pub struct TerminalRenderer<W: Write = Stdout> {
    current: Buffer,
    next: Buffer,
    state: DiffState,
    mode: ColorMode,
    draw_color: Rgb,
    output: Vec<u8>,
    writer: W,
    full_redraw: bool,
}

impl TerminalRenderer<Stdout> {
    /// Renderer for stdout with the color mode the terminal advertises.
    pub fn stdout(width: u16, height: u16) -> Self {
        let mode = color_mode_from(env::var("COLORTERM").ok().as_deref());
        Self::new(width, height, mode, io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer of `width` x `height` cells writing to `writer`.
    pub fn new(width: u16, height: u16, mode: ColorMode, writer: W) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            current: Buffer::new(width, height),
            next: Buffer::new(width, height),
            state: DiffState::new(),
            mode,
            draw_color: Rgb::BLACK,
            output: Vec::with_capacity(16 * 1024),
            writer,
            full_redraw: true,
        }
    }

    /// Color encoding in use.
    pub const fn color_mode(&self) -> ColorMode {
        self.mode
    }

    /// The frame last presented.
    pub const fn frame(&self) -> &Buffer {
        &self.current
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Mutable access to the underlying writer.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Texture = CellTexture;

    fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.next.fill(Cell::blank(self.draw_color));
    }

    fn create_texture(&mut self, surface: &Surface) -> Result<CellTexture, RenderError> {
        if surface.glyphs().is_empty() {
            return Err(RenderError::Texture(String::from("surface is empty")));
        }
        Ok(CellTexture {
            glyphs: surface.glyphs().to_vec(),
            width: surface.width(),
            fg: surface.color().blend_over(self.draw_color),
            bg: self.draw_color,
            modifiers: surface.modifiers(),
        })
    }

    fn copy(&mut self, texture: &CellTexture, dst: Rect) {
        let screen = Rect::from_size(self.next.width(), self.next.height());
        let clip = dst.intersection(&screen);
        if clip.is_empty() {
            return;
        }

        let mut col = dst.x;
        for glyph in &texture.glyphs {
            let end = col.saturating_add(u16::from(glyph.width));
            if end > clip.right() {
                break;
            }
            if col >= clip.x {
                self.next.set_grapheme(
                    col,
                    dst.y,
                    &glyph.symbol,
                    texture.fg,
                    texture.bg,
                    texture.modifiers,
                );
            }
            col = end;
        }
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.output.clear();

        if self.full_redraw {
            render_full(&self.next, self.mode, &mut self.output, &mut self.state);
            self.full_redraw = false;
        } else {
            let result = render_diff(
                &self.current,
                &self.next,
                self.mode,
                &mut self.output,
                &mut self.state,
            );
            if result.cells_changed > 0 {
                debug!(
                    cells = result.cells_changed,
                    bytes = self.output.len(),
                    "frame diff"
                );
            }
        }

        if !self.output.is_empty() {
            self.writer.write_all(&self.output)?;
            self.writer.flush()?;
        }

        self.current.copy_from(&self.next);
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.current.resize(width, height);
        self.next.resize(width, height);
        self.state.reset();
        self.full_redraw = true;
        info!(width, height, "display resized");
    }
}

/// Pick the color encoding from the `COLORTERM` value.
///
/// Anything but `truecolor` or `24bit` falls back to the 256-color palette.
pub fn color_mode_from(colorterm: Option<&str>) -> ColorMode {
    let advertised = colorterm.is_some_and(|value| {
        value.eq_ignore_ascii_case("truecolor") || value.eq_ignore_ascii_case("24bit")
    });
    if advertised {
        ColorMode::TrueColor
    } else {
        warn!(colorterm, "true color not advertised, using 256-color palette");
        ColorMode::Indexed
    }
}
