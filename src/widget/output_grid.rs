//! Output Grid: a fixed column of text slots showing the last command's
//! standard output.

use super::TextSlot;
use crate::buffer::Rgba;
use crate::layout::Position;
use crate::platform::Renderer;
use crate::text::TextShaper;

/// `N` slots, `N` fixed at construction.
///
/// Each assignment starts from a clean grid: every slot falls back to the
/// placeholder before the new lines are written, so nothing from an earlier
/// command survives below a shorter result.
#[derive(Debug)]
pub struct OutputGrid<T> {
    slots: Vec<TextSlot<T>>,
    placeholder: String,
}

impl<T> OutputGrid<T> {
    /// One slot per position, each showing `placeholder`.
    pub fn new<S>(positions: &[Position], color: Rgba, placeholder: &str, shaper: &S) -> Self
    where
        S: TextShaper + ?Sized,
    {
        let slots = positions
            .iter()
            .map(|&position| TextSlot::with_text(position, color, placeholder, shaper))
            .collect();

        Self {
            slots,
            placeholder: placeholder.to_owned(),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Put every slot back to the placeholder.
    pub fn reset<S>(&mut self, shaper: &S)
    where
        S: TextShaper + ?Sized,
    {
        for slot in &mut self.slots {
            slot.set_text(&self.placeholder, shaper);
        }
    }

    /// Show `lines`, one per slot, top to bottom.
    ///
    /// Lines past the capacity are dropped; slots past the last line keep
    /// the placeholder. Returns how many lines were shown.
    pub fn assign<S, L>(&mut self, lines: &[L], shaper: &S) -> usize
    where
        S: TextShaper + ?Sized,
        L: AsRef<str>,
    {
        self.reset(shaper);

        let shown = lines.len().min(self.slots.len());
        for (slot, line) in self.slots.iter_mut().zip(lines) {
            slot.set_text(line.as_ref(), shaper);
        }
        shown
    }

    /// Draw every slot.
    pub fn render<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Texture = T>,
    {
        for slot in &mut self.slots {
            slot.render(renderer);
        }
    }

    /// Current text of each slot, top to bottom.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(TextSlot::text)
    }

    /// The slots themselves.
    pub fn slots(&self) -> &[TextSlot<T>] {
        &self.slots
    }

    /// Release every slot's texture and surface.
    pub fn close(&mut self) {
        self.slots.iter_mut().for_each(TextSlot::close);
    }
}
