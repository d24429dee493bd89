//! Text Slot: one fixed-position line of text with a cached texture.
//!
//! A slot owns up to two resources: the [`Surface`] its text was shaped into
//! and the renderer texture made from that surface. Changing the text
//! releases both (texture first) and shapes the new text right away; the
//! texture is only recreated when the slot is next rendered. A slot therefore
//! never shows a texture made from an older string.

use crate::buffer::Rgba;
use crate::layout::{Position, Rect};
use crate::platform::Renderer;
use crate::text::{Surface, TextShaper};
use tracing::warn;

/// A line of text at a fixed position.
///
/// `T` is the texture type of the renderer the slot is drawn with.
#[derive(Debug)]
pub struct TextSlot<T> {
    // Field order is drop order: texture before the surface it came from.
    texture: Option<T>,
    surface: Option<Surface>,
    text: String,
    position: Position,
    color: Rgba,
}

impl<T> TextSlot<T> {
    /// An empty slot; nothing is drawn until the first [`set_text`](Self::set_text).
    pub const fn new(position: Position, color: Rgba) -> Self {
        Self {
            texture: None,
            surface: None,
            text: String::new(),
            position,
            color,
        }
    }

    /// A slot showing `text` from the start.
    pub fn with_text<S>(position: Position, color: Rgba, text: &str, shaper: &S) -> Self
    where
        S: TextShaper + ?Sized,
    {
        let mut slot = Self::new(position, color);
        slot.set_text(text, shaper);
        slot
    }

    /// Replace the text.
    ///
    /// Releases the cached texture and surface, then shapes `text`. A shaping
    /// failure is logged and leaves the slot with nothing to draw.
    pub fn set_text<S>(&mut self, text: &str, shaper: &S)
    where
        S: TextShaper + ?Sized,
    {
        self.close();
        text.clone_into(&mut self.text);

        match shaper.render_blended(&self.text, self.color) {
            Ok(surface) => self.surface = Some(surface),
            Err(err) => warn!(text = %self.text, error = %err, "cannot set text"),
        }
    }

    /// Draw the slot, creating its texture first if the text changed.
    pub fn render<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Texture = T>,
    {
        let Some(surface) = &self.surface else {
            return;
        };

        if self.texture.is_none() {
            match renderer.create_texture(surface) {
                Ok(texture) => self.texture = Some(texture),
                Err(err) => {
                    warn!(text = %self.text, error = %err, "cannot render text");
                    return;
                }
            }
        }

        if let Some(texture) = &self.texture {
            let dst = Rect::new(
                self.position.x,
                self.position.y,
                surface.width(),
                surface.height(),
            );
            renderer.copy(texture, dst);
        }
    }

    /// Release the texture, then the surface. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.texture = None;
        self.surface = None;
    }

    /// The current string, whether or not it could be shaped.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the slot has something to draw.
    pub const fn is_renderable(&self) -> bool {
        self.surface.is_some()
    }

    /// Whether a texture is currently cached.
    pub const fn has_artifact(&self) -> bool {
        self.texture.is_some()
    }

    /// Top-left cell of the slot.
    pub const fn position(&self) -> Position {
        self.position
    }
}
