//! Backend traits: the seams between the console and its platform.

use super::event::ConsoleEvent;
use crate::buffer::Rgb;
use crate::error::{JoystickError, RenderError};
use crate::layout::Rect;
use crate::text::Surface;

/// A display the console can draw textures onto.
///
/// Textures are owned values; dropping one releases whatever the backend
/// allocated for it.
pub trait Renderer {
    /// Display-ready form of a [`Surface`].
    type Texture;

    /// Color used by [`clear`](Self::clear) and as the blend backdrop for
    /// new textures.
    fn set_draw_color(&mut self, color: Rgb);

    /// Wipe the frame being composed.
    fn clear(&mut self);

    /// Turn a surface into a texture.
    fn create_texture(&mut self, surface: &Surface) -> Result<Self::Texture, RenderError>;

    /// Copy a texture into the frame at `dst`, clipped to the display.
    fn copy(&mut self, texture: &Self::Texture, dst: Rect);

    /// Show the composed frame.
    fn present(&mut self) -> Result<(), RenderError>;

    /// The display changed size.
    fn resize(&mut self, width: u16, height: u16);
}

/// A non-blocking source of [`ConsoleEvent`]s.
pub trait EventSource {
    /// Next pending event, or `None` when the queue is empty.
    fn poll_event(&mut self) -> Option<ConsoleEvent>;

    /// Switch text composition on or off. While off, printable keys arrive
    /// as [`ConsoleEvent::KeyDown`] instead of [`ConsoleEvent::TextInput`].
    fn set_text_input(&mut self, enabled: bool);
}

/// A button state change read from an open joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Button number.
    pub button: u8,
    /// `true` on press.
    pub pressed: bool,
}

/// An open joystick. Dropping it closes the device.
pub trait JoystickDevice {
    /// Next pending button change, non-blocking.
    fn poll_button(&mut self) -> Option<ButtonEvent>;
}

/// Opens joysticks by device index.
pub trait JoystickBackend {
    /// Handle type owned by the registry while the device is connected.
    type Device: JoystickDevice;

    /// Open the device reported at `index`.
    fn open(&mut self, index: u32) -> Result<Self::Device, JoystickError>;
}
