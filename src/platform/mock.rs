//! In-memory backends for tests.

use super::backend::{ButtonEvent, EventSource, JoystickBackend, JoystickDevice, Renderer};
use super::event::ConsoleEvent;
use crate::buffer::Rgb;
use crate::error::{JoystickError, RenderError};
use crate::layout::Rect;
use crate::text::Surface;
use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

/// Shared counter of live resources; a texture or device holds one unit.
#[derive(Debug, Clone, Default)]
pub struct LiveCount(Rc<Cell<usize>>);

impl LiveCount {
    pub fn get(&self) -> usize {
        self.0.get()
    }

    fn acquire(&self) -> Guard {
        self.0.set(self.0.get() + 1);
        Guard(self.0.clone())
    }
}

#[derive(Debug)]
pub struct Guard(Rc<Cell<usize>>);

impl Drop for Guard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[derive(Debug)]
pub struct MockTexture {
    pub text: String,
    pub backdrop: Rgb,
    _live: Guard,
}

/// Records every copy of the current frame.
#[derive(Debug, Default)]
pub struct MockRenderer {
    pub live: LiveCount,
    pub created: usize,
    pub fail_textures: bool,
    pub draw_color: Rgb,
    pub frame: Vec<(String, Rect)>,
    pub presented: Vec<Vec<(String, Rect)>>,
    pub size: (u16, u16),
}

impl MockRenderer {
    /// Text copied at row `y` in the frame being composed.
    pub fn text_at_row(&self, y: u16) -> Option<&str> {
        self.frame
            .iter()
            .find(|(_, rect)| rect.y == y)
            .map(|(text, _)| text.as_str())
    }
}

impl Renderer for MockRenderer {
    type Texture = MockTexture;

    fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn create_texture(&mut self, surface: &Surface) -> Result<MockTexture, RenderError> {
        if self.fail_textures {
            return Err(RenderError::Texture(String::from("out of video memory")));
        }
        self.created += 1;
        Ok(MockTexture {
            text: surface.text(),
            backdrop: self.draw_color,
            _live: self.live.acquire(),
        })
    }

    fn copy(&mut self, texture: &MockTexture, dst: Rect) {
        self.frame.push((texture.text.clone(), dst));
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.presented.push(self.frame.clone());
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }
}

/// Replays a scripted session, one batch of events per frame.
///
/// Once the script runs out every poll reports [`ConsoleEvent::Quit`], so a
/// loop under test always terminates.
#[derive(Debug, Default)]
pub struct MockEvents {
    frames: VecDeque<VecDeque<ConsoleEvent>>,
    pub text_input: Vec<bool>,
}

impl MockEvents {
    pub fn frames<I, F>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = ConsoleEvent>,
    {
        Self {
            frames: frames
                .into_iter()
                .map(|frame| frame.into_iter().collect())
                .collect(),
            text_input: Vec::new(),
        }
    }
}

impl EventSource for MockEvents {
    fn poll_event(&mut self) -> Option<ConsoleEvent> {
        let Some(frame) = self.frames.front_mut() else {
            return Some(ConsoleEvent::Quit);
        };
        let event = frame.pop_front();
        if event.is_none() {
            self.frames.pop_front();
        }
        event
    }

    fn set_text_input(&mut self, enabled: bool) {
        self.text_input.push(enabled);
    }
}

#[derive(Debug)]
pub struct MockJoystick {
    buttons: VecDeque<ButtonEvent>,
    _live: Guard,
}

impl JoystickDevice for MockJoystick {
    fn poll_button(&mut self) -> Option<ButtonEvent> {
        self.buttons.pop_front()
    }
}

/// Opens every index except those in `missing`.
#[derive(Debug, Default)]
pub struct MockJoysticks {
    pub live: LiveCount,
    pub missing: Vec<u32>,
    pub buttons: Vec<ButtonEvent>,
}

impl JoystickBackend for MockJoysticks {
    type Device = MockJoystick;

    fn open(&mut self, index: u32) -> Result<MockJoystick, JoystickError> {
        if self.missing.contains(&index) {
            return Err(JoystickError::Open {
                index,
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(MockJoystick {
            buttons: self.buttons.iter().copied().collect(),
            _live: self.live.acquire(),
        })
    }
}
