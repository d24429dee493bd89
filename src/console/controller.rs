//! Console controller: routes events to the input buffer, the dispatcher and
//! the joystick registry, and draws the result every frame.

use super::dispatch::{CommandDispatcher, CommandResult};
use super::input::InputBuffer;
use super::joysticks::JoystickRegistry;
use crate::config::ConsoleConfig;
use crate::error::{FatalError, RenderError};
use crate::layout::ConsoleLayout;
use crate::platform::{
    ConsoleEvent, EventSource, FrameTicker, JoystickBackend, KeyCode, KeyModifiers, Renderer,
};
use crate::text::TextShaper;
use crate::widget::{OutputGrid, TextSlot};
use tracing::{debug, info, trace};

/// Whether the loop keeps going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the loop.
    Quit,
}

/// The interactive console.
///
/// `T` is the renderer's texture type, `S` the text shaper and `J` the
/// joystick backend.
pub struct Console<T, S, J: JoystickBackend> {
    config: ConsoleConfig,
    shaper: S,
    input: InputBuffer,
    prompt: TextSlot<T>,
    outputs: OutputGrid<T>,
    error: TextSlot<T>,
    dispatcher: CommandDispatcher,
    joysticks: JoystickRegistry<J::Device>,
    joystick_backend: J,
}

impl<T, S, J> Console<T, S, J>
where
    S: TextShaper,
    J: JoystickBackend,
{
    /// Build the console's lines at the positions of `layout`.
    ///
    /// Starts capturing with an empty buffer.
    pub fn new(
        config: ConsoleConfig,
        layout: &ConsoleLayout,
        shaper: S,
        joystick_backend: J,
    ) -> Self {
        let prompt = TextSlot::with_text(
            layout.prompt,
            config.text_color,
            &config.empty_prompt,
            &shaper,
        );
        let outputs = OutputGrid::new(
            &layout.slots,
            config.text_color,
            &config.empty_slot,
            &shaper,
        );
        let error = TextSlot::with_text(
            layout.error,
            config.error_color,
            &config.empty_error,
            &shaper,
        );

        Self {
            config,
            shaper,
            input: InputBuffer::capturing(),
            prompt,
            outputs,
            error,
            dispatcher: CommandDispatcher::new(),
            joysticks: JoystickRegistry::new(),
            joystick_backend,
        }
    }

    /// Apply one event.
    pub fn handle_event(&mut self, event: ConsoleEvent) -> Flow {
        match event {
            ConsoleEvent::Quit => {
                info!("quit requested");
                return Flow::Quit;
            }
            ConsoleEvent::KeyDown { code, modifiers } => return self.handle_key(code, modifiers),
            ConsoleEvent::TextInput(fragment) => {
                if self.input.append(&fragment) {
                    self.refresh_prompt();
                    debug!(input = self.input.as_str(), "input");
                }
            }
            ConsoleEvent::JoyButton {
                which,
                button,
                pressed,
            } => trace!(which, button, pressed, "joystick button"),
            ConsoleEvent::JoyAdded { which } => {
                self.joysticks.add(which, &mut self.joystick_backend);
            }
            ConsoleEvent::JoyRemoved { which } => {
                self.joysticks.remove(which);
            }
            ConsoleEvent::Resized { width, height } => debug!(width, height, "resized"),
        }
        Flow::Continue
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Flow {
        match code {
            KeyCode::Esc => {
                info!("quit requested");
                return Flow::Quit;
            }
            KeyCode::Char('c') if modifiers == KeyModifiers::CONTROL => {
                info!("interrupted");
                return Flow::Quit;
            }
            KeyCode::Backspace => {
                self.input.backspace();
                self.refresh_prompt();
                debug!(input = self.input.as_str(), "input");
            }
            KeyCode::Enter if modifiers == KeyModifiers::SHIFT => self.restart_capture(),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
        Flow::Continue
    }

    /// Clear the buffer and accept input again.
    pub fn restart_capture(&mut self) {
        self.input.clear();
        self.input.start_capture();
        self.prompt.set_text(&self.config.capture_prompt, &self.shaper);
        debug!("starting text capture");
    }

    /// Run the buffer as a command and show what it printed.
    ///
    /// Capture stops; the buffer keeps its text.
    pub fn submit(&mut self) {
        self.input.stop_capture();
        self.refresh_prompt();

        let result = self.dispatcher.execute(self.input.as_str());
        debug!(
            command = self.input.as_str(),
            stdout = ?result.stdout,
            stderr = ?result.stderr,
            "command finished"
        );
        self.apply_result(&result);
    }

    /// Show `result`: stdout fills the output grid, the first stderr line (if
    /// any) replaces the error line. Without stderr the error line keeps its
    /// previous text.
    pub fn apply_result(&mut self, result: &CommandResult) {
        self.outputs.assign(&result.stdout, &self.shaper);
        if let Some(line) = result.first_error() {
            self.error.set_text(line, &self.shaper);
        }
    }

    /// Open-device button changes, fed through [`handle_event`](Self::handle_event).
    pub fn poll_joysticks(&mut self) {
        for event in self.joysticks.poll_buttons() {
            self.handle_event(event);
        }
    }

    /// Clear, draw every line, present.
    pub fn render_frame<R>(&mut self, renderer: &mut R) -> Result<(), RenderError>
    where
        R: Renderer<Texture = T>,
    {
        renderer.set_draw_color(self.config.background);
        renderer.clear();

        self.prompt.render(renderer);
        self.error.render(renderer);
        self.outputs.render(renderer);

        renderer.present()
    }

    /// Run until quit.
    ///
    /// Each iteration drains every pending event, polls joystick buttons,
    /// draws one frame and waits for the next tick. Only a failed present
    /// ends the loop early.
    pub fn run<R, E>(
        &mut self,
        renderer: &mut R,
        events: &mut E,
        ticker: &mut FrameTicker,
    ) -> Result<(), FatalError>
    where
        R: Renderer<Texture = T>,
        E: EventSource,
    {
        let mut text_input = self.input.is_capturing();
        events.set_text_input(text_input);
        info!(
            slots = self.outputs.capacity(),
            interval_us = ticker.interval().as_micros(),
            "console started"
        );

        loop {
            while let Some(event) = events.poll_event() {
                if let ConsoleEvent::Resized { width, height } = event {
                    renderer.resize(width, height);
                }
                if self.handle_event(event) == Flow::Quit {
                    info!("console stopped");
                    return Ok(());
                }
                if self.input.is_capturing() != text_input {
                    text_input = self.input.is_capturing();
                    events.set_text_input(text_input);
                }
            }
            self.poll_joysticks();

            self.render_frame(renderer)?;
            ticker.wait();
        }
    }

    /// Release every texture and surface. The lines stay empty until their
    /// text is set again.
    pub fn close(&mut self) {
        self.prompt.close();
        self.outputs.close();
        self.error.close();
    }

    /// The input buffer.
    pub const fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Text of the prompt line.
    pub fn prompt_text(&self) -> &str {
        self.prompt.text()
    }

    /// Text of the error line.
    pub fn error_text(&self) -> &str {
        self.error.text()
    }

    /// Text of each output slot, top to bottom.
    pub fn output_texts(&self) -> impl Iterator<Item = &str> {
        self.outputs.texts()
    }

    /// Open joystick handles.
    pub const fn joysticks(&self) -> &JoystickRegistry<J::Device> {
        &self.joysticks
    }

    fn refresh_prompt(&mut self) {
        let text = self.input.display_text(&self.config.empty_prompt);
        self.prompt.set_text(text, &self.shaper);
    }
}
