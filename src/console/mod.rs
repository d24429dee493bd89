//! The console state machine.
//!
//! [`Console`] owns the prompt, the output grid and the error line, and
//! drives them from [`ConsoleEvent`]s:
//!
//! | Event                 | Effect                                        |
//! |-----------------------|-----------------------------------------------|
//! | text                  | appended to the buffer while capturing        |
//! | Backspace             | last character removed                        |
//! | Enter                 | buffer run as a command, capture stops        |
//! | Shift+Enter           | buffer cleared, capture restarts              |
//! | Esc, Ctrl+C, quit     | loop ends                                     |
//! | joystick added/removed| device opened/closed in the registry          |
//!
//! Terminals without keyboard enhancement cannot report Shift+Enter; the
//! terminal event source turns Alt+Enter and Ctrl+J into it there.
//!
//! [`ConsoleEvent`]: crate::platform::ConsoleEvent

mod controller;
mod dispatch;
mod input;
mod joysticks;

pub use controller::{Console, Flow};
pub use dispatch::{CommandDispatcher, CommandResult};
pub use input::InputBuffer;
pub use joysticks::{JoystickRegistry, MAX_JOYSTICKS};
