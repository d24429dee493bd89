//! Platform seams: what the console needs from a display, an input source
//! and a joystick subsystem, plus the frame ticker that paces the loop.
//!
//! ```text
//!  EventSource ──ConsoleEvent──▶ ┌─────────┐ ──Surface──▶ Renderer
//!                                │ Console │
//!  JoystickBackend ◀──open────── └─────────┘
//! ```

mod backend;
mod event;
mod ticker;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{ButtonEvent, EventSource, JoystickBackend, JoystickDevice, Renderer};
pub use event::{ConsoleEvent, KeyCode, KeyModifiers};
pub use ticker::{FrameTicker, Tick};
