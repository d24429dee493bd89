//! Terminal backend: the console drawn on, and driven from, the controlling
//! terminal.
//!
//! - [`TerminalSession`] enters raw mode and the alternate screen, and undoes
//!   both on drop.
//! - [`TerminalRenderer`] composes frames in a cell buffer and writes ANSI
//!   diffs.
//! - [`TerminalEvents`] polls crossterm without blocking and scans for
//!   joysticks.
//! - [`PlatformJoysticks`] opens joystick devices where the OS allows it.

mod input;
mod joystick;
mod renderer;
mod session;

pub use input::{convert_event, TerminalEvents};
#[cfg(target_os = "linux")]
pub use joystick::{JsDevice, LinuxJoysticks};
pub use joystick::{
    parse_js_event, JoystickScan, NoDevice, NoJoysticks, PlatformJoysticks, DEVICE_DIR,
    JS_EVENT_SIZE,
};
pub use renderer::{color_mode_from, CellTexture, TerminalRenderer};
pub use session::TerminalSession;
