//! # padterm
//!
//! A full-screen command console for the terminal.
//!
//! Type a command, press Enter, and its standard output fills a fixed grid
//! of lines below the prompt; the first line of its standard error replaces
//! the error line at the bottom. Shift+Enter clears the prompt for the next
//! command (Alt+Enter or Ctrl+J on terminals that cannot report it), Esc
//! leaves. Joysticks are opened as they are plugged in.
//!
//! ## Core Concepts
//!
//! - **Text slots**: every line on screen is a [`TextSlot`] that caches the
//!   texture made from its current text and rebuilds it only when the text
//!   changes
//! - **Fixed grid**: the number of output lines is computed once from the
//!   terminal height; extra output is dropped
//! - **Backend traits**: the [`Console`] talks to a [`Renderer`], an
//!   [`EventSource`] and a [`JoystickBackend`]; the [`terminal`] module
//!   implements them with crossterm
//! - **Double-buffered frames**: the terminal renderer writes only the cells
//!   that changed since the last frame
//!
//! ## Example
//!
//! ```rust,ignore
//! use padterm::{Console, ConsoleConfig, ConsoleLayout, FrameTicker};
//! use padterm::terminal::{PlatformJoysticks, TerminalEvents, TerminalRenderer};
//! use padterm::text::CellFont;
//!
//! let config = ConsoleConfig::default();
//! let layout = ConsoleLayout::compute(24, &config.layout);
//! let mut ticker = FrameTicker::new(config.frame_interval);
//! let mut console = Console::new(config, &layout, CellFont::bundled(), PlatformJoysticks::default());
//! console.run(&mut TerminalRenderer::stdout(80, 24), &mut TerminalEvents::new(), &mut ticker)?;
//! ```
//!
//! [`Renderer`]: platform::Renderer
//! [`EventSource`]: platform::EventSource
//! [`JoystickBackend`]: platform::JoystickBackend

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod config;
pub mod console;
pub mod error;
pub mod layout;
pub mod logging;
pub mod platform;
pub mod terminal;
pub mod text;
pub mod widget;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, CellFlags, Modifiers, Rgb, Rgba};
pub use config::{ConsoleConfig, LayoutConfig};
pub use console::{CommandDispatcher, CommandResult, Console, Flow, InputBuffer, JoystickRegistry};
pub use error::{DispatchError, FatalError, JoystickError, RenderError, ShapeError};
pub use layout::{ConsoleLayout, Position, Rect};
pub use platform::{ConsoleEvent, FrameTicker, KeyCode, KeyModifiers};
pub use widget::{OutputGrid, TextSlot};
