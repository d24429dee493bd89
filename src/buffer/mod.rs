//! Buffer module: the cell grid the console draws into.
//!
//! - [`Cell`]: one character position, 16 bytes
//! - [`Buffer`]: the frame, a grid of cells
//! - [`Rgb`] / [`Rgba`]: stored and drawn colors
//! - [`Modifiers`]: text style bitflags
//! - [`diff`]: minimal ANSI output between two frames

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use buffer::Buffer;
pub use cell::{grapheme_width, Cell, CellFlags, Modifiers, Rgb, Rgba};
