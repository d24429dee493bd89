//! Layout module: static placement of the console's text lines.
//!
//! Placement is computed once from the display size; there is no layout
//! pass at render time.

mod console;
mod rect;

pub use console::{ConsoleLayout, Position};
pub use rect::Rect;
