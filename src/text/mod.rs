//! Text module: shaping strings into drawable surfaces.
//!
//! A [`Surface`] is the console's pixel buffer: a line of glyphs with a draw
//! color whose alpha has not been applied yet. Renderers turn surfaces into
//! textures.

mod font;
mod surface;

pub use font::{CellFont, TextShaper};
pub use surface::{Glyph, Surface};
