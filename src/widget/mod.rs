//! Widgets: text slots and the output grid built from them.
//!
//! Widgets are generic over the texture type of the [`Renderer`] they are
//! drawn with, so the same widget code drives the terminal and the in-memory
//! renderer used in tests.
//!
//! [`Renderer`]: crate::platform::Renderer

mod output_grid;
mod text_slot;

pub use output_grid::OutputGrid;
pub use text_slot::TextSlot;
