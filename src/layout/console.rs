//! Console layout: where every text line lives for a given display size.
//!
//! Computed once at startup. The number of output slots is fixed from then
//! on; a later resize moves nothing.

use crate::config::LayoutConfig;

/// Top-left cell of a text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Positions of the prompt, the output slots and the error line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLayout {
    /// Prompt line.
    pub prompt: Position,
    /// Output slots, top to bottom.
    pub slots: Vec<Position>,
    /// Error line.
    pub error: Position,
}

impl ConsoleLayout {
    /// Lay out a display of `height` rows.
    ///
    /// The error line takes the last row. Output slots start at
    /// `first_output_row` and continue while they stay above the error gap,
    /// up to `max_output_slots`.
    pub fn compute(height: u16, config: &LayoutConfig) -> Self {
        let error_row = height.saturating_sub(1);
        let limit = error_row.saturating_sub(config.error_gap);
        let step = config.output_row_step.max(1);

        let slots = (0..config.max_output_slots)
            .map_while(|i| {
                let offset = u16::try_from(i).ok()?.checked_mul(step)?;
                let y = config.first_output_row.checked_add(offset)?;
                (y < limit).then(|| Position::new(config.margin_x, y))
            })
            .collect();

        Self {
            prompt: Position::new(config.margin_x, config.prompt_row),
            slots,
            error: Position::new(config.margin_x, error_row),
        }
    }

    /// Number of output slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
