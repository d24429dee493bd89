//! Compiled-in console configuration.
//!
//! There is no configuration file and no command-line surface; everything the
//! console can be tuned with lives in [`ConsoleConfig::default`].

use crate::buffer::{Rgb, Rgba};
use std::time::Duration;

/// Where the prompt, output slots and error line sit on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Left margin in columns for every line.
    pub margin_x: u16,
    /// Row of the prompt line.
    pub prompt_row: u16,
    /// Row of the first output slot.
    pub first_output_row: u16,
    /// Rows between consecutive output slots.
    pub output_row_step: u16,
    /// Blank rows kept between the last output slot and the error line.
    pub error_gap: u16,
    /// Upper bound on output slots regardless of display height.
    pub max_output_slots: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_x: 1,
            prompt_row: 1,
            first_output_row: 3,
            output_row_step: 1,
            error_gap: 1,
            max_output_slots: 40,
        }
    }
}

/// Configuration for the console.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Time between frames (~30 Hz).
    pub frame_interval: Duration,
    /// Color the frame is cleared with.
    pub background: Rgb,
    /// Prompt and output text color.
    pub text_color: Rgba,
    /// Error line color.
    pub error_color: Rgba,
    /// Shown in the prompt while the buffer is empty.
    pub empty_prompt: String,
    /// Shown in the prompt when capture is re-armed.
    pub capture_prompt: String,
    /// Shown in output slots without content.
    pub empty_slot: String,
    /// Shown in the error line before any error arrived.
    pub empty_error: String,
    /// Slot placement.
    pub layout: LayoutConfig,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Ask the terminal for disambiguated key reports so Shift+Enter is
    /// distinguishable from Enter.
    pub keyboard_enhancement: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_micros(33_333),
            background: Rgb::BLACK,
            text_color: Rgba::new(200, 200, 200, 255),
            error_color: Rgba::new(200, 0, 0, 255),
            empty_prompt: String::from(">"),
            capture_prompt: String::from("Enter command..."),
            empty_slot: String::from("---"),
            empty_error: String::from("."),
            layout: LayoutConfig::default(),
            alternate_screen: true,
            keyboard_enhancement: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_rate_is_about_30hz() {
        let config = ConsoleConfig::default();
        let fps = 1.0 / config.frame_interval.as_secs_f64();
        assert!((fps - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_default_placeholders() {
        let config = ConsoleConfig::default();
        assert_eq!(config.empty_prompt, ">");
        assert_eq!(config.empty_slot, "---");
        assert_eq!(config.empty_error, ".");
        assert_eq!(config.capture_prompt, "Enter command...");
    }
}
