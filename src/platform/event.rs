//! Input events delivered to the console.
//!
//! The set is closed: every backend translates whatever its platform reports
//! into one of these variants, and the controller matches on all of them.

use bitflags::bitflags;

/// Key codes the console distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character (only seen while text input is off).
    Char(char),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Esc,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Arrow keys and anything else without a console meaning.
    Other,
}

bitflags! {
    /// Modifier mask held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0000_0001;
        /// Control key held.
        const CONTROL = 0b0000_0010;
        /// Alt/Option key held.
        const ALT = 0b0000_0100;
        /// Super/Command/Windows key held.
        const SUPER = 0b0000_1000;
    }
}

/// Events from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// The user closed the console.
    Quit,

    /// A key was pressed.
    KeyDown {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during the press.
        modifiers: KeyModifiers,
    },

    /// Composed text, delivered only while text input is enabled.
    TextInput(String),

    /// A joystick button changed state.
    JoyButton {
        /// Device index.
        which: u32,
        /// Button number.
        button: u8,
        /// `true` on press, `false` on release.
        pressed: bool,
    },

    /// A joystick appeared at `which`.
    JoyAdded {
        /// Device index.
        which: u32,
    },

    /// The joystick at `which` went away.
    JoyRemoved {
        /// Device index.
        which: u32,
    },

    /// The display changed size.
    Resized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl ConsoleEvent {
    /// Shorthand for a key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::KeyDown {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Shorthand for a composed text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::TextInput(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shorthand_has_no_modifiers() {
        assert_eq!(
            ConsoleEvent::key(KeyCode::Enter),
            ConsoleEvent::KeyDown {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::empty()
            }
        );
    }

    #[test]
    fn test_modifier_mask() {
        let mods = KeyModifiers::SHIFT | KeyModifiers::CONTROL;
        assert!(mods.contains(KeyModifiers::SHIFT));
        assert_ne!(mods, KeyModifiers::SHIFT);
    }
}
