//! Terminal input: crossterm events translated into console events.

use super::joystick::{JoystickScan, DEVICE_DIR};
use crate::platform::{ConsoleEvent, EventSource, KeyCode, KeyModifiers};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::warn;

/// Non-blocking event source over the controlling terminal.
///
/// Once the terminal queue is empty, each poll cycle also scans for joysticks
/// that came or went.
///
/// Without keyboard enhancement the terminal sends Shift+Enter as a bare
/// Enter. Alt+Enter and Ctrl+J then stand in for it.
#[derive(Debug)]
pub struct TerminalEvents {
    text_input: bool,
    keyboard_enhanced: bool,
    scan: Option<JoystickScan>,
    scanned: bool,
    pending: VecDeque<ConsoleEvent>,
}

impl TerminalEvents {
    /// Events from the terminal, with joystick scanning where the platform
    /// has joystick device nodes.
    pub fn new() -> Self {
        let scan = cfg!(target_os = "linux").then(|| JoystickScan::new(DEVICE_DIR));
        Self::with_scan(scan)
    }

    /// Events from the terminal with the given joystick scan, if any.
    pub const fn with_scan(scan: Option<JoystickScan>) -> Self {
        Self {
            text_input: false,
            keyboard_enhanced: false,
            scan,
            scanned: false,
            pending: VecDeque::new(),
        }
    }

    /// Declare whether the terminal reports Shift+Enter itself. When it does
    /// not, the stand-in chords are translated.
    #[must_use]
    pub fn with_keyboard_enhancement(mut self, enhanced: bool) -> Self {
        self.keyboard_enhanced = enhanced;
        self
    }

    fn read_terminal(&self) -> Option<ConsoleEvent> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => {
                    warn!(error = %err, "cannot poll terminal");
                    return None;
                }
            }
            match event::read() {
                Ok(raw) => {
                    let converted = convert_event(raw, self.text_input, self.keyboard_enhanced);
                    if let Some(event) = converted {
                        return Some(event);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "cannot read terminal event");
                    return None;
                }
            }
        }
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalEvents {
    fn poll_event(&mut self) -> Option<ConsoleEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        if let Some(event) = self.read_terminal() {
            return Some(event);
        }

        if !self.scanned {
            self.scanned = true;
            if let Some(scan) = &mut self.scan {
                self.pending.extend(scan.scan());
            }
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
        }
        self.scanned = false;
        None
    }

    fn set_text_input(&mut self, enabled: bool) {
        self.text_input = enabled;
    }
}

/// Translate one crossterm event. Returns `None` for events the console has
/// no use for.
///
/// `keyboard_enhanced` is false on terminals that cannot report Shift+Enter;
/// Alt+Enter and Ctrl+J are read as Shift+Enter there.
pub fn convert_event(
    event: Event,
    text_input: bool,
    keyboard_enhanced: bool,
) -> Option<ConsoleEvent> {
    match event {
        Event::Key(key) if !keyboard_enhanced && is_shift_enter_chord(key) => {
            Some(ConsoleEvent::KeyDown {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::SHIFT,
            })
        }
        Event::Key(key) => convert_key(key, text_input),
        Event::Paste(text) => Some(ConsoleEvent::TextInput(text)),
        Event::Resize(width, height) => Some(ConsoleEvent::Resized { width, height }),
        _ => None,
    }
}

// In raw mode Ctrl+J arrives as a control character, not a newline.
fn is_shift_enter_chord(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        event::KeyCode::Enter => key.modifiers == event::KeyModifiers::ALT,
        event::KeyCode::Char('j') => key.modifiers == event::KeyModifiers::CONTROL,
        _ => false,
    }
}

fn convert_key(key: KeyEvent, text_input: bool) -> Option<ConsoleEvent> {
    // Release and repeat reports only arrive with keyboard enhancement.
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let modifiers = convert_modifiers(key.modifiers);
    let code = match key.code {
        event::KeyCode::Char(c) => {
            let composing = !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if text_input && composing {
                return Some(ConsoleEvent::TextInput(c.to_string()));
            }
            KeyCode::Char(c)
        }
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Delete => KeyCode::Delete,
        _ => KeyCode::Other,
    };
    Some(ConsoleEvent::KeyDown { code, modifiers })
}

fn convert_modifiers(modifiers: event::KeyModifiers) -> KeyModifiers {
    let mut result = KeyModifiers::empty();
    if modifiers.contains(event::KeyModifiers::SHIFT) {
        result |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(event::KeyModifiers::CONTROL) {
        result |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(event::KeyModifiers::ALT) {
        result |= KeyModifiers::ALT;
    }
    if modifiers.contains(event::KeyModifiers::SUPER) {
        result |= KeyModifiers::SUPER;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: event::KeyCode, modifiers: event::KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_printable_key_becomes_text_while_capturing() {
        let event = key(event::KeyCode::Char('A'), event::KeyModifiers::SHIFT);
        assert_eq!(convert_event(event, true, true), Some(ConsoleEvent::text("A")));
    }

    #[test]
    fn test_printable_key_is_key_down_when_not_capturing() {
        let event = key(event::KeyCode::Char('a'), event::KeyModifiers::NONE);
        assert_eq!(
            convert_event(event, false, true),
            Some(ConsoleEvent::key(KeyCode::Char('a')))
        );
    }

    #[test]
    fn test_ctrl_c_is_never_text() {
        let event = key(event::KeyCode::Char('c'), event::KeyModifiers::CONTROL);
        assert_eq!(
            convert_event(event, true, true),
            Some(ConsoleEvent::KeyDown {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL
            })
        );
    }

    #[test]
    fn test_shift_enter_keeps_modifier() {
        let event = key(event::KeyCode::Enter, event::KeyModifiers::SHIFT);
        assert_eq!(
            convert_event(event, true, true),
            Some(ConsoleEvent::KeyDown {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::SHIFT
            })
        );
    }

    #[test]
    fn test_release_ignored() {
        let event = Event::Key(KeyEvent {
            code: event::KeyCode::Enter,
            modifiers: event::KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(convert_event(event, true, true), None);
    }

    #[test]
    fn test_paste_is_text() {
        let paste = Event::Paste(String::from("ls -la"));
        assert_eq!(
            convert_event(paste, false, true),
            Some(ConsoleEvent::text("ls -la"))
        );
    }

    #[test]
    fn test_resize_and_unknown_keys() {
        assert_eq!(
            convert_event(Event::Resize(120, 40), false, true),
            Some(ConsoleEvent::Resized {
                width: 120,
                height: 40
            })
        );
        assert_eq!(
            convert_event(
                key(event::KeyCode::Left, event::KeyModifiers::NONE),
                true,
                true
            ),
            Some(ConsoleEvent::key(KeyCode::Other))
        );
        assert_eq!(convert_event(Event::FocusGained, true, true), None);
    }

    #[test]
    fn test_stand_in_chords_read_as_shift_enter_without_enhancement() {
        let shift_enter = Some(ConsoleEvent::KeyDown {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::SHIFT,
        });
        let alt_enter = key(event::KeyCode::Enter, event::KeyModifiers::ALT);
        let ctrl_j = key(event::KeyCode::Char('j'), event::KeyModifiers::CONTROL);
        assert_eq!(convert_event(alt_enter, false, false), shift_enter);
        assert_eq!(convert_event(ctrl_j, true, false), shift_enter);
    }

    #[test]
    fn test_stand_in_chords_untouched_with_enhancement() {
        let alt_enter = key(event::KeyCode::Enter, event::KeyModifiers::ALT);
        assert_eq!(
            convert_event(alt_enter, false, true),
            Some(ConsoleEvent::KeyDown {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::ALT
            })
        );
        let ctrl_j = key(event::KeyCode::Char('j'), event::KeyModifiers::CONTROL);
        assert_eq!(
            convert_event(ctrl_j, true, true),
            Some(ConsoleEvent::KeyDown {
                code: KeyCode::Char('j'),
                modifiers: KeyModifiers::CONTROL
            })
        );
    }

    #[test]
    fn test_plain_enter_still_submits_without_enhancement() {
        let enter = key(event::KeyCode::Enter, event::KeyModifiers::NONE);
        assert_eq!(
            convert_event(enter, false, false),
            Some(ConsoleEvent::key(KeyCode::Enter))
        );
        let plain_j = key(event::KeyCode::Char('j'), event::KeyModifiers::NONE);
        assert_eq!(
            convert_event(plain_j, true, false),
            Some(ConsoleEvent::text("j"))
        );
    }
}
