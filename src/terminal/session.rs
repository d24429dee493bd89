//! Terminal session: raw mode and friends for as long as the guard lives.

use crate::config::ConsoleConfig;
use crate::error::FatalError;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use tracing::{info, warn};

/// Puts the terminal into the state the console needs and restores it on
/// drop.
///
/// Raw mode, hidden cursor and bracketed paste always; the alternate screen
/// and keyboard enhancement when configured. Keyboard enhancement is what
/// lets Shift+Enter arrive as a distinct key.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    /// Enter the console's terminal state.
    ///
    /// If a step fails, the steps already taken are undone before the error
    /// is returned.
    pub fn start(config: &ConsoleConfig) -> Result<Self, FatalError> {
        terminal::enable_raw_mode().map_err(FatalError::Terminal)?;
        let mut session = Self {
            alternate_screen: false,
            keyboard_enhanced: false,
        };

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen).map_err(FatalError::Terminal)?;
            session.alternate_screen = true;
        }
        execute!(stdout, cursor::Hide, EnableBracketedPaste).map_err(FatalError::Terminal)?;

        if config.keyboard_enhancement {
            session.keyboard_enhanced = enable_keyboard_enhancement(&mut stdout);
        }

        info!(
            alternate_screen = session.alternate_screen,
            keyboard_enhanced = session.keyboard_enhanced,
            "terminal session started"
        );
        Ok(session)
    }

    /// Current terminal size in columns and rows.
    pub fn size(&self) -> Result<(u16, u16), FatalError> {
        terminal::size().map_err(FatalError::Terminal)
    }

    /// Whether Shift+Enter can be told apart from Enter.
    pub const fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }
}

fn enable_keyboard_enhancement(stdout: &mut io::Stdout) -> bool {
    match terminal::supports_keyboard_enhancement() {
        Ok(true) => {
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;
            match execute!(stdout, PushKeyboardEnhancementFlags(flags)) {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = %err, "cannot enable keyboard enhancement");
                    false
                }
            }
        }
        Ok(false) => {
            warn!("terminal lacks keyboard enhancement; use Alt+Enter or Ctrl+J for Shift+Enter");
            false
        }
        Err(err) => {
            warn!(error = %err, "cannot query keyboard enhancement");
            false
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, DisableBracketedPaste, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        info!("terminal session ended");
    }
}
