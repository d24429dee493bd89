//! padterm: a full-screen command console.

use padterm::terminal::{PlatformJoysticks, TerminalEvents, TerminalRenderer, TerminalSession};
use padterm::text::CellFont;
use padterm::{logging, Console, ConsoleConfig, ConsoleLayout, FatalError, FrameTicker};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("padterm: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "padterm stopped");
            eprintln!("padterm: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Set up the terminal and run the console until quit. The terminal is
/// restored before this returns, so errors print on the normal screen.
fn run() -> Result<(), FatalError> {
    let config = ConsoleConfig::default();
    let session = TerminalSession::start(&config)?;
    let (width, height) = session.size()?;

    let layout = ConsoleLayout::compute(height, &config.layout);
    info!(width, height, slots = layout.capacity(), "layout computed");

    let mut ticker = FrameTicker::new(config.frame_interval);
    let mut renderer = TerminalRenderer::stdout(width, height);
    let mut events =
        TerminalEvents::new().with_keyboard_enhancement(session.keyboard_enhanced());
    let mut console = Console::new(
        config,
        &layout,
        CellFont::bundled(),
        PlatformJoysticks::default(),
    );

    let result = console.run(&mut renderer, &mut events, &mut ticker);
    console.close();
    drop(session);
    result
}
