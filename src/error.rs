//! Error types.
//!
//! Only a [`FatalError`] ends the program. Everything
//! else degrades a single line on screen: a [`ShapeError`] or
//! [`RenderError`] blanks one slot, a [`DispatchError`] becomes the text of
//! the error line, a [`JoystickError`] leaves a registry slot empty.

use std::io;
use thiserror::Error;

/// Text could not be turned into a surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Nothing visible remains after shaping.
    #[error("text has zero width")]
    ZeroWidth,
    /// The text contains a NUL byte.
    #[error("text contains an interior NUL at byte {0}")]
    InteriorNul(usize),
}

/// The renderer could not create or present something.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A surface could not be turned into a texture.
    #[error("cannot create texture: {0}")]
    Texture(String),
    /// Writing the frame to the display failed.
    #[error("cannot present frame: {0}")]
    Present(#[from] io::Error),
}

/// A command line could not be run.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command line holds no program name.
    #[error("no command given")]
    EmptyCommand,
    /// The process could not be started.
    #[error("{program}: {source}")]
    Spawn {
        /// Program name as typed.
        program: String,
        /// OS error.
        #[source]
        source: io::Error,
    },
}

/// A joystick could not be opened.
#[derive(Debug, Error)]
pub enum JoystickError {
    /// Index outside the registry.
    #[error("joystick index {0} out of range")]
    OutOfRange(u32),
    /// The device could not be opened.
    #[error("cannot open joystick {index}: {source}")]
    Open {
        /// Device index.
        index: u32,
        /// OS error.
        #[source]
        source: io::Error,
    },
}

/// Fatal: the console could not start or had to stop.
#[derive(Debug, Error)]
pub enum FatalError {
    /// Raw mode, alternate screen or size query failed.
    #[error("cannot set up terminal: {0}")]
    Terminal(#[source] io::Error),
    /// Logging could not be installed.
    #[error("cannot initialize logging: {0}")]
    Logging(String),
    /// The frame loop stopped on a present failure.
    #[error(transparent)]
    Render(#[from] RenderError),
}
