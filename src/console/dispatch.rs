//! Command dispatcher: runs a command line as a child process.
//!
//! The line is split on whitespace into a program and its arguments. There is
//! no shell: no quoting, globbing or pipes. The child gets a closed stdin and
//! the console blocks until it exits.

use crate::error::DispatchError;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// What a command wrote, split into lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Standard output lines, in order.
    pub stdout: Vec<String>,
    /// Standard error lines, in order.
    pub stderr: Vec<String>,
}

impl CommandResult {
    /// A result carrying only a failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: vec![message.into()],
        }
    }

    /// First stderr line, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.stderr.first().map(String::as_str)
    }
}

/// Runs command lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Create a dispatcher.
    pub const fn new() -> Self {
        Self
    }

    /// Run `line` and collect its output. Never fails: a line that cannot be
    /// run yields a single stderr line saying why.
    pub fn execute(&self, line: &str) -> CommandResult {
        match spawn(line) {
            Ok(output) => collect(&output),
            Err(err) => {
                debug!(command = line, error = %err, "command failed to start");
                CommandResult::failure(err.to_string())
            }
        }
    }
}

fn spawn(line: &str) -> Result<Output, DispatchError> {
    let mut words = line.split_whitespace();
    let program = words.next().ok_or(DispatchError::EmptyCommand)?;

    debug!(program, "running command");
    let output = Command::new(program)
        .args(words)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| DispatchError::Spawn {
            program: program.to_owned(),
            source,
        })?;

    debug!(program, status = %output.status, "command exited");
    Ok(output)
}

fn collect(output: &Output) -> CommandResult {
    CommandResult {
        stdout: split_lines(&output.stdout),
        stderr: split_lines(&output.stderr),
    }
}

/// Lossy UTF-8 decode, split on `\n` or `\r\n`. A trailing newline does not
/// add an empty line.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_owned)
        .collect()
}
