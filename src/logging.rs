//! Logging to a file.
//!
//! The terminal is the display, so log lines go to `padterm.log` in
//! `$PADTERM_LOG_DIR`, or the system temp directory when unset. `RUST_LOG`
//! selects what is recorded; the default is `info`.

use crate::error::FatalError;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Log file name.
pub const LOG_FILE: &str = "padterm.log";

/// Variable overriding the log directory.
pub const LOG_DIR_VAR: &str = "PADTERM_LOG_DIR";

/// Directory the log file is written to.
pub fn log_dir() -> PathBuf {
    env::var_os(LOG_DIR_VAR).map_or_else(env::temp_dir, PathBuf::from)
}

/// Install the global subscriber writing to [`LOG_FILE`] in [`log_dir`].
///
/// Keep the returned guard alive until exit; dropping it flushes pending
/// lines.
pub fn init() -> Result<WorkerGuard, FatalError> {
    let dir = log_dir();
    let appender = file_appender(&dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| FatalError::Logging(err.to_string()))?;

    install_panic_hook();
    tracing::info!(dir = %dir.display(), "logging started");
    Ok(guard)
}

/// Open [`LOG_FILE`] in `dir` for appending, creating the directory if
/// needed.
fn file_appender(dir: &Path) -> Result<RollingFileAppender, FatalError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .map_err(|err| FatalError::Logging(format!("{}: {err}", dir.display())))
}

/// Record panics in the log before the default hook runs.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(%info, "panic");
            default_panic(info);
        }));
    });
}
