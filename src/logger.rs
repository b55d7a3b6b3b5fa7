//! File logging for the `termspin` binary.
//!
//! Stderr belongs to the spinner, so diagnostics go to a log file under the
//! XDG state directory instead:
//!
//! ```text
//! $XDG_STATE_HOME/termspin/termspin.log   # ~/.local/state/termspin/termspin.log
//! ```
//!
//! Logging is off unless `-v` is passed or `TERMSPIN_LOG` holds a filter
//! directive (e.g. `TERMSPIN_LOG=termspin=trace`).

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TERMSPIN_LOG";
const LOG_FILE_NAME: &str = "termspin.log";

/// Map a `-v` count to a filter directive.
fn level_for_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("termspin=info"),
        2 => Some("termspin=debug"),
        _ => Some("termspin=trace"),
    }
}

/// Install the global subscriber.
///
/// Returns the appender guard, which must be held until exit so buffered
/// lines are flushed. `Ok(None)` means logging is disabled.
pub fn init(verbose: u8) -> Result<Option<WorkerGuard>> {
    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive.trim())
            .with_context(|| format!("Invalid {LOG_ENV_VAR} filter"))?,
        _ => match level_for_verbosity(verbose) {
            Some(directive) => EnvFilter::new(directive),
            None => return Ok(None),
        },
    };

    let dir = log_dir()?;
    fs::create_dir_all(&dir).context("Failed to create log directory")?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;

    Ok(Some(guard))
}

/// Log directory.
///
/// Checks XDG_STATE_HOME first, falls back to ~/.local/state.
pub fn log_dir() -> Result<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME")
        && !state_home.is_empty()
    {
        return Ok(PathBuf::from(state_home).join("termspin"));
    }

    if let Some(home_dir) = home::home_dir() {
        return Ok(home_dir.join(".local/state/termspin"));
    }

    anyhow::bail!("Could not determine state directory")
}
