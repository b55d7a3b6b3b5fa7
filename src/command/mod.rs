//! Subcommand implementations for the `termspin` binary.

pub mod exec;
pub mod frames;
pub mod run;
pub mod showcase;

use anyhow::Result;
use termspin::Spinner;
use termspin::config::Config;

use crate::cli::SpinnerArgs;

/// Build a spinner from CLI flags layered over the config file.
fn build_spinner(config: &Config, args: &SpinnerArgs, message: String) -> Result<Spinner> {
    let frames = config.resolve_frames(args.style)?;
    let interval = config.resolve_interval(args.interval)?;
    let sp = Spinner::new(message)
        .with_frames(frames)
        .with_interval(interval)?;
    Ok(sp)
}
