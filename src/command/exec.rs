//! Run an external command behind a spinner.

use anyhow::{Context, Result, anyhow, bail};
use console::style;
use std::io::{self, Write};
use termspin::cmd::Cmd;
use termspin::config::Config;
use tracing::info;

use super::build_spinner;
use crate::cli::ExecArgs;

pub fn run(config: &Config, args: ExecArgs) -> Result<()> {
    let (program, rest) = args
        .command
        .split_first()
        .ok_or_else(|| anyhow!("No command given"))?;

    which::which(program).with_context(|| format!("Command not found: {program}"))?;

    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    let mut cmd = Cmd::new(program).args(&rest);
    if let Some(dir) = &args.cwd {
        if !dir.is_dir() {
            bail!("Not a directory: {}", dir.display());
        }
        cmd = cmd.workdir(dir);
    }

    let message = args
        .spinner
        .message
        .clone()
        .or_else(|| config.message.clone())
        .unwrap_or_else(|| format!("Running {}...", cmd.display()));
    let mut sp = build_spinner(config, &args.spinner, message)?;

    sp.start();
    let result = cmd.output();
    // Terminal must be clean before any child output is echoed
    sp.stop();

    let output = result?;
    io::stdout().write_all(&output.stdout)?;
    io::stderr().write_all(&output.stderr)?;

    info!(command = %cmd.display(), status = ?output.status.code(), "exec:finished");

    if output.status.success() {
        println!("{} {}", style("✓").green(), cmd.display());
        return Ok(());
    }

    eprintln!("{} {}", style("✗").red(), cmd.display());
    match output.status.code() {
        Some(code) => bail!("Command exited with status {code}"),
        None => bail!("Command terminated by signal"),
    }
}
