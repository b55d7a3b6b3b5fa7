//! Show a single spinner for a fixed time.

use anyhow::Result;
use console::{strip_ansi_codes, style};
use std::thread;
use termspin::SharedBuffer;
use termspin::config::Config;

use super::build_spinner;
use crate::cli::RunArgs;

pub fn run(config: &Config, args: RunArgs) -> Result<()> {
    let message = config.resolve_message(args.spinner.message.as_deref());
    let mut sp = build_spinner(config, &args.spinner, message)?;

    let capture = args.capture.then(SharedBuffer::new);
    if let Some(buf) = &capture {
        sp.set_writer(buf.clone());
    }

    sp.start();
    if args.steps.is_empty() {
        thread::sleep(args.duration);
    } else {
        // Initial message plus one slice per step
        let slices = u32::try_from(args.steps.len() + 1).unwrap_or(u32::MAX);
        let slice = args.duration / slices;
        thread::sleep(slice);
        for step in &args.steps {
            sp.update_message(step.as_str());
            thread::sleep(slice);
        }
    }
    sp.stop();

    println!("{} Done", style("✓").green());

    if let Some(buf) = capture {
        let raw = buf.to_string_lossy();
        println!();
        println!("{} ({} bytes)", style("Captured output").bold(), buf.len());
        println!("{}", raw.escape_debug());
        println!();
        println!("{}", style("Rendered frames").bold());
        for line in strip_ansi_codes(&raw).split('\r').filter(|l| !l.is_empty()) {
            println!("  {line}");
        }
    }

    Ok(())
}
