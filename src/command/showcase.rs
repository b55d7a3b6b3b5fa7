//! Play built-in frame sets in sequence.

use anyhow::Result;
use console::style;
use std::thread;
use termspin::FrameStyle;
use termspin::Spinner;
use termspin::config::Config;

use crate::cli::ShowcaseArgs;

pub fn run(config: &Config, args: ShowcaseArgs) -> Result<()> {
    let styles = if args.styles.is_empty() {
        FrameStyle::ALL.to_vec()
    } else {
        args.styles
    };
    let interval = config.resolve_interval(args.interval)?;

    for frame_style in styles {
        let mut sp = Spinner::new(format!("Testing {frame_style} animation..."))
            .with_style(frame_style)
            .with_interval(interval)?;

        sp.start();
        thread::sleep(args.duration);
        sp.stop();

        println!("{} {frame_style} complete", style("✓").green());
    }

    Ok(())
}
