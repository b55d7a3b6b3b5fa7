use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use termspin::FrameStyle;

#[derive(Parser)]
#[command(
    name = "termspin",
    about = "Animated terminal spinners for long-running commands",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/termspin/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to the state directory (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a spinner for a fixed time
    Run(RunArgs),

    /// Play built-in frame sets one after another
    Showcase(ShowcaseArgs),

    /// List the built-in frame sets
    Frames {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a command with a spinner until it exits
    Exec(ExecArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Spinner appearance shared by several commands.
#[derive(Args, Clone, Default)]
pub struct SpinnerArgs {
    /// Text shown next to the animation
    #[arg(short, long)]
    pub message: Option<String>,

    /// Built-in frame set
    #[arg(short, long, value_enum)]
    pub style: Option<FrameStyle>,

    /// Milliseconds between frames
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub spinner: SpinnerArgs,

    /// Seconds to spin
    #[arg(short, long, default_value = "2", value_parser = parse_seconds)]
    pub duration: Duration,

    /// Message to switch to partway through; repeat for more steps
    #[arg(long = "step", value_name = "TEXT")]
    pub steps: Vec<String>,

    /// Render into memory and print the raw bytes afterwards
    #[arg(long)]
    pub capture: bool,
}

#[derive(Args)]
pub struct ShowcaseArgs {
    /// Seconds per frame set
    #[arg(short, long, default_value = "1.5", value_parser = parse_seconds)]
    pub duration: Duration,

    /// Only these frame sets (default: all)
    #[arg(short, long = "style", value_enum)]
    pub styles: Vec<FrameStyle>,

    /// Milliseconds between frames
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,
}

#[derive(Args)]
pub struct ExecArgs {
    #[command(flatten)]
    pub spinner: SpinnerArgs,

    /// Directory to run the command in
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Command and arguments, after `--`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration `{s}`: {e}"))
}
