use anyhow::Result;
use clap::{CommandFactory, Parser};
use termspin::config::Config;
use termspin::logger;

mod cli;
mod command;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logger::init(cli.verbose)?;

    match cli.command {
        Commands::Run(args) => {
            let config = Config::load(cli.config.as_deref())?;
            command::run::run(&config, args)
        }
        Commands::Showcase(args) => {
            let config = Config::load(cli.config.as_deref())?;
            command::showcase::run(&config, args)
        }
        Commands::Frames { json } => command::frames::run(json),
        Commands::Exec(args) => {
            let config = Config::load(cli.config.as_deref())?;
            command::exec::run(&config, args)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "termspin", &mut std::io::stdout());
            Ok(())
        }
    }
}
