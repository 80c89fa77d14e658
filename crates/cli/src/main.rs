//! reelbot-env - Inspect the environment the bot starts with.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Run the same startup bootstrap as the bot (logging, `.env`, key publication).
//! - Report configuration health with structured exit codes.
//!
//! Does NOT handle:
//! - Bot runtime behavior; nothing here talks to Discord, TMDB or Cohere.
//!
//! Invariants:
//! - The bootstrap runs after CLI parsing because `--env-file` selects the file.
//! - Reports go to stdout, logs go to stderr.

mod args;
mod commands;
mod error;

use args::{Cli, Commands};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use reelbot_config::Bootstrapper;

fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let bootstrapper = Bootstrapper::new()
        .with_env_file(&cli.env_file)
        .with_syntax(cli.syntax.into())
        .with_log_format(cli.log_format.into())
        .with_confirmation(cli.confirmation_mode());

    match cli.command {
        Commands::Check {
            require,
            strict,
            output,
        } => commands::check::run(bootstrapper, &require, strict, output),
        Commands::Keys { output } => commands::keys::run(output),
    }
}
