//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Map CLI value enums onto the bootstrap library's option types.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not read the override file (the bootstrapper does).

use clap::{Parser, Subcommand, ValueEnum};
use reelbot_config::constants::DEFAULT_ENV_FILE;
use reelbot_config::{ConfigKey, ConfirmationMode, LogFormat, OverrideSyntax};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelbot-env")]
#[command(about = "Inspect the reelbot startup environment", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  reelbot-env check\n  reelbot-env check --strict\n  reelbot-env --env-file deploy/.env check --require DISCORD_TOKEN -o json\n  reelbot-env keys\n"
)]
pub struct Cli {
    /// Path to the override file, relative to the working directory
    #[arg(
        long,
        global = true,
        env = "REELBOT_ENV_FILE",
        default_value = DEFAULT_ENV_FILE,
        value_name = "FILE"
    )]
    pub env_file: PathBuf,

    /// Override file syntax
    #[arg(long, global = true, value_enum, default_value_t = SyntaxArg::Verbatim)]
    pub syntax: SyntaxArg,

    /// Log "TMDB_API_KEY loaded" even when the key is not set (pre-1.0 behavior)
    #[arg(long, global = true)]
    pub legacy_confirmation: bool,

    /// Log line format (logs are written to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Plain)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn confirmation_mode(&self) -> ConfirmationMode {
        if self.legacy_confirmation {
            ConfirmationMode::Legacy
        } else {
            ConfirmationMode::Accurate
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the startup bootstrap and report which keys are set
    Check {
        /// Fail if this key is not set (repeatable, e.g. DISCORD_TOKEN)
        #[arg(long = "require", value_name = "KEY")]
        require: Vec<ConfigKey>,

        /// Fail if any recognized key is not set
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// List the configuration keys the bot reads
    Keys {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyntaxArg {
    /// One KEY=value per line, value kept verbatim
    Verbatim,
    /// Quotes, comments and `export` prefixes
    Dotenv,
}

impl From<SyntaxArg> for OverrideSyntax {
    fn from(arg: SyntaxArg) -> Self {
        match arg {
            SyntaxArg::Verbatim => OverrideSyntax::Verbatim,
            SyntaxArg::Dotenv => OverrideSyntax::Dotenv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Plain,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Plain => LogFormat::Plain,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
