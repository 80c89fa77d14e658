//! Environment bootstrap for reelbot.
//!
//! This crate configures logging, applies the local `.env` override file to
//! the process environment, and publishes the bot's secrets (Discord token,
//! TMDB key, Cohere key) for the rest of the application.

pub mod constants;
mod loader;
pub mod logging;
pub mod published;
pub mod types;

pub use loader::{
    Assignment, BootstrapReport, Bootstrapper, ConfigError, ConfirmationMode, EnvStore,
    MemoryEnv, OverrideOutcome, OverrideSyntax, ParsedOverrides, ProcessEnv, decode_lossy,
    env_value, parse_dotenv, parse_verbatim, read_override_file,
};
pub use logging::{LogFormat, LoggingInit, init_logging};
pub use published::bootstrap;
pub use types::{ConfigKey, Settings};
