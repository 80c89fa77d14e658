//! Environment bootstrap loader.
//!
//! Responsibilities:
//! - Apply the override file (`.env`) to an environment store.
//! - Provide a builder-pattern `Bootstrapper` for the startup sequence.
//! - Enforce the `DOTENV_DISABLED` gate before any file is read.
//!
//! Does NOT handle:
//! - Logging setup details (see `logging`).
//! - Process-wide publication (see `published`).
//!
//! Invariants / Assumptions:
//! - Override file values replace values already in the environment.
//! - A missing override file leaves the store untouched.

mod builder;
mod env;
mod error;
mod override_file;

#[cfg(test)]
mod tests;

pub use builder::{BootstrapReport, Bootstrapper, ConfirmationMode, OverrideOutcome};
pub use env::{EnvStore, MemoryEnv, ProcessEnv, env_value};
pub use error::ConfigError;
pub use override_file::{
    Assignment, OverrideSyntax, ParsedOverrides, decode_lossy, parse_dotenv, parse_verbatim,
    read_override_file,
};
