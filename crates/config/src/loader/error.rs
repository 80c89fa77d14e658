//! Error types for the environment bootstrap.
//!
//! Responsibilities:
//! - Define error variants for every fatal bootstrap failure.
//! - Map `dotenvy` errors to variants that never carry file contents.
//!
//! Does NOT handle:
//! - Missing override files or malformed lines (those are not errors).
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths, etc.).
//! - Override file errors NEVER include raw line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while bootstrapping the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Missing required environment variables: {}", .vars.join(", "))]
    MissingRequired { vars: Vec<String> },

    #[error(
        "Unknown configuration key '{0}' (expected DISCORD_TOKEN, TMDB_API_KEY or COHERE_API_KEY)"
    )]
    UnknownKey(String),

    /// The override file exists but could not be read.
    #[error("Failed to read override file at {path}: {kind}")]
    OverrideFileRead { path: PathBuf, kind: ErrorKind },

    /// Failed to parse the override file in dotenv syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// I/O error surfaced by the dotenv parser.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl From<dotenvy::Error> for ConfigError {
    fn from(error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_lists_every_variable() {
        let err = ConfigError::MissingRequired {
            vars: vec!["DISCORD_TOKEN".to_string(), "COHERE_API_KEY".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Missing required environment variables: DISCORD_TOKEN, COHERE_API_KEY"
        );
    }

    #[test]
    fn test_dotenv_line_parse_drops_line_content() {
        let err = ConfigError::from(dotenvy::Error::LineParse(
            "SECRET=\"unterminated".to_string(),
            7,
        ));

        assert!(matches!(err, ConfigError::DotenvParse { error_index: 7 }));
        assert!(!err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_override_file_read_mentions_path_and_kind() {
        let err = ConfigError::OverrideFileRead {
            path: PathBuf::from("/srv/bot/.env"),
            kind: ErrorKind::PermissionDenied,
        };

        let message = err.to_string();
        assert!(message.contains("/srv/bot/.env"), "got: {message}");
        assert!(message.contains("permission denied"), "got: {message}");
    }
}
