//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 is left to clap for usage errors.

use reelbot_config::ConfigError;

/// Structured exit codes for reelbot-env.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - the environment is usable.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// A required key is not set after the override file was applied.
    ///
    /// Deployments should set the variable or add it to the override file.
    MissingConfig = 3,

    /// The override file exists but could not be read or parsed.
    OverrideFileError = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingEnvVar(_) | ConfigError::MissingRequired { .. } => {
                ExitCode::MissingConfig
            }
            ConfigError::OverrideFileRead { .. }
            | ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::OverrideFileError,
            ConfigError::UnknownKey(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::MissingConfig.as_i32(), 3);
        assert_eq!(ExitCode::OverrideFileError.as_i32(), 4);
    }

    #[test]
    fn test_missing_required_maps_to_missing_config() {
        let err = anyhow::Error::new(ConfigError::MissingRequired {
            vars: vec!["DISCORD_TOKEN".to_string()],
        });

        assert_eq!(err.exit_code(), ExitCode::MissingConfig);
    }

    #[test]
    fn test_wrapped_override_error_is_found_in_chain() {
        let result: Result<(), ConfigError> = Err(ConfigError::OverrideFileRead {
            path: PathBuf::from(".env"),
            kind: ErrorKind::PermissionDenied,
        });

        let err = result.context("bootstrap failed").unwrap_err();

        assert_eq!(err.exit_code(), ExitCode::OverrideFileError);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("stdout closed");

        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
