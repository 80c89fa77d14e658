//! Environment bootstrapper builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `Bootstrapper` for the startup sequence.
//! - Run the sequence: logging, override file, publication, confirmation.
//! - Enforce the optional required-key policy.
//!
//! Does NOT handle:
//! - Override file parsing (delegated to override_file.rs).
//! - Process-wide publication of the result (see `published`).
//!
//! Invariants / Assumptions:
//! - The override file is read at most once per `run()`.
//! - The `DOTENV_DISABLED` variable is checked before the file is read.
//! - Missing keys are not an error unless required via `require()`/`require_all()`.
//! - `ConfirmationMode::Legacy` must be chosen explicitly.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::env::{EnvStore, ProcessEnv, dotenv_disabled};
use super::error::ConfigError;
use super::override_file::{OverrideSyntax, read_override_file};
use crate::constants::DEFAULT_ENV_FILE;
use crate::logging::{self, LogFormat};
use crate::types::{ConfigKey, Settings};

/// How the movie-database key confirmation is logged after publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationMode {
    /// Log "loaded" only when the key is set, warn otherwise.
    #[default]
    Accurate,
    /// Always log "loaded", whether or not the key is set.
    Legacy,
}

/// What happened to the override file during a bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideOutcome {
    /// No file at the configured path.
    Missing,
    /// Skipped because `DOTENV_DISABLED` is set.
    Disabled,
    /// The file was read and its assignments written to the store.
    Applied {
        path: PathBuf,
        assigned: usize,
        ignored: usize,
    },
}

/// Result of a successful bootstrap.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub settings: Settings,
    pub override_file: OverrideOutcome,
}

/// Runs the startup sequence that makes configuration available to the bot.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    env_file: PathBuf,
    syntax: OverrideSyntax,
    confirmation: ConfirmationMode,
    required: BTreeSet<ConfigKey>,
    log_format: Option<LogFormat>,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrapper {
    /// Create a bootstrapper reading `.env` in verbatim syntax.
    pub fn new() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            syntax: OverrideSyntax::Verbatim,
            confirmation: ConfirmationMode::Accurate,
            required: BTreeSet::new(),
            log_format: Some(LogFormat::Plain),
        }
    }

    /// Override the override file path.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    pub fn with_syntax(mut self, syntax: OverrideSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_confirmation(mut self, mode: ConfirmationMode) -> Self {
        self.confirmation = mode;
        self
    }

    /// Set the format of the logging sink installed by `run()`.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    /// Leave logging setup to the host (it may already own a subscriber).
    pub fn without_logging(mut self) -> Self {
        self.log_format = None;
        self
    }

    /// Fail the bootstrap if `key` is not set after the override file is applied.
    pub fn require(mut self, key: ConfigKey) -> Self {
        self.required.insert(key);
        self
    }

    /// Fail the bootstrap if any recognized key is not set.
    pub fn require_all(mut self) -> Self {
        self.required.extend(ConfigKey::ALL);
        self
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    pub fn required(&self) -> impl Iterator<Item = ConfigKey> + '_ {
        self.required.iter().copied()
    }

    /// Run the startup sequence against the process environment.
    ///
    /// # Errors
    ///
    /// See [`Bootstrapper::run`].
    pub fn load(&self) -> Result<Settings, ConfigError> {
        self.load_report().map(|report| report.settings)
    }

    /// Like [`Bootstrapper::load`], also reporting what happened to the override file.
    pub fn load_report(&self) -> Result<BootstrapReport, ConfigError> {
        self.run(&mut ProcessEnv)
    }

    /// Run the startup sequence against `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The override file exists but cannot be read (`ConfigError::OverrideFileRead`).
    /// - Dotenv syntax is selected and a line is invalid (`ConfigError::DotenvParse`).
    /// - A required key is not set (`ConfigError::MissingRequired`).
    ///
    /// A missing override file and malformed verbatim lines are not errors.
    pub fn run<S: EnvStore + ?Sized>(&self, store: &mut S) -> Result<BootstrapReport, ConfigError> {
        if let Some(format) = self.log_format {
            logging::init_logging_with(format);
        }

        let override_file = self.load_override_file(store)?;
        let settings = Settings::from_store(store);
        log_confirmation(self.confirmation, &settings);
        self.check_required(&settings)?;

        Ok(BootstrapReport {
            settings,
            override_file,
        })
    }

    /// Apply the override file to `store` without reading any keys back.
    pub fn load_override_file<S: EnvStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<OverrideOutcome, ConfigError> {
        if dotenv_disabled(store) {
            debug!("override file loading disabled");
            return Ok(OverrideOutcome::Disabled);
        }

        let Some(parsed) = read_override_file(&self.env_file, self.syntax)? else {
            debug!(path = %self.env_file.display(), "no override file");
            return Ok(OverrideOutcome::Missing);
        };

        let assigned = parsed.apply(store);
        debug!(
            path = %self.env_file.display(),
            assigned,
            ignored = parsed.ignored,
            "applied override file"
        );

        Ok(OverrideOutcome::Applied {
            path: self.env_file.clone(),
            assigned,
            ignored: parsed.ignored,
        })
    }

    fn check_required(&self, settings: &Settings) -> Result<(), ConfigError> {
        let missing = settings.missing(self.required());
        if missing.is_empty() {
            return Ok(());
        }
        Err(ConfigError::MissingRequired {
            vars: missing
                .into_iter()
                .map(|key| key.env_var().to_string())
                .collect(),
        })
    }
}

fn log_confirmation(mode: ConfirmationMode, settings: &Settings) {
    let key = ConfigKey::TmdbApiKey;
    match (mode, settings.is_set(key)) {
        (ConfirmationMode::Legacy, _) | (ConfirmationMode::Accurate, true) => {
            info!("{} loaded", key.env_var());
        }
        (ConfirmationMode::Accurate, false) => {
            warn!("{} is not set", key.env_var());
        }
    }
}
