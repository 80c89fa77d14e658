//! Check command: run the startup bootstrap and report configuration health.
//!
//! Responsibilities:
//! - Run the same bootstrap the bot runs, against the real process environment.
//! - Report, per recognized key, whether it is set and how long the value is.
//! - Fail with a missing-config error when required keys are not set.
//!
//! Does NOT handle:
//! - Printing secret values (only lengths are ever shown).
//!
//! Invariants:
//! - The report is printed before a missing-key failure is returned.

use anyhow::Result;
use reelbot_config::{BootstrapReport, Bootstrapper, ConfigError, ConfigKey, OverrideOutcome};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::args::OutputFormat;

/// Status of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Set,
    Missing,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyCheck {
    pub variable: &'static str,
    pub description: &'static str,
    pub status: KeyStatus,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

/// Redacted view of what happened to the override file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverrideSummary {
    Missing,
    Disabled,
    Applied { assigned: usize, ignored: usize },
}

impl From<&OverrideOutcome> for OverrideSummary {
    fn from(outcome: &OverrideOutcome) -> Self {
        match outcome {
            OverrideOutcome::Missing => OverrideSummary::Missing,
            OverrideOutcome::Disabled => OverrideSummary::Disabled,
            OverrideOutcome::Applied {
                assigned, ignored, ..
            } => OverrideSummary::Applied {
                assigned: *assigned,
                ignored: *ignored,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub env_file: PathBuf,
    pub override_file: OverrideSummary,
    pub keys: Vec<KeyCheck>,
}

impl CheckReport {
    pub fn new(env_file: PathBuf, report: &BootstrapReport, required: &BTreeSet<ConfigKey>) -> Self {
        let keys = ConfigKey::ALL
            .into_iter()
            .map(|key| {
                let length = report.settings.value_len(key);
                KeyCheck {
                    variable: key.env_var(),
                    description: key.display_name(),
                    status: if length.is_some() {
                        KeyStatus::Set
                    } else {
                        KeyStatus::Missing
                    },
                    required: required.contains(&key),
                    length,
                }
            })
            .collect();
        Self {
            env_file,
            override_file: OverrideSummary::from(&report.override_file),
            keys,
        }
    }

    /// Variables that are required but not set.
    pub fn missing_required(&self) -> Vec<String> {
        self.keys
            .iter()
            .filter(|k| k.required && k.status == KeyStatus::Missing)
            .map(|k| k.variable.to_string())
            .collect()
    }

    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let file_status = match self.override_file {
            OverrideSummary::Missing => "not found".to_string(),
            OverrideSummary::Disabled => "skipped (DOTENV_DISABLED)".to_string(),
            OverrideSummary::Applied { assigned, ignored } => {
                format!("applied ({assigned} assigned, {ignored} ignored)")
            }
        };
        writeln!(out, "Override file: {} {}", self.env_file.display(), file_status)?;
        for key in &self.keys {
            let status = match (key.status, key.length) {
                (KeyStatus::Set, Some(len)) => format!("set ({len} chars)"),
                _ => "missing".to_string(),
            };
            let required = if key.required { " [required]" } else { "" };
            writeln!(out, "  {:<16} {:<18}{}", key.variable, status, required)?;
        }
        Ok(())
    }
}

/// Run the check command.
///
/// # Returns
/// An error wrapping `ConfigError::MissingRequired` if a required key is
/// not set, after the report has been written.
pub fn run(
    bootstrapper: Bootstrapper,
    require: &[ConfigKey],
    strict: bool,
    output: OutputFormat,
) -> Result<()> {
    let mut required: BTreeSet<ConfigKey> = require.iter().copied().collect();
    if strict {
        required.extend(ConfigKey::ALL);
    }

    debug!(env_file = %bootstrapper.env_file().display(), "running bootstrap");
    let env_file = bootstrapper.env_file().to_path_buf();
    let report = bootstrapper.load_report()?;
    let check = CheckReport::new(env_file, &report, &required);

    let mut out = std::io::stdout().lock();
    write_report(&mut out, &check, output)?;

    let missing = check.missing_required();
    if !missing.is_empty() {
        return Err(ConfigError::MissingRequired { vars: missing }.into());
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, check: &CheckReport, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, check)?;
            writeln!(out)?;
        }
        OutputFormat::Text => check.write_text(out)?,
    }
    Ok(())
}
