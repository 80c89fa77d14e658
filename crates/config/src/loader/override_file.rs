//! Override file reading and parsing.
//!
//! Responsibilities:
//! - Read the override file once, tolerating undecodable bytes.
//! - Parse `key=value` lines in verbatim or dotenv syntax.
//! - Apply parsed assignments to an `EnvStore`.
//!
//! Does NOT handle:
//! - Deciding whether loading is enabled (see builder.rs).
//! - Reading the recognized keys back out (see `Settings::from_store`).
//!
//! Invariants:
//! - A missing file is not an error; any other read failure is.
//! - Verbatim syntax splits at the first `=` and keeps the value untouched.
//! - Lines without `=`, blank lines, and lines the OS cannot store are skipped.
//! - Assignments are applied in file order, so the last one for a key wins.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::env::{EnvStore, is_storable};
use super::error::ConfigError;

/// Line syntax of the override file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrideSyntax {
    /// One `key=value` per line, split at the first `=`, value kept verbatim.
    #[default]
    Verbatim,
    /// `dotenvy` syntax: quoting, comments, `export` prefixes and substitution.
    Dotenv,
}

/// A single `key=value` assignment from the override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

/// Assignments parsed from one override file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOverrides {
    pub assignments: Vec<Assignment>,
    /// Non-blank lines that produced no assignment.
    pub ignored: usize,
}

impl ParsedOverrides {
    fn push(&mut self, key: &str, value: &str) {
        if is_storable(key, value) {
            self.assignments.push(Assignment {
                key: key.to_string(),
                value: value.to_string(),
            });
        } else {
            self.ignored += 1;
        }
    }

    /// Write every assignment into `store`, in order. Returns the number applied.
    pub fn apply<S: EnvStore + ?Sized>(&self, store: &mut S) -> usize {
        for Assignment { key, value } in &self.assignments {
            store.set(key, value);
        }
        self.assignments.len()
    }
}

/// Decode bytes as UTF-8, dropping any invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Parse override text in verbatim syntax.
///
/// Lines end at `\n`, `\r\n` or `\r`.
pub fn parse_verbatim(text: &str) -> ParsedOverrides {
    let mut parsed = ParsedOverrides::default();
    for line in text.split(['\n', '\r']).map(str::trim) {
        if line.is_empty() {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => parsed.push(key, value),
            None => parsed.ignored += 1,
        }
    }
    parsed
}

/// Parse override text in dotenv syntax.
///
/// # Errors
///
/// Returns `ConfigError::DotenvParse` with the byte index of the first
/// invalid line. The line itself is never included.
pub fn parse_dotenv(text: &str) -> Result<ParsedOverrides, ConfigError> {
    let mut parsed = ParsedOverrides::default();
    for item in dotenvy::from_read_iter(text.as_bytes()) {
        let (key, value) = item?;
        parsed.push(&key, &value);
    }
    Ok(parsed)
}

/// Read and parse the override file at `path`.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// - `ConfigError::OverrideFileRead` if the file exists but cannot be read.
/// - `ConfigError::DotenvParse` for invalid lines in dotenv syntax.
pub fn read_override_file(
    path: &Path,
    syntax: OverrideSyntax,
) -> Result<Option<ParsedOverrides>, ConfigError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::OverrideFileRead {
                path: path.to_path_buf(),
                kind: e.kind(),
            });
        }
    };

    let text = decode_lossy(&bytes);
    let parsed = match syntax {
        OverrideSyntax::Verbatim => parse_verbatim(&text),
        OverrideSyntax::Dotenv => parse_dotenv(&text)?,
    };
    Ok(Some(parsed))
}
