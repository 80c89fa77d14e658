//! Environment variable store abstraction.
//!
//! Responsibilities:
//! - Define the `EnvStore` seam the bootstrap reads from and writes to.
//! - Provide the process-environment implementation and an in-memory one.
//!
//! Does NOT handle:
//! - Override file parsing (see override_file.rs).
//! - Building the published `Settings` (see builder.rs).
//!
//! Invariants:
//! - Values are returned exactly as stored: no trimming, no empty-to-None folding.
//! - `ProcessEnv` is the only code path in the workspace that writes the process environment.

use std::collections::BTreeMap;

use crate::constants::DOTENV_DISABLED_VAR;

/// A string-to-string variable map the bootstrap can read and overwrite.
pub trait EnvStore {
    /// Returns the value for `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// Read a process environment variable exactly as set.
///
/// Non-UTF-8 values are converted lossily rather than treated as unset.
pub fn env_value(key: &str) -> Option<String> {
    std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env_value(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: the bootstrap runs during startup, before the host spawns
        // threads that read the environment. Callers never pass keys or
        // values the OS rejects (see `is_storable`).
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

/// An in-memory variable map, for embedding hosts and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

/// Whether the OS can hold this assignment.
///
/// Keys never contain `=` here because assignments are split at the first one.
pub(crate) fn is_storable(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains('\0') && !value.contains('\0')
}

/// Check if override file loading is disabled in `store`.
pub(crate) fn dotenv_disabled<S: EnvStore + ?Sized>(store: &S) -> bool {
    matches!(
        store.get(DOTENV_DISABLED_VAR).as_deref(),
        Some("true") | Some("1")
    )
}
