//! Centralized constants for the reelbot workspace.
//!
//! Variable names and file names live here so the loader, the published
//! values, and the diagnostic binary agree on them.

// =============================================================================
// Override File
// =============================================================================

/// Default override file, resolved against the process working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Setting this variable to `1` or `true` skips override file loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Recognized Keys
// =============================================================================

/// Chat-platform bot token.
pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";

/// Movie-database API key.
pub const TMDB_API_KEY_VAR: &str = "TMDB_API_KEY";

/// Language-model API key.
pub const COHERE_API_KEY_VAR: &str = "COHERE_API_KEY";

// =============================================================================
// Logging
// =============================================================================

/// Filter directive variable (`EnvFilter` syntax) for the logging sink.
pub const LOG_FILTER_VAR: &str = "REELBOT_LOG";

/// Minimum level used when `REELBOT_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Timestamp layout of the plain log line, e.g. `2024-05-01 12:30:00,125`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";
