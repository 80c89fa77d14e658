//! Shared test utilities for reelbot-env integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory rooted in a temp directory.
//!
//! Invariants / Assumptions:
//! - Bot keys and loader control variables from the host are always cleared.
//! - The working directory is the caller's temp dir, so `.env` is only
//!   found if the test writes one there.

use assert_cmd::Command;
use std::path::Path;

/// Returns a hermetic `reelbot-env` command running in `dir`.
pub fn reelbot_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("reelbot-env");
    cmd.current_dir(dir);

    // Clear potential host leakage
    cmd.env_remove("DISCORD_TOKEN")
        .env_remove("TMDB_API_KEY")
        .env_remove("COHERE_API_KEY")
        .env_remove("DOTENV_DISABLED")
        .env_remove("REELBOT_ENV_FILE")
        .env_remove("REELBOT_LOG");

    cmd
}
