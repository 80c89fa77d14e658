//! Command implementations for reelbot-env.

pub mod check;
pub mod keys;
