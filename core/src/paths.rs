use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Keypair location used by the Solana CLI, relative to `$HOME`
pub const CLI_DEFAULT_KEYPAIR: &str = ".config/solana/id.json";

/// Expands a leading `~/` and falls back to the Solana CLI default keypair when `path` is empty.
/// A `~` anywhere else is kept as is.
pub fn resolve_keypair_path(path: &str) -> Result<PathBuf> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(home_dir()?.join(CLI_DEFAULT_KEYPAIR));
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}

fn home_dir() -> Result<PathBuf> {
    env::var("HOME").map(PathBuf::from).context("HOME not set")
}
