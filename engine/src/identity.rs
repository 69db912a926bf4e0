use std::env;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use mint_core::paths::resolve_keypair_path;
use solana_sdk::signature::{read_keypair_file, Keypair};
use tracing::warn;

use crate::config::MinterConfig;

/// Payer and test-wallet identities, loaded once per run
pub struct Identities {
    pub payer: Keypair,
    pub test_wallet: Keypair,
}

impl Identities {
    /// `PAYER_SECRET_KEY` wins over `KEYPAIR_PATH`; a blank secret falls through to the file.
    pub fn load(config: &MinterConfig) -> Result<Self> {
        let payer = match env::var("PAYER_SECRET_KEY") {
            Ok(secret) if !secret.trim().is_empty() => {
                keypair_from_json(&secret).context("Invalid PAYER_SECRET_KEY")?
            }
            _ => load_keypair(&resolve_keypair_path(&config.keypair_path)?)?,
        };

        let test_wallet = match &config.test_wallet_path {
            Some(path) => load_keypair(&resolve_keypair_path(path)?)?,
            None => {
                warn!("⚠️  TEST_WALLET_PATH not set. Using a throwaway test wallet.");
                Keypair::new()
            }
        };

        Ok(Self { payer, test_wallet })
    }
}

/// Parses a secret key in the `solana-keygen` JSON layout: `[u8; 64]`
pub fn keypair_from_json(secret: &str) -> Result<Keypair> {
    let bytes: Vec<u8> = serde_json::from_str(secret.trim())?;
    Keypair::from_bytes(&bytes).map_err(|e| anyhow!("Invalid keypair bytes: {}", e))
}

pub fn load_keypair(path: &Path) -> Result<Keypair> {
    read_keypair_file(path)
        .map_err(|e| anyhow!("Failed to read keypair {}: {}", path.display(), e))
}
