use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use mint_core::instructions::{associated_token_address, create_associated_account};
use mint_core::ports::LedgerPort;
use anyhow::{Context, Result};
use tracing::info;

/// A resolved associated token account
#[derive(Debug, Clone, Copy)]
pub struct TokenAccount {
    pub address: Pubkey,
    /// Set when this call had to create the account
    pub created_by: Option<Signature>,
}

pub struct WalletManager<'a> {
    ledger: &'a dyn LedgerPort,
}

impl<'a> WalletManager<'a> {
    pub fn new(ledger: &'a dyn LedgerPort) -> Self {
        Self { ledger }
    }

    /// Returns the owner's associated token account for `mint`, creating it if absent.
    /// `payer` funds the creation.
    pub async fn get_or_create_ata(
        &self,
        payer: &Keypair,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<TokenAccount> {
        let address = associated_token_address(owner, mint);

        if self.ledger.account_exists(&address).await? {
            return Ok(TokenAccount { address, created_by: None });
        }

        info!("📦 Creating ATA for mint: {}", mint);
        let ix = create_associated_account(&payer.pubkey(), owner, mint);
        let signature = self
            .ledger
            .submit(&[ix], payer, &[])
            .await
            .with_context(|| format!("Failed to create associated token account {}", address))?;

        Ok(TokenAccount { address, created_by: Some(signature) })
    }
}
