/// Mint-and-Fund Workflow
///
/// Creates a fresh SPL mint owned by the payer, resolves the payer's
/// associated token account for it and mints a fixed amount into it.
/// Steps run strictly in order; a failure ends the run without undoing
/// what already landed on-chain.

use anyhow::Context;
use mint_core::constants::FEE_RESERVE_LAMPORTS;
use mint_core::instructions::{create_mint_account, initialize_mint, mint_to, MINT_SIZE};
use mint_core::ports::LedgerPort;
use mint_core::{MintReceipt, TokenConfig};
use solana_sdk::{
    program_error::ProgramError,
    program_pack::Pack,
    signature::{Keypair, Signer},
};
use thiserror::Error;
use tracing::info;

use crate::wallet_manager::WalletManager;

#[derive(Error, Debug)]
pub enum MintError {
    #[error("Payer balance {balance} lamports is below the {required} lamports needed")]
    InsufficientFunds { balance: u64, required: u64 },
    #[error("Instruction build error: {0}")]
    InvalidInstruction(#[from] ProgramError),
    #[error(transparent)]
    Ledger(#[from] anyhow::Error),
}

pub struct MintWorkflow<'a> {
    ledger: &'a dyn LedgerPort,
    payer: &'a Keypair,
    token: TokenConfig,
    amount: u64,
}

impl<'a> MintWorkflow<'a> {
    pub fn new(
        ledger: &'a dyn LedgerPort,
        payer: &'a Keypair,
        token: TokenConfig,
        amount: u64,
    ) -> Self {
        Self { ledger, payer, token, amount }
    }

    /// Lamports the payer needs for both rent deposits plus fees
    pub async fn required_funding(&self) -> Result<(u64, u64), MintError> {
        let mint_rent = self.ledger.minimum_balance_for_rent_exemption(MINT_SIZE).await?;
        let account_rent = self
            .ledger
            .minimum_balance_for_rent_exemption(spl_token::state::Account::LEN)
            .await?;
        Ok((mint_rent, mint_rent + account_rent + FEE_RESERVE_LAMPORTS))
    }

    pub async fn run(&self, mint: &Keypair) -> Result<MintReceipt, MintError> {
        let payer = self.payer.pubkey();
        let mint_address = mint.pubkey();
        info!("Mint address: {}", mint_address);

        // 1. Rent + pre-flight funding check
        let (rent_lamports, required) = self.required_funding().await?;
        let balance = self.ledger.balance(&payer).await?;
        if balance < required {
            return Err(MintError::InsufficientFunds { balance, required });
        }
        info!("Rent-exempt minimum for mint: {} lamports", rent_lamports);

        // 2-3. Allocate the mint account and initialize it in one transaction
        let create_ix = create_mint_account(&payer, &mint_address, rent_lamports);
        let init_ix = initialize_mint(&mint_address, &payer, self.token.decimals)?;
        let create_signature = self
            .ledger
            .submit(&[create_ix, init_ix], self.payer, &[mint])
            .await
            .context("Failed to create mint")?;
        info!("✅ Mint {} ({}) created: {}", self.token.name, self.token.symbol, create_signature);

        // 4. Resolve the payer's associated token account
        let token_account = WalletManager::new(self.ledger)
            .get_or_create_ata(self.payer, &mint_address, &payer)
            .await?;
        info!("Token account address: {}", token_account.address);

        let balance_before = self.ledger.token_balance(&token_account.address).await?;

        // 5. Mint
        info!(
            "Minting {} {} ({} base units) to the ata...",
            self.token.ui_amount(self.amount),
            self.token.symbol,
            self.amount
        );
        let mint_ix = mint_to(&mint_address, &token_account.address, &payer, self.amount)?;
        let mint_signature = self
            .ledger
            .submit(&[mint_ix], self.payer, &[])
            .await
            .context("Failed to mint tokens")?;

        let balance_after = self.ledger.token_balance(&token_account.address).await?;

        Ok(MintReceipt {
            mint: mint_address,
            token_account: token_account.address,
            rent_lamports,
            create_signature,
            token_account_signature: token_account.created_by,
            mint_signature,
            balance_before,
            balance_after,
        })
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod workflow_tests;
