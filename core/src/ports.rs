// Port definitions
// The workflow talks to the cluster only through these traits

use anyhow::Result;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};

/// Port for the network RPC collaborator
/// Allows swapping the live RPC client for an in-memory ledger in tests
#[async_trait::async_trait]
pub trait LedgerPort: Send + Sync {
    /// Lamports an account of `data_len` bytes must hold to be rent exempt
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    /// Native balance in lamports (0 for a missing account)
    async fn balance(&self, address: &Pubkey) -> Result<u64>;

    async fn account_exists(&self, address: &Pubkey) -> Result<bool>;

    /// Raw base-unit balance of an SPL token account
    async fn token_balance(&self, token_account: &Pubkey) -> Result<u64>;

    /// Sign with `payer` plus `extra_signers`, submit, and wait for confirmation
    async fn submit(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> Result<Signature>;
}
