/// Standard RPC Ledger Adapter
///
/// Implements the ledger port against a Solana JSON-RPC endpoint using the
/// nonblocking client. Every transaction is simulated before it is sent and
/// then confirmed at the client's commitment level.

use anyhow::{Context, Result};
use mint_core::ports::LedgerPort;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::{debug, error, info};

use crate::error::SubmitError;

pub struct RpcLedger {
    rpc: RpcClient,
}

impl RpcLedger {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
        }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }

    /// Build and sign a legacy transaction with a fresh blockhash
    async fn sign(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> Result<Transaction> {
        let recent_blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .context("Failed to get recent blockhash")?;

        debug!("Recent blockhash: {}", recent_blockhash);

        let mut signers: Vec<&Keypair> = Vec::with_capacity(1 + extra_signers.len());
        signers.push(payer);
        signers.extend_from_slice(extra_signers);

        let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
        transaction
            .try_sign(&signers, recent_blockhash)
            .context("Failed to sign transaction")?;

        Ok(transaction)
    }

    /// Simulate without sending. Returns the program logs on success.
    ///
    /// # Errors
    /// Returns error if:
    /// - Failed to get recent blockhash
    /// - A required signer is missing
    /// - The simulation reports a transaction error
    pub async fn simulate(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> Result<Vec<String>> {
        let transaction = self.sign(instructions, payer, extra_signers).await?;
        self.simulate_signed(&transaction).await
    }

    async fn simulate_signed(&self, transaction: &Transaction) -> Result<Vec<String>> {
        let signature = transaction.signatures[0];
        let simulation = self
            .rpc
            .simulate_transaction(transaction)
            .await
            .context("Failed to simulate transaction")?;

        let logs = simulation.value.logs.unwrap_or_default();
        if let Some(reason) = simulation.value.err {
            error!("Transaction simulation failed: {:?}", reason);
            for line in &logs {
                error!("  {}", line);
            }
            return Err(SubmitError::SimulationFailed { signature, reason, logs }.into());
        }

        debug!("Simulation successful. Logs: {:?}", logs);
        Ok(logs)
    }
}

#[async_trait::async_trait]
impl LedgerPort for RpcLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .with_context(|| format!("Failed to get rent exemption for {} bytes", data_len))
    }

    async fn balance(&self, address: &Pubkey) -> Result<u64> {
        self.rpc
            .get_balance(address)
            .await
            .with_context(|| format!("Failed to get balance of {}", address))
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .with_context(|| format!("Failed to get account {}", address))?;
        Ok(response.value.is_some())
    }

    async fn token_balance(&self, token_account: &Pubkey) -> Result<u64> {
        let ui_amount = self
            .rpc
            .get_token_account_balance(token_account)
            .await
            .with_context(|| format!("Failed to get token balance of {}", token_account))?;
        ui_amount
            .amount
            .parse::<u64>()
            .with_context(|| format!("Invalid token amount {:?}", ui_amount.amount))
    }

    async fn submit(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> Result<Signature> {
        info!("Building transaction with {} instructions", instructions.len());

        let transaction = self.sign(instructions, payer, extra_signers).await?;
        let signature = transaction.signatures[0];
        info!("Transaction signed. Signature: {}", signature);

        self.simulate_signed(&transaction).await?;

        info!("Sending transaction...");
        self.rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|source| SubmitError::Rejected { signature, source })?;

        info!("Transaction confirmed: {}", signature);
        Ok(signature)
    }
}
