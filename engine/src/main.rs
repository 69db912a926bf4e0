use std::env;
use dotenvy::dotenv;
use solana_sdk::signature::{Keypair, Signature, Signer};
use tracing::{info, error};

// Internal Crates
use mint_core::constants::{MINT_AMOUNT, NEKO_CAT};
use executor::RpcLedger;

mod config;
mod explorer;
mod identity;
mod wallet_manager;
mod workflow;

#[cfg(test)]
mod test_ledger;

use crate::explorer::{explorer_url, print_separator, ExplorerTarget};
use crate::identity::Identities;
use crate::workflow::{MintError, MintWorkflow};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
        )
        .init();

    // 1. Configuration (Fail Fast)
    let config = match config::MinterConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ CRITICAL: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    info!("✅ Config Loaded: RPC={}, Cluster={:?}", config.rpc_url, config.cluster);

    // 2. Identities
    let identities = match Identities::load(&config) {
        Ok(ids) => ids,
        Err(e) => {
            error!("❌ CRITICAL: Failed to load identities: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Payer address: {}", identities.payer.pubkey());
    info!("Test wallet address: {}", identities.test_wallet.pubkey());

    match serde_json::to_string(&NEKO_CAT) {
        Ok(json) => info!("Token config: {}", json),
        Err(e) => error!("Failed to render token config: {}", e),
    }

    let ledger = RpcLedger::new(&config.rpc_url, config.commitment);
    let mint_keypair = Keypair::new();

    print_separator("Local PublicKeys loaded");
    let mint_address = mint_keypair.pubkey().to_string();
    info!("Token's mint address: {}", mint_address);
    info!("{}", explorer_url(ExplorerTarget::Address(&mint_address), config.cluster));

    // 3. Mint-and-Fund
    let workflow = MintWorkflow::new(&ledger, &identities.payer, NEKO_CAT, MINT_AMOUNT);
    match workflow.run(&mint_keypair).await {
        Ok(receipt) => {
            print_separator("Mint complete");
            info!("Token account address: {}", receipt.token_account);
            info!("Mint rent deposit: {} lamports", receipt.rent_lamports);
            info!(
                "Minted {} {} ({} base units). Balance: {} -> {}",
                NEKO_CAT.ui_amount(receipt.minted()),
                NEKO_CAT.symbol,
                receipt.minted(),
                receipt.balance_before,
                receipt.balance_after
            );

            let tx_url = |signature: &Signature| {
                explorer_url(ExplorerTarget::Tx(&signature.to_string()), config.cluster)
            };
            info!("Create mint: {}", tx_url(&receipt.create_signature));
            if let Some(signature) = &receipt.token_account_signature {
                info!("Create ata: {}", tx_url(signature));
            }
            info!("Mint to: {}", tx_url(&receipt.mint_signature));
        }
        Err(MintError::InsufficientFunds { balance, required }) => {
            let payer = identities.payer.pubkey();
            error!("❌ Payer {} has {} lamports, needs {}.", payer, balance, required);
            if config.cluster != config::Cluster::MainnetBeta {
                error!("   Airdrop: solana airdrop 1 {} --url {}", payer, config.rpc_url);
            }
            std::process::exit(1);
        }
        Err(e) => {
            error!("❌ Mint workflow failed: {}", e);
            if let MintError::Ledger(cause) = &e {
                for line in cause.chain().skip(1) {
                    error!("   caused by: {}", line);
                }
                if let Some(signature) = executor::failed_signature(cause) {
                    let url =
                        explorer_url(ExplorerTarget::Tx(&signature.to_string()), config.cluster);
                    error!("   Failed transaction: {}", url);
                }
            }
            std::process::exit(1);
        }
    }
}
