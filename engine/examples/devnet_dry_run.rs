/// Devnet Dry Run
///
/// Builds the create-account + initialize-mint transaction for a throwaway
/// mint and simulates it against the RPC without sending anything.

use executor::RpcLedger;
use mint_core::constants::NEKO_CAT;
use mint_core::paths::resolve_keypair_path;
use mint_core::instructions::{create_mint_account, initialize_mint, MINT_SIZE};
use mint_core::ports::LedgerPort;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("🚀 Dry Run: create + initialize mint");
    println!("====================================\n");

    let rpc_url =
        env::var("RPC_URL").unwrap_or_else(|_| "https://api.devnet.solana.com".to_string());
    // Same lookup as mint-token: ~/ expansion, empty means the CLI default keypair
    let key_path = resolve_keypair_path(&env::var("KEYPAIR_PATH").unwrap_or_default())?;
    let payer = if key_path.exists() {
        read_keypair_file(&key_path)?
    } else {
        println!("⚠️  No keypair at {}, using unfunded throwaway payer.", key_path.display());
        Keypair::new()
    };
    let mint = Keypair::new();

    let ledger = RpcLedger::new(&rpc_url, CommitmentConfig::confirmed());
    println!("🌐 RPC: {}", ledger.url());
    println!("💰 Payer: {}", payer.pubkey());
    println!("🪙 Mint: {}\n", mint.pubkey());

    let rent = ledger.minimum_balance_for_rent_exemption(MINT_SIZE).await?;
    println!("Rent-exempt minimum for {} bytes: {} lamports", MINT_SIZE, rent);

    let ixs = [
        create_mint_account(&payer.pubkey(), &mint.pubkey(), rent),
        initialize_mint(&mint.pubkey(), &payer.pubkey(), NEKO_CAT.decimals)?,
    ];

    match ledger.simulate(&ixs, &payer, &[&mint]).await {
        Ok(logs) => {
            println!("\n✅ Simulation succeeded");
            for line in logs {
                println!("   {}", line);
            }
        }
        Err(e) => {
            println!("\n❌ Simulation failed: {:#}", e);
            println!("\nCommon issues:");
            println!("  - Payer has no SOL on this cluster");
            println!("  - RPC endpoint unreachable");
        }
    }

    Ok(())
}
