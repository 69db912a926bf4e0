use mint_core::paths::resolve_keypair_path;
use solana_sdk::signature::{Keypair, Signer, write_keypair_file};
use std::env;

/// Writes a fresh payer keypair to KEYPAIR_PATH (default ~/.config/solana/id.json).
/// Refuses to overwrite an existing file.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let path_buf = resolve_keypair_path(&env::var("KEYPAIR_PATH").unwrap_or_default())?;
    let path = path_buf.as_path();
    let path_str = path.display().to_string();

    if path.exists() {
        println!("⚠️  Keypair already exists at: {}", path_str);
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let keypair = Keypair::new();
    write_keypair_file(&keypair, path)?;

    println!("✅ Generated new keypair at: {}", path_str);
    println!("🔑 Pubkey: {}", keypair.pubkey());
    println!("\n   Fund it before minting:");
    println!("   solana airdrop 2 {} --url devnet", keypair.pubkey());
    Ok(())
}
