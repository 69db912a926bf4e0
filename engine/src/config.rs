use std::env;
use solana_sdk::commitment_config::CommitmentConfig;

#[derive(Debug, serde::Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl Cluster {
    pub fn parse(name: &str) -> Result<Self, String> {
        match name {
            "Devnet" | "devnet" => Ok(Cluster::Devnet),
            "Testnet" | "testnet" => Ok(Cluster::Testnet),
            "MainnetBeta" | "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "Localnet" | "localnet" | "localhost" => Ok(Cluster::Localnet),
            _ => Err(format!("Invalid Cluster: {}", name)),
        }
    }
}

pub fn parse_commitment(level: &str) -> Result<CommitmentConfig, String> {
    match level {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        _ => Err(format!("Invalid Commitment: {} (expected processed/confirmed/finalized)", level)),
    }
}

#[derive(Debug, serde::Deserialize, Clone)]
pub struct MinterConfig {
    #[serde(skip)]
    pub cluster: Cluster,
    #[serde(skip)]
    pub commitment: CommitmentConfig,
    #[serde(alias = "RPC_URL", default = "default_rpc_url")]
    pub rpc_url: String,
    /// Payer keypair file. Empty means `~/.config/solana/id.json`.
    #[serde(alias = "KEYPAIR_PATH", default)]
    pub keypair_path: String,
    #[serde(alias = "TEST_WALLET_PATH")]
    pub test_wallet_path: Option<String>,
}

fn default_rpc_url() -> String { "https://api.devnet.solana.com".to_string() }

impl MinterConfig {
    pub fn new() -> Result<Self, String> {
        let s = ::config::Config::builder()
            .add_source(::config::Environment::default())
            .build()
            .map_err(|e| format!("Config Build Error: {}", e))?;

        let mut config: MinterConfig = s.try_deserialize()
            .map_err(|e| format!("Config Deserialize Error: {}", e))?;

        // Enums come straight from ENV so the error names the bad value
        let cluster_str = env::var("CLUSTER").unwrap_or("Devnet".to_string());
        config.cluster = Cluster::parse(&cluster_str)?;

        let commitment_str = env::var("COMMITMENT").unwrap_or("confirmed".to_string());
        config.commitment = parse_commitment(&commitment_str)?;

        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values at startup (Fail Fast)
    pub fn validate(&self) -> Result<(), String> {
        if !self.rpc_url.starts_with("http") {
            return Err(format!(
                "Invalid RPC_URL: must start with http/https. Got: {}",
                self.rpc_url
            ));
        }

        let local_url = self.rpc_url.contains("localhost") || self.rpc_url.contains("127.0.0.1");
        if self.cluster == Cluster::Localnet && !local_url {
            return Err(format!(
                "CLUSTER=Localnet but RPC_URL is not local. Got: {}",
                self.rpc_url
            ));
        }
        if self.cluster != Cluster::Localnet && local_url {
            tracing::warn!(
                "⚠️  RPC_URL points at a local validator but CLUSTER={:?}. Explorer links will be wrong.",
                self.cluster
            );
        }

        if self.cluster == Cluster::MainnetBeta {
            tracing::warn!("⚠️  Minting on mainnet-beta spends real SOL.");
        }

        if let Some(path) = &self.test_wallet_path {
            if path.trim().is_empty() {
                return Err("TEST_WALLET_PATH is set but empty".into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());


#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
