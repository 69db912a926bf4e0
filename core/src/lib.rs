pub mod instructions;
pub mod paths;
pub mod ports;

use serde::Serialize;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// Descriptive token settings. Only `decimals` reaches the chain.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TokenConfig {
    pub decimals: u8,
    pub name: &'static str,
    pub symbol: &'static str,
    pub uri: &'static str,
}

impl TokenConfig {
    /// Converts raw base units into a display amount (e.g. 100_000_000 -> 100.0 with 6 decimals)
    pub fn ui_amount(&self, base_units: u64) -> f64 {
        spl_token::amount_to_ui_amount(base_units, self.decimals)
    }
}

/// Outcome of one mint-and-fund run
#[derive(Debug, Clone)]
pub struct MintReceipt {
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub rent_lamports: u64,
    pub create_signature: Signature,
    /// `None` when the associated token account already existed
    pub token_account_signature: Option<Signature>,
    pub mint_signature: Signature,
    pub balance_before: u64,
    pub balance_after: u64,
}

impl MintReceipt {
    pub fn minted(&self) -> u64 {
        self.balance_after.saturating_sub(self.balance_before)
    }
}

pub mod constants {
    use super::TokenConfig;

    pub const NEKO_CAT: TokenConfig = TokenConfig {
        decimals: 6,
        name: "Neko Cat",
        symbol: "NC",
        uri: "https://github.com/anhuong541/solana-bootcamp-summer-2024/blob/main/assets/sbs-token.json",
    };

    /// 100 NC at 6 decimals
    pub const MINT_AMOUNT: u64 = 100_000_000;

    pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

    /// Headroom for the fees of the create, associated-account and mint-to transactions.
    /// Create carries two signatures, the other two carry one each.
    pub const FEE_RESERVE_LAMPORTS: u64 = 4 * LAMPORTS_PER_SIGNATURE;
}
