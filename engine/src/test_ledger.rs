// In-memory ledger for tests
// Interprets the System, SPL Token and Associated Token Account instructions the workflow emits

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use mint_core::constants::LAMPORTS_PER_SIGNATURE;
use mint_core::ports::LedgerPort;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    signature::{Keypair, Signature, Signer},
    system_instruction::SystemInstruction,
    system_program,
    transaction::Transaction,
};
use spl_associated_token_account::get_associated_token_address;
use spl_token::instruction::TokenInstruction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintState {
    pub decimals: u8,
    pub mint_authority: Pubkey,
    pub freeze_authority: Option<Pubkey>,
    pub supply: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountState {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, Default)]
struct State {
    lamports: HashMap<Pubkey, u64>,
    owners: HashMap<Pubkey, Pubkey>,
    space: HashMap<Pubkey, usize>,
    mints: HashMap<Pubkey, MintState>,
    token_accounts: HashMap<Pubkey, TokenAccountState>,
}

impl State {
    fn exists(&self, address: &Pubkey) -> bool {
        self.owners.contains_key(address)
    }

    fn debit(&mut self, address: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.lamports.get(address).copied().unwrap_or(0);
        let remaining = balance.checked_sub(amount).ok_or_else(|| {
            anyhow!("insufficient lamports in {}: {} < {}", address, balance, amount)
        })?;
        self.lamports.insert(*address, remaining);
        Ok(())
    }

    fn open(&mut self, address: Pubkey, lamports: u64, space: usize, owner: Pubkey) {
        self.lamports.insert(address, lamports);
        self.space.insert(address, space);
        self.owners.insert(address, owner);
    }
}

pub struct InMemoryLedger {
    rent: Rent,
    state: Mutex<State>,
    attempts: Mutex<Vec<Vec<Instruction>>>,
    accept_limit: Option<usize>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            rent: Rent::default(),
            state: Mutex::new(State::default()),
            attempts: Mutex::new(Vec::new()),
            accept_limit: None,
        }
    }

    /// Rejects every submission after the first `successes`
    pub fn accept_only(mut self, successes: usize) -> Self {
        self.accept_limit = Some(successes);
        self
    }

    pub fn fund(&self, address: &Pubkey, lamports: u64) {
        let mut state = self.state.lock().unwrap();
        state.open(*address, lamports, 0, system_program::id());
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    pub fn mint_state(&self, mint: &Pubkey) -> Option<MintState> {
        self.state.lock().unwrap().mints.get(mint).cloned()
    }

    pub fn token_account(&self, address: &Pubkey) -> Option<TokenAccountState> {
        self.state.lock().unwrap().token_accounts.get(address).cloned()
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.state.lock().unwrap().lamports.get(address).copied().unwrap_or(0)
    }

    pub fn exists(&self, address: &Pubkey) -> bool {
        self.state.lock().unwrap().exists(address)
    }

    /// Every instruction list handed to `submit`, accepted or not
    pub fn attempts(&self) -> Vec<Vec<Instruction>> {
        self.attempts.lock().unwrap().clone()
    }

    fn apply(&self, state: &mut State, ix: &Instruction) -> Result<()> {
        if ix.program_id == system_program::id() {
            self.apply_system(state, ix)
        } else if ix.program_id == spl_token::id() {
            apply_token(state, ix)
        } else if ix.program_id == spl_associated_token_account::id() {
            self.apply_associated(state, ix)
        } else {
            bail!("unsupported program {}", ix.program_id)
        }
    }

    fn apply_system(&self, state: &mut State, ix: &Instruction) -> Result<()> {
        match bincode::deserialize::<SystemInstruction>(&ix.data)? {
            SystemInstruction::CreateAccount { lamports, space, owner } => {
                let (from, to) = (ix.accounts[0].pubkey, ix.accounts[1].pubkey);
                if state.exists(&to) {
                    bail!("account {} already in use", to);
                }
                if lamports < self.rent.minimum_balance(space as usize) {
                    bail!("account {} would not be rent exempt", to);
                }
                state.debit(&from, lamports)?;
                state.open(to, lamports, space as usize, owner);
                Ok(())
            }
            other => bail!("unsupported system instruction {:?}", other),
        }
    }

    fn apply_associated(&self, state: &mut State, ix: &Instruction) -> Result<()> {
        let funder = ix.accounts[0].pubkey;
        let address = ix.accounts[1].pubkey;
        let wallet = ix.accounts[2].pubkey;
        let mint = ix.accounts[3].pubkey;

        if address != get_associated_token_address(&wallet, &mint) {
            bail!("{} is not the associated token address", address);
        }
        if state.exists(&address) {
            // 1 = CreateIdempotent
            return match ix.data.as_slice() {
                [1] => Ok(()),
                _ => bail!("associated token account {} already exists", address),
            };
        }
        if !state.mints.contains_key(&mint) {
            bail!("mint {} is not initialized", mint);
        }

        let len = spl_token::state::Account::LEN;
        let lamports = self.rent.minimum_balance(len);
        state.debit(&funder, lamports)?;
        state.open(address, lamports, len, spl_token::id());
        state.token_accounts.insert(address, TokenAccountState { mint, owner: wallet, amount: 0 });
        Ok(())
    }
}

fn apply_token(state: &mut State, ix: &Instruction) -> Result<()> {
    match TokenInstruction::unpack(&ix.data)? {
        TokenInstruction::InitializeMint2 { decimals, mint_authority, freeze_authority } => {
            let mint = ix.accounts[0].pubkey;
            if state.owners.get(&mint) != Some(&spl_token::id()) {
                bail!("mint {} is not owned by the token program", mint);
            }
            if state.space.get(&mint) != Some(&spl_token::state::Mint::LEN) {
                bail!("mint {} has the wrong size", mint);
            }
            if state.mints.contains_key(&mint) {
                bail!("mint {} already initialized", mint);
            }
            state.mints.insert(mint, MintState {
                decimals,
                mint_authority,
                freeze_authority: freeze_authority.into(),
                supply: 0,
            });
            Ok(())
        }
        TokenInstruction::MintTo { amount } => {
            let (mint, destination, authority) =
                (ix.accounts[0].pubkey, ix.accounts[1].pubkey, ix.accounts[2].pubkey);
            let mint_state = state
                .mints
                .get_mut(&mint)
                .ok_or_else(|| anyhow!("mint {} is not initialized", mint))?;
            if mint_state.mint_authority != authority {
                bail!("{} is not the mint authority", authority);
            }
            mint_state.supply = mint_state
                .supply
                .checked_add(amount)
                .ok_or_else(|| anyhow!("supply overflow"))?;

            let account = state
                .token_accounts
                .get_mut(&destination)
                .ok_or_else(|| anyhow!("token account {} not found", destination))?;
            if account.mint != mint {
                bail!("token account {} belongs to another mint", destination);
            }
            account.amount = account
                .amount
                .checked_add(amount)
                .ok_or_else(|| anyhow!("balance overflow"))?;
            Ok(())
        }
        other => bail!("unsupported token instruction {:?}", other),
    }
}

#[async_trait::async_trait]
impl LedgerPort for InMemoryLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(self.rent.minimum_balance(data_len))
    }

    async fn balance(&self, address: &Pubkey) -> Result<u64> {
        Ok(self.lamports(address))
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        Ok(self.exists(address))
    }

    async fn token_balance(&self, token_account: &Pubkey) -> Result<u64> {
        self.token_account(token_account)
            .map(|account| account.amount)
            .ok_or_else(|| anyhow!("could not find token account {}", token_account))
    }

    async fn submit(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> Result<Signature> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(instructions.to_vec());
            attempts.len()
        };

        let mut signers: Vec<&Keypair> = vec![payer];
        signers.extend_from_slice(extra_signers);
        let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
        transaction.try_sign(&signers, Hash::new_unique())?;

        if let Some(limit) = self.accept_limit {
            if attempt > limit {
                bail!("transaction rejected by test ledger");
            }
        }

        let mut state = self.state.lock().unwrap();
        let mut next = state.clone();
        next.debit(&payer.pubkey(), LAMPORTS_PER_SIGNATURE * transaction.signatures.len() as u64)?;
        for ix in instructions {
            self.apply(&mut next, ix)?;
        }
        *state = next;

        Ok(transaction.signatures[0])
    }
}
