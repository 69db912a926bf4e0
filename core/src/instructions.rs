use solana_sdk::{
    instruction::Instruction,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    system_instruction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::state::Mint;

/// Byte size of an SPL Token mint account
pub const MINT_SIZE: usize = Mint::LEN;

/// Allocates `MINT_SIZE` bytes at `mint`, funded by `payer` and owned by the token program.
pub fn create_mint_account(payer: &Pubkey, mint: &Pubkey, rent_lamports: u64) -> Instruction {
    system_instruction::create_account(
        payer,
        mint,
        rent_lamports,
        MINT_SIZE as u64,
        &spl_token::id(),
    )
}

/// `InitializeMint2` with `authority` as both mint and freeze authority.
pub fn initialize_mint(
    mint: &Pubkey,
    authority: &Pubkey,
    decimals: u8,
) -> Result<Instruction, ProgramError> {
    spl_token::instruction::initialize_mint2(
        &spl_token::id(),
        mint,
        authority,
        Some(authority),
        decimals,
    )
}

pub fn mint_to(
    mint: &Pubkey,
    token_account: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    spl_token::instruction::mint_to(
        &spl_token::id(),
        mint,
        token_account,
        authority,
        &[],
        amount,
    )
}

/// Address of the associated token account holding `mint` for `owner`
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}

/// Creates the associated token account of `owner`; succeeds as a no-op if it already exists.
pub fn create_associated_account(payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Instruction {
    create_associated_token_account_idempotent(payer, owner, mint, &spl_token::id())
}
