use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{get_stack_height, TRANSACTION_LEVEL_STACK_HEIGHT};
use entropy_api::state::{EntropyAccount, Var};
use solana_nostd_keccak::hashv;

use crate::errors::AppError;
use crate::state::Side;

/// Steel accounts carry a one-byte discriminator padded to eight bytes.
const VAR_HEADER_LEN: usize = 8;

/// Copy the entropy var out of its account.
pub fn read_var(info: &AccountInfo) -> Result<Var> {
    require_keys_eq!(*info.owner, entropy_api::ID, AppError::InvalidEntropyVar);

    let data = info.try_borrow_data()?;
    let end = VAR_HEADER_LEN + std::mem::size_of::<Var>();
    require!(data.len() >= end, AppError::InvalidEntropyVar);
    require!(
        data[0] == EntropyAccount::Var as u8,
        AppError::InvalidEntropyVar
    );

    bytemuck::try_pod_read_unaligned::<Var>(&data[VAR_HEADER_LEN..end])
        .map_err(|_| error!(AppError::InvalidEntropyVar))
}

/// A var is finalized once its slot hash was sampled and the provider revealed the seed.
pub fn is_finalized(var: &Var) -> bool {
    var.slot_hash != [0; 32] && var.seed != [0; 32] && var.value != [0; 32]
}

/// Instructions that can close betting must be called from the transaction itself,
/// so a wrapping program cannot inspect the result and revert.
pub fn require_top_level() -> Result<()> {
    require!(
        get_stack_height() == TRANSACTION_LEVEL_STACK_HEIGHT,
        AppError::CpiNotAllowed
    );
    Ok(())
}

/// Bind the revealed value to the period's bet chain and id.
pub fn mix(value: &[u8; 32], seed: &[u8; 32], period_id: u64) -> [u8; 32] {
    hashv(&[value, seed, &period_id.to_le_bytes()])
}

/// Xor of the four little-endian words.
pub fn fold(entropy: &[u8; 32]) -> u64 {
    entropy.chunks_exact(8).fold(0u64, |acc, chunk| {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        acc ^ u64::from_le_bytes(word)
    })
}

/// An odd fold draws ODD, an even fold draws EVEN.
pub fn draw_side(entropy: &[u8; 32]) -> Side {
    if fold(entropy) % 2 == 1 {
        Side::Odd
    } else {
        Side::Even
    }
}
