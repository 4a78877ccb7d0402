use anchor_lang::prelude::*;

use crate::constants::RATE_DENOMINATOR;
use crate::errors::AppError;

/// floor(amount * numerator / denominator), widened to u128 so the product cannot overflow.
pub fn mul_div(amount: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, AppError::Overflow);
    let result = (amount as u128) * (numerator as u128) / (denominator as u128);
    u64::try_from(result).map_err(|_| error!(AppError::Overflow))
}

/// Apply a basis-point rate, rounding down.
pub fn apply_rate(amount: u64, rate: u64) -> Result<u64> {
    mul_div(amount, rate, RATE_DENOMINATOR)
}
