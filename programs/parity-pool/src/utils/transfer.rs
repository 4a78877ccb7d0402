use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use crate::errors::AppError;

/// Move a bettor's stake from their wallet into the period account.
pub fn collect_stake<'info>(
    bettor: &AccountInfo<'info>,
    period: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, AppError::InvalidAmount);
    let accounts = Transfer {
        from: bettor.clone(),
        to: period.clone(),
    };
    system_program::transfer(CpiContext::new(system_program.clone(), accounts), amount)
}

/// Lamports a period holds above its rent-exempt reserve: unclaimed credits plus dust.
pub fn period_surplus(period: &AccountInfo, rent: &Rent) -> u64 {
    period
        .lamports()
        .saturating_sub(rent.minimum_balance(period.data_len()))
}

/// Pay a claimed credit out of a period account. The rent reserve stays behind.
pub fn pay_out<'info>(
    period: &AccountInfo<'info>,
    recipient: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let surplus = period_surplus(period, &Rent::get()?);
    require!(amount <= surplus, AppError::InsufficientBalance);

    let recipient_balance = recipient.lamports().checked_add(amount).ok_or(AppError::Overflow)?;
    **period.try_borrow_mut_lamports()? -= amount;
    **recipient.try_borrow_mut_lamports()? = recipient_balance;
    Ok(())
}
