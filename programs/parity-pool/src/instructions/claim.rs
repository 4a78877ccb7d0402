use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::CreditClaimedEvent;
use crate::state::*;
use crate::utils::pay_out;

#[derive(Accounts)]
#[instruction(period_id: u64)]
pub struct Claim<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PERIOD, &period_id.to_le_bytes()],
        bump = period.bump,
    )]
    pub period: Box<Account<'info, Period>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Claim>, period_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();
    let period_info = ctx.accounts.period.to_account_info();

    // Marked claimed before any lamports move
    let amount = ctx.accounts.period.take_credit(&owner)?;

    msg!("Claiming {} lamports ({:.4} SOL) from period {}", amount, amount as f64 / 1_000_000_000.0, period_id);

    pay_out(&period_info, &ctx.accounts.owner.to_account_info(), amount)?;

    emit!(CreditClaimedEvent {
        owner,
        period: period_id,
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
