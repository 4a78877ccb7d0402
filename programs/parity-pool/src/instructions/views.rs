//! Read-only instructions. Results are returned through Anchor return data,
//! so clients can `simulate` them instead of decoding accounts.

use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;

#[derive(Accounts)]
pub struct ReadGame<'info> {
    #[account(
        seeds = [GAME],
        bump,
    )]
    pub game: Account<'info, Game>,
}

#[derive(Accounts)]
pub struct ReadPeriod<'info> {
    #[account(
        seeds = [GAME],
        bump,
    )]
    pub game: Account<'info, Game>,

    /// CHECK: Current period PDA, not created until its first bet
    #[account(
        seeds = [PERIOD, &game.period.to_le_bytes()],
        bump,
    )]
    pub period: UncheckedAccount<'info>,
}

impl<'info> ReadPeriod<'info> {
    fn load(&self) -> Result<Period> {
        Period::load_or_empty(&self.period.to_account_info(), self.game.period)
    }
}

#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(
        seeds = [CONFIG],
        bump,
    )]
    pub config: Account<'info, Config>,
}

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct ReadInvitor<'info> {
    /// CHECK: Invitor link PDA of `participant`, may not exist
    #[account(
        seeds = [INVITOR, participant.as_ref()],
        bump,
    )]
    pub invitor_link: UncheckedAccount<'info>,
}

/// Stake of `participant` in the current period, both sides combined.
pub fn bet_table(ctx: Context<ReadPeriod>, participant: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.load()?.balance_of(&participant))
}

pub fn print_bet_amount(ctx: Context<ReadPeriod>) -> Result<BetAmount> {
    Ok(ctx.accounts.load()?.snapshot())
}

pub fn print_bet_table(ctx: Context<ReadPeriod>, is_odd: bool) -> Result<Vec<BetTableEntry>> {
    Ok(ctx.accounts.load()?.bet_table(Side::from_is_odd(is_odd)))
}

pub fn period(ctx: Context<ReadGame>) -> Result<u64> {
    Ok(ctx.accounts.game.period)
}

/// The default key when no invitor is registered.
pub fn invitor_map(ctx: Context<ReadInvitor>, _participant: Pubkey) -> Result<Pubkey> {
    let invitor = InvitorLink::invitor_of(&ctx.accounts.invitor_link.to_account_info())?;
    Ok(invitor.unwrap_or_default())
}

pub fn fee_rate(ctx: Context<ReadConfig>) -> Result<u64> {
    Ok(ctx.accounts.config.fee_rate)
}

pub fn bonus_rate(ctx: Context<ReadConfig>) -> Result<u64> {
    Ok(ctx.accounts.config.bonus_rate)
}

pub fn fee_receiver(ctx: Context<ReadConfig>) -> Result<Pubkey> {
    Ok(ctx.accounts.config.fee_receiver)
}

pub fn trigger_num(ctx: Context<ReadConfig>) -> Result<u64> {
    Ok(ctx.accounts.config.trigger_num)
}

pub fn var_address(ctx: Context<ReadConfig>) -> Result<Pubkey> {
    Ok(ctx.accounts.config.var_address)
}
