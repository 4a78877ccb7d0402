use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::LotteryDrawnEvent;
use crate::settlement;
use crate::state::*;
use crate::utils::read_var;

#[derive(Accounts)]
pub struct Settle<'info> {
    pub signer: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [GAME],
        bump,
    )]
    pub game: Account<'info, Game>,

    #[account(
        mut,
        seeds = [PERIOD, &game.period.to_le_bytes()],
        bump = period.bump,
    )]
    pub period: Box<Account<'info, Period>>,

    /// CHECK: Entropy var, must be the one bound when betting closed
    pub entropy_var: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<Settle>) -> Result<()> {
    let clock = Clock::get()?;
    let rates = ctx.accounts.config.rates();
    let var = read_var(&ctx.accounts.entropy_var)?;

    let period = &mut ctx.accounts.period;
    let entropy = settlement::revealed_entropy(period, ctx.accounts.entropy_var.key(), &var, clock.slot)?;
    let outcome = settlement::resolve(period, &rates, &entropy, clock.unix_timestamp)?;

    record_draw(&mut ctx.accounts.game, period.id, &outcome)
}

/// Roll the game over to the next period and publish the outcome.
fn record_draw(game: &mut Game, period_id: u64, outcome: &Outcome) -> Result<()> {
    game.advance(outcome.resolved_at)?;

    msg!(
        "Period {} drawn {:?}: pot={}, fee={}, bonus={}, payouts={}, dust={}, winners={}",
        period_id,
        outcome.winning_side,
        outcome.pot(),
        outcome.fee,
        outcome.bonus_total,
        outcome.payout_total,
        outcome.dust,
        outcome.winners
    );
    if outcome.refunded {
        msg!("Nobody backed the drawn side - all stakes refunded");
    }

    emit!(LotteryDrawnEvent {
        period: period_id,
        winning_side: outcome.winning_side,
        odd_total: outcome.odd_total,
        even_total: outcome.even_total,
        fee: outcome.fee,
        bonus_total: outcome.bonus_total,
        payout_total: outcome.payout_total,
        dust: outcome.dust,
        winners: outcome.winners,
        refunded: outcome.refunded,
        timestamp: outcome.resolved_at,
    });

    Ok(())
}
