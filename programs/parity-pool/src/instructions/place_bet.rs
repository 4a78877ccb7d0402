use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::BetPlacedEvent;
use crate::settlement;
use crate::state::*;
use crate::utils::{collect_stake, require_top_level};
use super::lottery::request_draw;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    #[account(mut)]
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
        init_if_needed,
        payer = signer,
        space = Period::LEN,
        seeds = [PERIOD, &game.period.to_le_bytes()],
        bump,
    )]
    pub period: Box<Account<'info, Period>>,

    /// CHECK: Invitor link PDA of the signer, read only if it has been created
    #[account(
        seeds = [INVITOR, signer.key().as_ref()],
        bump,
    )]
    pub invitor_link: UncheckedAccount<'info>,

    /// CHECK: Entropy var, validated against the config when the trigger fires
    #[account(mut)]
    pub entropy_var: UncheckedAccount<'info>,

    /// CHECK: Entropy program
    #[account(address = entropy_api::ID)]
    pub entropy_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceBet>, is_odd: bool, amount: u64) -> Result<()> {
    require_top_level()?;

    let clock = Clock::get()?;
    let side = Side::from_is_odd(is_odd);
    let participant = ctx.accounts.signer.key();
    let invitor = InvitorLink::invitor_of(&ctx.accounts.invitor_link.to_account_info())?;
    let bump = ctx.bumps.period;
    let game_bump = ctx.bumps.game;

    // Clone account infos FIRST before any mutable borrows
    let signer_info = ctx.accounts.signer.to_account_info();
    let game_info = ctx.accounts.game.to_account_info();
    let period_info = ctx.accounts.period.to_account_info();
    let entropy_var = ctx.accounts.entropy_var.to_account_info();
    let system_program_info = ctx.accounts.system_program.to_account_info();

    let config = &ctx.accounts.config;
    let game = &mut ctx.accounts.game;
    let period = &mut ctx.accounts.period;
    period.open(game.period, bump);

    period.place_bet(participant, side, amount, invitor)?;
    game.record_volume(amount)?;

    // Stake moves into the period account, which pays out on claim
    collect_stake(&signer_info, &period_info, &system_program_info, amount)?;

    msg!(
        "Bet {} lamports on {:?} in period {} (bet #{})",
        amount,
        side,
        period.id,
        period.bet_count
    );

    emit!(BetPlacedEvent {
        participant,
        period: period.id,
        side,
        amount,
        stake: period.ledger.stake_of(&participant, side),
        bet_count: period.bet_count,
        timestamp: clock.unix_timestamp,
    });

    if settlement::auto_trigger(period, config.trigger_num)? {
        msg!("Trigger number {} reached, betting closed", config.trigger_num);
        request_draw(config, &game_info, game_bump, &entropy_var, period, &clock, true)?;
    }

    Ok(())
}
