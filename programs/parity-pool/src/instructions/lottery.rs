use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke_signed;
use crate::constants::*;
use crate::errors::AppError;
use crate::events::DrawRequestedEvent;
use crate::state::*;
use crate::utils::{is_finalized, read_var, require_top_level};

#[derive(Accounts)]
pub struct Lottery<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump,
        has_one = admin @ AppError::Unauthorized,
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
        payer = admin,
        space = Period::LEN,
        seeds = [PERIOD, &game.period.to_le_bytes()],
        bump,
    )]
    pub period: Box<Account<'info, Period>>,

    /// CHECK: Entropy var, validated against the config
    #[account(mut)]
    pub entropy_var: UncheckedAccount<'info>,

    /// CHECK: Entropy program
    #[account(address = entropy_api::ID)]
    pub entropy_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Lottery>) -> Result<()> {
    require_top_level()?;

    let clock = Clock::get()?;
    let bump = ctx.bumps.period;
    let game_bump = ctx.bumps.game;
    let game_info = ctx.accounts.game.to_account_info();
    let entropy_var = ctx.accounts.entropy_var.to_account_info();

    let config = &ctx.accounts.config;
    let period = &mut ctx.accounts.period;
    period.open(ctx.accounts.game.period, bump);

    msg!("Manual draw for period {} ({} bets)", period.id, period.bet_count);

    // An empty period fails here, which also rolls back the account creation above
    period.begin_resolution()?;
    request_draw(config, &game_info, game_bump, &entropy_var, period, &clock, false)?;

    Ok(())
}

/// Bind a period that just stopped taking bets to an entropy sample that does not exist yet.
///
/// A finalized var is advanced with `Next` to sample `DRAW_DELAY_SLOTS` from now.
/// A freshly opened var whose first sample is still ahead is used as is.
pub(crate) fn request_draw<'info>(
    config: &Config,
    game: &AccountInfo<'info>,
    game_bump: u8,
    entropy_var: &AccountInfo<'info>,
    period: &mut Period,
    clock: &Clock,
    automatic: bool,
) -> Result<()> {
    require!(
        config.var_address != Pubkey::default(),
        AppError::EntropyNotConfigured
    );
    require_keys_eq!(entropy_var.key(), config.var_address, AppError::InvalidEntropyVar);

    let var = read_var(entropy_var)?;
    require_keys_eq!(var.authority, game.key(), AppError::InvalidEntropyVar);

    let draw_slot = if is_finalized(&var) {
        let draw_slot = clock
            .slot
            .checked_add(DRAW_DELAY_SLOTS)
            .ok_or(AppError::Overflow)?;

        let next_ix = entropy_api::sdk::next(game.key(), entropy_var.key(), draw_slot);
        let signer_seeds: &[&[&[u8]]] = &[&[GAME, &[game_bump]]];
        invoke_signed(&next_ix, &[game.clone(), entropy_var.clone()], signer_seeds)?;
        draw_slot
    } else {
        require!(var.end_at > clock.slot, AppError::EntropyNotFinalized);
        var.end_at
    };
    period.bind_draw(entropy_var.key(), draw_slot);

    msg!(
        "Period {} closed with {} bets, draw sampled at slot {}",
        period.id,
        period.bet_count,
        draw_slot
    );

    emit!(DrawRequestedEvent {
        period: period.id,
        entropy_var: entropy_var.key(),
        draw_slot,
        automatic,
        bet_count: period.bet_count,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
