use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::ConfigUpdatedEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = Config::LEN,
        seeds = [CONFIG],
        bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = signer,
        space = Game::LEN,
        seeds = [GAME],
        bump,
    )]
    pub game: Account<'info, Game>,

    /// CHECK: Fee receiver - can be any wallet
    pub fee_receiver: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

/// Omitted values fall back to the defaults in `constants`.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeArgs {
    pub fee_rate: Option<u64>,
    pub bonus_rate: Option<u64>,
    pub trigger_num: Option<u64>,
}

pub fn handler(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
    // The deployer becomes the operator
    let config = &mut ctx.accounts.config;
    config.init(
        ctx.accounts.signer.key(),
        ctx.accounts.fee_receiver.key(),
        args.fee_rate.unwrap_or(DEFAULT_FEE_RATE),
        args.bonus_rate.unwrap_or(DEFAULT_BONUS_RATE),
        args.trigger_num.unwrap_or(DEFAULT_TRIGGER_NUM),
    )?;

    // Period 0 opens with the first bet
    let game = &mut ctx.accounts.game;
    game.period = 0;
    game.periods_resolved = 0;
    game.total_volume = 0;
    game.last_resolved_at = 0;

    emit!(ConfigUpdatedEvent::from_config(config));

    msg!(
        "Initialized: operator={}, fee_receiver={}, fee_rate={}, bonus_rate={}, trigger_num={}",
        config.admin,
        config.fee_receiver,
        config.fee_rate,
        config.bonus_rate,
        config.trigger_num
    );

    Ok(())
}
