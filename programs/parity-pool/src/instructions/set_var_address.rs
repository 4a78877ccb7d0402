use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::AppError;
use crate::events::ConfigUpdatedEvent;
use crate::state::*;
use crate::utils::read_var;

#[derive(Accounts)]
pub struct SetVarAddress<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG],
        bump,
        has_one = admin @ AppError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [GAME],
        bump,
    )]
    pub game: Account<'info, Game>,

    /// CHECK: Entropy var, read to check its authority
    pub var_account: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<SetVarAddress>) -> Result<()> {
    // The game PDA must be able to sign Next on this var
    let var = read_var(&ctx.accounts.var_account)?;
    require_keys_eq!(var.authority, ctx.accounts.game.key(), AppError::InvalidEntropyVar);

    let config = &mut ctx.accounts.config;
    config.set_var_address(ctx.accounts.var_account.key())?;
    msg!("Entropy var set to {}", config.var_address);
    emit!(ConfigUpdatedEvent::from_config(config));
    Ok(())
}
