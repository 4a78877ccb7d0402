use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::AppError;
use crate::events::ConfigUpdatedEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct SetBonusRate<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG],
        bump,
        has_one = admin @ AppError::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct SetBonusRateArgs {
    pub rate: u64,
}

pub fn handler(ctx: Context<SetBonusRate>, args: SetBonusRateArgs) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.set_bonus_rate(args.rate)?;
    msg!("Bonus rate set to {} bps", config.bonus_rate);
    emit!(ConfigUpdatedEvent::from_config(config));
    Ok(())
}
