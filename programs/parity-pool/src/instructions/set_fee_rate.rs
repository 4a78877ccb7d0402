use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::AppError;
use crate::events::ConfigUpdatedEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct SetFeeRate<'info> {
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
pub struct SetFeeRateArgs {
    pub rate: u64,
}

pub fn handler(ctx: Context<SetFeeRate>, args: SetFeeRateArgs) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.set_fee_rate(args.rate)?;
    msg!("Fee rate set to {} bps", config.fee_rate);
    emit!(ConfigUpdatedEvent::from_config(config));
    Ok(())
}
