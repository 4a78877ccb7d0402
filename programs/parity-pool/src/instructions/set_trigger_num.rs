use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::AppError;
use crate::events::ConfigUpdatedEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct SetTriggerNum<'info> {
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
pub struct SetTriggerNumArgs {
    pub num: u64,
}

pub fn handler(ctx: Context<SetTriggerNum>, args: SetTriggerNumArgs) -> Result<()> {
    // Bounded by the ledger capacity so a period always closes before it fills
    let config = &mut ctx.accounts.config;
    config.set_trigger_num(args.num)?;
    msg!("Trigger number set to {}", config.trigger_num);
    emit!(ConfigUpdatedEvent::from_config(config));
    Ok(())
}
