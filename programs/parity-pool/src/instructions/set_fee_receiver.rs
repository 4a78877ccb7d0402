use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::AppError;
use crate::events::ConfigUpdatedEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct SetFeeReceiver<'info> {
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
pub struct SetFeeReceiverArgs {
    pub new_fee_receiver: Pubkey,
}

pub fn handler(ctx: Context<SetFeeReceiver>, args: SetFeeReceiverArgs) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.set_fee_receiver(args.new_fee_receiver)?;
    msg!("Fee receiver set to {}", config.fee_receiver);
    emit!(ConfigUpdatedEvent::from_config(config));
    Ok(())
}
