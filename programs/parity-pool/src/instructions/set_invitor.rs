use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::InvitorRegisteredEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct SetInvitor<'info> {
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(
        init_if_needed,
        payer = participant,
        space = InvitorLink::LEN,
        seeds = [INVITOR, participant.key().as_ref()],
        bump,
    )]
    pub invitor_link: Account<'info, InvitorLink>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<SetInvitor>, invitor: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let participant = ctx.accounts.participant.key();

    // Rejects relinking, self referral and the default key
    ctx.accounts
        .invitor_link
        .link(participant, invitor, clock.unix_timestamp)?;

    emit!(InvitorRegisteredEvent {
        participant,
        invitor,
        timestamp: clock.unix_timestamp,
    });

    msg!("Invitor registered: {} invited by {}", participant, invitor);

    Ok(())
}
