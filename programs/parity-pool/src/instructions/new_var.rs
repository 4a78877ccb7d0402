use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke_signed;
use entropy_api::state::var_pda;
use crate::constants::*;
use crate::errors::AppError;
use crate::events::ConfigUpdatedEvent;
use crate::state::*;

#[derive(Accounts)]
#[instruction(args: NewVarArgs)]
pub struct NewVar<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG],
        bump,
        has_one = admin @ AppError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    /// Authority of the var, so only this program can advance it
    #[account(
        mut,
        seeds = [GAME],
        bump,
    )]
    pub game: Account<'info, Game>,

    /// CHECK: Provider that committed to the seed chain
    #[account(mut)]
    pub provider: UncheckedAccount<'info>,

    /// CHECK: Var PDA of the entropy program, created by the CPI
    #[account(
        mut,
        address = var_pda(game.key(), args.id).0 @ AppError::InvalidEntropyVar,
    )]
    pub var_account: UncheckedAccount<'info>,

    /// CHECK: Entropy program
    #[account(address = entropy_api::ID)]
    pub entropy_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct NewVarArgs {
    pub id: u64,
    pub commit: [u8; 32],
    pub samples: u64,
    pub end_at: u64,
}

pub fn handler(ctx: Context<NewVar>, args: NewVarArgs) -> Result<()> {
    let clock = Clock::get()?;
    require!(args.end_at > clock.slot, AppError::InvalidEndSlot);

    let game = ctx.accounts.game.to_account_info();
    let open_ix = entropy_api::sdk::open(
        game.key(),
        ctx.accounts.admin.key(),
        args.id,
        ctx.accounts.provider.key(),
        args.commit,
        false,
        args.samples,
        args.end_at,
    );

    let signer_seeds: &[&[&[u8]]] = &[&[GAME, &[ctx.bumps.game]]];
    invoke_signed(
        &open_ix,
        &[
            game,
            ctx.accounts.admin.to_account_info(),
            ctx.accounts.provider.to_account_info(),
            ctx.accounts.var_account.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.entropy_program.to_account_info(),
        ],
        signer_seeds,
    )?;

    let config = &mut ctx.accounts.config;
    config.set_var_address(ctx.accounts.var_account.key())?;

    msg!(
        "Entropy var {} opened: samples={}, first sample at slot {}",
        config.var_address,
        args.samples,
        args.end_at
    );
    emit!(ConfigUpdatedEvent::from_config(config));

    Ok(())
}
