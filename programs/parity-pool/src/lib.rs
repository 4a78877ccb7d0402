use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod settlement;
pub mod state;
pub mod utils;

#[cfg(test)]
mod testing;

use instructions::*;
use state::{BetAmount, BetTableEntry};

declare_id!("6Ck8E1ydZiCrHCDg96RDcANTpEfctC44tWV1oBnZCDNa");

#[program]
pub mod parity_pool {
    use super::*;

    // ===== INITIALIZATION =====

    /// Create the config and game accounts; the signer becomes the operator
    pub fn initialize(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
        instructions::initialize::handler(ctx, args)
    }

    // ===== PLAYER INSTRUCTIONS =====

    /// Bet on odd or even in the current period.
    /// Closes betting and requests the draw once the trigger number is reached.
    pub fn place_bet(ctx: Context<PlaceBet>, is_odd: bool, amount: u64) -> Result<()> {
        instructions::place_bet::handler(ctx, is_odd, amount)
    }

    /// Register the invitor credited with referral bonuses (once per account)
    pub fn set_invitor(ctx: Context<SetInvitor>, invitor: Pubkey) -> Result<()> {
        instructions::set_invitor::handler(ctx, invitor)
    }

    /// Withdraw the signer's credit from a resolved period
    pub fn claim(ctx: Context<Claim>, period_id: u64) -> Result<()> {
        instructions::claim::handler(ctx, period_id)
    }

    // ===== DRAW =====

    /// Close betting on the current period and request its draw
    pub fn lottery(ctx: Context<Lottery>) -> Result<()> {
        instructions::lottery::handler(ctx)
    }

    /// Resolve the current period once its entropy sample has been revealed
    pub fn settle(ctx: Context<Settle>) -> Result<()> {
        instructions::settle::handler(ctx)
    }

    // ===== ADMIN INSTRUCTIONS =====

    pub fn set_fee_rate(ctx: Context<SetFeeRate>, args: SetFeeRateArgs) -> Result<()> {
        instructions::set_fee_rate::handler(ctx, args)
    }

    pub fn set_bonus_rate(ctx: Context<SetBonusRate>, args: SetBonusRateArgs) -> Result<()> {
        instructions::set_bonus_rate::handler(ctx, args)
    }

    pub fn set_fee_receiver(
        ctx: Context<SetFeeReceiver>,
        args: SetFeeReceiverArgs,
    ) -> Result<()> {
        instructions::set_fee_receiver::handler(ctx, args)
    }

    pub fn set_trigger_num(ctx: Context<SetTriggerNum>, args: SetTriggerNumArgs) -> Result<()> {
        instructions::set_trigger_num::handler(ctx, args)
    }

    /// Open an entropy var with the game as its authority
    pub fn new_var(ctx: Context<NewVar>, args: NewVarArgs) -> Result<()> {
        instructions::new_var::handler(ctx, args)
    }

    /// Point draws at an existing entropy var owned by the game
    pub fn set_var_address(ctx: Context<SetVarAddress>) -> Result<()> {
        instructions::set_var_address::handler(ctx)
    }

    // ===== VIEWS =====

    /// Stake of an address in the current period
    pub fn bet_table(ctx: Context<ReadPeriod>, participant: Pubkey) -> Result<u64> {
        instructions::views::bet_table(ctx, participant)
    }

    /// Current period with its odd and even totals
    pub fn print_bet_amount(ctx: Context<ReadPeriod>) -> Result<BetAmount> {
        instructions::views::print_bet_amount(ctx)
    }

    /// Every stake on one side of the current period
    pub fn print_bet_table(ctx: Context<ReadPeriod>, is_odd: bool) -> Result<Vec<BetTableEntry>> {
        instructions::views::print_bet_table(ctx, is_odd)
    }

    pub fn period(ctx: Context<ReadGame>) -> Result<u64> {
        instructions::views::period(ctx)
    }

    pub fn invitor_map(ctx: Context<ReadInvitor>, participant: Pubkey) -> Result<Pubkey> {
        instructions::views::invitor_map(ctx, participant)
    }

    pub fn fee_rate(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::views::fee_rate(ctx)
    }

    pub fn bonus_rate(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::views::bonus_rate(ctx)
    }

    pub fn fee_receiver(ctx: Context<ReadConfig>) -> Result<Pubkey> {
        instructions::views::fee_receiver(ctx)
    }

    pub fn trigger_num(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::views::trigger_num(ctx)
    }

    pub fn var_address(ctx: Context<ReadConfig>) -> Result<Pubkey> {
        instructions::views::var_address(ctx)
    }
}
