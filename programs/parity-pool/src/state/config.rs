use anchor_lang::prelude::*;

use crate::constants::{MAX_WAGERS, RATE_DENOMINATOR};
use crate::errors::AppError;

#[account]
#[derive(Default)]
pub struct Config {
    /// The operator allowed to change the config and trigger draws.
    pub admin: Pubkey,

    /// The address credited with the platform fee.
    pub fee_receiver: Pubkey,

    /// Fee taken from the losing side, in basis points.
    pub fee_rate: u64,

    /// Share of a winner's net winnings paid to their invitor, in basis points.
    pub bonus_rate: u64,

    /// Bet count at which a period closes and its draw is requested.
    pub trigger_num: u64,

    /// The entropy var draws are sampled from.
    pub var_address: Pubkey,

    /// Incremented on every successful update.
    pub version: u64,
}

impl Config {
    pub const LEN: usize = 8 + // discriminator
        32 + // admin
        32 + // fee_receiver
        8 + // fee_rate
        8 + // bonus_rate
        8 + // trigger_num
        32 + // var_address
        8; // version

    pub fn init(
        &mut self,
        admin: Pubkey,
        fee_receiver: Pubkey,
        fee_rate: u64,
        bonus_rate: u64,
        trigger_num: u64,
    ) -> Result<()> {
        require!(fee_receiver != Pubkey::default(), AppError::InvalidFeeReceiver);
        validate_rates(fee_rate, bonus_rate)?;
        validate_trigger_num(trigger_num)?;
        self.admin = admin;
        self.fee_receiver = fee_receiver;
        self.fee_rate = fee_rate;
        self.bonus_rate = bonus_rate;
        self.trigger_num = trigger_num;
        self.var_address = Pubkey::default();
        self.version = 0;
        Ok(())
    }

    pub fn set_fee_rate(&mut self, rate: u64) -> Result<()> {
        validate_rates(rate, self.bonus_rate)?;
        self.fee_rate = rate;
        self.bump_version()
    }

    pub fn set_bonus_rate(&mut self, rate: u64) -> Result<()> {
        validate_rates(self.fee_rate, rate)?;
        self.bonus_rate = rate;
        self.bump_version()
    }

    pub fn set_fee_receiver(&mut self, receiver: Pubkey) -> Result<()> {
        require!(receiver != Pubkey::default(), AppError::InvalidFeeReceiver);
        self.fee_receiver = receiver;
        self.bump_version()
    }

    pub fn set_trigger_num(&mut self, num: u64) -> Result<()> {
        validate_trigger_num(num)?;
        self.trigger_num = num;
        self.bump_version()
    }

    pub fn set_var_address(&mut self, var: Pubkey) -> Result<()> {
        require!(var != Pubkey::default(), AppError::InvalidEntropyVar);
        self.var_address = var;
        self.bump_version()
    }

    /// The values settlement runs against, captured at draw time.
    pub fn rates(&self) -> RateSchedule {
        RateSchedule {
            fee_rate: self.fee_rate,
            bonus_rate: self.bonus_rate,
            fee_receiver: self.fee_receiver,
        }
    }

    fn bump_version(&mut self) -> Result<()> {
        self.version = self.version.checked_add(1).ok_or(AppError::Overflow)?;
        Ok(())
    }
}

/// Snapshot of the config handed to the settlement engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateSchedule {
    pub fee_rate: u64,
    pub bonus_rate: u64,
    pub fee_receiver: Pubkey,
}

/// Bonuses are paid out of the fee, so the bonus rate may not exceed the fee rate.
/// Fee and bonus together may never claim more than the whole losing side.
pub fn validate_rates(fee_rate: u64, bonus_rate: u64) -> Result<()> {
    require!(bonus_rate <= fee_rate, AppError::RateOutOfBounds);
    let combined = fee_rate.checked_add(bonus_rate).ok_or(AppError::RateOutOfBounds)?;
    require!(combined <= RATE_DENOMINATOR, AppError::RateOutOfBounds);
    Ok(())
}

/// A period must close before its ledger can fill up.
pub fn validate_trigger_num(num: u64) -> Result<()> {
    require!(
        (1..=MAX_WAGERS as u64).contains(&num),
        AppError::TriggerOutOfBounds
    );
    Ok(())
}
