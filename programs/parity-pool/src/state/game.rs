use anchor_lang::prelude::*;

use crate::errors::AppError;

#[account]
#[derive(Default)]
pub struct Game {
    /// The id of the period currently accepting bets.
    pub period: u64,

    /// The number of periods resolved so far.
    pub periods_resolved: u64,

    /// The total amount of SOL ever wagered.
    pub total_volume: u64,

    /// Unix timestamp of the last resolution.
    pub last_resolved_at: i64,
}

impl Game {
    pub const LEN: usize = 8 + // discriminator
        8 + // period
        8 + // periods_resolved
        8 + // total_volume
        8; // last_resolved_at

    pub fn record_volume(&mut self, amount: u64) -> Result<()> {
        self.total_volume = self.total_volume.checked_add(amount).ok_or(AppError::Overflow)?;
        Ok(())
    }

    /// Move the cursor to the next period once the current one has closed.
    pub fn advance(&mut self, resolved_at: i64) -> Result<()> {
        self.period = self.period.checked_add(1).ok_or(AppError::Overflow)?;
        self.periods_resolved = self.periods_resolved.checked_add(1).ok_or(AppError::Overflow)?;
        self.last_resolved_at = resolved_at;
        Ok(())
    }
}
