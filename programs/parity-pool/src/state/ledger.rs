use anchor_lang::prelude::*;

use crate::constants::MAX_WAGERS;
use crate::errors::AppError;

/// The side of the draw a wager backs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Odd,
    Even,
}

impl Default for Side {
    fn default() -> Self {
        Side::Odd
    }
}

impl Side {
    pub fn from_is_odd(is_odd: bool) -> Self {
        if is_odd {
            Side::Odd
        } else {
            Side::Even
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Odd => Side::Even,
            Side::Even => Side::Odd,
        }
    }
}

/// A participant's accumulated stake on one side of one period.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct Wager {
    /// The participant who placed the bet.
    pub participant: Pubkey,

    /// The side the stake backs.
    pub side: Side,

    /// The accumulated stake in lamports.
    pub amount: u64,

    /// The participant's invitor at the time of the latest bet, if any.
    pub invitor: Option<Pubkey>,
}

impl Wager {
    pub const LEN: usize = 32 + // participant
        1 + // side
        8 + // amount
        1 + 32; // invitor
}

/// One row of the per-side bet table.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct BetTableEntry {
    pub participant: Pubkey,
    pub amount: u64,
}

/// Per-period record of every stake, keyed by (participant, side).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    pub wagers: Vec<Wager>,
}

impl Ledger {
    pub const LEN: usize = 4 + Wager::LEN * MAX_WAGERS;

    /// Add `amount` to the participant's stake on `side`, creating the record on first bet.
    pub fn record(
        &mut self,
        participant: Pubkey,
        side: Side,
        amount: u64,
        invitor: Option<Pubkey>,
    ) -> Result<()> {
        if let Some(wager) = self
            .wagers
            .iter_mut()
            .find(|w| w.participant == participant && w.side == side)
        {
            wager.amount = wager.amount.checked_add(amount).ok_or(AppError::Overflow)?;
            if invitor.is_some() {
                wager.invitor = invitor;
            }
            return Ok(());
        }

        require!(self.wagers.len() < MAX_WAGERS, AppError::LedgerFull);
        self.wagers.push(Wager {
            participant,
            side,
            amount,
            invitor,
        });
        Ok(())
    }

    pub fn stake_of(&self, participant: &Pubkey, side: Side) -> u64 {
        self.wagers
            .iter()
            .find(|w| w.participant == *participant && w.side == side)
            .map_or(0, |w| w.amount)
    }

    /// Total stake of a participant across both sides.
    pub fn balance_of(&self, participant: &Pubkey) -> u64 {
        self.wagers
            .iter()
            .filter(|w| w.participant == *participant)
            .map(|w| w.amount)
            .sum()
    }

    pub fn total(&self, side: Side) -> u64 {
        self.wagers
            .iter()
            .filter(|w| w.side == side)
            .map(|w| w.amount)
            .sum()
    }

    pub fn table(&self, side: Side) -> Vec<BetTableEntry> {
        self.wagers
            .iter()
            .filter(|w| w.side == side)
            .map(|w| BetTableEntry {
                participant: w.participant,
                amount: w.amount,
            })
            .collect()
    }

    pub fn winners(&self, side: Side) -> impl Iterator<Item = &Wager> {
        self.wagers.iter().filter(move |w| w.side == side)
    }

    pub fn clear(&mut self) {
        self.wagers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.wagers.is_empty()
    }
}
