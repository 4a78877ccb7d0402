use anchor_lang::prelude::*;
use solana_nostd_keccak::hashv;

use super::{BetTableEntry, Ledger, Side};
use crate::constants::MAX_CREDITS;
use crate::errors::AppError;

/// Lifecycle of a period.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Open,
    Resolving,
    Closed,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Open
    }
}

/// An amount owed by a resolved period, withdrawn by its owner.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct Credit {
    pub owner: Pubkey,
    pub amount: u64,
    pub claimed: bool,
}

impl Credit {
    pub const LEN: usize = 32 + // owner
        8 + // amount
        1; // claimed
}

/// Audit record of a resolution.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    /// The side drawn.
    pub winning_side: Side,

    /// Side totals at resolution time.
    pub odd_total: u64,
    pub even_total: u64,

    /// Fee taken from the losing side, bonuses included.
    pub fee: u64,

    /// Portion of the fee paid out to invitors.
    pub bonus_total: u64,

    /// Stakes returned plus winnings credited to bettors.
    pub payout_total: u64,

    /// Truncation remainder left in the period account.
    pub dust: u64,

    /// Number of winning wagers.
    pub winners: u64,

    /// Nobody backed the drawn side and every stake was returned.
    pub refunded: bool,

    pub resolved_at: i64,
}

impl Outcome {
    pub const LEN: usize = 1 + // winning_side
        8 + // odd_total
        8 + // even_total
        8 + // fee
        8 + // bonus_total
        8 + // payout_total
        8 + // dust
        8 + // winners
        1 + // refunded
        8; // resolved_at

    pub fn pot(&self) -> u64 {
        self.odd_total.saturating_add(self.even_total)
    }
}

/// Aggregate report of the current period.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct BetAmount {
    pub period: u64,
    pub odd_total: u64,
    pub even_total: u64,
}

#[account]
#[derive(Default)]
pub struct Period {
    /// The period number.
    pub id: u64,

    pub phase: Phase,

    /// The amount of SOL wagered on odd.
    pub odd_total: u64,

    /// The amount of SOL wagered on even.
    pub even_total: u64,

    /// The number of bets accepted, repeat bets included.
    pub bet_count: u64,

    /// Hash chain over every accepted bet, mixed into the draw.
    pub seed: [u8; 32],

    /// The entropy var the draw was bound to when betting closed.
    pub entropy_var: Pubkey,

    /// The slot the entropy var samples for this draw.
    pub draw_slot: u64,

    /// Every stake placed in this period.
    pub ledger: Ledger,

    /// Set once the period is resolved.
    pub outcome: Option<Outcome>,

    /// Amounts owed by the resolution.
    pub credits: Vec<Credit>,

    pub bump: u8,
}

impl Period {
    pub const LEN: usize = 8 + // discriminator
        8 + // id
        1 + // phase
        8 + // odd_total
        8 + // even_total
        8 + // bet_count
        32 + // seed
        32 + // entropy_var
        8 + // draw_slot
        Ledger::LEN + // ledger
        1 + Outcome::LEN + // outcome
        4 + (Credit::LEN * MAX_CREDITS) + // credits
        1; // bump

    /// Stamp a freshly created (or still empty) period with its id.
    pub fn open(&mut self, id: u64, bump: u8) {
        if self.phase == Phase::Open && self.bet_count == 0 {
            self.id = id;
            self.bump = bump;
        }
    }

    /// Read a period PDA that may not have been created yet.
    pub fn load_or_empty(info: &AccountInfo, id: u64) -> Result<Period> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(Period {
                id,
                ..Default::default()
            });
        }
        let data = info.try_borrow_data()?;
        Period::try_deserialize(&mut &data[..])
    }

    pub fn place_bet(
        &mut self,
        participant: Pubkey,
        side: Side,
        amount: u64,
        invitor: Option<Pubkey>,
    ) -> Result<()> {
        require!(amount > 0, AppError::InvalidAmount);
        require!(self.phase == Phase::Open, AppError::PeriodClosed);

        let odd_total = match side {
            Side::Odd => self.odd_total.checked_add(amount).ok_or(AppError::Overflow)?,
            Side::Even => self.odd_total,
        };
        let even_total = match side {
            Side::Odd => self.even_total,
            Side::Even => self.even_total.checked_add(amount).ok_or(AppError::Overflow)?,
        };
        odd_total.checked_add(even_total).ok_or(AppError::Overflow)?;
        let bet_count = self.bet_count.checked_add(1).ok_or(AppError::Overflow)?;

        self.ledger.record(participant, side, amount, invitor)?;
        self.odd_total = odd_total;
        self.even_total = even_total;
        self.bet_count = bet_count;
        self.seed = hashv(&[
            &self.seed,
            participant.as_ref(),
            &amount.to_le_bytes(),
            &[side as u8],
        ]);
        Ok(())
    }

    /// Whether the bet count has reached the auto-resolution threshold.
    pub fn should_trigger(&self, trigger_num: u64) -> bool {
        self.phase == Phase::Open && self.bet_count >= trigger_num
    }

    /// Close betting. Only an open period with bets can be resolved.
    pub fn begin_resolution(&mut self) -> Result<()> {
        match self.phase {
            Phase::Resolving => return err!(AppError::AlreadyResolving),
            Phase::Closed => return err!(AppError::PeriodClosed),
            Phase::Open => {}
        }
        require!(self.bet_count > 0, AppError::NothingToResolve);
        self.phase = Phase::Resolving;
        Ok(())
    }

    /// Record which entropy sample settles this period.
    pub fn bind_draw(&mut self, entropy_var: Pubkey, draw_slot: u64) {
        self.entropy_var = entropy_var;
        self.draw_slot = draw_slot;
    }

    /// Archive the outcome and zero the period's balances.
    pub fn close(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.ledger.clear();
        self.odd_total = 0;
        self.even_total = 0;
        self.phase = Phase::Closed;
    }

    pub fn side_total(&self, side: Side) -> u64 {
        match side {
            Side::Odd => self.odd_total,
            Side::Even => self.even_total,
        }
    }

    pub fn pot(&self) -> Result<u64> {
        Ok(self
            .odd_total
            .checked_add(self.even_total)
            .ok_or(AppError::Overflow)?)
    }

    pub fn snapshot(&self) -> BetAmount {
        BetAmount {
            period: self.id,
            odd_total: self.odd_total,
            even_total: self.even_total,
        }
    }

    pub fn balance_of(&self, participant: &Pubkey) -> u64 {
        self.ledger.balance_of(participant)
    }

    pub fn bet_table(&self, side: Side) -> Vec<BetTableEntry> {
        self.ledger.table(side)
    }

    /// Add to the owner's credit, merging with an existing entry.
    pub fn credit(&mut self, owner: Pubkey, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        if let Some(credit) = self.credits.iter_mut().find(|c| c.owner == owner) {
            credit.amount = credit.amount.checked_add(amount).ok_or(AppError::Overflow)?;
            return Ok(());
        }
        require!(self.credits.len() < MAX_CREDITS, AppError::Overflow);
        self.credits.push(Credit {
            owner,
            amount,
            claimed: false,
        });
        Ok(())
    }

    /// Unclaimed amount owed to `owner`.
    pub fn credit_of(&self, owner: &Pubkey) -> u64 {
        self.credits
            .iter()
            .find(|c| c.owner == *owner && !c.claimed)
            .map_or(0, |c| c.amount)
    }

    /// Mark the owner's credit claimed and return its amount.
    pub fn take_credit(&mut self, owner: &Pubkey) -> Result<u64> {
        let credit = self
            .credits
            .iter_mut()
            .find(|c| c.owner == *owner && !c.claimed)
            .ok_or(AppError::NothingToClaim)?;
        credit.claimed = true;
        Ok(credit.amount)
    }
}
