use anchor_lang::prelude::*;

use crate::state::{Config, Side};

/// Event emitted when a bet is accepted
#[event]
pub struct BetPlacedEvent {
    /// The participant who placed the bet
    pub participant: Pubkey,

    /// The period id
    pub period: u64,

    /// The side backed
    pub side: Side,

    /// The amount of SOL added by this bet
    pub amount: u64,

    /// The participant's total stake on this side after the bet
    pub stake: u64,

    /// The number of bets accepted in the period so far
    pub bet_count: u64,

    /// Unix timestamp when event occurred
    pub timestamp: i64,
}

/// Event emitted when betting closes and the draw is bound to an entropy sample
#[event]
pub struct DrawRequestedEvent {
    /// The period that stopped taking bets
    pub period: u64,

    /// The entropy var the draw will be sampled from
    pub entropy_var: Pubkey,

    /// The slot whose hash settles the draw
    pub draw_slot: u64,

    /// Whether betting closed on the bet-count trigger
    pub automatic: bool,

    /// The number of bets accepted in the period
    pub bet_count: u64,

    /// Unix timestamp when event occurred
    pub timestamp: i64,
}

/// Event emitted when a period is resolved
#[event]
pub struct LotteryDrawnEvent {
    /// The period that was resolved
    pub period: u64,

    /// The side drawn
    pub winning_side: Side,

    /// The total amount of SOL wagered on odd
    pub odd_total: u64,

    /// The total amount of SOL wagered on even
    pub even_total: u64,

    /// The fee taken from the losing side (bonuses included)
    pub fee: u64,

    /// The portion of the fee paid to invitors
    pub bonus_total: u64,

    /// The total credited to bettors
    pub payout_total: u64,

    /// Truncation remainder kept by the period account
    pub dust: u64,

    /// The number of winning wagers
    pub winners: u64,

    /// Whether every stake was returned because nobody backed the drawn side
    pub refunded: bool,

    /// Unix timestamp when event occurred
    pub timestamp: i64,
}

/// Event emitted when an invitor is registered
#[event]
pub struct InvitorRegisteredEvent {
    /// The participant who registered the invitor
    pub participant: Pubkey,

    /// The invitor
    pub invitor: Pubkey,

    /// Unix timestamp when event occurred
    pub timestamp: i64,
}

/// Event emitted when a credit is withdrawn
#[event]
pub struct CreditClaimedEvent {
    /// The owner of the credit
    pub owner: Pubkey,

    /// The period the credit was earned in
    pub period: u64,

    /// The amount of SOL withdrawn
    pub amount: u64,

    /// Unix timestamp when event occurred
    pub timestamp: i64,
}

/// Event emitted when the config changes
#[event]
pub struct ConfigUpdatedEvent {
    pub fee_rate: u64,
    pub bonus_rate: u64,
    pub fee_receiver: Pubkey,
    pub trigger_num: u64,
    pub var_address: Pubkey,

    /// The config version after the update
    pub version: u64,
}

impl ConfigUpdatedEvent {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fee_rate: config.fee_rate,
            bonus_rate: config.bonus_rate,
            fee_receiver: config.fee_receiver,
            trigger_num: config.trigger_num,
            var_address: config.var_address,
            version: config.version,
        }
    }
}
