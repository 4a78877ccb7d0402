use anchor_lang::prelude::*;
use entropy_api::state::Var;

use crate::errors::AppError;
use crate::state::{Outcome, Period, Phase, RateSchedule, Side, Wager};
use crate::utils::{apply_rate, draw_side, is_finalized, mix, mul_div};

/// Close betting if the bet just placed reached the trigger threshold.
pub fn auto_trigger(period: &mut Period, trigger_num: u64) -> Result<bool> {
    if !period.should_trigger(trigger_num) {
        return Ok(false);
    }
    period.begin_resolution()?;
    Ok(true)
}

/// Entropy for a resolving period, available once the var bound at trigger time
/// has sampled the draw slot and its seed has been revealed.
pub fn revealed_entropy(period: &Period, var_key: Pubkey, var: &Var, slot: u64) -> Result<[u8; 32]> {
    match period.phase {
        Phase::Open => return err!(AppError::DrawNotRequested),
        Phase::Closed => return err!(AppError::PeriodClosed),
        Phase::Resolving => {}
    }
    require_keys_eq!(var_key, period.entropy_var, AppError::InvalidEntropyVar);
    require!(
        var.end_at == period.draw_slot && slot >= period.draw_slot,
        AppError::EntropyNotFinalized
    );
    require!(is_finalized(var), AppError::EntropyNotFinalized);
    Ok(mix(&var.value, &period.seed, period.id))
}

/// Draw the winning side of a resolving period, credit every payout and archive it.
pub fn resolve(
    period: &mut Period,
    rates: &RateSchedule,
    entropy: &[u8; 32],
    now: i64,
) -> Result<Outcome> {
    let outcome = settle(period, rates, draw_side(entropy), now)?;
    period.close(outcome.clone());
    Ok(outcome)
}

/// Split a resolving period's pot into credits for a known winning side.
///
/// Winners get their stake back plus a pro-rata share of the losing side net of the fee.
/// Invitor bonuses are carved out of the fee and the fee receiver is credited what is left.
/// Truncation dust stays in the period account.
pub fn settle(
    period: &mut Period,
    rates: &RateSchedule,
    winning_side: Side,
    now: i64,
) -> Result<Outcome> {
    match period.phase {
        Phase::Open => return err!(AppError::DrawNotRequested),
        Phase::Closed => return err!(AppError::PeriodClosed),
        Phase::Resolving => {}
    }
    require!(
        period.ledger.total(Side::Odd) == period.odd_total
            && period.ledger.total(Side::Even) == period.even_total,
        AppError::ConservationViolated
    );

    let pot = period.pot()?;
    let winning_total = period.side_total(winning_side);
    let losing_total = pot.checked_sub(winning_total).ok_or(AppError::Overflow)?;

    let mut outcome = Outcome {
        winning_side,
        odd_total: period.odd_total,
        even_total: period.even_total,
        resolved_at: now,
        ..Default::default()
    };

    // Nobody backed the drawn side: everyone gets their stake back.
    if winning_total == 0 {
        let wagers: Vec<Wager> = period.ledger.winners(winning_side.opposite()).cloned().collect();
        for wager in wagers {
            period.credit(wager.participant, wager.amount)?;
            outcome.payout_total = add(outcome.payout_total, wager.amount)?;
        }
        outcome.refunded = true;
        check_conservation(period, &outcome, pot)?;
        return Ok(outcome);
    }

    let fee = apply_rate(losing_total, rates.fee_rate)?;
    let distributable = losing_total.checked_sub(fee).ok_or(AppError::Overflow)?;

    let mut fee_left = fee;
    let mut shares = 0u64;
    let winners: Vec<Wager> = period.ledger.winners(winning_side).cloned().collect();
    for wager in winners {
        let share = mul_div(distributable, wager.amount, winning_total)?;
        let payout = add(wager.amount, share)?;
        period.credit(wager.participant, payout)?;

        shares = add(shares, share)?;
        outcome.payout_total = add(outcome.payout_total, payout)?;
        outcome.winners += 1;

        if let Some(invitor) = wager.invitor {
            // bonus_rate <= fee_rate keeps the sum of bonuses within the fee
            let bonus = apply_rate(share, rates.bonus_rate)?;
            fee_left = fee_left.checked_sub(bonus).ok_or(AppError::ConservationViolated)?;
            period.credit(invitor, bonus)?;
            outcome.bonus_total = add(outcome.bonus_total, bonus)?;
        }
    }
    period.credit(rates.fee_receiver, fee_left)?;

    outcome.fee = fee;
    outcome.dust = distributable.checked_sub(shares).ok_or(AppError::ConservationViolated)?;
    check_conservation(period, &outcome, pot)?;
    Ok(outcome)
}

/// Every lamport of the pot is either credited or left behind as dust.
fn check_conservation(period: &Period, outcome: &Outcome, pot: u64) -> Result<()> {
    let accounted = add(add(outcome.payout_total, outcome.fee)?, outcome.dust)?;
    require!(accounted == pot, AppError::ConservationViolated);

    let credited = period
        .credits
        .iter()
        .try_fold(0u64, |acc, c| acc.checked_add(c.amount))
        .ok_or(AppError::Overflow)?;
    require!(
        add(credited, outcome.dust)? == pot,
        AppError::ConservationViolated
    );
    Ok(())
}

fn add(a: u64, b: u64) -> Result<u64> {
    Ok(a.checked_add(b).ok_or(AppError::Overflow)?)
}
