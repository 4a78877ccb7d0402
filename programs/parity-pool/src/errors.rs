use anchor_lang::prelude::*;

#[error_code]
pub enum AppError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Period is not open for bets")]
    PeriodClosed,

    #[msg("Invitor already registered")]
    AlreadyLinked,

    #[msg("Cannot refer yourself")]
    SelfReferral,

    #[msg("Period is already resolving")]
    AlreadyResolving,

    #[msg("No bets to resolve")]
    NothingToResolve,

    #[msg("Bonus rate exceeds the fee rate or rates exceed 100%")]
    RateOutOfBounds,

    #[msg("Trigger number must be between 1 and the ledger capacity")]
    TriggerOutOfBounds,

    #[msg("Not authorized")]
    Unauthorized,

    #[msg("Invalid invitor address")]
    InvalidInvitor,

    #[msg("Invalid fee receiver address")]
    InvalidFeeReceiver,

    #[msg("Period ledger is full")]
    LedgerFull,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Settlement does not conserve the pot")]
    ConservationViolated,

    #[msg("Entropy var not configured")]
    EntropyNotConfigured,

    #[msg("Invalid entropy var")]
    InvalidEntropyVar,

    #[msg("Entropy not finalized")]
    EntropyNotFinalized,

    #[msg("End slot must be in the future")]
    InvalidEndSlot,

    #[msg("No draw has been requested for this period")]
    DrawNotRequested,

    #[msg("Instruction cannot be invoked through CPI")]
    CpiNotAllowed,

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Insufficient balance")]
    InsufficientBalance,
}

#[cfg(test)]
pub(crate) fn assert_app_error<T: std::fmt::Debug>(result: Result<T>, expected: AppError) {
    match result {
        Err(Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, u32::from(expected), "{}", err.error_msg)
        }
        other => panic!("expected {}, got {:?}", expected, other),
    }
}
