use anchor_lang::prelude::*;

use crate::errors::AppError;

/// Invitor link - one per participant, written once and never changed
#[account]
#[derive(Default)]
pub struct InvitorLink {
    /// The participant who registered the invitor
    pub participant: Pubkey,

    /// The invitor credited with referral bonuses
    pub invitor: Pubkey,

    /// Timestamp when the link was created
    pub created_at: i64,
}

impl InvitorLink {
    pub const LEN: usize = 8 + // discriminator
        32 + // participant
        32 + // invitor
        8; // created_at

    pub fn is_linked(&self) -> bool {
        self.participant != Pubkey::default()
    }

    pub fn link(&mut self, participant: Pubkey, invitor: Pubkey, now: i64) -> Result<()> {
        require!(!self.is_linked(), AppError::AlreadyLinked);
        require!(participant != invitor, AppError::SelfReferral);
        require!(invitor != Pubkey::default(), AppError::InvalidInvitor);

        self.participant = participant;
        self.invitor = invitor;
        self.created_at = now;
        Ok(())
    }

    /// Read the invitor from a link PDA that may not exist yet.
    pub fn invitor_of(info: &AccountInfo) -> Result<Option<Pubkey>> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(None);
        }
        let data = info.try_borrow_data()?;
        let link = InvitorLink::try_deserialize(&mut &data[..])?;
        Ok(link.is_linked().then_some(link.invitor))
    }
}
