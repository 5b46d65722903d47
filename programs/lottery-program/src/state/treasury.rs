use anchor_lang::prelude::*;

use crate::error::LotteryError;

// 8 discriminator, 32 lottery, 1 bump
pub const TREASURY_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Program-owned PDA holding the lamports collected for the current round.
///
/// The account is reused across rounds, so its rent-exempt minimum is never
/// part of the pot.
#[account]
pub struct Treasury {
    /// Lottery this treasury collects for
    pub lottery: Pubkey,
    pub bump: u8,
}

impl Treasury {
    /// Lamports that can be paid out of a treasury holding `lamports`.
    pub fn pot_balance(lamports: u64, rent_lamports: u64) -> Result<u64> {
        let pot = lamports
            .checked_sub(rent_lamports)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        Ok(pot)
    }
}
