use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, TREASURY_SEED},
    error::LotteryError,
    state::{Lottery, Settlement, Treasury, TREASURY_ACCOUNT_SIZE},
};

/// Event emitted when a round is settled
#[event]
pub struct RoundSettled {
    /// The round that was closed
    pub round: u64,
    /// The winner's address
    pub winner: Pubkey,
    /// The winning ticket number
    pub winning_ticket: u64,
    /// Lamports paid to the winner
    pub payout: u64,
    /// Seed supplied by the operator
    pub entropy_seed: u64,
    /// Timestamp the draw was taken from
    pub settled_at: i64,
}

/// Draws the winner of a sold-out round, pays out the pot and opens the next round.
///
/// Execution requirements:
/// 1. The signer must be the lottery operator
/// 2. Every ticket of the round must be sold
/// 3. The holder of the drawn ticket must be among the remaining accounts
///
/// The winning ticket is `unix_timestamp mod capacity`. The timestamp can be
/// influenced by the block producer and by the operator choosing when to
/// submit, so the draw is not fair against either of them.
/// `entropy_seed` is recorded in the logs and the event but does not take
/// part in the draw.
///
/// The landing timestamp is unknown when the transaction is built, so the
/// operator passes every distinct ticket holder of the round as writable
/// remaining accounts and the handler pays whichever one was drawn.
///
/// After execution:
/// - The treasury balance above its rent-exempt minimum is paid to the winner
/// - The player list is cleared and all tickets are available again
///
/// # Errors
/// - `NotAuthorized` if the signer is not the operator
/// - `RoundNotComplete` if tickets are still unsold
/// - `WinnerAccountMissing` if the drawn holder was not supplied
pub fn settle_round<'info>(
    ctx: Context<'_, '_, '_, 'info, SettleRound<'info>>,
    entropy_seed: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    // Keep the treasury rent exempt, the next round reuses it
    let rent_lamports = (Rent::get()?).minimum_balance(TREASURY_ACCOUNT_SIZE);
    let operator = ctx.accounts.operator.key();
    let treasury_account = ctx.accounts.treasury.to_account_info();

    let settlement = pay_out(
        &mut ctx.accounts.lottery,
        operator,
        clock.unix_timestamp,
        rent_lamports,
        &treasury_account,
        ctx.remaining_accounts,
    )?;

    msg!("Entropy seed: {}", entropy_seed);
    msg!("Winning ticket: {}", settlement.winning_ticket);

    emit!(RoundSettled {
        round: settlement.round,
        winner: settlement.winner,
        winning_ticket: settlement.winning_ticket,
        payout: settlement.payout,
        entropy_seed,
        settled_at: clock.unix_timestamp,
    });

    Ok(())
}

/// Settles `lottery` and moves the pot from `treasury` to the drawn holder,
/// looked up by key in `candidates`.
pub fn pay_out<'info>(
    lottery: &mut Lottery,
    operator: Pubkey,
    now: i64,
    rent_lamports: u64,
    treasury: &AccountInfo<'info>,
    candidates: &[AccountInfo<'info>],
) -> Result<Settlement> {
    let settlement = lottery.settle(operator, now, treasury.lamports(), rent_lamports)?;

    let winner = candidates
        .iter()
        .find(|candidate| candidate.key() == settlement.winner)
        .ok_or(LotteryError::WinnerAccountMissing)?;

    if settlement.payout > 0 {
        treasury.sub_lamports(settlement.payout)?;
        winner.add_lamports(settlement.payout)?;
    }

    Ok(settlement)
}

/// Accounts required for the settle_round instruction
///
/// Remaining accounts: the distinct ticket holders of the round, writable.
#[derive(Accounts)]
pub struct SettleRound<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = treasury @ LotteryError::InvalidTreasury,
        has_one = operator @ LotteryError::NotAuthorized,
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [
            TREASURY_SEED,
            lottery.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    pub operator: Signer<'info>,
}
