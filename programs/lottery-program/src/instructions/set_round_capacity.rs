use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, error::LotteryError, state::Lottery};

/// Event emitted when the operator resizes the round
#[event]
pub struct RoundCapacityUpdated {
    pub previous_capacity: u64,
    pub new_capacity: u64,
}

/// Instruction to change how many tickets a round holds
///
/// Same restrictions as `set_ticket_cost`. The open round is re-armed with
/// the new number of tickets.
pub fn set_round_capacity(ctx: Context<SetRoundCapacity>, new_capacity: u64) -> Result<()> {
    let previous_capacity = ctx
        .accounts
        .lottery
        .update_capacity(ctx.accounts.operator.key(), new_capacity)?;

    msg!("Round capacity: {} -> {}", previous_capacity, new_capacity);

    emit!(RoundCapacityUpdated {
        previous_capacity,
        new_capacity,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetRoundCapacity<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::NotAuthorized,
    )]
    pub lottery: Account<'info, Lottery>,

    pub operator: Signer<'info>,
}
