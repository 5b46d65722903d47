use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, error::LotteryError, state::Lottery};

/// Event emitted when the operator changes the ticket price
#[event]
pub struct TicketCostUpdated {
    pub previous_cost: u64,
    pub new_cost: u64,
}

/// Instruction to change the price of a ticket
///
/// Only the operator may call it, and only before the first ticket of the
/// current round is sold, so tickets already sold keep their price.
pub fn set_ticket_cost(ctx: Context<SetTicketCost>, new_cost: u64) -> Result<()> {
    let previous_cost = ctx
        .accounts
        .lottery
        .update_ticket_cost(ctx.accounts.operator.key(), new_cost)?;

    emit!(TicketCostUpdated {
        previous_cost,
        new_cost,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetTicketCost<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::NotAuthorized,
    )]
    pub lottery: Account<'info, Lottery>,

    pub operator: Signer<'info>,
}
