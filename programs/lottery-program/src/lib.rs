use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

declare_id!("G4JgAaVpBacnN65wWfa79ePqctiH3GvyypMnemkvPAGD");

#[program]
pub mod lottery_program {
    use super::*;

    pub fn initialize_lottery(ctx: Context<InitializeLottery>) -> Result<()> {
        instructions::initialize_lottery::initialize_lottery(ctx)
    }

    pub fn buy_ticket(
        ctx: Context<BuyTicket>,
        num_tickets: u64,
        attached_value: u64,
    ) -> Result<()> {
        instructions::buy_ticket::buy_ticket(ctx, num_tickets, attached_value)
    }

    pub fn settle_round<'info>(
        ctx: Context<'_, '_, '_, 'info, SettleRound<'info>>,
        entropy_seed: u64,
    ) -> Result<()> {
        instructions::settle_round::settle_round(ctx, entropy_seed)
    }

    pub fn set_ticket_cost(ctx: Context<SetTicketCost>, new_cost: u64) -> Result<()> {
        instructions::set_ticket_cost::set_ticket_cost(ctx, new_cost)
    }

    pub fn set_round_capacity(ctx: Context<SetRoundCapacity>, new_capacity: u64) -> Result<()> {
        instructions::set_round_capacity::set_round_capacity(ctx, new_capacity)
    }
}
