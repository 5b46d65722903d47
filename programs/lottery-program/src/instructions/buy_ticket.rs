use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, TREASURY_SEED},
    error::LotteryError,
    state::{Lottery, Purchase, Treasury},
};

/// Event emitted when tickets are purchased
#[event]
pub struct TicketsPurchased {
    /// The round the tickets belong to
    pub round: u64,
    /// The buyer's address
    pub buyer: Pubkey,
    /// Number of tickets purchased
    pub ticket_count: u64,
    /// Index of the first ticket of this purchase
    pub first_ticket: u64,
    /// Amount kept by the treasury in lamports
    pub payment_amount: u64,
    /// Overpayment returned to the buyer in lamports
    pub refund: u64,
    /// Tickets left in the round after this purchase
    pub tickets_available: u64,
}

/// Instruction to purchase tickets in the current round
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `num_tickets` - The number of tickets to purchase
/// * `attached_value` - Lamports the buyer sends along with the purchase
///
/// # Security Considerations
/// The purchase is validated before any lamports move, in this order:
/// 1. The round must still have tickets (`SoldOut`)
/// 2. `attached_value` must cover `ticket_cost * num_tickets` (`InsufficientPayment`)
/// 3. `num_tickets` must not exceed the remaining tickets (`ExceedsAvailable`)
///
/// # Implementation Notes
/// - Uses checked arithmetic operations to prevent overflow
/// - Updates state before performing external calls
/// - The whole attached value is moved into the treasury, then anything above
///   the exact cost is paid back to the buyer
pub fn buy_ticket(ctx: Context<BuyTicket>, num_tickets: u64, attached_value: u64) -> Result<()> {
    let buyer = ctx.accounts.buyer.key();
    let purchase = ctx
        .accounts
        .lottery
        .record_purchase(buyer, num_tickets, attached_value)?;

    // Transfer the attached lamports from the buyer to the treasury
    if attached_value > 0 {
        anchor_lang::solana_program::program::invoke(
            &anchor_lang::solana_program::system_instruction::transfer(
                &buyer,
                &ctx.accounts.treasury.key(),
                attached_value,
            ),
            &[
                ctx.accounts.buyer.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
                ctx.accounts.treasury.to_account_info(),
            ],
        )?;
    }

    refund_overpayment(
        &purchase,
        &ctx.accounts.treasury.to_account_info(),
        &ctx.accounts.buyer.to_account_info(),
    )?;

    msg!(
        "Sold {} ticket(s) starting at #{}, {} left",
        purchase.ticket_count,
        purchase.first_ticket,
        ctx.accounts.lottery.tickets_available
    );

    emit!(TicketsPurchased {
        round: ctx.accounts.lottery.round,
        buyer,
        ticket_count: purchase.ticket_count,
        first_ticket: purchase.first_ticket,
        payment_amount: purchase.exact_cost,
        refund: purchase.refund,
        tickets_available: ctx.accounts.lottery.tickets_available,
    });

    Ok(())
}

/// Pays the overpayment of `purchase` back to the buyer.
///
/// Lamports are moved directly, this only works because the treasury is a PDA
/// owned by our program.
pub fn refund_overpayment<'info>(
    purchase: &Purchase,
    treasury: &AccountInfo<'info>,
    buyer: &AccountInfo<'info>,
) -> Result<()> {
    if purchase.refund > 0 {
        treasury.sub_lamports(purchase.refund)?;
        buyer.add_lamports(purchase.refund)?;
    }
    Ok(())
}

/// Accounts required for the buy_ticket instruction
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// The lottery whose current round is being sold
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = treasury @ LotteryError::InvalidTreasury,
    )]
    pub lottery: Account<'info, Lottery>,

    /// Treasury account that receives payment for tickets
    /// PDA with seeds ["treasury", lottery_key]
    #[account(
        mut,
        seeds = [
            TREASURY_SEED,
            lottery.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    /// The account purchasing tickets
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Required for the payment transfer
    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_leaves_exact_cost_in_treasury() {
        let treasury_key = Pubkey::new_from_array([2; 32]);
        let buyer_key = Pubkey::new_from_array([3; 32]);
        let system = Pubkey::default();
        let mut lottery = Lottery::new(Pubkey::new_from_array([1; 32]), treasury_key, 1, 5, 255);

        // Treasury after the attached 4 lamports were transferred in
        let (mut treasury_lamports, mut buyer_lamports) = (1_000 + 4, 96);
        let (mut treasury_data, mut buyer_data) = ([0u8; 0], [0u8; 0]);
        let treasury = AccountInfo::new(
            &treasury_key, false, true, &mut treasury_lamports, &mut treasury_data, &crate::ID, false, 0,
        );
        let buyer = AccountInfo::new(
            &buyer_key, true, true, &mut buyer_lamports, &mut buyer_data, &system, false, 0,
        );

        let purchase = lottery.record_purchase(buyer_key, 2, 4).unwrap();
        refund_overpayment(&purchase, &treasury, &buyer).unwrap();

        assert_eq!(treasury.lamports(), 1_000 + 2);
        assert_eq!(buyer.lamports(), 98);
    }

    #[test]
    fn test_exact_payment_moves_nothing_back() {
        let treasury_key = Pubkey::new_from_array([2; 32]);
        let buyer_key = Pubkey::new_from_array([3; 32]);
        let system = Pubkey::default();
        let mut lottery = Lottery::new(Pubkey::new_from_array([1; 32]), treasury_key, 3, 5, 255);

        let (mut treasury_lamports, mut buyer_lamports) = (1_000 + 6, 10);
        let (mut treasury_data, mut buyer_data) = ([0u8; 0], [0u8; 0]);
        let treasury = AccountInfo::new(
            &treasury_key, false, true, &mut treasury_lamports, &mut treasury_data, &crate::ID, false, 0,
        );
        let buyer = AccountInfo::new(
            &buyer_key, true, true, &mut buyer_lamports, &mut buyer_data, &system, false, 0,
        );

        let purchase = lottery.record_purchase(buyer_key, 2, 6).unwrap();
        refund_overpayment(&purchase, &treasury, &buyer).unwrap();

        assert_eq!(treasury.lamports(), 1_006);
        assert_eq!(buyer.lamports(), 10);
    }
}
