use anchor_lang::prelude::*;

use crate::{
    constants::{EPOCH_REFERENCE, MAX_CAPACITY},
    error::LotteryError,
    state::Treasury,
};

// Space calculation:
// 8 (discriminator) +
// 32 (operator) +
// 32 (treasury) +
// 8 (ticket_cost) +
// 8 (capacity) +
// 8 (tickets_available) +
// 8 (round) +
// 4 (length of players) +
// 32 * MAX_CAPACITY (players) +
// 1 (bump) =
// 3309 total bytes
pub const LOTTERY_ACCOUNT_SIZE: usize =
    8 + 32 + 32 + 8 + 8 + 8 + 8 + 4 + 32 * MAX_CAPACITY as usize + 1;

/// Result of a successful purchase, used by the handler to move lamports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    /// Index of the first ticket handed out by this purchase
    pub first_ticket: u64,
    pub ticket_count: u64,
    /// Amount the treasury keeps
    pub exact_cost: u64,
    /// Overpayment returned to the buyer
    pub refund: u64,
}

/// Result of a successful settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Round that was just closed
    pub round: u64,
    pub winner: Pubkey,
    pub winning_ticket: u64,
    pub payout: u64,
}

/// The single live lottery round.
///
/// Two logical phases are derived from `tickets_available`:
/// * Selling - `tickets_available > 0`, purchases are accepted
/// * Drawable - `tickets_available == 0`, the operator may settle
///
/// `players[i]` holds ticket `i`, so `players.len() == capacity - tickets_available`
/// in every state reachable through the methods below.
#[account]
#[derive(Debug)]
pub struct Lottery {
    pub operator: Pubkey,
    pub treasury: Pubkey,
    pub ticket_cost: u64,
    pub capacity: u64,
    pub tickets_available: u64,
    /// Generation counter, bumped every time a round is settled
    pub round: u64,
    pub players: Vec<Pubkey>,
    pub bump: u8,
}

impl Lottery {
    pub fn new(
        operator: Pubkey,
        treasury: Pubkey,
        ticket_cost: u64,
        capacity: u64,
        bump: u8,
    ) -> Self {
        Self {
            operator,
            treasury,
            ticket_cost,
            capacity,
            tickets_available: capacity,
            round: 0,
            players: Vec::new(),
            bump,
        }
    }

    pub fn tickets_sold(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn is_drawable(&self) -> bool {
        self.tickets_available == 0
    }

    /// True between rounds, before any ticket of the current round is sold.
    pub fn is_fresh(&self) -> bool {
        self.tickets_available == self.capacity
    }

    /// Sells `num_tickets` to `buyer`, who attached `attached_value` lamports.
    ///
    /// Checks run in a fixed order and the first failure leaves the state untouched:
    /// 1. the round is not sold out
    /// 2. the attached value covers `ticket_cost * num_tickets`
    /// 3. enough tickets remain
    ///
    /// A purchase of zero tickets is accepted while the round is selling and
    /// refunds the whole attached value.
    pub fn record_purchase(
        &mut self,
        buyer: Pubkey,
        num_tickets: u64,
        attached_value: u64,
    ) -> Result<Purchase> {
        require!(self.tickets_available > 0, LotteryError::SoldOut);

        let exact_cost = self
            .ticket_cost
            .checked_mul(num_tickets)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        require!(
            attached_value >= exact_cost,
            LotteryError::InsufficientPayment
        );
        require!(
            num_tickets <= self.tickets_available,
            LotteryError::ExceedsAvailable
        );

        let first_ticket = self.tickets_sold();
        let new_entries =
            usize::try_from(num_tickets).map_err(|_| LotteryError::ArithmeticOverflow)?;

        self.tickets_available = self
            .tickets_available
            .checked_sub(num_tickets)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        self.players
            .extend(std::iter::repeat(buyer).take(new_entries));

        let refund = attached_value
            .checked_sub(exact_cost)
            .ok_or(LotteryError::ArithmeticOverflow)?;

        Ok(Purchase {
            first_ticket,
            ticket_count: num_tickets,
            exact_cost,
            refund,
        })
    }

    /// Ticket index drawn at `now`.
    ///
    /// The draw is `(now - EPOCH_REFERENCE) mod capacity`. This is weak randomness:
    /// the block producer controls the timestamp and the operator controls when
    /// settlement is submitted. It is kept as is so past draws can be replayed.
    pub fn winning_ticket(&self, now: i64) -> Result<u64> {
        let elapsed = now
            .checked_sub(EPOCH_REFERENCE)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        let elapsed = u64::try_from(elapsed).map_err(|_| LotteryError::ArithmeticOverflow)?;

        let ticket = elapsed
            .checked_rem(self.capacity)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        Ok(ticket)
    }

    /// Closes a sold-out round for `caller` and re-arms the lottery for the next round.
    ///
    /// The payout is everything the treasury holds above `rent_lamports`. It is
    /// only computed once the caller and the round have been checked.
    pub fn settle(
        &mut self,
        caller: Pubkey,
        now: i64,
        treasury_lamports: u64,
        rent_lamports: u64,
    ) -> Result<Settlement> {
        require_keys_eq!(caller, self.operator, LotteryError::NotAuthorized);
        require!(self.is_drawable(), LotteryError::RoundNotComplete);

        let winning_ticket = self.winning_ticket(now)?;
        let index =
            usize::try_from(winning_ticket).map_err(|_| LotteryError::WinnerOutOfRange)?;
        let winner = *self
            .players
            .get(index)
            .ok_or(LotteryError::WinnerOutOfRange)?;
        let payout = Treasury::pot_balance(treasury_lamports, rent_lamports)?;

        let round = self.round;
        self.start_next_round()?;

        Ok(Settlement {
            round,
            winner,
            winning_ticket,
            payout,
        })
    }

    /// Replaces the ticket cost between rounds and returns the previous one.
    pub fn update_ticket_cost(&mut self, caller: Pubkey, new_cost: u64) -> Result<u64> {
        self.require_operator_between_rounds(caller)?;
        require!(new_cost > 0, LotteryError::InvalidTicketCost);

        let previous = self.ticket_cost;
        self.ticket_cost = new_cost;
        Ok(previous)
    }

    /// Replaces the round capacity between rounds and returns the previous one.
    /// The open round is re-armed to the new size.
    pub fn update_capacity(&mut self, caller: Pubkey, new_capacity: u64) -> Result<u64> {
        self.require_operator_between_rounds(caller)?;
        require!(
            new_capacity > 0 && new_capacity <= MAX_CAPACITY,
            LotteryError::InvalidCapacity
        );

        let previous = self.capacity;
        self.capacity = new_capacity;
        self.tickets_available = new_capacity;
        Ok(previous)
    }

    fn require_operator_between_rounds(&self, caller: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.operator, LotteryError::NotAuthorized);
        require!(self.is_fresh(), LotteryError::RoundInProgress);
        Ok(())
    }

    fn start_next_round(&mut self) -> Result<()> {
        self.players.clear();
        self.tickets_available = self.capacity;
        self.round = self
            .round
            .checked_add(1)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        Ok(())
    }
}
