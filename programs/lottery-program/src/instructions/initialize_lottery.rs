use anchor_lang::prelude::*;

use crate::{
    constants::{DEFAULT_CAPACITY, DEFAULT_TICKET_COST, LOTTERY_SEED, TREASURY_SEED},
    error::LotteryError,
    program::LotteryProgram,
    state::{Lottery, Treasury, LOTTERY_ACCOUNT_SIZE, TREASURY_ACCOUNT_SIZE},
};

/// Event emitted when the lottery is created
#[event]
pub struct LotteryInitialized {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The operator allowed to settle and reconfigure rounds
    pub operator: Pubkey,
    /// The treasury holding the pot
    pub treasury: Pubkey,
    /// Price per ticket in lamports
    pub ticket_cost: u64,
    /// Tickets per round
    pub capacity: u64,
}

/// Instruction to create the lottery and its treasury
/// This should be called once during program deployment
///
/// # Security Considerations
/// - Creates the singleton lottery PDA with seed "lottery"
/// - Creates the treasury PDA with seeds ["treasury", lottery_key]
/// - The signer must be the program's upgrade authority, checked through its
///   program data account, so nobody can front-run deployment and take the
///   operator role
/// - The signer becomes the operator and cannot be changed afterwards
///
/// # Implementation Notes
/// - Starts the first round with the default ticket cost and capacity
pub fn initialize_lottery(ctx: Context<InitializeLottery>) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let treasury_key = ctx.accounts.treasury.key();
    let operator = ctx.accounts.operator.key();
    require_upgrade_authority(ctx.accounts.program_data.upgrade_authority_address, operator)?;

    ctx.accounts.lottery.set_inner(Lottery::new(
        operator,
        treasury_key,
        DEFAULT_TICKET_COST,
        DEFAULT_CAPACITY,
        ctx.bumps.lottery,
    ));
    ctx.accounts.treasury.lottery = lottery_key;
    ctx.accounts.treasury.bump = ctx.bumps.treasury;

    emit!(LotteryInitialized {
        lottery: lottery_key,
        operator,
        treasury: treasury_key,
        ticket_cost: DEFAULT_TICKET_COST,
        capacity: DEFAULT_CAPACITY,
    });

    Ok(())
}

/// Only the upgrade authority of this program may become its operator.
/// An immutable program (no authority left) can no longer be initialized.
pub fn require_upgrade_authority(upgrade_authority: Option<Pubkey>, signer: Pubkey) -> Result<()> {
    let authority = upgrade_authority.ok_or(LotteryError::NotAuthorized)?;
    require_keys_eq!(signer, authority, LotteryError::NotAuthorized);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(
        init,
        payer = operator,
        space = LOTTERY_ACCOUNT_SIZE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = operator,
        space = TREASURY_ACCOUNT_SIZE,
        seeds = [
            TREASURY_SEED,
            lottery.key().as_ref(),
        ],
        bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key())
            @ LotteryError::InvalidProgramData,
    )]
    pub program: Program<'info, LotteryProgram>,

    /// Upgradeable loader state of this program, holds the upgrade authority
    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}
