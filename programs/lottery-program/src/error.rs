use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    #[msg("No tickets are left in this round")]
    SoldOut,
    #[msg("Attached value does not cover the cost of the requested tickets")]
    InsufficientPayment,
    #[msg("Requesting more tickets than are available")]
    ExceedsAvailable,
    #[msg("Only the lottery operator can perform this action")]
    NotAuthorized,
    #[msg("The round still has unsold tickets")]
    RoundNotComplete,
    #[msg("Tickets have already been sold in this round")]
    RoundInProgress,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Ticket cost must be greater than zero")]
    InvalidTicketCost,
    #[msg("Round capacity must be between 1 and the maximum supported capacity")]
    InvalidCapacity,
    #[msg("Drawn ticket index has no holder")]
    WinnerOutOfRange,
    #[msg("Holder of the drawn ticket was not among the supplied accounts")]
    WinnerAccountMissing,
    #[msg("Treasury account does not belong to this lottery")]
    InvalidTreasury,
    #[msg("Program data account does not belong to this program")]
    InvalidProgramData,
}
