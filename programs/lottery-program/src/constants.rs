/// Seed of the singleton lottery PDA.
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Seed prefix of the treasury PDA, followed by the lottery key.
pub const TREASURY_SEED: &[u8] = b"treasury";

pub const DEFAULT_TICKET_COST: u64 = 1_000_000_000; // 1 SOL
pub const DEFAULT_CAPACITY: u64 = 5;

/// Player slots reserved in the lottery account. Capacity can never exceed this.
pub const MAX_CAPACITY: u64 = 100;

/// Timestamp the winning index is measured from (the Unix epoch).
pub const EPOCH_REFERENCE: i64 = 0;
