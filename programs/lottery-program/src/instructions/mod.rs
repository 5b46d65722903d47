pub mod buy_ticket;
pub mod initialize_lottery;
pub mod set_round_capacity;
pub mod set_ticket_cost;
pub mod settle_round;

pub use buy_ticket::*;
pub use initialize_lottery::*;
pub use set_round_capacity::*;
pub use set_ticket_cost::*;
pub use settle_round::*;
