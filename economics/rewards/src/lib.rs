pub mod ledger;
pub mod shared;
pub mod token;
pub mod types;

pub use ledger::RewardsLedger;
pub use shared::SharedRewardsLedger;
pub use token::TokenLedger;
pub use types::*;
