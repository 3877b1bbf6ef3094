pub mod config;
pub mod types;

pub use config::{RewardsConfig, TOKEN_DECIMALS, TOKEN_UNIT};
pub use types::*;
