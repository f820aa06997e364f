//! Staking-pool bookkeeping.
//!
//! One [`StakingPool`] instance exists per staked asset class. The pool
//! distributes ETH deposits pro-rata over the currently staked NFTs via
//! the reward-per-staked-NFT accumulator and carries the integer
//! remainder of every deposit into the next deposit's calculation base,
//! so no currency unit is ever created or destroyed.

mod error;
mod pool;
mod stake_action;

pub use error::Error;
pub use pool::{StakingPool, UnstakeOutcome};
pub use stake_action::{EthDeposit, StakeAction};
