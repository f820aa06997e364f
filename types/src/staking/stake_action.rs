#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{AccountHash, Amount, NftId};

/// One staked NFT, immutable once created and owned by the pool that
/// created it.
///
/// The accumulator snapshot taken at stake time is what makes the
/// staker's claim exact: everything deposited after this action accrues
/// as `reward_per_staked_nft - initial_reward_per_staked_nft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct StakeAction {
    /// The staked NFT.
    pub nft_id: NftId,
    /// The staker.
    pub owner: AccountHash,
    /// The pool's reward-per-staked-NFT accumulator at stake time.
    pub initial_reward_per_staked_nft: Amount,
}

/// One successful ETH deposit into a staking pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct EthDeposit {
    /// The reward-per-staked-NFT accumulator after the deposit.
    pub reward_per_staked_nft_after: Amount,
    /// The deposited amount in wei.
    pub amount: Amount,
    /// Number of staked NFTs the deposit was distributed over.
    pub num_staked: u64,
}
