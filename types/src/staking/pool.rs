use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{
    staking::{Error, EthDeposit, StakeAction},
    AccountHash, Amount, NftId, StakeActionId,
};

/// The result of removing a stake action from a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnstakeOutcome {
    /// The NFT to return to the staker.
    pub nft_id: NftId,
    /// The staker.
    pub owner: AccountHash,
    /// The accrued reward owed to the staker, in wei.
    pub reward: Amount,
}

/// Bookkeeping of one staking pool.
///
/// Stake actions are addressed by ids from a monotonically increasing
/// counter (id 0 is never issued); the live actions are additionally
/// kept in a dense index so raffles can draw by position. An NFT can be
/// staked once ever in a given pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct StakingPool {
    custody_account: AccountHash,
    reward_per_staked_nft: Amount,
    undistributed_remainder: Amount,
    total_rewards_paid: Amount,
    action_counter: u64,
    stake_actions: BTreeMap<StakeActionId, StakeAction>,
    staked_action_ids: Vec<StakeActionId>,
    used_nfts: BTreeSet<NftId>,
    deposits: Vec<EthDeposit>,
}

impl StakingPool {
    /// Constructs an empty pool whose staked NFTs are held by
    /// `custody_account`.
    pub fn new(custody_account: AccountHash) -> Self {
        StakingPool {
            custody_account,
            reward_per_staked_nft: 0,
            undistributed_remainder: 0,
            total_rewards_paid: 0,
            action_counter: 0,
            stake_actions: BTreeMap::new(),
            staked_action_ids: Vec::new(),
            used_nfts: BTreeSet::new(),
            deposits: Vec::new(),
        }
    }

    /// The account holding the staked NFTs.
    pub fn custody_account(&self) -> AccountHash {
        self.custody_account
    }

    /// Number of currently staked NFTs.
    pub fn num_staked_nfts(&self) -> u64 {
        self.staked_action_ids.len() as u64
    }

    /// Whether the NFT was ever staked in this pool.
    pub fn was_nft_used(&self, nft_id: NftId) -> bool {
        self.used_nfts.contains(&nft_id)
    }

    /// The reward-per-staked-NFT accumulator.
    pub fn reward_per_staked_nft(&self) -> Amount {
        self.reward_per_staked_nft
    }

    /// The deposit remainder not yet distributed; re-enters the next
    /// deposit's calculation base.
    pub fn undistributed_remainder(&self) -> Amount {
        self.undistributed_remainder
    }

    /// Total rewards paid out by unstake actions so far.
    pub fn total_rewards_paid(&self) -> Amount {
        self.total_rewards_paid
    }

    /// All successful deposits, in order.
    pub fn deposits(&self) -> &[EthDeposit] {
        &self.deposits
    }

    /// Looks up a stake action.
    pub fn stake_action(&self, stake_action_id: StakeActionId) -> Option<&StakeAction> {
        self.stake_actions.get(&stake_action_id)
    }

    /// The owner of the live stake action at dense position `index`,
    /// used by raffles.
    pub fn staker_at(&self, index: u64) -> Option<AccountHash> {
        let stake_action_id = self.staked_action_ids.get(index as usize)?;
        self.stake_actions
            .get(stake_action_id)
            .map(|action| action.owner)
    }

    /// Records a stake of `nft_id` by `owner`.
    ///
    /// Returns the new action id and the accumulator snapshot taken for
    /// it. The caller is responsible for ownership validation and NFT
    /// custody transfer.
    pub fn record_stake(
        &mut self,
        owner: AccountHash,
        nft_id: NftId,
    ) -> Result<(StakeActionId, Amount), Error> {
        if !self.used_nfts.insert(nft_id) {
            return Err(Error::NftAlreadyStaked);
        }
        self.action_counter = self
            .action_counter
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;
        let stake_action_id = StakeActionId::new(self.action_counter);
        let stake_action = StakeAction {
            nft_id,
            owner,
            initial_reward_per_staked_nft: self.reward_per_staked_nft,
        };
        self.stake_actions.insert(stake_action_id, stake_action);
        self.staked_action_ids.push(stake_action_id);
        Ok((stake_action_id, self.reward_per_staked_nft))
    }

    /// Removes the stake action and computes the reward owed to its
    /// owner.
    ///
    /// The caller is responsible for paying the reward and returning the
    /// NFT.
    pub fn record_unstake(
        &mut self,
        caller: AccountHash,
        stake_action_id: StakeActionId,
    ) -> Result<UnstakeOutcome, Error> {
        let stake_action = self
            .stake_actions
            .get(&stake_action_id)
            .copied()
            .ok_or(Error::StakeActionNotFound)?;
        if stake_action.owner != caller {
            return Err(Error::UnauthorizedCaller);
        }
        let reward = self
            .reward_per_staked_nft
            .checked_sub(stake_action.initial_reward_per_staked_nft)
            .ok_or(Error::ArithmeticOverflow)?;
        self.stake_actions.remove(&stake_action_id);
        let position = self
            .staked_action_ids
            .iter()
            .position(|id| *id == stake_action_id)
            .ok_or(Error::StakeActionNotFound)?;
        self.staked_action_ids.swap_remove(position);
        self.total_rewards_paid = self
            .total_rewards_paid
            .checked_add(reward)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(UnstakeOutcome {
            nft_id: stake_action.nft_id,
            owner: stake_action.owner,
            reward,
        })
    }

    /// The reward accrued by a live stake action so far.
    pub fn pending_reward(&self, stake_action_id: StakeActionId) -> Result<Amount, Error> {
        let stake_action = self
            .stake_actions
            .get(&stake_action_id)
            .ok_or(Error::StakeActionNotFound)?;
        self.reward_per_staked_nft
            .checked_sub(stake_action.initial_reward_per_staked_nft)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Distributes `amount` over the currently staked NFTs.
    ///
    /// Fails with [`Error::NoNftsStaked`] when nothing is staked; the
    /// caller must redirect the funds rather than drop them. The
    /// remainder of the integer division is carried into the next
    /// deposit's calculation base.
    pub fn try_deposit(&mut self, amount: Amount) -> Result<EthDeposit, Error> {
        let num_staked = self.num_staked_nfts();
        if num_staked == 0 {
            return Err(Error::NoNftsStaked);
        }
        let distributable = self
            .undistributed_remainder
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let per_nft = distributable / Amount::from(num_staked);
        self.reward_per_staked_nft = self
            .reward_per_staked_nft
            .checked_add(per_nft)
            .ok_or(Error::ArithmeticOverflow)?;
        self.undistributed_remainder = distributable % Amount::from(num_staked);
        let deposit = EthDeposit {
            reward_per_staked_nft_after: self.reward_per_staked_nft,
            amount,
            num_staked,
        };
        self.deposits.push(deposit);
        Ok(deposit)
    }
}
