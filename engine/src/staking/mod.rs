//! The NFT staking surface.
//!
//! One staking pool exists per asset class; both run the same
//! bookkeeping. Pulsar NFT stakers share the ETH reward deposits made
//! at every settlement; Drifter NFT stakers earn raffle eligibility
//! (their pool never receives deposits, so its unstake payout is
//! zero).

pub mod providers;

use tracing::debug;

use pulsar_types::{
    game::GameEvent, staking::Error, Amount, AssetClass, NftId, StakeActionId,
};

use self::providers::{EventProvider, LedgerProvider, NftProvider, RuntimeProvider, StorageProvider};

/// NFT staking interface.
///
/// Stake actions are once-ever per NFT, immutable once created and only
/// removable by their creator. Pool bookkeeping is written back before
/// any NFT custody transfer or reward payout.
pub trait Staking:
    RuntimeProvider + StorageProvider + LedgerProvider + NftProvider + EventProvider + Sized
{
    /// Stakes an NFT owned by the caller, transferring it to the pool's
    /// custody account.
    fn stake(&mut self, class: AssetClass, nft_id: NftId) -> Result<StakeActionId, Error> {
        let staker = self.get_caller();
        let mut pool = self.read_staking_pool(class)?;
        if pool.was_nft_used(nft_id) {
            return Err(Error::NftAlreadyStaked);
        }
        let owner = self.nft_owner(class, nft_id)?;
        if owner != Some(staker) {
            return Err(Error::CallerIsNotNftOwner);
        }
        let (stake_action_id, reward_per_staked_nft) = pool.record_stake(staker, nft_id)?;
        let custody_account = pool.custody_account();
        let num_staked = pool.num_staked_nfts();
        self.write_staking_pool(class, pool)?;

        self.transfer_nft(class, staker, custody_account, nft_id)?;
        self.emit_staking_event(GameEvent::NftStaked {
            class,
            stake_action_id,
            nft_id,
            owner: staker,
            num_staked,
            reward_per_staked_nft,
        })?;
        debug!(%class, %stake_action_id, %nft_id, staker = %staker, "staked NFT");
        Ok(stake_action_id)
    }

    /// Unstakes a stake action created by the caller, returning the NFT
    /// and paying out the reward accrued while it was staked.
    fn unstake(&mut self, class: AssetClass, stake_action_id: StakeActionId)
        -> Result<Amount, Error> {
        let caller = self.get_caller();
        let mut pool = self.read_staking_pool(class)?;
        let outcome = pool.record_unstake(caller, stake_action_id)?;
        let custody_account = pool.custody_account();
        let num_staked = pool.num_staked_nfts();
        self.write_staking_pool(class, pool)?;

        self.transfer_nft(class, custody_account, outcome.owner, outcome.nft_id)?;
        if outcome.reward > 0 {
            self.transfer_to_account(outcome.owner, outcome.reward)?;
        }
        self.emit_staking_event(GameEvent::NftUnstaked {
            class,
            stake_action_id,
            nft_id: outcome.nft_id,
            owner: outcome.owner,
            num_staked,
            reward_amount: outcome.reward,
        })?;
        debug!(
            %class,
            %stake_action_id,
            reward = %outcome.reward,
            "unstaked NFT"
        );
        Ok(outcome.reward)
    }

    /// The reward a live stake action has accrued so far.
    fn pending_staking_reward(
        &mut self,
        class: AssetClass,
        stake_action_id: StakeActionId,
    ) -> Result<Amount, Error> {
        let pool = self.read_staking_pool(class)?;
        pool.pending_reward(stake_action_id)
    }

    /// Number of NFTs currently staked in a pool.
    fn num_staked_nfts(&mut self, class: AssetClass) -> Result<u64, Error> {
        let pool = self.read_staking_pool(class)?;
        Ok(pool.num_staked_nfts())
    }
}
