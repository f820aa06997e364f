#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{AccountHash, Amount, AssetClass, NftId, RoundId, StakeActionId, Timestamp};

/// A record of one state-changing sub-step, appended to the host's
/// strictly ordered, append-only event sink.
///
/// Emission order is part of the contract: within a bid, the first-bid
/// marker (if any) precedes the bid record; within a settlement, the
/// order is bidder-raffle NFT awards, the endurance-champion record,
/// the last-FLUX-bidder record (if any), staker-raffle NFT awards, the
/// chrono-warrior allocation, bidder-raffle ETH allocations, the
/// main-prize summary, the staking deposit (if accepted), the charity
/// transfer, and the next round's activation time. Off-process
/// observers reconcile totals against this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub enum GameEvent {
    /// ETH was donated to the game.
    EthDonated {
        /// Current round.
        round_id: RoundId,
        /// The donor.
        donor: AccountHash,
        /// Donated amount in wei.
        amount: Amount,
    },
    /// ETH was donated together with donor-supplied data.
    EthDonatedWithInfo {
        /// Current round.
        round_id: RoundId,
        /// The donor.
        donor: AccountHash,
        /// Donated amount in wei.
        amount: Amount,
        /// Index of the appended donation record.
        record_index: u64,
    },
    /// The first bid of a round was placed; the main-prize countdown
    /// started.
    FirstBidPlacedInRound {
        /// The round that opened.
        round_id: RoundId,
        /// When the bid was placed.
        timestamp: Timestamp,
    },
    /// A bid was accepted.
    BidPlaced {
        /// Current round.
        round_id: RoundId,
        /// The bidder.
        bidder: AccountHash,
        /// ETH paid, for an ETH bid.
        paid_eth: Option<Amount>,
        /// FLUX paid, for a FLUX bid.
        paid_flux: Option<Amount>,
        /// The Drifter NFT used for a discount, if any.
        drifter_nft_id: Option<NftId>,
        /// The bid message.
        message: String,
        /// The main-prize deadline after this bid.
        main_prize_time: Timestamp,
    },
    /// A raffled Pulsar NFT was awarded.
    RaffleWinnerPulsarNftAwarded {
        /// The settled round.
        round_id: RoundId,
        /// `true` for a Drifter-staker winner, `false` for a bidder
        /// winner.
        from_staker_pool: bool,
        /// Index of the winner within its raffle batch.
        winner_index: u64,
        /// The winner.
        winner: AccountHash,
        /// The awarded NFT.
        nft_id: NftId,
    },
    /// The endurance champion's settlement prizes were paid.
    EnduranceChampionPrizePaid {
        /// The settled round.
        round_id: RoundId,
        /// The endurance champion.
        champion: AccountHash,
        /// FLUX minted to the champion.
        flux_amount: Amount,
        /// Pulsar NFT minted to the champion.
        nft_id: NftId,
    },
    /// The last FLUX bidder's settlement prizes were paid.
    LastFluxBidderPrizePaid {
        /// The settled round.
        round_id: RoundId,
        /// The last FLUX bidder of the round.
        bidder: AccountHash,
        /// FLUX minted to the bidder.
        flux_amount: Amount,
        /// Pulsar NFT minted to the bidder.
        nft_id: NftId,
    },
    /// The chrono-warrior's ETH prize was escrowed.
    ChronoWarriorEthPrizeAllocated {
        /// The settled round.
        round_id: RoundId,
        /// The chrono-warrior.
        chrono_warrior: AccountHash,
        /// Escrowed amount in wei.
        amount: Amount,
    },
    /// A bidder ETH raffle prize was escrowed.
    RaffleWinnerBidderEthPrizeAllocated {
        /// The settled round.
        round_id: RoundId,
        /// Index of the winner within the raffle batch.
        winner_index: u64,
        /// The winner.
        winner: AccountHash,
        /// Escrowed amount in wei.
        amount: Amount,
    },
    /// The main prize was claimed; the round settled.
    MainPrizeClaimed {
        /// The settled round.
        round_id: RoundId,
        /// The claimer.
        beneficiary: AccountHash,
        /// Main ETH prize amount in wei.
        amount: Amount,
        /// Pulsar NFT minted to the beneficiary.
        nft_id: NftId,
    },
    /// An ETH deposit was distributed over the staked Pulsar NFTs.
    StakingEthDepositReceived {
        /// The settled round.
        round_id: RoundId,
        /// Deposited amount in wei.
        amount: Amount,
        /// The reward-per-staked-NFT accumulator after the deposit.
        reward_per_staked_nft: Amount,
        /// Number of staked NFTs the deposit was distributed over.
        num_staked: u64,
    },
    /// ETH was transferred to the charity account.
    FundsTransferredToCharity {
        /// The charity account.
        charity: AccountHash,
        /// Transferred amount in wei.
        amount: Amount,
    },
    /// The next round's activation time was fixed.
    RoundActivationTimeChanged {
        /// When bidding reopens.
        activation_time: Timestamp,
    },
    /// An NFT was staked.
    NftStaked {
        /// The staked asset class.
        class: AssetClass,
        /// The new stake action.
        stake_action_id: StakeActionId,
        /// The staked NFT.
        nft_id: NftId,
        /// The staker.
        owner: AccountHash,
        /// Number of staked NFTs in the pool after this action.
        num_staked: u64,
        /// The pool's reward-per-staked-NFT accumulator at stake time.
        reward_per_staked_nft: Amount,
    },
    /// An NFT was unstaked and its accrued reward paid out.
    NftUnstaked {
        /// The staked asset class.
        class: AssetClass,
        /// The removed stake action.
        stake_action_id: StakeActionId,
        /// The returned NFT.
        nft_id: NftId,
        /// The staker.
        owner: AccountHash,
        /// Number of staked NFTs in the pool after this action.
        num_staked: u64,
        /// The reward paid out, in wei.
        reward_amount: Amount,
    },
}
