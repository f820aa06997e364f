use std::collections::BTreeSet;

#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{
    game::{constants::MICROS_PER_SECOND, GameConfig},
    AccountHash, Amount, NftId, RoundId, TimeDiff, Timestamp,
};

/// The current bidding round, together with the fields that deliberately
/// survive round turn-over: the game's ETH balance, the growing
/// main-prize time increment, the opening price of the next round's
/// FLUX auction, and the once-ever used Drifter NFT set.
///
/// Exactly one `Round` exists at any time; a round closes only through a
/// successful main-prize claim, which advances `round_id` by exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct Round {
    /// The round number.
    pub round_id: RoundId,
    /// The time at which bidding in this round opens.
    pub activation_time: Timestamp,
    /// The game's undistributed ETH balance.
    pub eth_balance: Amount,
    /// The bidder holding the main-prize position, if any bid was
    /// placed in this round yet.
    pub last_bidder: Option<AccountHash>,
    /// The most recent FLUX bidder of this round, if any.
    pub last_flux_bidder: Option<AccountHash>,
    /// The main-prize deadline. Meaningless until the round's first bid.
    pub main_prize_time: Timestamp,
    /// The per-bid deadline extension, in microseconds. Grows by a
    /// configured fraction at every round turn-over.
    pub main_prize_time_increment_micros: u64,
    /// The ETH Dutch auction beginning price, fixed by the first paid
    /// ETH bid of a round and consumed by the following round's auction.
    /// `None` until the first bid ever.
    pub eth_auction_begin_price: Option<Amount>,
    /// The fixed ETH price of the next bid, valid while `last_bidder`
    /// is set.
    pub next_eth_bid_price: Amount,
    /// The moment the current FLUX Dutch auction started decaying.
    pub flux_auction_begin_time: Timestamp,
    /// The current FLUX Dutch auction beginning price.
    pub flux_auction_begin_price: Amount,
    /// The beginning price of the next round's first FLUX auction,
    /// seeded by the first FLUX bid of the current round.
    pub next_round_first_flux_auction_begin_price: Amount,
    /// Drifter NFTs ever used for a bid-price discount.
    pub used_drifter_nfts: BTreeSet<NftId>,
}

impl Round {
    /// Constructs the round record of a fresh deployment.
    pub fn genesis(activation_time: Timestamp, config: &GameConfig) -> Self {
        Round {
            round_id: 0,
            activation_time,
            eth_balance: 0,
            last_bidder: None,
            last_flux_bidder: None,
            main_prize_time: Timestamp::zero(),
            main_prize_time_increment_micros: config.initial_main_prize_time_increment_micros,
            eth_auction_begin_price: None,
            next_eth_bid_price: 0,
            flux_auction_begin_time: Timestamp::zero(),
            flux_auction_begin_price: 0,
            next_round_first_flux_auction_begin_price: config.flux_auction_begin_price_min,
            used_drifter_nfts: BTreeSet::new(),
        }
    }

    /// Returns `true` once any bid was placed in this round.
    pub fn has_bids(&self) -> bool {
        self.last_bidder.is_some()
    }

    /// The per-bid main-prize deadline extension in whole seconds.
    pub fn main_prize_time_increment(&self) -> TimeDiff {
        TimeDiff::from_secs(self.main_prize_time_increment_micros / MICROS_PER_SECOND)
    }

    /// The duration until the main prize granted to a round's first bid.
    pub fn initial_duration_until_main_prize(&self, config: &GameConfig) -> TimeDiff {
        TimeDiff::from_secs(
            self.main_prize_time_increment_micros / config.initial_duration_until_main_prize_divisor,
        )
    }

    /// The ETH Dutch auction duration of this round.
    pub fn eth_auction_duration(&self, config: &GameConfig) -> TimeDiff {
        TimeDiff::from_secs(
            self.main_prize_time_increment_micros / config.eth_auction_duration_divisor,
        )
    }

    /// The FLUX Dutch auction duration of this round.
    pub fn flux_auction_duration(&self, config: &GameConfig) -> TimeDiff {
        TimeDiff::from_secs(
            self.main_prize_time_increment_micros / config.flux_auction_duration_divisor,
        )
    }

    /// Pushes the main-prize deadline out by one increment, counted from
    /// the later of the current deadline and `now`.
    pub fn extend_main_prize_time(&mut self, now: Timestamp) {
        let corrected = Timestamp::max(self.main_prize_time, now);
        self.main_prize_time = corrected.saturating_add(self.main_prize_time_increment());
    }

    /// Reinitializes the record for the next round after a settlement.
    ///
    /// Carry-over fields keep their values; the deadline increment grows
    /// by the configured fraction and bidding reopens after the
    /// configured delay.
    pub fn begin_next(&mut self, now: Timestamp, config: &GameConfig) {
        self.round_id += 1;
        self.last_bidder = None;
        self.last_flux_bidder = None;
        self.main_prize_time_increment_micros = self.main_prize_time_increment_micros.saturating_add(
            self.main_prize_time_increment_micros
                / config.main_prize_time_increment_increase_divisor,
        );
        self.activation_time = now.saturating_add(config.delay_before_round_activation);
    }
}
