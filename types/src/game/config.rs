#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{
    game::{constants::*, Error},
    AccountHash, Amount, TimeDiff,
};

/// Configuration of the game, read through the storage provider and
/// threaded explicitly through every operation.
///
/// `Default` gives the production parameters; hosts must at least set
/// the charity and marketing accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct GameConfig {
    /// Delay between a main-prize claim and the next round's activation.
    pub delay_before_round_activation: TimeDiff,
    /// Main-prize time increment of the very first round, microseconds.
    pub initial_main_prize_time_increment_micros: u64,
    /// Divisor of the increment giving the initial duration until the
    /// main prize on a round's first bid.
    pub initial_duration_until_main_prize_divisor: u64,
    /// Per-round growth divisor of the main-prize time increment.
    pub main_prize_time_increment_increase_divisor: u64,
    /// Timeout past the main-prize deadline after which anyone may
    /// claim.
    pub timeout_duration_to_claim_main_prize: TimeDiff,
    /// Divisor of the increment giving the ETH Dutch auction duration.
    pub eth_auction_duration_divisor: u64,
    /// Divisor producing the ETH auction ending price from its
    /// beginning price.
    pub eth_auction_ending_bid_price_divisor: u64,
    /// Divisor producing the post-bid ETH price increase.
    pub eth_bid_price_increase_divisor: u64,
    /// ETH price of the first bid ever, before any auction state exists.
    pub first_round_initial_eth_bid_price: Amount,
    /// Multiplier fixing a round's auction beginning price from its
    /// first paid bid price.
    pub eth_auction_begin_price_multiplier: u64,
    /// Divisor applied to the ETH bid price when a Drifter NFT is used.
    pub drifter_nft_bid_price_divisor: u64,
    /// Divisor of the increment giving the FLUX Dutch auction duration.
    pub flux_auction_duration_divisor: u64,
    /// Multiplier restarting the FLUX auction from a paid FLUX price.
    pub flux_auction_begin_price_multiplier: u64,
    /// Lower limit of a restarted FLUX auction beginning price.
    pub flux_auction_begin_price_min: Amount,
    /// Upper limit on the byte length of a bid message.
    pub bid_message_length_max: usize,
    /// FLUX minted to a bidder for every accepted bid.
    pub flux_reward_for_bidding: Amount,
    /// Per-bid multiplier of the champion FLUX prizes.
    pub flux_prize_multiplier: Amount,
    /// Account receiving the marketing FLUX contribution.
    pub marketing_account: AccountHash,
    /// FLUX minted to the marketing account at every settlement.
    pub marketing_flux_contribution: Amount,
    /// Account receiving charity donations and redirected shares.
    pub charity_account: AccountHash,
    /// Percentage of the game balance paid as the main prize.
    pub main_eth_prize_percentage: u8,
    /// Percentage of the game balance escrowed for the chrono-warrior.
    pub chrono_warrior_eth_prize_percentage: u8,
    /// Percentage of the game balance split across bidder raffle
    /// winners.
    pub raffle_total_eth_prize_percentage: u8,
    /// Percentage of the game balance deposited into the Pulsar staking
    /// pool.
    pub staking_total_eth_reward_percentage: u8,
    /// Percentage of the game balance donated to charity.
    pub charity_eth_donation_percentage: u8,
    /// Number of bidder ETH raffle prizes per settlement.
    pub num_raffle_eth_prizes_for_bidders: u64,
    /// Number of Pulsar NFTs raffled to bidders per settlement.
    pub num_raffle_pulsar_nfts_for_bidders: u64,
    /// Number of Pulsar NFTs raffled to Drifter stakers per settlement.
    pub num_raffle_pulsar_nfts_for_drifter_stakers: u64,
    /// Smoothing constant `k` of the fair random picker.
    pub fair_picker_smoothing: u64,
}

impl GameConfig {
    /// Checks the configuration for internal consistency.
    ///
    /// The percentage split must not exceed 100 and every divisor must
    /// be non-zero.
    pub fn validate(&self) -> Result<(), Error> {
        let percentage_sum = self.main_eth_prize_percentage as u32
            + self.chrono_warrior_eth_prize_percentage as u32
            + self.raffle_total_eth_prize_percentage as u32
            + self.staking_total_eth_reward_percentage as u32
            + self.charity_eth_donation_percentage as u32;
        if percentage_sum > 100 {
            return Err(Error::InvalidConfig);
        }
        let divisors = [
            self.initial_duration_until_main_prize_divisor,
            self.main_prize_time_increment_increase_divisor,
            self.eth_auction_duration_divisor,
            self.eth_auction_ending_bid_price_divisor,
            self.eth_bid_price_increase_divisor,
            self.drifter_nft_bid_price_divisor,
            self.flux_auction_duration_divisor,
        ];
        if divisors.iter().any(|divisor| *divisor == 0) {
            return Err(Error::InvalidConfig);
        }
        if self.num_raffle_eth_prizes_for_bidders == 0 || self.fair_picker_smoothing == 0 {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            delay_before_round_activation: TimeDiff::from_secs(
                DEFAULT_DELAY_BEFORE_ROUND_ACTIVATION_SECS,
            ),
            initial_main_prize_time_increment_micros: DEFAULT_MAIN_PRIZE_TIME_INCREMENT_MICROS,
            initial_duration_until_main_prize_divisor:
                DEFAULT_INITIAL_DURATION_UNTIL_MAIN_PRIZE_DIVISOR,
            main_prize_time_increment_increase_divisor:
                DEFAULT_MAIN_PRIZE_TIME_INCREMENT_INCREASE_DIVISOR,
            timeout_duration_to_claim_main_prize: TimeDiff::from_secs(
                DEFAULT_TIMEOUT_DURATION_TO_CLAIM_MAIN_PRIZE_SECS,
            ),
            eth_auction_duration_divisor: DEFAULT_ETH_AUCTION_DURATION_DIVISOR,
            eth_auction_ending_bid_price_divisor: DEFAULT_ETH_AUCTION_ENDING_BID_PRICE_DIVISOR,
            eth_bid_price_increase_divisor: DEFAULT_ETH_BID_PRICE_INCREASE_DIVISOR,
            first_round_initial_eth_bid_price: FIRST_ROUND_INITIAL_ETH_BID_PRICE,
            eth_auction_begin_price_multiplier: DEFAULT_ETH_AUCTION_BEGIN_PRICE_MULTIPLIER,
            drifter_nft_bid_price_divisor: DEFAULT_DRIFTER_NFT_BID_PRICE_DIVISOR,
            flux_auction_duration_divisor: DEFAULT_FLUX_AUCTION_DURATION_DIVISOR,
            flux_auction_begin_price_multiplier: DEFAULT_FLUX_AUCTION_BEGIN_PRICE_MULTIPLIER,
            flux_auction_begin_price_min: DEFAULT_FLUX_AUCTION_BEGIN_PRICE_MIN,
            bid_message_length_max: DEFAULT_BID_MESSAGE_LENGTH_MAX,
            flux_reward_for_bidding: DEFAULT_FLUX_REWARD_FOR_BIDDING,
            flux_prize_multiplier: DEFAULT_FLUX_PRIZE_MULTIPLIER,
            marketing_account: AccountHash::default(),
            marketing_flux_contribution: DEFAULT_MARKETING_FLUX_CONTRIBUTION,
            charity_account: AccountHash::default(),
            main_eth_prize_percentage: DEFAULT_MAIN_ETH_PRIZE_PERCENTAGE,
            chrono_warrior_eth_prize_percentage: DEFAULT_CHRONO_WARRIOR_ETH_PRIZE_PERCENTAGE,
            raffle_total_eth_prize_percentage: DEFAULT_RAFFLE_TOTAL_ETH_PRIZE_PERCENTAGE,
            staking_total_eth_reward_percentage: DEFAULT_STAKING_TOTAL_ETH_REWARD_PERCENTAGE,
            charity_eth_donation_percentage: DEFAULT_CHARITY_ETH_DONATION_PERCENTAGE,
            num_raffle_eth_prizes_for_bidders: DEFAULT_NUM_RAFFLE_ETH_PRIZES_FOR_BIDDERS,
            num_raffle_pulsar_nfts_for_bidders: DEFAULT_NUM_RAFFLE_PULSAR_NFTS_FOR_BIDDERS,
            num_raffle_pulsar_nfts_for_drifter_stakers:
                DEFAULT_NUM_RAFFLE_PULSAR_NFTS_FOR_DRIFTER_STAKERS,
            fair_picker_smoothing: DEFAULT_FAIR_PICKER_SMOOTHING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GameConfig::default().validate().expect("should be valid");
    }

    #[test]
    fn rejects_overcommitted_percentages() {
        let mut config = GameConfig::default();
        config.main_eth_prize_percentage = 90;
        assert_eq!(config.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn rejects_zero_divisors() {
        let mut config = GameConfig::default();
        config.eth_auction_ending_bid_price_divisor = 0;
        assert_eq!(config.validate(), Err(Error::InvalidConfig));
    }
}
