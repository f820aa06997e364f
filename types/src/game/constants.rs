//! Default configuration values of the game.

use crate::Amount;

/// Microseconds per second; the main-prize time increment is configured
/// with microsecond precision and floor-divided when applied.
pub const MICROS_PER_SECOND: u64 = 1_000_000;

/// Default delay between a main-prize claim and the activation of the
/// next round, in seconds (half an hour).
pub const DEFAULT_DELAY_BEFORE_ROUND_ACTIVATION_SECS: u64 = 60 * 60 / 2;

/// Initial main-prize time increment, in microseconds (one hour).
pub const DEFAULT_MAIN_PRIZE_TIME_INCREMENT_MICROS: u64 = 60 * 60 * MICROS_PER_SECOND;

/// Default divisor applied to the main-prize time increment to obtain
/// the initial duration until the main prize (approximately one day).
pub const DEFAULT_INITIAL_DURATION_UNTIL_MAIN_PRIZE_DIVISOR: u64 = 41_667;

/// Default per-round growth divisor of the main-prize time increment
/// (the increment grows by 1% per round).
pub const DEFAULT_MAIN_PRIZE_TIME_INCREMENT_INCREASE_DIVISOR: u64 = 100;

/// Default timeout after the main-prize deadline past which anyone may
/// claim the main prize, in seconds (one day).
pub const DEFAULT_TIMEOUT_DURATION_TO_CLAIM_MAIN_PRIZE_SECS: u64 = 24 * 60 * 60;

/// Default divisor applied to the main-prize time increment to obtain
/// the ETH Dutch auction duration (approximately two days).
pub const DEFAULT_ETH_AUCTION_DURATION_DIVISOR: u64 = 20_833;

/// Default divisor producing the ETH Dutch auction ending price from its
/// beginning price.
pub const DEFAULT_ETH_AUCTION_ENDING_BID_PRICE_DIVISOR: u64 = 20;

/// Default divisor producing the post-bid ETH price increase (1%).
pub const DEFAULT_ETH_BID_PRICE_INCREASE_DIVISOR: u64 = 100;

/// ETH price of the very first bid of the very first round, in wei
/// (0.0001 ETH).
pub const FIRST_ROUND_INITIAL_ETH_BID_PRICE: Amount = 100_000_000_000_000;

/// Multiplier applied to a round's first paid ETH bid price to fix the
/// next round's Dutch auction beginning price.
pub const DEFAULT_ETH_AUCTION_BEGIN_PRICE_MULTIPLIER: u64 = 2;

/// Divisor applied to the ETH bid price when a Drifter NFT is used,
/// rounding up.
pub const DEFAULT_DRIFTER_NFT_BID_PRICE_DIVISOR: u64 = 2;

/// Default divisor applied to the main-prize time increment to obtain
/// the FLUX Dutch auction duration (approximately half a day).
pub const DEFAULT_FLUX_AUCTION_DURATION_DIVISOR: u64 = 83_333;

/// Multiplier applied to a paid FLUX bid price to restart the FLUX
/// Dutch auction.
pub const DEFAULT_FLUX_AUCTION_BEGIN_PRICE_MULTIPLIER: u64 = 2;

/// Lower limit of a restarted FLUX Dutch auction beginning price, in
/// FLUX atoms (200 FLUX).
pub const DEFAULT_FLUX_AUCTION_BEGIN_PRICE_MIN: Amount = 200 * 10u128.pow(18);

/// Default upper limit on the byte length of a bid message.
pub const DEFAULT_BID_MESSAGE_LENGTH_MAX: usize = 280;

/// FLUX minted to a bidder for every accepted bid (100 FLUX).
pub const DEFAULT_FLUX_REWARD_FOR_BIDDING: Amount = 100 * 10u128.pow(18);

/// Per-bid multiplier of the FLUX prizes paid to the endurance champion
/// and the last FLUX bidder at settlement (10 FLUX per bid).
pub const DEFAULT_FLUX_PRIZE_MULTIPLIER: Amount = 10 * 10u128.pow(18);

/// FLUX minted to the marketing account at every settlement (300 FLUX).
pub const DEFAULT_MARKETING_FLUX_CONTRIBUTION: Amount = 300 * 10u128.pow(18);

/// Default percentage of the game balance paid to the main-prize
/// beneficiary.
pub const DEFAULT_MAIN_ETH_PRIZE_PERCENTAGE: u8 = 25;

/// Default percentage of the game balance escrowed for the
/// chrono-warrior.
pub const DEFAULT_CHRONO_WARRIOR_ETH_PRIZE_PERCENTAGE: u8 = 8;

/// Default percentage of the game balance split across the bidder ETH
/// raffle winners.
pub const DEFAULT_RAFFLE_TOTAL_ETH_PRIZE_PERCENTAGE: u8 = 4;

/// Default percentage of the game balance deposited into the Pulsar NFT
/// staking pool (redirected to charity when nothing is staked).
pub const DEFAULT_STAKING_TOTAL_ETH_REWARD_PERCENTAGE: u8 = 6;

/// Default percentage of the game balance donated to charity.
pub const DEFAULT_CHARITY_ETH_DONATION_PERCENTAGE: u8 = 7;

/// Default number of bidder ETH raffle prizes per settlement.
pub const DEFAULT_NUM_RAFFLE_ETH_PRIZES_FOR_BIDDERS: u64 = 3;

/// Default number of Pulsar NFTs raffled to bidders per settlement.
pub const DEFAULT_NUM_RAFFLE_PULSAR_NFTS_FOR_BIDDERS: u64 = 5;

/// Default number of Pulsar NFTs raffled to Drifter NFT stakers per
/// settlement.
pub const DEFAULT_NUM_RAFFLE_PULSAR_NFTS_FOR_DRIFTER_STAKERS: u64 = 4;

/// Default smoothing constant `k` of the fair random picker.
pub const DEFAULT_FAIR_PICKER_SMOOTHING: u64 = 3;
