#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{Amount, Timestamp};

/// Per-round bookkeeping of one bidder, created lazily on their first
/// bid of the round. Stored keyed by `(round_id, bidder)` so records of
/// past rounds can never be read as current.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct BidderInfo {
    /// Total ETH this bidder paid for bids in the round.
    pub total_spent_eth: Amount,
    /// Total FLUX this bidder paid for bids in the round.
    pub total_spent_flux: Amount,
    /// The time of this bidder's most recent bid in the round.
    pub last_bid_time: Timestamp,
}

/// The spent totals of one bidder in one round, as returned by the
/// bidder-totals query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct BidderTotals {
    /// Total ETH paid for bids.
    pub total_spent_eth: Amount,
    /// Total FLUX paid for bids.
    pub total_spent_flux: Amount,
}

impl From<BidderInfo> for BidderTotals {
    fn from(info: BidderInfo) -> Self {
        BidderTotals {
            total_spent_eth: info.total_spent_eth,
            total_spent_flux: info.total_spent_flux,
        }
    }
}
