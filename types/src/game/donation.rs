#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{AccountHash, Amount, RoundId};

/// An ETH donation accompanied by donor-supplied data, appended to an
/// append-only record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct DonationRecord {
    /// The round during which the donation was made.
    pub round_id: RoundId,
    /// The donor.
    pub donor: AccountHash,
    /// The donated amount in wei.
    pub amount: Amount,
    /// Arbitrary donor-supplied data.
    pub data: String,
}
