use core::fmt::{self, Display, Formatter};

#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

/// The two non-fungible asset classes known to the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub enum AssetClass {
    /// The Pulsar NFT, minted as a prize at every round settlement and
    /// stakeable for a share of the staking reward deposits.
    Pulsar,
    /// The Drifter NFT, a pre-existing collection. Usable once ever for
    /// a bid-price discount and stakeable for raffle eligibility.
    Drifter,
}

impl Display for AssetClass {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            AssetClass::Pulsar => write!(formatter, "pulsar"),
            AssetClass::Drifter => write!(formatter, "drifter"),
        }
    }
}

/// Identifier of a non-fungible asset within its class.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct NftId(u64);

impl NftId {
    /// Constructs a new `NftId`.
    pub const fn new(id: u64) -> Self {
        NftId(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for NftId {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "nft-{}", self.0)
    }
}

/// Identifier of a stake action within a staking pool.
///
/// Ids are issued by a monotonically increasing counter; id 0 is never
/// issued and ids are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct StakeActionId(u64);

impl StakeActionId {
    /// Constructs a new `StakeActionId`.
    pub const fn new(id: u64) -> Self {
        StakeActionId(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for StakeActionId {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "stake-action-{}", self.0)
    }
}
