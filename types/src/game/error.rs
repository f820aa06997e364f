//! Home of the game's [`Error`] type.

use thiserror::Error;

use crate::staking;

/// Errors which can occur while executing a game operation.
///
/// Validation and timing errors abort the operation with no state
/// change; the host's all-or-nothing storage semantics make every other
/// propagated error atomic as well.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The current bidding round is not active yet.
    #[error("the current bidding round is not active yet")]
    RoundIsInactive,
    /// The bid message exceeds the configured length limit.
    #[error("bid message is too long")]
    TooLongBidMessage,
    /// The Drifter NFT has already been used for bidding.
    #[error("this Drifter NFT has already been used for bidding")]
    UsedDrifterNft,
    /// The caller does not own the NFT they supplied.
    #[error("caller is not the owner of this NFT")]
    CallerIsNotNftOwner,
    /// The transferred or allowed amount does not cover the current bid
    /// price.
    #[error("the current bid price is greater than the received amount")]
    InsufficientReceivedBidAmount,
    /// A FLUX bid was attempted as the first bid of a round.
    #[error("the first bid in a bidding round must be an ETH bid")]
    WrongBidType,
    /// The caller's FLUX balance does not cover the current bid price.
    #[error("FLUX balance is too low to cover the bid price")]
    InsufficientFluxBalance,
    /// The last bidder tried to claim before the main-prize deadline.
    #[error("not enough time has elapsed")]
    MainPrizeEarlyClaim,
    /// Someone other than the last bidder tried to claim before the
    /// claim timeout expired.
    #[error("only the last bidder may claim the main prize before the timeout expires")]
    MainPrizeClaimDenied,
    /// A claim was attempted in a round with no bids.
    #[error("there have been no bids in the current bidding round yet")]
    NoBidsPlacedInCurrentRound,
    /// The configuration failed validation.
    #[error("invalid game configuration")]
    InvalidConfig,
    /// Storage problem.
    #[error("storage error")]
    Storage,
    /// An ETH transfer failed.
    #[error("transfer error")]
    Transfer,
    /// Minting FLUX failed.
    #[error("failed to mint FLUX")]
    MintFlux,
    /// Burning FLUX failed.
    #[error("failed to burn FLUX")]
    BurnFlux,
    /// Minting a Pulsar NFT failed.
    #[error("failed to mint a Pulsar NFT")]
    MintNft,
    /// An NFT transfer failed.
    #[error("NFT transfer error")]
    NftTransfer,
    /// An arithmetic overflow has occurred.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    /// A staking-pool bookkeeping error surfaced during settlement.
    #[error(transparent)]
    Staking(#[from] staking::Error),
}
