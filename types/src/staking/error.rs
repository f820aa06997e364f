//! Home of the staking subsystem's [`Error`] type.

use thiserror::Error;

/// Errors which can occur while executing a staking operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The NFT has already been staked once; staking is once-ever per
    /// NFT.
    #[error("this NFT has already been staked")]
    NftAlreadyStaked,
    /// The caller does not own the NFT they tried to stake.
    #[error("caller is not the owner of this NFT")]
    CallerIsNotNftOwner,
    /// No stake action exists under the given id.
    #[error("stake action not found")]
    StakeActionNotFound,
    /// The caller did not create the stake action they tried to act on.
    #[error("caller did not create this stake action")]
    UnauthorizedCaller,
    /// A deposit was attempted while nothing is staked; the caller must
    /// redirect the funds.
    #[error("no NFTs are currently staked")]
    NoNftsStaked,
    /// Storage problem.
    #[error("storage error")]
    Storage,
    /// An ETH transfer failed.
    #[error("transfer error")]
    Transfer,
    /// An NFT transfer failed.
    #[error("NFT transfer error")]
    NftTransfer,
    /// An arithmetic overflow has occurred.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}
