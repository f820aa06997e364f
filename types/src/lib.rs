//! Data model for the Pulsar bidding game.
//!
//! This crate holds the pure data side of the game: account addresses,
//! time, amounts, the round record, bidder bookkeeping, champion
//! tracking, staking-pool bookkeeping, configuration, errors and the
//! event vocabulary. The operation layer lives in `pulsar-engine` and
//! drives these types through provider traits supplied by the host.

#![warn(missing_docs)]

mod account;
mod asset;
pub mod game;
pub mod staking;
mod timestamp;

pub use account::{AccountHash, FromStrError, ACCOUNT_HASH_LENGTH};
pub use asset::{AssetClass, NftId, StakeActionId};
pub use timestamp::{TimeDiff, Timestamp};

/// An amount of base currency (integer wei) or of FLUX token atoms.
///
/// `u128` comfortably covers wei-scale values; all divisions on amounts
/// round toward zero.
pub type Amount = u128;

/// Identifier of a bidding round. Starts at 0 and increases by exactly 1
/// per claimed main prize.
pub type RoundId = u64;
