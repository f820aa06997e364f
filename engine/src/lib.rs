//! Round, auction and prize-settlement engine of the Pulsar bidding
//! game.
//!
//! The engine is invoked as a sequence of discrete, serialized
//! operations against shared durable state supplied by the host through
//! provider traits. Each operation either fully commits or fully
//! aborts; all randomness derives deterministically from the seed the
//! host supplies with the operation.
//!
//! The public surface is the [`game::Game`] trait (bidding, donations,
//! main-prize claim and the read-only queries) and the
//! [`staking::Staking`] trait (NFT staking and unstaking).

pub mod game;
pub mod raffle;
pub mod staking;

#[cfg(test)]
pub(crate) mod testing;
