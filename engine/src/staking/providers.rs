use pulsar_types::{
    game::GameEvent, staking::Error, staking::StakingPool, AccountHash, Amount, AssetClass, NftId,
    Timestamp,
};

/// Provider of runtime host functionality for staking operations.
pub trait RuntimeProvider {
    /// Returns the caller of the current operation.
    fn get_caller(&self) -> AccountHash;

    /// Returns the timestamp supplied with the current operation.
    fn get_blocktime(&self) -> Timestamp;
}

/// Provides durable storage of the staking pools.
pub trait StorageProvider {
    /// Reads a staking pool.
    fn read_staking_pool(&mut self, class: AssetClass) -> Result<StakingPool, Error>;

    /// Writes a staking pool.
    fn write_staking_pool(&mut self, class: AssetClass, pool: StakingPool)
        -> Result<(), Error>;
}

/// Provides access to the host ledger for reward payouts.
pub trait LedgerProvider {
    /// Transfers `amount` from the pool to `target`. A failure aborts
    /// the calling operation.
    fn transfer_to_account(&mut self, target: AccountHash, amount: Amount) -> Result<(), Error>;
}

/// Provides access to the non-fungible asset registries for custody
/// transfers and ownership checks.
pub trait NftProvider {
    /// Returns the owner of an NFT, or `None` if it does not exist.
    fn nft_owner(&mut self, class: AssetClass, nft_id: NftId)
        -> Result<Option<AccountHash>, Error>;

    /// Transfers an NFT between accounts.
    fn transfer_nft(
        &mut self,
        class: AssetClass,
        from: AccountHash,
        to: AccountHash,
        nft_id: NftId,
    ) -> Result<(), Error>;
}

/// Provides access to the host's append-only event sink.
pub trait EventProvider {
    /// Appends one event record.
    fn emit_staking_event(&mut self, event: GameEvent) -> Result<(), Error>;
}
