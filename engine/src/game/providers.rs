use pulsar_types::{
    game::{BidderInfo, ChampionState, DonationRecord, Error, GameConfig, GameEvent, Round},
    staking::StakingPool,
    AccountHash, Amount, AssetClass, NftId, RoundId, Timestamp,
};

/// Provider of runtime host functionality.
///
/// Operations are totally ordered by the host; the engine never assumes
/// anything about wall-clock time beyond the timestamp supplied here.
pub trait RuntimeProvider {
    /// Returns the caller of the current operation.
    fn get_caller(&self) -> AccountHash;

    /// Returns the timestamp supplied with the current operation.
    fn get_blocktime(&self) -> Timestamp;

    /// Returns the deterministic entropy supplied with the current
    /// operation (block-level entropy; never an external call).
    fn random_seed(&self) -> u64;
}

/// Provides functionality of the host's durable storage. Reads and
/// writes are atomic per operation.
pub trait StorageProvider {
    /// Reads the game configuration.
    fn read_config(&mut self) -> Result<GameConfig, Error>;

    /// Reads the current round record.
    fn read_round(&mut self) -> Result<Round, Error>;

    /// Writes the current round record.
    fn write_round(&mut self, round: Round) -> Result<(), Error>;

    /// Reads the current round's champion state.
    fn read_champion_state(&mut self) -> Result<ChampionState, Error>;

    /// Writes the current round's champion state.
    fn write_champion_state(&mut self, state: ChampionState) -> Result<(), Error>;

    /// Reads a bidder's per-round record; a missing record reads as
    /// zeroed.
    fn read_bidder_info(
        &mut self,
        round_id: RoundId,
        bidder: AccountHash,
    ) -> Result<BidderInfo, Error>;

    /// Writes a bidder's per-round record.
    fn write_bidder_info(
        &mut self,
        round_id: RoundId,
        bidder: AccountHash,
        info: BidderInfo,
    ) -> Result<(), Error>;

    /// Appends a bid record and returns its index.
    fn append_bid_record(&mut self, round_id: RoundId, bidder: AccountHash)
        -> Result<u64, Error>;

    /// Reads the bidder at a bid index, or `None` past the end.
    fn read_bid_record(
        &mut self,
        round_id: RoundId,
        index: u64,
    ) -> Result<Option<AccountHash>, Error>;

    /// Number of bids recorded in a round.
    fn bid_record_count(&mut self, round_id: RoundId) -> Result<u64, Error>;

    /// Appends a donation record and returns its index.
    fn append_donation_record(&mut self, record: DonationRecord) -> Result<u64, Error>;

    /// Reads a staking pool.
    fn read_staking_pool(&mut self, class: AssetClass) -> Result<StakingPool, Error>;

    /// Writes a staking pool.
    fn write_staking_pool(&mut self, class: AssetClass, pool: StakingPool)
        -> Result<(), Error>;
}

/// Provides access to the host ledger holding ETH balances.
pub trait LedgerProvider {
    /// Transfers `amount` from the game to `target`. A failure aborts
    /// the calling operation.
    fn transfer_to_account(&mut self, target: AccountHash, amount: Amount) -> Result<(), Error>;

    /// Escrows a secondary prize for `winner` with the external prizes
    /// ledger. A failure aborts the calling operation.
    fn deposit_prize(
        &mut self,
        round_id: RoundId,
        winner: AccountHash,
        amount: Amount,
    ) -> Result<(), Error>;

    /// Transfers `amount` from the game to the charity account.
    ///
    /// Never aborts; returns `false` on refusal, in which case the
    /// caller keeps the funds.
    fn try_transfer_to_charity(&mut self, charity: AccountHash, amount: Amount) -> bool;
}

/// Provides access to the FLUX token collaborator.
pub trait TokenProvider {
    /// Mints `amount` FLUX to `to`.
    fn mint_flux(&mut self, to: AccountHash, amount: Amount) -> Result<(), Error>;

    /// Burns `amount` FLUX from `from`.
    fn burn_flux(&mut self, from: AccountHash, amount: Amount) -> Result<(), Error>;

    /// Returns the FLUX balance of `account`.
    fn flux_balance_of(&mut self, account: AccountHash) -> Result<Amount, Error>;
}

/// Provides access to the non-fungible asset registries.
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

    /// Mints a Pulsar NFT to `owner` with seed-derived metadata and
    /// returns its id.
    fn mint_pulsar_nft(
        &mut self,
        owner: AccountHash,
        round_id: RoundId,
        seed: u64,
    ) -> Result<NftId, Error>;
}

/// Provides access to the host's append-only, strictly ordered event
/// sink.
pub trait EventProvider {
    /// Appends one event record.
    fn emit_game_event(&mut self, event: GameEvent) -> Result<(), Error>;
}
