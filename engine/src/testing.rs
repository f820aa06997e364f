//! In-memory implementation of every provider trait, backing the
//! whole-round scenario tests.

use std::collections::BTreeMap;

use pulsar_types::{
    game::{
        BidderInfo, ChampionState, DonationRecord, Error, GameConfig, GameEvent, Round,
    },
    staking,
    staking::StakingPool,
    AccountHash, Amount, AssetClass, NftId, RoundId, TimeDiff, Timestamp,
};

use crate::{game, staking as staking_ops};

/// Deployment state held in plain maps, with knobs for the failure
/// paths (a refusing charity).
pub(crate) struct TestHarness {
    pub caller: AccountHash,
    pub blocktime: Timestamp,
    pub seed: u64,
    pub config: GameConfig,
    pub round: Round,
    pub champions: ChampionState,
    pub bidder_infos: BTreeMap<(RoundId, AccountHash), BidderInfo>,
    pub bid_records: BTreeMap<RoundId, Vec<AccountHash>>,
    pub donation_records: Vec<DonationRecord>,
    pub pools: BTreeMap<AssetClass, StakingPool>,
    pub account_eth: BTreeMap<AccountHash, Amount>,
    pub escrowed_prizes: Vec<(RoundId, AccountHash, Amount)>,
    pub charity_received: Amount,
    pub charity_accepts: bool,
    pub flux_balances: BTreeMap<AccountHash, Amount>,
    pub nft_owners: BTreeMap<(AssetClass, NftId), AccountHash>,
    pub next_pulsar_nft_id: u64,
    pub events: Vec<GameEvent>,
}

impl TestHarness {
    pub(crate) fn new() -> Self {
        let mut config = GameConfig::default();
        config.charity_account = Self::account(200);
        config.marketing_account = Self::account(201);
        let activation_time = Timestamp::from_secs(1_000);
        let round = Round::genesis(activation_time, &config);
        let mut pools = BTreeMap::new();
        pools.insert(AssetClass::Pulsar, StakingPool::new(Self::account(210)));
        pools.insert(AssetClass::Drifter, StakingPool::new(Self::account(211)));
        TestHarness {
            caller: Self::account(1),
            blocktime: activation_time,
            seed: 42,
            config,
            round,
            champions: ChampionState::default(),
            bidder_infos: BTreeMap::new(),
            bid_records: BTreeMap::new(),
            donation_records: Vec::new(),
            pools,
            account_eth: BTreeMap::new(),
            escrowed_prizes: Vec::new(),
            charity_received: 0,
            charity_accepts: true,
            flux_balances: BTreeMap::new(),
            nft_owners: BTreeMap::new(),
            next_pulsar_nft_id: 0,
            events: Vec::new(),
        }
    }

    pub(crate) fn account(value: u8) -> AccountHash {
        AccountHash::new([value; 32])
    }

    pub(crate) fn set_caller(&mut self, caller: AccountHash) {
        self.caller = caller;
    }

    pub(crate) fn set_time(&mut self, secs: u64) {
        self.blocktime = Timestamp::from_secs(secs);
    }

    pub(crate) fn advance(&mut self, secs: u64) {
        self.blocktime = self.blocktime.saturating_add(TimeDiff::from_secs(secs));
    }

    pub(crate) fn give_nft(&mut self, class: AssetClass, owner: AccountHash, nft_id: u64) {
        self.nft_owners.insert((class, NftId::new(nft_id)), owner);
    }

    pub(crate) fn eth_of(&self, account: AccountHash) -> Amount {
        self.account_eth.get(&account).copied().unwrap_or(0)
    }

    pub(crate) fn flux_of(&self, account: AccountHash) -> Amount {
        self.flux_balances.get(&account).copied().unwrap_or(0)
    }

    pub(crate) fn pool(&self, class: AssetClass) -> &StakingPool {
        self.pools.get(&class).expect("pool should exist")
    }
}

impl game::providers::RuntimeProvider for TestHarness {
    fn get_caller(&self) -> AccountHash {
        self.caller
    }

    fn get_blocktime(&self) -> Timestamp {
        self.blocktime
    }

    fn random_seed(&self) -> u64 {
        self.seed
    }
}

impl game::providers::StorageProvider for TestHarness {
    fn read_config(&mut self) -> Result<GameConfig, Error> {
        Ok(self.config.clone())
    }

    fn read_round(&mut self) -> Result<Round, Error> {
        Ok(self.round.clone())
    }

    fn write_round(&mut self, round: Round) -> Result<(), Error> {
        self.round = round;
        Ok(())
    }

    fn read_champion_state(&mut self) -> Result<ChampionState, Error> {
        Ok(self.champions.clone())
    }

    fn write_champion_state(&mut self, state: ChampionState) -> Result<(), Error> {
        self.champions = state;
        Ok(())
    }

    fn read_bidder_info(
        &mut self,
        round_id: RoundId,
        bidder: AccountHash,
    ) -> Result<BidderInfo, Error> {
        Ok(self
            .bidder_infos
            .get(&(round_id, bidder))
            .copied()
            .unwrap_or_default())
    }

    fn write_bidder_info(
        &mut self,
        round_id: RoundId,
        bidder: AccountHash,
        info: BidderInfo,
    ) -> Result<(), Error> {
        self.bidder_infos.insert((round_id, bidder), info);
        Ok(())
    }

    fn append_bid_record(
        &mut self,
        round_id: RoundId,
        bidder: AccountHash,
    ) -> Result<u64, Error> {
        let records = self.bid_records.entry(round_id).or_default();
        records.push(bidder);
        Ok(records.len() as u64 - 1)
    }

    fn read_bid_record(
        &mut self,
        round_id: RoundId,
        index: u64,
    ) -> Result<Option<AccountHash>, Error> {
        Ok(self
            .bid_records
            .get(&round_id)
            .and_then(|records| records.get(index as usize))
            .copied())
    }

    fn bid_record_count(&mut self, round_id: RoundId) -> Result<u64, Error> {
        Ok(self
            .bid_records
            .get(&round_id)
            .map(|records| records.len() as u64)
            .unwrap_or(0))
    }

    fn append_donation_record(&mut self, record: DonationRecord) -> Result<u64, Error> {
        self.donation_records.push(record);
        Ok(self.donation_records.len() as u64 - 1)
    }

    fn read_staking_pool(&mut self, class: AssetClass) -> Result<StakingPool, Error> {
        self.pools.get(&class).cloned().ok_or(Error::Storage)
    }

    fn write_staking_pool(
        &mut self,
        class: AssetClass,
        pool: StakingPool,
    ) -> Result<(), Error> {
        self.pools.insert(class, pool);
        Ok(())
    }
}

impl game::providers::LedgerProvider for TestHarness {
    fn transfer_to_account(&mut self, target: AccountHash, amount: Amount) -> Result<(), Error> {
        *self.account_eth.entry(target).or_insert(0) += amount;
        Ok(())
    }

    fn deposit_prize(
        &mut self,
        round_id: RoundId,
        winner: AccountHash,
        amount: Amount,
    ) -> Result<(), Error> {
        self.escrowed_prizes.push((round_id, winner, amount));
        Ok(())
    }

    fn try_transfer_to_charity(&mut self, _charity: AccountHash, amount: Amount) -> bool {
        if self.charity_accepts {
            self.charity_received += amount;
        }
        self.charity_accepts
    }
}

impl game::providers::TokenProvider for TestHarness {
    fn mint_flux(&mut self, to: AccountHash, amount: Amount) -> Result<(), Error> {
        *self.flux_balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    fn burn_flux(&mut self, from: AccountHash, amount: Amount) -> Result<(), Error> {
        let balance = self.flux_balances.entry(from).or_insert(0);
        *balance = balance.checked_sub(amount).ok_or(Error::BurnFlux)?;
        Ok(())
    }

    fn flux_balance_of(&mut self, account: AccountHash) -> Result<Amount, Error> {
        Ok(self.flux_balances.get(&account).copied().unwrap_or(0))
    }
}

impl game::providers::NftProvider for TestHarness {
    fn nft_owner(
        &mut self,
        class: AssetClass,
        nft_id: NftId,
    ) -> Result<Option<AccountHash>, Error> {
        Ok(self.nft_owners.get(&(class, nft_id)).copied())
    }

    fn transfer_nft(
        &mut self,
        class: AssetClass,
        from: AccountHash,
        to: AccountHash,
        nft_id: NftId,
    ) -> Result<(), Error> {
        match self.nft_owners.get_mut(&(class, nft_id)) {
            Some(owner) if *owner == from => {
                *owner = to;
                Ok(())
            }
            _ => Err(Error::NftTransfer),
        }
    }

    fn mint_pulsar_nft(
        &mut self,
        owner: AccountHash,
        _round_id: RoundId,
        _seed: u64,
    ) -> Result<NftId, Error> {
        let nft_id = NftId::new(self.next_pulsar_nft_id);
        self.next_pulsar_nft_id += 1;
        self.nft_owners.insert((AssetClass::Pulsar, nft_id), owner);
        Ok(nft_id)
    }
}

impl game::providers::EventProvider for TestHarness {
    fn emit_game_event(&mut self, event: GameEvent) -> Result<(), Error> {
        self.events.push(event);
        Ok(())
    }
}

impl game::Game for TestHarness {}

impl staking_ops::providers::RuntimeProvider for TestHarness {
    fn get_caller(&self) -> AccountHash {
        self.caller
    }

    fn get_blocktime(&self) -> Timestamp {
        self.blocktime
    }
}

impl staking_ops::providers::StorageProvider for TestHarness {
    fn read_staking_pool(&mut self, class: AssetClass) -> Result<StakingPool, staking::Error> {
        self.pools.get(&class).cloned().ok_or(staking::Error::Storage)
    }

    fn write_staking_pool(
        &mut self,
        class: AssetClass,
        pool: StakingPool,
    ) -> Result<(), staking::Error> {
        self.pools.insert(class, pool);
        Ok(())
    }
}

impl staking_ops::providers::LedgerProvider for TestHarness {
    fn transfer_to_account(
        &mut self,
        target: AccountHash,
        amount: Amount,
    ) -> Result<(), staking::Error> {
        *self.account_eth.entry(target).or_insert(0) += amount;
        Ok(())
    }
}

impl staking_ops::providers::NftProvider for TestHarness {
    fn nft_owner(
        &mut self,
        class: AssetClass,
        nft_id: NftId,
    ) -> Result<Option<AccountHash>, staking::Error> {
        Ok(self.nft_owners.get(&(class, nft_id)).copied())
    }

    fn transfer_nft(
        &mut self,
        class: AssetClass,
        from: AccountHash,
        to: AccountHash,
        nft_id: NftId,
    ) -> Result<(), staking::Error> {
        match self.nft_owners.get_mut(&(class, nft_id)) {
            Some(owner) if *owner == from => {
                *owner = to;
                Ok(())
            }
            _ => Err(staking::Error::NftTransfer),
        }
    }
}

impl staking_ops::providers::EventProvider for TestHarness {
    fn emit_staking_event(&mut self, event: GameEvent) -> Result<(), staking::Error> {
        self.events.push(event);
        Ok(())
    }
}

impl staking_ops::Staking for TestHarness {}
