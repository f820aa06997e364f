//! The bidding-round engine.

pub(crate) mod detail;
pub mod pricing;
pub mod providers;

use tracing::debug;

use pulsar_types::{
    game::{BidderTotals, ChampionState, CurrentChampions, DonationRecord, Error, GameEvent},
    AccountHash, Amount, NftId, RoundId, TimeDiff,
};

use self::providers::{
    EventProvider, LedgerProvider, NftProvider, RuntimeProvider, StorageProvider, TokenProvider,
};
use pulsar_types::AssetClass;

/// Bidding-round engine interface.
///
/// A round is `AwaitingActivation` until its activation time, `Active`
/// while bids arrive, stays claimable indefinitely once the main-prize
/// deadline passes, and loops back to `AwaitingActivation` of the next
/// round through [`Game::claim_main_prize`].
///
/// Every operation is serialized by the host and either fully commits
/// or fully aborts. Settlement completes all internal bookkeeping
/// before calling any collaborator that could re-enter.
pub trait Game:
    RuntimeProvider
    + StorageProvider
    + LedgerProvider
    + TokenProvider
    + NftProvider
    + EventProvider
    + Sized
{
    /// Places an ETH bid of `value` wei, optionally discounted by a
    /// never-before-used Drifter NFT owned by the caller.
    ///
    /// The round's first bid fixes the next round's auction beginning
    /// price at a configured multiple of the paid price and starts the
    /// main-prize countdown; every later bid extends the deadline by
    /// the round's increment. The caller is refunded any overpayment
    /// and receives the fixed FLUX bid reward.
    fn bid_with_eth(
        &mut self,
        drifter_nft_id: Option<NftId>,
        message: &str,
        value: Amount,
    ) -> Result<(), Error> {
        let caller = self.get_caller();
        let now = self.get_blocktime();
        let config = self.read_config()?;
        let mut round = self.read_round()?;

        if !round.has_bids() && now < round.activation_time {
            return Err(Error::RoundIsInactive);
        }
        if message.len() > config.bid_message_length_max {
            return Err(Error::TooLongBidMessage);
        }
        let eth_bid_price = detail::current_eth_bid_price(&round, &config, now, 0);
        let paid_price = match drifter_nft_id {
            None => eth_bid_price,
            Some(nft_id) => {
                if round.used_drifter_nfts.contains(&nft_id) {
                    return Err(Error::UsedDrifterNft);
                }
                let owner = self.nft_owner(AssetClass::Drifter, nft_id)?;
                if owner != Some(caller) {
                    return Err(Error::CallerIsNotNftOwner);
                }
                pricing::eth_bid_price_with_drifter_nft(
                    eth_bid_price,
                    config.drifter_nft_bid_price_divisor,
                )
            }
        };
        if value < paid_price {
            return Err(Error::InsufficientReceivedBidAmount);
        }
        let refund = value - paid_price;

        if let Some(nft_id) = drifter_nft_id {
            round.used_drifter_nfts.insert(nft_id);
        }

        let mut bidder_info = self.read_bidder_info(round.round_id, caller)?;
        bidder_info.total_spent_eth = bidder_info
            .total_spent_eth
            .checked_add(paid_price)
            .ok_or(Error::ArithmeticOverflow)?;

        let is_first_bid = !round.has_bids();
        if is_first_bid {
            round.eth_auction_begin_price = Some(
                eth_bid_price.saturating_mul(Amount::from(config.eth_auction_begin_price_multiplier)),
            );
        }
        round.next_eth_bid_price =
            pricing::next_eth_bid_price_after(eth_bid_price, config.eth_bid_price_increase_divisor);

        let mut events = Vec::with_capacity(2);
        if is_first_bid {
            round.flux_auction_begin_time = now;
            round.main_prize_time =
                now.saturating_add(round.initial_duration_until_main_prize(&config));
            events.push(GameEvent::FirstBidPlacedInRound {
                round_id: round.round_id,
                timestamp: now,
            });
        } else if let Some(previous_bidder) = round.last_bidder {
            let previous_info = self.read_bidder_info(round.round_id, previous_bidder)?;
            let mut champions = self.read_champion_state()?;
            champions.update_on_bid(previous_bidder, previous_info.last_bid_time, now);
            self.write_champion_state(champions)?;
            round.extend_main_prize_time(now);
        }

        round.last_bidder = Some(caller);
        round.eth_balance = round
            .eth_balance
            .checked_add(paid_price)
            .ok_or(Error::ArithmeticOverflow)?;
        bidder_info.last_bid_time = now;
        self.append_bid_record(round.round_id, caller)?;
        self.write_bidder_info(round.round_id, caller, bidder_info)?;
        events.push(GameEvent::BidPlaced {
            round_id: round.round_id,
            bidder: caller,
            paid_eth: Some(paid_price),
            paid_flux: None,
            drifter_nft_id,
            message: message.to_string(),
            main_prize_time: round.main_prize_time,
        });
        let round_id = round.round_id;
        self.write_round(round)?;

        self.mint_flux(caller, config.flux_reward_for_bidding)?;
        if refund > 0 {
            self.transfer_to_account(caller, refund)?;
        }
        for event in events {
            self.emit_game_event(event)?;
        }
        debug!(round_id, bidder = %caller, paid = %paid_price, "accepted ETH bid");
        Ok(())
    }

    /// Places a FLUX bid, paying the current FLUX Dutch-auction price
    /// if it does not exceed `price_max_limit`.
    ///
    /// FLUX bids are only valid once a round is already open; the paid
    /// FLUX is burnt and the auction restarts at a configured multiple
    /// of the paid price.
    fn bid_with_flux(&mut self, price_max_limit: Amount, message: &str) -> Result<(), Error> {
        let caller = self.get_caller();
        let now = self.get_blocktime();
        let config = self.read_config()?;
        let mut round = self.read_round()?;

        if !round.has_bids() {
            if now < round.activation_time {
                return Err(Error::RoundIsInactive);
            }
            return Err(Error::WrongBidType);
        }
        if message.len() > config.bid_message_length_max {
            return Err(Error::TooLongBidMessage);
        }
        let paid_price = detail::current_flux_bid_price(&round, &config, now, 0);
        if paid_price > price_max_limit {
            return Err(Error::InsufficientReceivedBidAmount);
        }
        if self.flux_balance_of(caller)? < paid_price {
            return Err(Error::InsufficientFluxBalance);
        }

        let mut bidder_info = self.read_bidder_info(round.round_id, caller)?;
        bidder_info.total_spent_flux = bidder_info
            .total_spent_flux
            .checked_add(paid_price)
            .ok_or(Error::ArithmeticOverflow)?;

        round.flux_auction_begin_time = now;
        let restarted_begin_price = Amount::max(
            paid_price.saturating_mul(Amount::from(config.flux_auction_begin_price_multiplier)),
            config.flux_auction_begin_price_min,
        );
        round.flux_auction_begin_price = restarted_begin_price;
        if round.last_flux_bidder.is_none() {
            round.next_round_first_flux_auction_begin_price = restarted_begin_price;
        }
        round.last_flux_bidder = Some(caller);

        if let Some(previous_bidder) = round.last_bidder {
            let previous_info = self.read_bidder_info(round.round_id, previous_bidder)?;
            let mut champions = self.read_champion_state()?;
            champions.update_on_bid(previous_bidder, previous_info.last_bid_time, now);
            self.write_champion_state(champions)?;
        }
        round.extend_main_prize_time(now);

        round.last_bidder = Some(caller);
        bidder_info.last_bid_time = now;
        self.append_bid_record(round.round_id, caller)?;
        self.write_bidder_info(round.round_id, caller, bidder_info)?;
        let event = GameEvent::BidPlaced {
            round_id: round.round_id,
            bidder: caller,
            paid_eth: None,
            paid_flux: Some(paid_price),
            drifter_nft_id: None,
            message: message.to_string(),
            main_prize_time: round.main_prize_time,
        };
        let round_id = round.round_id;
        self.write_round(round)?;

        self.burn_flux(caller, paid_price)?;
        self.mint_flux(caller, config.flux_reward_for_bidding)?;
        self.emit_game_event(event)?;
        debug!(round_id, bidder = %caller, paid = %paid_price, "accepted FLUX bid");
        Ok(())
    }

    /// Donates ETH to the game balance. Valid at any time.
    fn donate_eth(&mut self, value: Amount) -> Result<(), Error> {
        let donor = self.get_caller();
        let mut round = self.read_round()?;
        round.eth_balance = round
            .eth_balance
            .checked_add(value)
            .ok_or(Error::ArithmeticOverflow)?;
        let round_id = round.round_id;
        self.write_round(round)?;
        self.emit_game_event(GameEvent::EthDonated {
            round_id,
            donor,
            amount: value,
        })?;
        Ok(())
    }

    /// Donates ETH together with donor-supplied data, appending a
    /// donation record.
    fn donate_eth_with_info(&mut self, value: Amount, data: &str) -> Result<(), Error> {
        let donor = self.get_caller();
        let mut round = self.read_round()?;
        round.eth_balance = round
            .eth_balance
            .checked_add(value)
            .ok_or(Error::ArithmeticOverflow)?;
        let round_id = round.round_id;
        self.write_round(round)?;
        let record_index = self.append_donation_record(DonationRecord {
            round_id,
            donor,
            amount: value,
            data: data.to_string(),
        })?;
        self.emit_game_event(GameEvent::EthDonatedWithInfo {
            round_id,
            donor,
            amount: value,
            record_index,
        })?;
        Ok(())
    }

    /// Claims the round's main prize and settles the round.
    ///
    /// The last bidder may claim once the main-prize deadline has
    /// passed; anyone else only after a further configured timeout. On
    /// success the full settlement runs and the next round is
    /// initialized with a grown deadline increment and a fresh
    /// activation delay.
    fn claim_main_prize(&mut self) -> Result<(), Error> {
        let caller = self.get_caller();
        let now = self.get_blocktime();
        let config = self.read_config()?;
        let mut round = self.read_round()?;

        let last_bidder = round.last_bidder.ok_or(Error::NoBidsPlacedInCurrentRound)?;
        if caller == last_bidder {
            if now < round.main_prize_time {
                return Err(Error::MainPrizeEarlyClaim);
            }
        } else if now
            < round
                .main_prize_time
                .saturating_add(config.timeout_duration_to_claim_main_prize)
        {
            return Err(Error::MainPrizeClaimDenied);
        }

        let champions = self.read_champion_state()?;
        let last_bidder_info = self.read_bidder_info(round.round_id, last_bidder)?;
        let current_champions = champions
            .project(last_bidder, last_bidder_info.last_bid_time, now)
            .ok_or(Error::NoBidsPlacedInCurrentRound)?;

        let plan = detail::plan_settlement(self, &round, &current_champions, caller, &config)?;

        round.eth_balance = round
            .eth_balance
            .checked_sub(plan.total_deducted)
            .ok_or(Error::ArithmeticOverflow)?;
        round.begin_next(now, &config);
        let activation_time = round.activation_time;
        let settled_round_id = plan.round_id;
        self.write_round(round)?;
        self.write_champion_state(ChampionState::default())?;

        detail::execute_settlement(self, plan)?;
        self.emit_game_event(GameEvent::RoundActivationTimeChanged { activation_time })?;
        debug!(
            round_id = settled_round_id,
            beneficiary = %caller,
            "main prize claimed; round settled"
        );
        Ok(())
    }

    /// The ETH price the next bid must pay, evaluated `offset_secs`
    /// from "now".
    fn get_next_eth_bid_price(&mut self, offset_secs: i64) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        let now = self.get_blocktime();
        Ok(detail::current_eth_bid_price(&round, &config, now, offset_secs))
    }

    /// The discounted ETH price the next bid must pay when a Drifter
    /// NFT is supplied.
    fn get_eth_bid_price_with_drifter_nft(&mut self, offset_secs: i64) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let price = self.get_next_eth_bid_price(offset_secs)?;
        Ok(pricing::eth_bid_price_with_drifter_nft(
            price,
            config.drifter_nft_bid_price_divisor,
        ))
    }

    /// The FLUX price the next bid must pay, evaluated `offset_secs`
    /// from "now".
    fn get_next_flux_bid_price(&mut self, offset_secs: i64) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        let now = self.get_blocktime();
        Ok(detail::current_flux_bid_price(&round, &config, now, offset_secs))
    }

    /// Number of bids placed in the current round.
    fn get_total_num_bids(&mut self) -> Result<u64, Error> {
        let round = self.read_round()?;
        self.bid_record_count(round.round_id)
    }

    /// The bidder at a bid index of a round, or `None` past the end.
    fn get_bidder_address_at(
        &mut self,
        round_id: RoundId,
        bid_index: u64,
    ) -> Result<Option<AccountHash>, Error> {
        self.read_bid_record(round_id, bid_index)
    }

    /// The spent totals of a bidder in a round.
    fn get_bidder_total_spent_amounts(
        &mut self,
        round_id: RoundId,
        bidder: AccountHash,
    ) -> Result<BidderTotals, Error> {
        let info = self.read_bidder_info(round_id, bidder)?;
        Ok(BidderTotals::from(info))
    }

    /// The champions as they would stand if the round settled "now", or
    /// `None` while the round has no bids.
    fn try_get_current_champions(&mut self) -> Result<Option<CurrentChampions>, Error> {
        let round = self.read_round()?;
        let last_bidder = match round.last_bidder {
            Some(last_bidder) => last_bidder,
            None => return Ok(None),
        };
        let info = self.read_bidder_info(round.round_id, last_bidder)?;
        let champions = self.read_champion_state()?;
        let now = self.get_blocktime();
        Ok(champions.project(last_bidder, info.last_bid_time, now))
    }

    /// Signed seconds until the round activates (negative once it has).
    fn get_duration_until_round_activation(&mut self) -> Result<i64, Error> {
        let round = self.read_round()?;
        let now = self.get_blocktime();
        Ok(round.activation_time.signed_diff(now))
    }

    /// Signed seconds until the main-prize deadline (negative once it
    /// has passed).
    fn get_duration_until_main_prize(&mut self) -> Result<i64, Error> {
        let round = self.read_round()?;
        let now = self.get_blocktime();
        Ok(round.main_prize_time.signed_diff(now))
    }

    /// The current per-bid main-prize deadline extension.
    fn get_main_prize_time_increment(&mut self) -> Result<TimeDiff, Error> {
        let round = self.read_round()?;
        Ok(round.main_prize_time_increment())
    }

    /// The ETH Dutch auction duration and the signed seconds elapsed
    /// since round activation.
    fn get_eth_auction_durations(&mut self) -> Result<(TimeDiff, i64), Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        let now = self.get_blocktime();
        Ok((
            round.eth_auction_duration(&config),
            now.signed_diff(round.activation_time),
        ))
    }

    /// The FLUX Dutch auction duration and the signed seconds elapsed
    /// since it started decaying.
    fn get_flux_auction_durations(&mut self) -> Result<(TimeDiff, i64), Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        let now = self.get_blocktime();
        Ok((
            round.flux_auction_duration(&config),
            now.signed_diff(round.flux_auction_begin_time),
        ))
    }

    /// The main ETH prize if the round settled now.
    fn get_main_eth_prize_amount(&mut self) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        detail::percentage_of(round.eth_balance, config.main_eth_prize_percentage)
    }

    /// The chrono-warrior ETH prize if the round settled now.
    fn get_chrono_warrior_eth_prize_amount(&mut self) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        detail::percentage_of(round.eth_balance, config.chrono_warrior_eth_prize_percentage)
    }

    /// The total bidder-raffle ETH pool if the round settled now.
    fn get_raffle_total_eth_prize_amount_for_bidders(&mut self) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        detail::percentage_of(round.eth_balance, config.raffle_total_eth_prize_percentage)
    }

    /// The staking reward deposit if the round settled now.
    fn get_staking_total_eth_reward_amount(&mut self) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        detail::percentage_of(round.eth_balance, config.staking_total_eth_reward_percentage)
    }

    /// The charity donation if the round settled now.
    fn get_charity_eth_donation_amount(&mut self) -> Result<Amount, Error> {
        let config = self.read_config()?;
        let round = self.read_round()?;
        detail::percentage_of(round.eth_balance, config.charity_eth_donation_percentage)
    }
}
