use num_rational::Ratio;
use num_traits::CheckedMul;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::warn;

use pulsar_types::{
    game::{CurrentChampions, Error, GameConfig, GameEvent, Round},
    staking::EthDeposit,
    AccountHash, Amount, AssetClass, RoundId, Timestamp,
};

use crate::{
    game::{pricing, Game},
    raffle::{self, FairRandomPicker},
};

/// Floor of `amount * percentage / 100`.
pub(crate) fn percentage_of(amount: Amount, percentage: u8) -> Result<Amount, Error> {
    Ratio::from_integer(amount)
        .checked_mul(&Ratio::new(Amount::from(percentage), 100))
        .map(|ratio| ratio.to_integer())
        .ok_or(Error::ArithmeticOverflow)
}

/// The ETH price the next bid must pay, evaluated `offset_secs` from
/// "now".
///
/// While a round has bids the price is fixed by the previous bid;
/// before the first bid it follows the Dutch auction seeded by the
/// previous round (or the configured initial price before any bid
/// ever).
pub(crate) fn current_eth_bid_price(
    round: &Round,
    config: &GameConfig,
    now: Timestamp,
    offset_secs: i64,
) -> Amount {
    if round.has_bids() {
        return round.next_eth_bid_price;
    }
    match round.eth_auction_begin_price {
        None => config.first_round_initial_eth_bid_price,
        Some(begin_price) => {
            let elapsed = now.signed_diff(round.activation_time).saturating_add(offset_secs);
            pricing::eth_auction_price(
                begin_price,
                elapsed,
                round.eth_auction_duration(config).secs(),
                config.eth_auction_ending_bid_price_divisor,
            )
        }
    }
}

/// The FLUX price the next bid must pay, evaluated `offset_secs` from
/// "now".
pub(crate) fn current_flux_bid_price(
    round: &Round,
    config: &GameConfig,
    now: Timestamp,
    offset_secs: i64,
) -> Amount {
    let duration = round.flux_auction_duration(config).secs();
    let elapsed = now
        .signed_diff(round.flux_auction_begin_time)
        .saturating_add(offset_secs);
    let remaining = duration as i64 - elapsed;
    let begin_price = if round.last_flux_bidder.is_none() {
        round.next_round_first_flux_auction_begin_price
    } else {
        round.flux_auction_begin_price
    };
    pricing::flux_auction_price(begin_price, remaining, duration)
}

/// Everything a settlement will do, computed and applied to storage
/// before any external collaborator is called.
pub(crate) struct SettlementPlan {
    pub round_id: RoundId,
    pub beneficiary: AccountHash,
    pub main_eth_prize: Amount,
    pub endurance_champion: AccountHash,
    pub chrono_warrior: AccountHash,
    pub chrono_warrior_eth_prize: Amount,
    pub last_flux_bidder: Option<AccountHash>,
    pub flux_prize: Amount,
    pub marketing_account: AccountHash,
    pub marketing_flux: Amount,
    pub staker_nft_winners: Vec<AccountHash>,
    pub bidder_nft_winners: Vec<AccountHash>,
    pub bidder_eth_winners: Vec<AccountHash>,
    pub eth_prize_per_bidder_winner: Amount,
    /// The accepted staking deposit, or `None` when the pool was empty
    /// and the share was redirected to charity.
    pub staking_deposit: Option<(Amount, EthDeposit)>,
    pub charity_account: AccountHash,
    pub charity_amount: Amount,
    pub nft_mint_seed: u64,
    /// Sum of every share leaving the game balance.
    pub total_deducted: Amount,
}

/// Computes the settlement of the current round and applies its staking
/// side effect. Storage mutation completes in the caller before
/// [`execute_settlement`] touches any external collaborator.
pub(crate) fn plan_settlement<G: Game>(
    game: &mut G,
    round: &Round,
    champions: &CurrentChampions,
    beneficiary: AccountHash,
    config: &GameConfig,
) -> Result<SettlementPlan, Error> {
    let round_id = round.round_id;
    let balance = round.eth_balance;

    let total_bids = game.bid_record_count(round_id)?;
    if total_bids == 0 {
        return Err(Error::NoBidsPlacedInCurrentRound);
    }

    let mut rng = ChaCha20Rng::seed_from_u64(game.random_seed());

    // Raffle winners among Drifter stakers, de-favoring repeat winners
    // within the batch.
    let drifter_pool = game.read_staking_pool(AssetClass::Drifter)?;
    let num_stakers = drifter_pool.num_staked_nfts();
    let staker_nft_winners = if num_stakers == 0 {
        Vec::new()
    } else {
        let mut picker = FairRandomPicker::new(num_stakers as usize, config.fair_picker_smoothing);
        let mut winners = Vec::with_capacity(config.num_raffle_pulsar_nfts_for_drifter_stakers as usize);
        for _ in 0..config.num_raffle_pulsar_nfts_for_drifter_stakers {
            let index = picker.pick(rng.gen::<u128>()).ok_or(Error::Storage)?;
            let winner = drifter_pool.staker_at(index as u64).ok_or(Error::Storage)?;
            winners.push(winner);
        }
        winners
    };

    // Raffle winners among bids, uniformly; a bidder who bid more times
    // wins proportionally more often.
    let pick_bidder = |game: &mut G, rng: &mut ChaCha20Rng| -> Result<AccountHash, Error> {
        let index = raffle::uniform_index(rng, total_bids).ok_or(Error::Storage)?;
        game.read_bid_record(round_id, index)?.ok_or(Error::Storage)
    };
    let mut bidder_nft_winners =
        Vec::with_capacity(config.num_raffle_pulsar_nfts_for_bidders as usize);
    for _ in 0..config.num_raffle_pulsar_nfts_for_bidders {
        bidder_nft_winners.push(pick_bidder(&mut *game, &mut rng)?);
    }
    let mut bidder_eth_winners =
        Vec::with_capacity(config.num_raffle_eth_prizes_for_bidders as usize);
    for _ in 0..config.num_raffle_eth_prizes_for_bidders {
        bidder_eth_winners.push(pick_bidder(&mut *game, &mut rng)?);
    }

    let main_eth_prize = percentage_of(balance, config.main_eth_prize_percentage)?;
    let chrono_warrior_eth_prize =
        percentage_of(balance, config.chrono_warrior_eth_prize_percentage)?;
    let raffle_total = percentage_of(balance, config.raffle_total_eth_prize_percentage)?;
    let eth_prize_per_bidder_winner =
        raffle_total / Amount::from(config.num_raffle_eth_prizes_for_bidders);
    let raffle_deducted =
        eth_prize_per_bidder_winner * Amount::from(config.num_raffle_eth_prizes_for_bidders);
    let staking_amount = percentage_of(balance, config.staking_total_eth_reward_percentage)?;
    let mut charity_amount = percentage_of(balance, config.charity_eth_donation_percentage)?;

    // The staking share is never dropped: an empty pool redirects it to
    // charity.
    let mut pulsar_pool = game.read_staking_pool(AssetClass::Pulsar)?;
    let staking_deposit = match pulsar_pool.try_deposit(staking_amount) {
        Ok(deposit) => {
            game.write_staking_pool(AssetClass::Pulsar, pulsar_pool)?;
            Some((staking_amount, deposit))
        }
        Err(pulsar_types::staking::Error::NoNftsStaked) => {
            warn!(
                round_id,
                amount = %staking_amount,
                "staking pool is empty; redirecting reward share to charity"
            );
            charity_amount = charity_amount
                .checked_add(staking_amount)
                .ok_or(Error::ArithmeticOverflow)?;
            None
        }
        Err(error) => return Err(Error::Staking(error)),
    };

    let flux_prize = Amount::from(total_bids)
        .checked_mul(config.flux_prize_multiplier)
        .ok_or(Error::ArithmeticOverflow)?;

    let mut total_deducted = main_eth_prize;
    for share in [
        chrono_warrior_eth_prize,
        raffle_deducted,
        staking_deposit.as_ref().map(|(amount, _)| *amount).unwrap_or(0),
        charity_amount,
    ] {
        total_deducted = total_deducted
            .checked_add(share)
            .ok_or(Error::ArithmeticOverflow)?;
    }

    Ok(SettlementPlan {
        round_id,
        beneficiary,
        main_eth_prize,
        endurance_champion: champions.endurance_champion.address,
        chrono_warrior: champions.chrono_warrior.address,
        chrono_warrior_eth_prize,
        last_flux_bidder: round.last_flux_bidder,
        flux_prize,
        marketing_account: config.marketing_account,
        marketing_flux: config.marketing_flux_contribution,
        staker_nft_winners,
        bidder_nft_winners,
        bidder_eth_winners,
        eth_prize_per_bidder_winner,
        staking_deposit,
        charity_account: config.charity_account,
        charity_amount,
        nft_mint_seed: rng.gen(),
        total_deducted,
    })
}

/// Carries out the external side of a settlement — NFT and FLUX mints,
/// escrow deposits, the main-prize transfer and the charity transfer —
/// then flushes the event records in their documented order.
pub(crate) fn execute_settlement<G: Game>(game: &mut G, plan: SettlementPlan) -> Result<(), Error> {
    let round_id = plan.round_id;
    let mut nft_seed_sequence = 0u64;
    let mut next_nft_seed = |base: u64| {
        let seed = base.wrapping_add(nft_seed_sequence);
        nft_seed_sequence += 1;
        seed
    };

    // Mint the Pulsar NFT batch in its fixed recipient order.
    let mut staker_nft_ids = Vec::with_capacity(plan.staker_nft_winners.len());
    for winner in &plan.staker_nft_winners {
        let seed = next_nft_seed(plan.nft_mint_seed);
        staker_nft_ids.push(game.mint_pulsar_nft(*winner, round_id, seed)?);
    }
    let last_flux_bidder_nft_id = match plan.last_flux_bidder {
        Some(bidder) => {
            let seed = next_nft_seed(plan.nft_mint_seed);
            Some(game.mint_pulsar_nft(bidder, round_id, seed)?)
        }
        None => None,
    };
    let seed = next_nft_seed(plan.nft_mint_seed);
    let beneficiary_nft_id = game.mint_pulsar_nft(plan.beneficiary, round_id, seed)?;
    let seed = next_nft_seed(plan.nft_mint_seed);
    let champion_nft_id = game.mint_pulsar_nft(plan.endurance_champion, round_id, seed)?;
    let mut bidder_nft_ids = Vec::with_capacity(plan.bidder_nft_winners.len());
    for winner in &plan.bidder_nft_winners {
        let seed = next_nft_seed(plan.nft_mint_seed);
        bidder_nft_ids.push(game.mint_pulsar_nft(*winner, round_id, seed)?);
    }

    // FLUX mints.
    game.mint_flux(plan.marketing_account, plan.marketing_flux)?;
    game.mint_flux(plan.endurance_champion, plan.flux_prize)?;
    if let Some(bidder) = plan.last_flux_bidder {
        game.mint_flux(bidder, plan.flux_prize)?;
    }

    // ETH movements. Escrowed prizes first, then the main prize, then
    // charity last; only the charity transfer may fail without aborting.
    game.deposit_prize(round_id, plan.chrono_warrior, plan.chrono_warrior_eth_prize)?;
    for winner in &plan.bidder_eth_winners {
        game.deposit_prize(round_id, *winner, plan.eth_prize_per_bidder_winner)?;
    }
    game.transfer_to_account(plan.beneficiary, plan.main_eth_prize)?;
    let charity_paid = game.try_transfer_to_charity(plan.charity_account, plan.charity_amount);
    if !charity_paid {
        warn!(
            round_id,
            amount = %plan.charity_amount,
            "charity refused the transfer; keeping the share in the game balance"
        );
        let mut round = game.read_round()?;
        round.eth_balance = round
            .eth_balance
            .checked_add(plan.charity_amount)
            .ok_or(Error::ArithmeticOverflow)?;
        game.write_round(round)?;
    }

    // Event records, in the order observers reconcile against.
    for (winner_index, (winner, nft_id)) in plan
        .bidder_nft_winners
        .iter()
        .zip(&bidder_nft_ids)
        .enumerate()
        .rev()
    {
        game.emit_game_event(GameEvent::RaffleWinnerPulsarNftAwarded {
            round_id,
            from_staker_pool: false,
            winner_index: winner_index as u64,
            winner: *winner,
            nft_id: *nft_id,
        })?;
    }
    game.emit_game_event(GameEvent::EnduranceChampionPrizePaid {
        round_id,
        champion: plan.endurance_champion,
        flux_amount: plan.flux_prize,
        nft_id: champion_nft_id,
    })?;
    if let (Some(bidder), Some(nft_id)) = (plan.last_flux_bidder, last_flux_bidder_nft_id) {
        game.emit_game_event(GameEvent::LastFluxBidderPrizePaid {
            round_id,
            bidder,
            flux_amount: plan.flux_prize,
            nft_id,
        })?;
    }
    for (winner_index, (winner, nft_id)) in plan
        .staker_nft_winners
        .iter()
        .zip(&staker_nft_ids)
        .enumerate()
        .rev()
    {
        game.emit_game_event(GameEvent::RaffleWinnerPulsarNftAwarded {
            round_id,
            from_staker_pool: true,
            winner_index: winner_index as u64,
            winner: *winner,
            nft_id: *nft_id,
        })?;
    }
    game.emit_game_event(GameEvent::ChronoWarriorEthPrizeAllocated {
        round_id,
        chrono_warrior: plan.chrono_warrior,
        amount: plan.chrono_warrior_eth_prize,
    })?;
    for (winner_index, winner) in plan.bidder_eth_winners.iter().enumerate().rev() {
        game.emit_game_event(GameEvent::RaffleWinnerBidderEthPrizeAllocated {
            round_id,
            winner_index: winner_index as u64,
            winner: *winner,
            amount: plan.eth_prize_per_bidder_winner,
        })?;
    }
    game.emit_game_event(GameEvent::MainPrizeClaimed {
        round_id,
        beneficiary: plan.beneficiary,
        amount: plan.main_eth_prize,
        nft_id: beneficiary_nft_id,
    })?;
    if let Some((amount, deposit)) = plan.staking_deposit {
        game.emit_game_event(GameEvent::StakingEthDepositReceived {
            round_id,
            amount,
            reward_per_staked_nft: deposit.reward_per_staked_nft_after,
            num_staked: deposit.num_staked,
        })?;
    }
    if charity_paid {
        game.emit_game_event(GameEvent::FundsTransferredToCharity {
            charity: plan.charity_account,
            amount: plan.charity_amount,
        })?;
    }
    Ok(())
}
