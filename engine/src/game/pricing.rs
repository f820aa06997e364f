//! Dutch-auction pricing formulas.
//!
//! Pure functions of their inputs; every division rounds toward zero.
//! Callers must tolerate a price already at its minimum persisting
//! indefinitely until a new bid resets the auction.

use pulsar_types::Amount;

/// The current ETH Dutch-auction asking price.
///
/// Decays linearly from `begin_price` toward `begin_price /
/// ending_divisor + 1` over `duration_secs`; the `+ 1` guarantees a
/// strictly positive floor even under integer truncation. Clamped to
/// `begin_price` before the auction starts and to the ending price once
/// the duration has elapsed.
pub fn eth_auction_price(
    begin_price: Amount,
    elapsed_secs: i64,
    duration_secs: u64,
    ending_divisor: u64,
) -> Amount {
    if elapsed_secs <= 0 {
        return begin_price;
    }
    let ending_price = begin_price / Amount::from(ending_divisor) + 1;
    let elapsed = elapsed_secs as u64;
    if elapsed >= duration_secs || duration_secs == 0 {
        return ending_price;
    }
    let difference = begin_price.saturating_sub(ending_price);
    let decay = difference.saturating_mul(Amount::from(elapsed)) / Amount::from(duration_secs);
    begin_price.saturating_sub(decay)
}

/// The current FLUX Dutch-auction asking price.
///
/// Structurally the ETH formula without the floor step: decays linearly
/// from `begin_price` to exactly zero at `duration_secs`, clamped to
/// zero thereafter.
pub fn flux_auction_price(
    begin_price: Amount,
    remaining_secs: i64,
    duration_secs: u64,
) -> Amount {
    if remaining_secs <= 0 || duration_secs == 0 {
        return 0;
    }
    let remaining = Amount::from(remaining_secs as u64);
    begin_price.saturating_mul(remaining) / Amount::from(duration_secs)
}

/// The fixed ETH price of the bid following one paid at `paid_price`.
pub fn next_eth_bid_price_after(paid_price: Amount, increase_divisor: u64) -> Amount {
    paid_price
        .saturating_add(paid_price / Amount::from(increase_divisor))
        .saturating_add(1)
}

/// The discounted ETH bid price when a Drifter NFT is supplied, divided
/// rounding up.
pub fn eth_bid_price_with_drifter_nft(price: Amount, divisor: u64) -> Amount {
    let divisor = Amount::from(divisor.max(1));
    price.saturating_add(divisor - 1) / divisor
}
