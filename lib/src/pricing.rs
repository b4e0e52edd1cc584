//! Time-decay schedules for the ask price and the marketplace fee.

use crate::{
    errors::Error,
    num::mul_div_floor,
    types::{AuctionWindow, Listing},
    BPS_DENOM, FEE_MAX_BPS, FEE_MIN_BPS, PRICE_CEILING,
};

/// Listing bounds must satisfy `0 < min_price <= max_price <= PRICE_CEILING`.
pub fn check_price_bounds(max_price: i128, min_price: i128) -> Result<(), Error> {
    if min_price <= 0 || max_price < min_price || max_price > PRICE_CEILING {
        return Err(Error::InvalidPriceBounds);
    }
    Ok(())
}

/// Current ask price in the unit of account.
///
/// Flat at `max_price` up to the window open and at `min_price` from the
/// close onward. Inside the window the price walks a decreasing staircase:
/// one step per elapsed `price_drop_interval`, `ceil(duration / interval)`
/// steps in total, floor division throughout. Pure in its inputs.
pub fn price_at(listing: &Listing, window: &AuctionWindow, now: u64) -> Result<i128, Error> {
    window.validate()?;
    check_price_bounds(listing.max_price, listing.min_price)?;

    if now <= window.start_time {
        return Ok(listing.max_price);
    }
    if now >= window.end_time {
        return Ok(listing.min_price);
    }

    let elapsed = now - window.start_time;
    let steps_total = window.duration().div_ceil(window.price_drop_interval);
    let steps_elapsed = elapsed / window.price_drop_interval;
    let steps = steps_elapsed.min(steps_total);

    let range = (listing.max_price - listing.min_price) as u128;
    let cut = mul_div_floor(range, steps as u128, steps_total as u128).ok_or(Error::Overflow)?;

    Ok(listing.max_price - cut as i128)
}

/// Marketplace fee in basis points at `now`.
///
/// `FEE_MAX_BPS` up to the window open, `FEE_MIN_BPS` from the close
/// onward, linear in elapsed time over the whole window in between (the
/// fee is not stepped like the price).
pub fn fee_bps_at(window: &AuctionWindow, now: u64) -> Result<u32, Error> {
    window.validate()?;

    if now <= window.start_time {
        return Ok(FEE_MAX_BPS);
    }
    if now >= window.end_time {
        return Ok(FEE_MIN_BPS);
    }

    let elapsed = (now - window.start_time) as u128;
    let duration = window.duration() as u128;
    let span = (FEE_MAX_BPS - FEE_MIN_BPS) as u128;

    let cut = (span * elapsed / duration) as u32;
    Ok((FEE_MAX_BPS - cut).clamp(FEE_MIN_BPS, FEE_MAX_BPS))
}

/// Splits `amount` into `(fee, net)` with `fee` floored, so that
/// `fee + net == amount` holds exactly.
pub fn fee_split(amount: i128, fee_bps: u32) -> Result<(i128, i128), Error> {
    if fee_bps > BPS_DENOM {
        return Err(Error::ConfigurationError);
    }
    if amount < 0 {
        return Err(Error::Overflow);
    }
    let fee = mul_div_floor(amount as u128, fee_bps as u128, BPS_DENOM as u128)
        .ok_or(Error::Overflow)? as i128;
    Ok((fee, amount - fee))
}
