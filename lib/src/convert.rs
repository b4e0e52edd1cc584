//! Conversion between the unit of account and an oracle-priced currency.

use crate::{
    errors::Error,
    num::{mul_div_floor, pow10, to_amount, to_wide},
    types::Quote,
    FEED_MAX_DECIMALS,
};

/// Quote sanity shared by both conversion directions: a usable quote has a
/// strictly positive price and a sane decimal count. Everything else is
/// `StaleOrInvalidQuote` so no caller ever divides by zero.
pub fn check_quote(quote: &Quote) -> Result<(), Error> {
    if quote.price <= 0 || quote.decimals > FEED_MAX_DECIMALS {
        return Err(Error::StaleOrInvalidQuote);
    }
    Ok(())
}

/// Converts a unit-of-account amount into the quoted currency:
/// `unit_amount * 10^decimals / price`, floored.
///
/// The floor favors the payer; settlement re-validates with the same
/// truncation, so a payment equal to this amount is always accepted.
pub fn native_for_unit(unit_amount: i128, quote: &Quote) -> Result<i128, Error> {
    check_quote(quote)?;
    let unit = to_wide(unit_amount)?;
    let scale = pow10(quote.decimals).ok_or(Error::Overflow)?;
    let native = mul_div_floor(unit, scale, quote.price as u128).ok_or(Error::Overflow)?;
    to_amount(native)
}

/// The inverse direction: `native_amount * price / 10^decimals`, floored.
pub fn unit_for_native(native_amount: i128, quote: &Quote) -> Result<i128, Error> {
    check_quote(quote)?;
    let native = to_wide(native_amount)?;
    let scale = pow10(quote.decimals).ok_or(Error::Overflow)?;
    let unit = mul_div_floor(native, quote.price as u128, scale).ok_or(Error::Overflow)?;
    to_amount(unit)
}
