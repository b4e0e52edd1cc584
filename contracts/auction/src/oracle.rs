//! Oracle adapter: resolves the active feed and validates what it answers.

use soroban_sdk::{Address, Env, Symbol, Val, Vec};
use stellardrop_lib::{convert::check_quote, Error, Quote, UNIT_DECIMALS};

use crate::storage;

/// The feed settlement prices against right now: the substitute while
/// test mode is on, the configured live feed otherwise.
pub fn active_feed(env: &Env) -> Result<Address, Error> {
    if storage::get_test_mode(env) {
        storage::get_substitute_feed(env).ok_or(Error::StaleOrInvalidQuote)
    } else {
        storage::get_native_feed(env)
    }
}

/// Latest quote from the active feed.
///
/// A failed cross-contract call, a non-positive price and an out-of-range
/// decimal count all surface as `StaleOrInvalidQuote`, so no caller ever
/// holds a quote it could divide by zero with.
pub fn fetch_quote(env: &Env) -> Result<Quote, Error> {
    let feed = active_feed(env)?;
    let args: Vec<Val> = Vec::new(env);
    match env.try_invoke_contract::<Quote, Error>(&feed, &Symbol::new(env, "latest_quote"), args) {
        Ok(Ok(quote)) => {
            check_quote(&quote)?;
            Ok(quote)
        }
        _ => Err(Error::StaleOrInvalidQuote),
    }
}

/// Synthetic quote for the pegged token: one unit of account per token,
/// stamped with the current ledger time.
pub fn peg_quote(env: &Env) -> Quote {
    let now = env.ledger().timestamp();
    Quote {
        price: 10i128.pow(UNIT_DECIMALS),
        decimals: UNIT_DECIMALS,
        started_at: now,
        updated_at: now,
    }
}
