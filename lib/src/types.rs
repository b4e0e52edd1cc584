use soroban_sdk::{contracttype, Address};

use crate::errors::Error;

/// A timestamped oracle reading for one currency.
///
/// Fetched per conversion and never persisted; `price` is expressed with
/// `decimals` decimal places against the unit of account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quote {
    pub price: i128,
    pub decimals: u32,
    pub started_at: u64,
    pub updated_at: u64,
}

/// Settlement currencies the engine accepts.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Currency {
    /// Wrapped-native asset, priced through the oracle.
    Native = 0,
    /// Approved fungible token, pegged 1:1 to the unit of account.
    Stable = 1,
}

/// Process-wide auction timing, written once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionWindow {
    pub start_time: u64,
    pub end_time: u64,
    pub price_drop_interval: u64,
}

impl AuctionWindow {
    /// A window must be forward (`end_time > start_time`) and must drop the
    /// price in nonzero steps. Anything else is `ConfigurationError`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.price_drop_interval == 0 || self.end_time <= self.start_time {
            return Err(Error::ConfigurationError);
        }
        Ok(())
    }

    pub fn duration(&self) -> u64 {
        self.end_time - self.start_time
    }
}

/// One active sale record, keyed by asset id on the shelf.
///
/// Exists exactly while the engine holds the asset in custody for `owner`;
/// destroyed on unlist or settlement, never mutated in place.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    pub owner: Address,
    pub max_price: i128,
    pub min_price: i128,
    pub listed_at: u64,
}
