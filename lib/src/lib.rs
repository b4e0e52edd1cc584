#![no_std]
pub mod convert;
pub mod errors;
pub mod num;
pub mod pricing;
pub mod types;

pub use errors::Error;
pub use types::*;

// Fee schedule, basis points out of 10_000.
pub const FEE_MAX_BPS: u32 = 500; // 5% when the window opens
pub const FEE_MIN_BPS: u32 = 100; // 1% floor at the window close
pub const BPS_DENOM: u32 = 10_000;

// Amount conventions
pub const UNIT_DECIMALS: u32 = 7; // unit of account carries stroop precision
pub const PRICE_CEILING: i128 = 100_000_000_000_000_000_000_000_000; // 10^26, keeps conversion products inside u128
pub const FEED_MAX_DECIMALS: u32 = 12; // feeds advertising more are rejected
