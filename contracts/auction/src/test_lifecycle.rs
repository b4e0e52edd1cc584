#![cfg(test)]

use super::*;
use asset_nft::{AssetNFT, AssetNFTClient};
use price_feed::{PriceFeed, PriceFeedClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String,
};
use stellardrop_lib::{Currency, Error};

// Auction window around NOW, per the shared test scenario: two hours wide,
// five minute price steps.
const START: u64 = 16_400;
const END: u64 = 23_600;
const INTERVAL: u64 = 300;
const NOW: u64 = 20_000;

// 100.0000000 down to 20.0000000 units of account.
const MAX_PRICE: i128 = 1_000_000_000;
const MIN_PRICE: i128 = 200_000_000;

// 0.12 USD per native token on an 8-decimal feed.
const FEED_PRICE: i128 = 12_000_000;

struct Fixture {
    env: Env,
    engine_id: Address,
    registry_id: Address,
    operator: Address,
    seller: Address,
    buyer: Address,
}

fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = NOW);

    let operator = Address::generate(&env);
    let seller = Address::generate(&env);
    let buyer = Address::generate(&env);
    let issuer = Address::generate(&env);

    let native = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let stable = env.register_stellar_asset_contract_v2(issuer).address();

    let registry_id = env.register(AssetNFT, ());
    AssetNFTClient::new(&env, &registry_id).initialize(
        &String::from_str(&env, "StellarDrop Assets"),
        &String::from_str(&env, "DROP"),
    );

    let feed_id = env.register(PriceFeed, ());
    PriceFeedClient::new(&env, &feed_id).initialize(
        &operator,
        &FEED_PRICE,
        &8,
        &String::from_str(&env, "XLM / USD"),
    );

    let engine_id = env.register(DutchAuction, ());
    DutchAuctionClient::new(&env, &engine_id).initialize(
        &operator,
        &registry_id,
        &native,
        &stable,
        &feed_id,
        &START,
        &END,
        &INTERVAL,
    );

    Fixture {
        env,
        engine_id,
        registry_id,
        operator,
        seller,
        buyer,
    }
}

fn engine(fx: &Fixture) -> DutchAuctionClient {
    DutchAuctionClient::new(&fx.env, &fx.engine_id)
}

fn registry(fx: &Fixture) -> AssetNFTClient {
    AssetNFTClient::new(&fx.env, &fx.registry_id)
}

fn mint_asset(fx: &Fixture, to: &Address) -> u64 {
    registry(fx).mint(to, &String::from_str(&fx.env, "ipfs://asset"))
}

#[test]
fn listing_moves_the_asset_into_custody() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);

    engine(&fx).list(&asset_id, &fx.seller, &MAX_PRICE, &MIN_PRICE);

    assert_eq!(registry(&fx).owner_of(&asset_id), fx.engine_id);

    let listing = engine(&fx).get_listing(&asset_id).unwrap();
    assert_eq!(listing.owner, fx.seller);
    assert_eq!(listing.max_price, MAX_PRICE);
    assert_eq!(listing.min_price, MIN_PRICE);
    assert_eq!(listing.listed_at, NOW);

    assert_eq!(engine(&fx).shelf().len(), 1);
    assert_eq!(engine(&fx).shelf().get(0), Some(asset_id));
}

#[test]
fn listing_twice_reports_already_listed() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);
    engine(&fx).list(&asset_id, &fx.seller, &MAX_PRICE, &MIN_PRICE);

    let res = engine(&fx).try_list(&asset_id, &fx.seller, &MAX_PRICE, &MIN_PRICE);
    assert_eq!(res, Err(Ok(Error::AlreadyListed)));
}

#[test]
fn listing_rejects_bad_bounds() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);

    let inverted = engine(&fx).try_list(&asset_id, &fx.seller, &MIN_PRICE, &MAX_PRICE);
    assert_eq!(inverted, Err(Ok(Error::InvalidPriceBounds)));

    let zero_floor = engine(&fx).try_list(&asset_id, &fx.seller, &MAX_PRICE, &0);
    assert_eq!(zero_floor, Err(Ok(Error::InvalidPriceBounds)));

    let above_ceiling = engine(&fx).try_list(
        &asset_id,
        &fx.seller,
        &(stellardrop_lib::PRICE_CEILING + 1),
        &MIN_PRICE,
    );
    assert_eq!(above_ceiling, Err(Ok(Error::InvalidPriceBounds)));

    assert!(engine(&fx).get_listing(&asset_id).is_none());
}

#[test]
fn listing_requires_the_holder() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);

    let res = engine(&fx).try_list(&asset_id, &fx.buyer, &MAX_PRICE, &MIN_PRICE);
    assert_eq!(res, Err(Ok(Error::NotOwner)));
}

#[test]
fn listing_an_unknown_asset_fails() {
    let fx = setup();

    let res = engine(&fx).try_list(&99, &fx.seller, &MAX_PRICE, &MIN_PRICE);
    assert_eq!(res, Err(Ok(Error::AssetNotFound)));
}

#[test]
fn unlisting_returns_the_asset_and_allows_a_fresh_listing() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);

    engine(&fx).list(&asset_id, &fx.seller, &MAX_PRICE, &MIN_PRICE);
    engine(&fx).unlist(&asset_id, &fx.seller);

    assert_eq!(registry(&fx).owner_of(&asset_id), fx.seller);
    assert!(engine(&fx).get_listing(&asset_id).is_none());
    assert_eq!(engine(&fx).shelf().len(), 0);

    // A re-list is a brand new listing with its own bounds.
    fx.env.ledger().with_mut(|li| li.timestamp = NOW + 60);
    engine(&fx).list(&asset_id, &fx.seller, &(MAX_PRICE / 2), &(MIN_PRICE / 2));

    let listing = engine(&fx).get_listing(&asset_id).unwrap();
    assert_eq!(listing.max_price, MAX_PRICE / 2);
    assert_eq!(listing.min_price, MIN_PRICE / 2);
    assert_eq!(listing.listed_at, NOW + 60);
}

#[test]
fn unlisting_is_owner_only() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);
    engine(&fx).list(&asset_id, &fx.seller, &MAX_PRICE, &MIN_PRICE);

    let res = engine(&fx).try_unlist(&asset_id, &fx.buyer);
    assert_eq!(res, Err(Ok(Error::NotOwner)));
    assert!(engine(&fx).get_listing(&asset_id).is_some());
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn unlisting_an_empty_shelf_slot_fails() {
    let fx = setup();
    engine(&fx).unlist(&7, &fx.seller);
}

#[test]
fn price_follows_the_window() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);
    engine(&fx).list(&asset_id, &fx.seller, &MAX_PRICE, &MIN_PRICE);

    // Before the window opens the ask sits at the cap.
    fx.env.ledger().with_mut(|li| li.timestamp = NOW - 7_200);
    assert_eq!(engine(&fx).get_price(&asset_id), MAX_PRICE);

    // Mid-window: 12 of 24 steps elapsed, strictly between the bounds.
    fx.env.ledger().with_mut(|li| li.timestamp = NOW);
    let mid = engine(&fx).get_price(&asset_id);
    assert_eq!(mid, 600_000_000);
    assert!(mid > MIN_PRICE && mid < MAX_PRICE);

    // After the close the ask rests at the floor.
    fx.env.ledger().with_mut(|li| li.timestamp = NOW + 7_200);
    assert_eq!(engine(&fx).get_price(&asset_id), MIN_PRICE);
}

#[test]
fn price_holds_within_a_step() {
    let fx = setup();
    let asset_id = mint_asset(&fx, &fx.seller);
    engine(&fx).list(&asset_id, &fx.seller, &MAX_PRICE, &MIN_PRICE);

    assert_eq!(engine(&fx).get_price(&asset_id), 600_000_000);

    fx.env.ledger().with_mut(|li| li.timestamp = NOW + 299);
    assert_eq!(engine(&fx).get_price(&asset_id), 600_000_000);

    // One full interval later the ask drops one step: 13 of 24.
    fx.env.ledger().with_mut(|li| li.timestamp = NOW + 300);
    assert_eq!(engine(&fx).get_price(&asset_id), 566_666_667);
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn price_requires_a_listing() {
    let fx = setup();
    engine(&fx).get_price(&42);
}

#[test]
fn uninitialized_engine_rejects_listing() {
    let env = Env::default();
    env.mock_all_auths();
    let engine_id = env.register(DutchAuction, ());
    let client = DutchAuctionClient::new(&env, &engine_id);

    let seller = Address::generate(&env);
    let res = client.try_list(&1, &seller, &MAX_PRICE, &MIN_PRICE);
    assert_eq!(res, Err(Ok(Error::NotInitialized)));
}

#[test]
fn configuration_reads_back() {
    let fx = setup();

    let window = engine(&fx).window();
    assert_eq!(window.start_time, START);
    assert_eq!(window.end_time, END);
    assert_eq!(window.price_drop_interval, INTERVAL);

    assert_eq!(engine(&fx).operator(), fx.operator);
    assert!(!engine(&fx).test_mode());
    assert_eq!(engine(&fx).substitute_feed(), None);
    assert_eq!(engine(&fx).successor(), None);
    assert_eq!(engine(&fx).proceeds_of(&fx.seller, &Currency::Native), 0);
}
