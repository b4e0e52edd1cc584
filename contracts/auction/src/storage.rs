use soroban_sdk::{contracttype, Address, Env, Vec};
use stellardrop_lib::{AuctionWindow, Currency, Error, Listing};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Operator,
    AssetRegistry,
    NativeToken,
    StableToken,
    NativeFeed,
    Window,
    TestMode,
    SubstituteFeed,
    Successor,
    Listing(u64),
    Shelf,
    Proceeds(Address, Currency),
}

/* ---------------- CONFIG ---------------- */

pub fn set_operator(env: &Env, operator: &Address) {
    env.storage().instance().set(&DataKey::Operator, operator);
}

pub fn get_operator(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Operator)
        .ok_or(Error::NotInitialized)
}

/// Caller must be the configured operator and must authorize the call.
pub fn require_operator(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let operator = get_operator(env)?;
    if caller != &operator {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

pub fn set_asset_registry(env: &Env, registry: &Address) {
    env.storage().instance().set(&DataKey::AssetRegistry, registry);
}

pub fn get_asset_registry(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::AssetRegistry)
        .ok_or(Error::NotInitialized)
}

pub fn set_native_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::NativeToken, token);
}

pub fn get_native_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::NativeToken)
        .ok_or(Error::NotInitialized)
}

pub fn set_stable_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::StableToken, token);
}

pub fn get_stable_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::StableToken)
        .ok_or(Error::NotInitialized)
}

pub fn set_native_feed(env: &Env, feed: &Address) {
    env.storage().instance().set(&DataKey::NativeFeed, feed);
}

pub fn get_native_feed(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::NativeFeed)
        .ok_or(Error::NotInitialized)
}

pub fn set_window(env: &Env, window: &AuctionWindow) {
    env.storage().instance().set(&DataKey::Window, window);
}

pub fn get_window(env: &Env) -> Result<AuctionWindow, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Window)
        .ok_or(Error::NotInitialized)
}

/* ---------------- TEST MODE / SUCCESSOR ---------------- */

pub fn set_test_mode(env: &Env, enabled: bool) {
    env.storage().instance().set(&DataKey::TestMode, &enabled);
}

pub fn get_test_mode(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::TestMode).unwrap_or(false)
}

pub fn set_substitute_feed(env: &Env, feed: &Address) {
    env.storage().instance().set(&DataKey::SubstituteFeed, feed);
}

pub fn get_substitute_feed(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::SubstituteFeed)
}

pub fn set_successor(env: &Env, successor: &Address) {
    env.storage().instance().set(&DataKey::Successor, successor);
}

pub fn get_successor(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Successor)
}

/* ---------------- SHELF ---------------- */

pub fn set_listing(env: &Env, asset_id: u64, listing: &Listing) {
    env.storage().instance().set(&DataKey::Listing(asset_id), listing);
}

pub fn get_listing(env: &Env, asset_id: u64) -> Option<Listing> {
    env.storage().instance().get(&DataKey::Listing(asset_id))
}

pub fn remove_listing(env: &Env, asset_id: u64) {
    env.storage().instance().remove(&DataKey::Listing(asset_id));
}

pub fn get_shelf(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DataKey::Shelf)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn shelf_add(env: &Env, asset_id: u64) {
    let mut shelf = get_shelf(env);
    shelf.push_back(asset_id);
    env.storage().instance().set(&DataKey::Shelf, &shelf);
}

pub fn shelf_remove(env: &Env, asset_id: u64) {
    let mut shelf = get_shelf(env);
    if let Some(index) = shelf.first_index_of(asset_id) {
        shelf.remove(index);
        env.storage().instance().set(&DataKey::Shelf, &shelf);
    }
}

pub fn clear_shelf(env: &Env) {
    env.storage().instance().remove(&DataKey::Shelf);
}

/* ---------------- ESCROW ---------------- */

pub fn get_proceeds(env: &Env, recipient: &Address, currency: Currency) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Proceeds(recipient.clone(), currency))
        .unwrap_or(0)
}

pub fn add_proceeds(
    env: &Env,
    recipient: &Address,
    currency: Currency,
    amount: i128,
) -> Result<(), Error> {
    let balance = get_proceeds(env, recipient, currency);
    let updated = balance.checked_add(amount).ok_or(Error::Overflow)?;
    env.storage()
        .instance()
        .set(&DataKey::Proceeds(recipient.clone(), currency), &updated);
    Ok(())
}

pub fn clear_proceeds(env: &Env, recipient: &Address, currency: Currency) {
    env.storage()
        .instance()
        .remove(&DataKey::Proceeds(recipient.clone(), currency));
}
