#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Symbol};
use stellardrop_lib::Error;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Name,
    Symbol,
    Minted,
    Owner(u64),
    Uri(u64),
}

#[contract]
pub struct AssetNFT;

#[contractimpl]
impl AssetNFT {
    pub fn initialize(env: Env, name: String, symbol: String) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Name) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Name, &name);
        env.storage().instance().set(&DataKey::Symbol, &symbol);
        env.storage().instance().set(&DataKey::Minted, &0u64);
        Ok(())
    }

    /// Mint the next asset to `to`. Ids are sequential, starting at 1.
    pub fn mint(env: Env, to: Address, uri: String) -> Result<u64, Error> {
        to.require_auth();
        let minted: u64 = env
            .storage()
            .instance()
            .get(&DataKey::Minted)
            .ok_or(Error::NotInitialized)?;
        let asset_id = minted + 1;

        env.storage().instance().set(&DataKey::Owner(asset_id), &to);
        env.storage().instance().set(&DataKey::Uri(asset_id), &uri);
        env.storage().instance().set(&DataKey::Minted, &asset_id);

        env.events().publish((Symbol::new(&env, "minted"),), (asset_id, to));
        Ok(asset_id)
    }

    pub fn owner_of(env: Env, asset_id: u64) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner(asset_id))
            .ok_or(Error::AssetNotFound)
    }

    /// Move `asset_id` to `to`. `from` must hold the asset and authorize
    /// the call (directly or as part of an enclosing invocation).
    pub fn transfer(env: Env, from: Address, to: Address, asset_id: u64) -> Result<(), Error> {
        from.require_auth();
        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner(asset_id))
            .ok_or(Error::AssetNotFound)?;
        if owner != from {
            return Err(Error::NotOwner);
        }

        env.storage().instance().set(&DataKey::Owner(asset_id), &to);

        env.events().publish((Symbol::new(&env, "transfer"),), (asset_id, from, to));
        Ok(())
    }

    pub fn token_uri(env: Env, asset_id: u64) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Uri(asset_id))
            .ok_or(Error::AssetNotFound)
    }

    pub fn total_minted(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::Minted).unwrap_or(0)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Name)
            .ok_or(Error::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Symbol)
            .ok_or(Error::NotInitialized)
    }
}
