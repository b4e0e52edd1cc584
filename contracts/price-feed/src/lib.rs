#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Symbol};
use stellardrop_lib::{Error, Quote, FEED_MAX_DECIMALS};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Price,
    Decimals,
    Description,
    StartedAt,
    UpdatedAt,
}

#[contract]
pub struct PriceFeed;

#[contractimpl]
impl PriceFeed {
    /// Initialize the feed with its admin and first answer.
    pub fn initialize(
        env: Env,
        admin: Address,
        price: i128,
        decimals: u32,
        description: String,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        if decimals > FEED_MAX_DECIMALS {
            return Err(Error::ConfigurationError);
        }
        admin.require_auth();

        let now = env.ledger().timestamp();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Price, &price);
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::Description, &description);
        env.storage().instance().set(&DataKey::StartedAt, &now);
        env.storage().instance().set(&DataKey::UpdatedAt, &now);

        env.events().publish((Symbol::new(&env, "init"),), (admin, price, decimals));
        Ok(())
    }

    /// Latest answer. Round timestamps reflect the most recent `set_price`.
    pub fn latest_quote(env: Env) -> Result<Quote, Error> {
        let price = env
            .storage()
            .instance()
            .get(&DataKey::Price)
            .ok_or(Error::NotInitialized)?;
        let decimals = env
            .storage()
            .instance()
            .get(&DataKey::Decimals)
            .ok_or(Error::NotInitialized)?;
        let started_at = env.storage().instance().get(&DataKey::StartedAt).unwrap_or(0);
        let updated_at = env.storage().instance().get(&DataKey::UpdatedAt).unwrap_or(0);

        Ok(Quote {
            price,
            decimals,
            started_at,
            updated_at,
        })
    }

    /// Replace the answer and refresh the round timestamps.
    ///
    /// Non-positive prices are accepted on purpose: consumers are expected
    /// to validate quotes themselves, and verification setups push bad
    /// answers to exercise that path.
    pub fn set_price(env: Env, caller: Address, price: i128) -> Result<(), Error> {
        caller.require_auth();
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if caller != admin {
            return Err(Error::NotAuthorized);
        }

        let now = env.ledger().timestamp();
        env.storage().instance().set(&DataKey::Price, &price);
        env.storage().instance().set(&DataKey::StartedAt, &now);
        env.storage().instance().set(&DataKey::UpdatedAt, &now);

        env.events().publish((Symbol::new(&env, "answer"),), (price, now));
        Ok(())
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .ok_or(Error::NotInitialized)
    }

    pub fn description(env: Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Description)
            .ok_or(Error::NotInitialized)
    }
}
