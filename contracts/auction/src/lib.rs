#![no_std]

mod oracle;
mod registry;
mod storage;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Vec};
use stellardrop_lib::{convert, pricing, AuctionWindow, Currency, Error, Listing, Quote};

use storage::*;

#[contract]
pub struct DutchAuction;

#[contractimpl]
impl DutchAuction {
    /// Initialize the engine with its operator, collaborator addresses and
    /// the auction window. The window is validated here, so pricing never
    /// sees a degenerate configuration.
    pub fn initialize(
        env: Env,
        operator: Address,
        asset_registry: Address,
        native_token: Address,
        stable_token: Address,
        native_feed: Address,
        start_time: u64,
        end_time: u64,
        price_drop_interval: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Operator) {
            return Err(Error::AlreadyInitialized);
        }
        operator.require_auth();

        let window = AuctionWindow {
            start_time,
            end_time,
            price_drop_interval,
        };
        window.validate()?;

        set_operator(&env, &operator);
        set_asset_registry(&env, &asset_registry);
        set_native_token(&env, &native_token);
        set_stable_token(&env, &stable_token);
        set_native_feed(&env, &native_feed);
        set_window(&env, &window);

        env.events().publish(
            (Symbol::new(&env, "init"),),
            (operator, start_time, end_time, price_drop_interval),
        );
        Ok(())
    }

    // ---------------- SHELF ----------------

    /// Put `asset_id` up for sale. The asset moves into engine custody and
    /// stays there until it is unlisted, sold or swept.
    pub fn list(
        env: Env,
        asset_id: u64,
        caller: Address,
        max_price: i128,
        min_price: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        get_window(&env)?;

        if get_listing(&env, asset_id).is_some() {
            return Err(Error::AlreadyListed);
        }
        pricing::check_price_bounds(max_price, min_price)?;

        let holder = registry::owner_of(&env, asset_id)?;
        if holder != caller {
            return Err(Error::NotOwner);
        }

        let listing = Listing {
            owner: caller.clone(),
            max_price,
            min_price,
            listed_at: env.ledger().timestamp(),
        };
        set_listing(&env, asset_id, &listing);
        shelf_add(&env, asset_id);

        registry::transfer(&env, &caller, &env.current_contract_address(), asset_id)?;

        env.events().publish(
            (Symbol::new(&env, "listed"),),
            (asset_id, caller, max_price, min_price),
        );
        Ok(())
    }

    /// Take `asset_id` back off the shelf before it sells.
    pub fn unlist(env: Env, asset_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let listing = get_listing(&env, asset_id).ok_or(Error::NotListed)?;
        if listing.owner != caller {
            return Err(Error::NotOwner);
        }

        remove_listing(&env, asset_id);
        shelf_remove(&env, asset_id);

        registry::transfer(&env, &env.current_contract_address(), &caller, asset_id)?;

        env.events()
            .publish((Symbol::new(&env, "unlisted"),), (asset_id, caller));
        Ok(())
    }

    // ---------------- PRICING ----------------

    /// Current ask for `asset_id` in the unit of account.
    pub fn get_price(env: Env, asset_id: u64) -> Result<i128, Error> {
        let listing = get_listing(&env, asset_id).ok_or(Error::NotListed)?;
        let window = get_window(&env)?;
        pricing::price_at(&listing, &window, env.ledger().timestamp())
    }

    /// Native amount a `bid` on `asset_id` must send right now, at the
    /// active feed's quote.
    pub fn required_payment(env: Env, asset_id: u64) -> Result<i128, Error> {
        let unit_price = Self::get_price(env.clone(), asset_id)?;
        let quote = oracle::fetch_quote(&env)?;
        convert::native_for_unit(unit_price, &quote)
    }

    /// The quote settlement would price `currency` with right now.
    pub fn latest_answer(env: Env, currency: Currency) -> Result<Quote, Error> {
        get_window(&env)?;
        match currency {
            Currency::Native => oracle::fetch_quote(&env),
            Currency::Stable => Ok(oracle::peg_quote(&env)),
        }
    }

    // ---------------- SETTLEMENT ----------------

    /// First valid bid wins: buy `asset_id` for `payment` native.
    ///
    /// The ask is converted to native terms at the active quote with the
    /// same floor the buyer computed, so paying the exact floor always
    /// clears. The full payment is consumed and split between owner and
    /// operator; overpaying refunds nothing. All bookkeeping commits
    /// before the token and asset transfers run.
    pub fn bid(env: Env, asset_id: u64, buyer: Address, payment: i128) -> Result<(), Error> {
        buyer.require_auth();

        let listing = get_listing(&env, asset_id).ok_or(Error::NotListed)?;
        let window = get_window(&env)?;
        let now = env.ledger().timestamp();

        let unit_price = pricing::price_at(&listing, &window, now)?;
        let quote = oracle::fetch_quote(&env)?;
        let required = convert::native_for_unit(unit_price, &quote)?;
        if payment < required {
            return Err(Error::InsufficientPayment);
        }

        let fee_bps = pricing::fee_bps_at(&window, now)?;
        let (fee, net) = pricing::fee_split(payment, fee_bps)?;
        let operator = get_operator(&env)?;

        add_proceeds(&env, &operator, Currency::Native, fee)?;
        add_proceeds(&env, &listing.owner, Currency::Native, net)?;
        remove_listing(&env, asset_id);
        shelf_remove(&env, asset_id);

        let engine = env.current_contract_address();
        token::Client::new(&env, &get_native_token(&env)?).transfer(&buyer, &engine, &payment);
        registry::transfer(&env, &engine, &buyer, asset_id)?;

        env.events()
            .publish((Symbol::new(&env, "sold"),), (asset_id, buyer, unit_price));
        Ok(())
    }

    /// Settle with the approved pegged token instead of native payment.
    ///
    /// The token is pulled over an existing allowance, and the ask is the
    /// unit price itself: 1:1 peg, no oracle on this path.
    pub fn bid_with_token(
        env: Env,
        asset_id: u64,
        buyer: Address,
        kind: Currency,
        amount: i128,
    ) -> Result<(), Error> {
        buyer.require_auth();

        if kind != Currency::Stable {
            return Err(Error::UnsupportedToken);
        }

        let listing = get_listing(&env, asset_id).ok_or(Error::NotListed)?;
        let window = get_window(&env)?;
        let now = env.ledger().timestamp();

        let required = pricing::price_at(&listing, &window, now)?;
        if amount < required {
            return Err(Error::InsufficientPayment);
        }

        let fee_bps = pricing::fee_bps_at(&window, now)?;
        let (fee, net) = pricing::fee_split(amount, fee_bps)?;
        let operator = get_operator(&env)?;

        add_proceeds(&env, &operator, Currency::Stable, fee)?;
        add_proceeds(&env, &listing.owner, Currency::Stable, net)?;
        remove_listing(&env, asset_id);
        shelf_remove(&env, asset_id);

        let engine = env.current_contract_address();
        token::Client::new(&env, &get_stable_token(&env)?)
            .transfer_from(&engine, &buyer, &engine, &amount);
        registry::transfer(&env, &engine, &buyer, asset_id)?;

        env.events()
            .publish((Symbol::new(&env, "sold"),), (asset_id, buyer, required));
        Ok(())
    }

    // ---------------- ESCROW ----------------

    /// Pay out everything owed to `caller`, in both currencies. Balances
    /// zero before any transfer leaves the engine.
    pub fn withdraw(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let native_due = get_proceeds(&env, &caller, Currency::Native);
        let stable_due = get_proceeds(&env, &caller, Currency::Stable);
        if native_due == 0 && stable_due == 0 {
            return Err(Error::NoFunds);
        }

        clear_proceeds(&env, &caller, Currency::Native);
        clear_proceeds(&env, &caller, Currency::Stable);

        let engine = env.current_contract_address();
        if native_due > 0 {
            token::Client::new(&env, &get_native_token(&env)?)
                .transfer(&engine, &caller, &native_due);
        }
        if stable_due > 0 {
            token::Client::new(&env, &get_stable_token(&env)?)
                .transfer(&engine, &caller, &stable_due);
        }

        env.events().publish(
            (Symbol::new(&env, "withdrawn"),),
            (caller, native_due, stable_due),
        );
        Ok(())
    }

    /// Withdrawable balance of `recipient` in `currency`.
    pub fn proceeds_of(env: Env, recipient: Address, currency: Currency) -> i128 {
        get_proceeds(&env, &recipient, currency)
    }

    // ---------------- ADMIN ----------------

    /// Force-close the shelf: destroy every remaining listing and hand the
    /// assets back to their owners. Returns how many were swept.
    pub fn end_auction(env: Env, caller: Address) -> Result<u32, Error> {
        require_operator(&env, &caller)?;

        let shelf = get_shelf(&env);
        let mut returned: Vec<(u64, Address)> = Vec::new(&env);
        for asset_id in shelf.iter() {
            if let Some(listing) = get_listing(&env, asset_id) {
                remove_listing(&env, asset_id);
                returned.push_back((asset_id, listing.owner));
            }
        }
        clear_shelf(&env);

        let engine = env.current_contract_address();
        for (asset_id, owner) in returned.iter() {
            registry::transfer(&env, &engine, &owner, asset_id)?;
            env.events()
                .publish((Symbol::new(&env, "unlisted"),), (asset_id, owner));
        }

        let count = returned.len();
        env.events().publish((Symbol::new(&env, "swept"),), count);
        Ok(count)
    }

    /// Point settlement at a substitute feed. Verification environments
    /// only; never reachable by non-operator callers.
    pub fn set_test_mode(
        env: Env,
        caller: Address,
        enabled: bool,
        substitute_feed: Address,
    ) -> Result<(), Error> {
        require_operator(&env, &caller)?;

        set_test_mode(&env, enabled);
        set_substitute_feed(&env, &substitute_feed);

        env.events().publish(
            (Symbol::new(&env, "test_mode"),),
            (enabled, substitute_feed),
        );
        Ok(())
    }

    /// Record the successor implementation. This is a migration marker
    /// only; the engine keeps serving until callers move over.
    pub fn upgrade(env: Env, caller: Address, successor: Address) -> Result<(), Error> {
        require_operator(&env, &caller)?;

        set_successor(&env, &successor);

        env.events().publish((Symbol::new(&env, "upgraded"),), successor);
        Ok(())
    }

    // ---------------- READ-ONLY STATE ----------------

    pub fn window(env: Env) -> Result<AuctionWindow, Error> {
        get_window(&env)
    }

    pub fn operator(env: Env) -> Result<Address, Error> {
        get_operator(&env)
    }

    pub fn test_mode(env: Env) -> bool {
        get_test_mode(&env)
    }

    pub fn substitute_feed(env: Env) -> Option<Address> {
        get_substitute_feed(&env)
    }

    pub fn successor(env: Env) -> Option<Address> {
        get_successor(&env)
    }

    pub fn get_listing(env: Env, asset_id: u64) -> Option<Listing> {
        get_listing(&env, asset_id)
    }

    /// Asset ids currently on the shelf.
    pub fn shelf(env: Env) -> Vec<u64> {
        get_shelf(&env)
    }
}

#[cfg(test)]
mod test_lifecycle;
