//! Cross-contract seam to the external asset registry.

use soroban_sdk::{vec, Address, Env, IntoVal, Symbol};
use stellardrop_lib::Error;

use crate::storage;

/// Current holder of `asset_id` according to the configured registry.
pub fn owner_of(env: &Env, asset_id: u64) -> Result<Address, Error> {
    let registry = storage::get_asset_registry(env)?;
    match env.try_invoke_contract::<Address, Error>(
        &registry,
        &Symbol::new(env, "owner_of"),
        vec![env, asset_id.into_val(env)],
    ) {
        Ok(Ok(owner)) => Ok(owner),
        _ => Err(Error::AssetNotFound),
    }
}

/// Ask the registry to move `asset_id`. A refused transfer aborts the
/// whole invocation, so the engine never runs past a half-done move.
pub fn transfer(env: &Env, from: &Address, to: &Address, asset_id: u64) -> Result<(), Error> {
    let registry = storage::get_asset_registry(env)?;
    env.invoke_contract::<()>(
        &registry,
        &Symbol::new(env, "transfer"),
        vec![
            env,
            from.into_val(env),
            to.into_val(env),
            asset_id.into_val(env),
        ],
    );
    Ok(())
}
