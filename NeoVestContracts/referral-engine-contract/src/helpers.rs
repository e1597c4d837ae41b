use crate::admin::AdminModule;
use crate::types::{AccountProfile, DataKey, Earning, Error, LedgerEntry, Network, Package};
use soroban_sdk::{Address, Env, Vec};

pub fn get_profile(env: &Env, account: &Address) -> Result<AccountProfile, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Profile(account.clone()))
        .ok_or(Error::AccountNotFound)
}

pub fn account_exists(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Profile(account.clone()))
}

pub fn get_package(env: &Env, package_id: u64) -> Result<Package, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Package(package_id))
        .ok_or(Error::PackageNotFound)
}

pub fn get_earning(env: &Env, earning_id: u64) -> Result<Earning, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Earning(earning_id))
        .ok_or(Error::EarningNotFound)
}

pub fn get_entry(env: &Env, entry_id: u64) -> Result<LedgerEntry, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Entry(entry_id))
        .ok_or(Error::EntryNotFound)
}

pub fn get_payout_token(env: &Env, network: &Network) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::PayoutToken(network.clone()))
        .ok_or(Error::PayoutTokenNotConfigured)
}

/// Fetch an id index, empty if never written
pub fn get_id_list(env: &Env, key: &DataKey) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn push_id(env: &Env, key: &DataKey, id: u64) {
    let mut ids = get_id_list(env, key);
    ids.push_back(id);
    env.storage().persistent().set(key, &ids);
}

/// Allocate the next id from an instance-storage counter, starting at 1
pub fn next_id(env: &Env, key: &DataKey) -> u64 {
    let id: u64 = env.storage().instance().get(key).unwrap_or(0) + 1;
    env.storage().instance().set(key, &id);
    id
}

pub fn read_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn require_admin(env: &Env) -> Result<(), Error> {
    let admin = read_admin(env)?;
    admin.require_auth();
    Ok(())
}

/// Retry and sweep entrypoints accept the admin or the configured keeper
pub fn require_admin_or_operator(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller == read_admin(env)? {
        return Ok(());
    }
    let operator: Option<Address> = env.storage().instance().get(&DataKey::Operator);
    match operator {
        Some(op) if op == *caller => Ok(()),
        _ => Err(Error::Unauthorized),
    }
}

pub fn ensure_engine_active(env: &Env) -> Result<(), Error> {
    if AdminModule::is_engine_paused(env) {
        return Err(Error::EnginePaused);
    }
    Ok(())
}
