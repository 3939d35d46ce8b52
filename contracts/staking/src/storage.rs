use soroban_sdk::{Address, Env, Vec};

use crate::errors::StakingError;
use crate::types::{AccountLedger, AdminCapability, DataKey, PoolState};

// Pool and admin records (instance storage)

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Pool)
}

pub fn get_pool(env: &Env) -> Result<PoolState, StakingError> {
    env.storage()
        .instance()
        .get(&DataKey::Pool)
        .ok_or(StakingError::NotInitialized)
}

pub fn set_pool(env: &Env, pool: &PoolState) {
    env.storage().instance().set(&DataKey::Pool, pool);
}

pub fn get_admin(env: &Env) -> Result<AdminCapability, StakingError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(StakingError::NotInitialized)
}

pub fn set_admin(env: &Env, cap: &AdminCapability) {
    env.storage().instance().set(&DataKey::Admin, cap);
}

// Registered stakers

pub fn get_stakers(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Stakers)
        .unwrap_or(Vec::new(env))
}

/// Add `account` to the registered set. Returns false if it was already present.
pub fn register_staker(env: &Env, account: &Address) -> bool {
    let mut stakers = get_stakers(env);
    if stakers.contains(account) {
        return false;
    }
    stakers.push_back(account.clone());
    env.storage().instance().set(&DataKey::Stakers, &stakers);
    true
}

pub fn unregister_staker(env: &Env, account: &Address) {
    let mut stakers = get_stakers(env);
    if let Some(index) = stakers.first_index_of(account) {
        stakers.remove(index);
        env.storage().instance().set(&DataKey::Stakers, &stakers);
    }
}

// Account ledgers (persistent storage)

pub fn get_ledger(env: &Env, account: &Address) -> Option<AccountLedger> {
    env.storage()
        .persistent()
        .get(&DataKey::Account(account.clone()))
}

pub fn set_ledger(env: &Env, account: &Address, ledger: &AccountLedger) {
    env.storage()
        .persistent()
        .set(&DataKey::Account(account.clone()), ledger);
}
