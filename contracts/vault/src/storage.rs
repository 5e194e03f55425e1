use soroban_sdk::{Address, Env};

use crate::types::{DataKey, Funder};

/// Bump amount for persistent storage entries (roughly 30 days in ledgers).
const LEDGER_BUMP: u32 = 518_400;
/// Threshold for bumping (roughly 15 days).
const LEDGER_THRESHOLD: u32 = 259_200;

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LEDGER_THRESHOLD, LEDGER_BUMP);
}

// =============================================================================
// Token Address
// =============================================================================

pub fn get_token(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Token)
        .expect("token address not set")
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().persistent().set(&DataKey::Token, token);
    bump(env, &DataKey::Token);
}

// =============================================================================
// Depositors
// =============================================================================

pub fn get_depositor_count(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::DepositorCount)
        .unwrap_or(0)
}

fn set_depositor_count(env: &Env, count: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::DepositorCount, &count);
    bump(env, &DataKey::DepositorCount);
}

pub fn get_id(env: &Env, depositor: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::Id(depositor.clone()))
}

/// Assign the next sequential id to `depositor` and create an empty record.
pub fn register_depositor(env: &Env, depositor: &Address) -> (u32, Funder) {
    let id = get_depositor_count(env) + 1;
    set_depositor_count(env, id);

    let key = DataKey::Id(depositor.clone());
    env.storage().persistent().set(&key, &id);
    bump(env, &key);

    let funder = Funder {
        depositor: depositor.clone(),
        amount: 0,
    };
    set_funder(env, id, &funder);
    (id, funder)
}

pub fn get_funder(env: &Env, id: u32) -> Option<Funder> {
    env.storage().persistent().get(&DataKey::Funder(id))
}

/// Record for an id already returned by [`get_id`].
pub fn load_funder(env: &Env, id: u32) -> Funder {
    get_funder(env, id).expect("funder record missing for assigned id")
}

pub fn set_funder(env: &Env, id: u32, funder: &Funder) {
    let key = DataKey::Funder(id);
    env.storage().persistent().set(&key, funder);
    bump(env, &key);
}
