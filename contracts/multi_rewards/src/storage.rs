use soroban_sdk::{symbol_short, Address, Env, IntoVal, Symbol, TryFromVal, Val};

use crate::errors::ContractError;
use crate::types::{Pool, RewardPoolState, RewardStream, UserRewardSnapshot};

// ── Storage key constants ────────────────────────────────────────────────────

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const INITIALIZED: Symbol = symbol_short!("INIT");
const POOL_CTR: Symbol = symbol_short!("POOL_CTR");
const REWARD_CTR: Symbol = symbol_short!("RWD_CTR");

// Tuple keys:  (prefix, ids..)
const STAKED_CUSTODY: Symbol = symbol_short!("CUSTODY");
const POOL: Symbol = symbol_short!("POOL");
const REWARD: Symbol = symbol_short!("REWARD");
const REWARD_POOL: Symbol = symbol_short!("RWD_POOL");
const USER_STAKE: Symbol = symbol_short!("STK");
const USER_REWARD: Symbol = symbol_short!("USR_RWD");

pub const TTL_THRESHOLD: u32 = 5184000;
pub const TTL_EXTEND_TO: u32 = 10368000;

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn load<K, V>(env: &Env, key: &K) -> Option<V>
where
    K: IntoVal<Env, Val>,
    V: TryFromVal<Env, Val>,
{
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    value
}

fn save<K, V>(env: &Env, key: &K, value: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    extend_instance(env);
    Ok(())
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
    env.storage().instance().set(&INITIALIZED, &true);
    extend_instance(env);
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

// ── Counters ─────────────────────────────────────────────────────────────────

pub fn pool_count(env: &Env) -> u64 {
    env.storage().instance().get(&POOL_CTR).unwrap_or(0)
}

pub fn reward_count(env: &Env) -> u64 {
    env.storage().instance().get(&REWARD_CTR).unwrap_or(0)
}

pub fn next_pool_id(env: &Env) -> u64 {
    let next = pool_count(env).saturating_add(1);
    env.storage().instance().set(&POOL_CTR, &next);
    next
}

pub fn next_reward_id(env: &Env) -> u64 {
    let next = reward_count(env).saturating_add(1);
    env.storage().instance().set(&REWARD_CTR, &next);
    next
}

// ── Custody ──────────────────────────────────────────────────────────────────

/// Principal currently staked across all pools in `token`.
pub fn staked_custody(env: &Env, token: &Address) -> i128 {
    env.storage()
        .instance()
        .get(&(STAKED_CUSTODY, token.clone()))
        .unwrap_or(0)
}

pub fn set_staked_custody(env: &Env, token: &Address, amount: i128) {
    env.storage()
        .instance()
        .set(&(STAKED_CUSTODY, token.clone()), &amount);
}

// ── Pools & rewards ──────────────────────────────────────────────────────────

pub fn get_pool(env: &Env, pool_id: u64) -> Result<Pool, ContractError> {
    if pool_id == 0 {
        return Err(ContractError::PoolNotFound);
    }
    load(env, &(POOL, pool_id)).ok_or(ContractError::PoolNotFound)
}

pub fn set_pool(env: &Env, pool: &Pool) {
    save(env, &(POOL, pool.id), pool);
}

pub fn get_reward(env: &Env, reward_id: u64) -> Result<RewardStream, ContractError> {
    load(env, &(REWARD, reward_id)).ok_or(ContractError::RewardNotFound)
}

pub fn set_reward(env: &Env, reward: &RewardStream) {
    save(env, &(REWARD, reward.id), reward);
}

pub fn get_reward_pool(
    env: &Env,
    reward_id: u64,
    pool_id: u64,
) -> Result<RewardPoolState, ContractError> {
    load(env, &(REWARD_POOL, reward_id, pool_id)).ok_or(ContractError::PoolNotFound)
}

pub fn set_reward_pool(env: &Env, reward_id: u64, pool_id: u64, state: &RewardPoolState) {
    save(env, &(REWARD_POOL, reward_id, pool_id), state);
}

// ── Per-user ─────────────────────────────────────────────────────────────────

pub fn get_stake(env: &Env, pool_id: u64, user: &Address) -> i128 {
    load(env, &(USER_STAKE, pool_id, user.clone())).unwrap_or(0)
}

pub fn set_stake(env: &Env, pool_id: u64, user: &Address, balance: i128) {
    save(env, &(USER_STAKE, pool_id, user.clone()), &balance);
}

pub fn get_user_reward(
    env: &Env,
    reward_id: u64,
    pool_id: u64,
    user: &Address,
) -> Option<UserRewardSnapshot> {
    load(env, &(USER_REWARD, reward_id, pool_id, user.clone()))
}

pub fn set_user_reward(
    env: &Env,
    reward_id: u64,
    pool_id: u64,
    user: &Address,
    snapshot: &UserRewardSnapshot,
) {
    save(env, &(USER_REWARD, reward_id, pool_id, user.clone()), snapshot);
}
