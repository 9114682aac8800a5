#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Vec, U256};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Fired when a staking pool is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u64,
    pub staking_token: Address,
    pub timestamp: u64,
}

/// Fired when a reward stream is created and funded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardCreatedEvent {
    pub reward_id: u64,
    pub reward_token: Address,
    pub total_amount: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub pool_ids: Vec<u64>,
    pub weights: Vec<u32>,
    pub timestamp: u64,
}

/// Fired for every pool whose speed is recomputed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpeedChangedEvent {
    pub reward_id: u64,
    pub pool_id: u64,
    pub weight: u32,
    pub speed: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAttachedEvent {
    pub reward_id: u64,
    pub pool_id: u64,
    pub weight: u32,
    pub timestamp: u64,
}

/// Fired when a stream's amount or end time changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardUpdatedEvent {
    pub reward_id: u64,
    pub amount_delta: i128,
    pub total_amount: i128,
    pub end_time: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightsUpdatedEvent {
    pub reward_id: u64,
    pub weights: Vec<u32>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartTimeChangedEvent {
    pub reward_id: u64,
    pub old_start_time: u64,
    pub new_start_time: u64,
    pub timestamp: u64,
}

/// Fired whenever settlement credits a user, whether or not it was paid.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedEvent {
    pub reward_id: u64,
    pub pool_id: u64,
    pub user: Address,
    pub earned: i128,
    pub index: U256,
    pub timestamp: u64,
}

/// Fired when pending rewards actually leave custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub reward_id: u64,
    pub pool_id: u64,
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeChangedEvent {
    pub pool_id: u64,
    pub user: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(env: &Env, pool_id: u64, staking_token: Address) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolCreatedEvent {
            pool_id,
            staking_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

#[allow(clippy::too_many_arguments)]
pub fn publish_reward_created(
    env: &Env,
    reward_id: u64,
    reward_token: Address,
    total_amount: i128,
    start_time: u64,
    end_time: u64,
    pool_ids: Vec<u64>,
    weights: Vec<u32>,
) {
    env.events().publish(
        (symbol_short!("RWD_NEW"), reward_id),
        RewardCreatedEvent {
            reward_id,
            reward_token,
            total_amount,
            start_time,
            end_time,
            pool_ids,
            weights,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_speed_changed(env: &Env, reward_id: u64, pool_id: u64, weight: u32, speed: i128) {
    env.events().publish(
        (symbol_short!("SPEED"), reward_id, pool_id),
        SpeedChangedEvent {
            reward_id,
            pool_id,
            weight,
            speed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_attached(env: &Env, reward_id: u64, pool_id: u64, weight: u32) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), reward_id, pool_id),
        PoolAttachedEvent {
            reward_id,
            pool_id,
            weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_updated(
    env: &Env,
    reward_id: u64,
    amount_delta: i128,
    total_amount: i128,
    end_time: u64,
) {
    env.events().publish(
        (symbol_short!("RWD_UPD"), reward_id),
        RewardUpdatedEvent {
            reward_id,
            amount_delta,
            total_amount,
            end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_weights_updated(env: &Env, reward_id: u64, weights: Vec<u32>) {
    env.events().publish(
        (symbol_short!("WEIGHTS"), reward_id),
        WeightsUpdatedEvent {
            reward_id,
            weights,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_start_time_changed(
    env: &Env,
    reward_id: u64,
    old_start_time: u64,
    new_start_time: u64,
) {
    env.events().publish(
        (symbol_short!("START"), reward_id),
        StartTimeChangedEvent {
            reward_id,
            old_start_time,
            new_start_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_distributed(
    env: &Env,
    reward_id: u64,
    pool_id: u64,
    user: Address,
    earned: i128,
    index: U256,
) {
    env.events().publish(
        (symbol_short!("DISTR"), reward_id, pool_id, user.clone()),
        DistributedEvent {
            reward_id,
            pool_id,
            user,
            earned,
            index,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, reward_id: u64, pool_id: u64, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), reward_id, user.clone()),
        RewardPaidEvent {
            reward_id,
            pool_id,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    pool_id: u64,
    user: Address,
    amount: i128,
    new_balance: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pool_id, user.clone()),
        StakeChangedEvent {
            pool_id,
            user,
            amount,
            new_balance,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    pool_id: u64,
    user: Address,
    amount: i128,
    new_balance: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), pool_id, user.clone()),
        StakeChangedEvent {
            pool_id,
            user,
            amount,
            new_balance,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}
