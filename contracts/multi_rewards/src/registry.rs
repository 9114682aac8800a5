//! Pool and reward-stream registries.
//!
//! Any change to a stream's weights, amount, or window must first accrue
//! every attached pool under the old speeds; only then are the speeds of
//! ALL attached pools recomputed against the new total weight.

use soroban_sdk::{log, token, Address, Env, Vec};

use crate::accrual::{self, multiplier};
use crate::errors::ContractError;
use crate::events;
use crate::settlement;
use crate::storage;
use crate::types::{Pool, RewardPoolState, RewardStream};

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn create_pool(env: &Env, staking_token: Address) -> u64 {
    let id = storage::next_pool_id(env);
    let pool = Pool {
        id,
        staking_token: staking_token.clone(),
        total_staked: 0,
        reward_ids: Vec::new(env),
    };
    storage::set_pool(env, &pool);

    events::publish_pool_created(env, id, staking_token);
    id
}

// ── Shared helpers ───────────────────────────────────────────────────────────

fn require_not_ended(env: &Env, reward: &RewardStream) -> Result<(), ContractError> {
    if env.ledger().timestamp() >= reward.end_time {
        return Err(ContractError::RewardEnded);
    }
    Ok(())
}

fn sum_weights(weights: impl Iterator<Item = u32>) -> u64 {
    weights.map(u64::from).sum()
}

/// Bring every `(reward, pool)` index of `reward` up to now.
pub fn accrue_all(env: &Env, reward: &RewardStream) -> Result<(), ContractError> {
    let now = env.ledger().timestamp();
    for pool_id in reward.pool_ids.iter() {
        let pool = storage::get_pool(env, pool_id)?;
        let state = storage::get_reward_pool(env, reward.id, pool_id)?;
        let next = accrual::accrue(
            env,
            &state,
            pool.total_staked,
            reward.start_time,
            reward.end_time,
            now,
        )?;
        if next != state {
            storage::set_reward_pool(env, reward.id, pool_id, &next);
        }
    }
    Ok(())
}

/// Recompute the speed of every attached pool from the stream's current
/// amount, window, and weights.
fn rebalance_speeds(env: &Env, reward: &RewardStream) -> Result<(), ContractError> {
    let total_speed = accrual::total_speed(reward.total_amount, reward.start_time, reward.end_time)?;

    let mut states = Vec::new(env);
    for pool_id in reward.pool_ids.iter() {
        states.push_back(storage::get_reward_pool(env, reward.id, pool_id)?);
    }
    let total_weight = sum_weights(states.iter().map(|s| s.weight));
    if total_weight == 0 {
        return Err(ContractError::InvalidWeights);
    }

    for (pool_id, mut state) in reward.pool_ids.iter().zip(states.iter()) {
        state.speed = accrual::pool_speed(total_speed, state.weight, total_weight)?;
        storage::set_reward_pool(env, reward.id, pool_id, &state);
        events::publish_speed_changed(env, reward.id, pool_id, state.weight, state.speed);
    }
    Ok(())
}

/// Funding the stream has not emitted yet at its current speeds. Before the
/// start nothing has been emitted.
fn unemitted(env: &Env, reward: &RewardStream) -> Result<i128, ContractError> {
    let now = env.ledger().timestamp();
    if now <= reward.start_time {
        return Ok(reward.total_amount);
    }
    let remaining = i128::from(reward.end_time.saturating_sub(now));
    let mut scheduled: i128 = 0;
    for pool_id in reward.pool_ids.iter() {
        let state = storage::get_reward_pool(env, reward.id, pool_id)?;
        scheduled = state
            .speed
            .checked_mul(remaining)
            .and_then(|amount| scheduled.checked_add(amount))
            .ok_or(ContractError::ArithmeticOverflow)?;
    }
    Ok(scheduled.min(reward.total_amount))
}

fn fresh_state(env: &Env, reward: &RewardStream, weight: u32) -> RewardPoolState {
    RewardPoolState {
        weight,
        speed: 0,
        index: multiplier(env),
        // Emission before attachment belongs to nobody in this pool.
        last_update_time: env.ledger().timestamp().max(reward.start_time),
    }
}

// ── Reward streams ───────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn create_reward(
    env: &Env,
    funder: &Address,
    reward_token: Address,
    total_amount: i128,
    start_time: u64,
    end_time: u64,
    pool_ids: Vec<u64>,
    weights: Vec<u32>,
) -> Result<u64, ContractError> {
    if pool_ids.len() != weights.len() {
        return Err(ContractError::LengthMismatch);
    }
    if total_amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if end_time <= start_time || end_time <= env.ledger().timestamp() {
        return Err(ContractError::InvalidTimeWindow);
    }
    if sum_weights(weights.iter()) == 0 {
        return Err(ContractError::InvalidWeights);
    }

    let mut pools = Vec::new(env);
    for (i, pool_id) in pool_ids.iter().enumerate() {
        let pool = storage::get_pool(env, pool_id)?;
        if pool_ids.iter().take(i).any(|seen| seen == pool_id) {
            return Err(ContractError::DuplicatePool);
        }
        pools.push_back(pool);
    }

    let reward = RewardStream {
        id: storage::next_reward_id(env),
        reward_token: reward_token.clone(),
        total_amount,
        start_time,
        end_time,
        pool_ids: pool_ids.clone(),
    };
    storage::set_reward(env, &reward);

    for (mut pool, weight) in pools.iter().zip(weights.iter()) {
        storage::set_reward_pool(env, reward.id, pool.id, &fresh_state(env, &reward, weight));
        pool.reward_ids.push_back(reward.id);
        storage::set_pool(env, &pool);
    }
    rebalance_speeds(env, &reward)?;

    events::publish_reward_created(
        env,
        reward.id,
        reward_token.clone(),
        total_amount,
        start_time,
        end_time,
        pool_ids,
        weights,
    );

    token::Client::new(env, &reward_token).transfer(
        funder,
        &env.current_contract_address(),
        &total_amount,
    );
    Ok(reward.id)
}

pub fn attach_pool(
    env: &Env,
    reward_id: u64,
    pool_id: u64,
    weight: u32,
) -> Result<(), ContractError> {
    let mut reward = storage::get_reward(env, reward_id)?;
    require_not_ended(env, &reward)?;
    let mut pool = storage::get_pool(env, pool_id)?;
    if reward.pool_ids.contains(pool_id) {
        return Err(ContractError::DuplicatePool);
    }

    accrue_all(env, &reward)?;

    storage::set_reward_pool(env, reward_id, pool_id, &fresh_state(env, &reward, weight));
    reward.pool_ids.push_back(pool_id);
    storage::set_reward(env, &reward);
    pool.reward_ids.push_back(reward_id);
    storage::set_pool(env, &pool);

    rebalance_speeds(env, &reward)?;
    events::publish_pool_attached(env, reward_id, pool_id, weight);
    Ok(())
}

/// Top up (positive delta) or draw down (negative delta) a running stream
/// and move its end time. A draw-down returns the funds to `caller` and is
/// capped by both the unemitted funding and the reward balance not backing
/// staked principal.
pub fn update_amount_and_end_time(
    env: &Env,
    caller: &Address,
    reward_id: u64,
    amount_delta: i128,
    new_end_time: u64,
) -> Result<(), ContractError> {
    let mut reward = storage::get_reward(env, reward_id)?;
    require_not_ended(env, &reward)?;
    if new_end_time <= env.ledger().timestamp() || new_end_time <= reward.start_time {
        return Err(ContractError::InvalidTimeWindow);
    }
    let magnitude = amount_delta
        .checked_abs()
        .ok_or(ContractError::ArithmeticOverflow)?;
    // A draw-down may only take back funding that is still unemitted and
    // actually held as reward money, never staked principal.
    if amount_delta < 0 {
        let withdrawable = unemitted(env, &reward)?
            .min(settlement::available_rewards(env, &reward.reward_token));
        if magnitude > withdrawable {
            return Err(ContractError::InsufficientRewardAmount);
        }
    }

    accrue_all(env, &reward)?;

    reward.total_amount = reward
        .total_amount
        .checked_add(amount_delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    reward.end_time = new_end_time;
    storage::set_reward(env, &reward);
    rebalance_speeds(env, &reward)?;

    events::publish_reward_updated(
        env,
        reward_id,
        amount_delta,
        reward.total_amount,
        new_end_time,
    );

    let contract = env.current_contract_address();
    let client = token::Client::new(env, &reward.reward_token);
    if amount_delta > 0 {
        client.transfer(caller, &contract, &magnitude);
    } else if amount_delta < 0 {
        client.transfer(&contract, caller, &magnitude);
    }
    Ok(())
}

/// Move a stream's start. Only allowed before it begins, so no accrual has
/// happened; every pool's clock is reset to the new start.
pub fn update_start_time(
    env: &Env,
    reward_id: u64,
    new_start_time: u64,
) -> Result<(), ContractError> {
    let mut reward = storage::get_reward(env, reward_id)?;
    let now = env.ledger().timestamp();
    if now > reward.start_time {
        return Err(ContractError::RewardStarted);
    }
    if new_start_time <= now || new_start_time >= reward.end_time {
        return Err(ContractError::InvalidTimeWindow);
    }

    let old_start_time = reward.start_time;
    reward.start_time = new_start_time;
    storage::set_reward(env, &reward);

    for pool_id in reward.pool_ids.iter() {
        let mut state = storage::get_reward_pool(env, reward_id, pool_id)?;
        state.last_update_time = new_start_time;
        storage::set_reward_pool(env, reward_id, pool_id, &state);
    }
    rebalance_speeds(env, &reward)?;

    events::publish_start_time_changed(env, reward_id, old_start_time, new_start_time);
    Ok(())
}

/// Overwrite weights positionally against the stream's stored `pool_ids`.
pub fn update_weights(env: &Env, reward_id: u64, weights: Vec<u32>) -> Result<(), ContractError> {
    let reward = storage::get_reward(env, reward_id)?;
    require_not_ended(env, &reward)?;
    if weights.len() != reward.pool_ids.len() {
        return Err(ContractError::LengthMismatch);
    }
    if sum_weights(weights.iter()) == 0 {
        return Err(ContractError::InvalidWeights);
    }

    accrue_all(env, &reward)?;

    for (pool_id, weight) in reward.pool_ids.iter().zip(weights.iter()) {
        let mut state = storage::get_reward_pool(env, reward_id, pool_id)?;
        state.weight = weight;
        storage::set_reward_pool(env, reward_id, pool_id, &state);
    }
    rebalance_speeds(env, &reward)?;

    log!(env, "weights updated", reward_id);
    events::publish_weights_updated(env, reward_id, weights);
    Ok(())
}
