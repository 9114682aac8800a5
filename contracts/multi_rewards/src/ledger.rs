use soroban_sdk::{token, Address, Env, Vec};

use crate::accrual;
use crate::errors::ContractError;
use crate::events;
use crate::settlement;
use crate::storage;
use crate::types::{Claimable, Pool};

/// Accrue and settle every stream attached to `pool` for `user`, against the
/// pool's current `total_staked` and the user's current `balance`. Must run
/// before either of those changes. Returns the total paid out.
fn sync_rewards(
    env: &Env,
    pool: &Pool,
    user: &Address,
    balance: i128,
) -> Result<i128, ContractError> {
    let now = env.ledger().timestamp();
    let mut paid: i128 = 0;
    for reward_id in pool.reward_ids.iter() {
        let reward = storage::get_reward(env, reward_id)?;
        let state = storage::get_reward_pool(env, reward_id, pool.id)?;
        let next = accrual::accrue(
            env,
            &state,
            pool.total_staked,
            reward.start_time,
            reward.end_time,
            now,
        )?;
        if next != state {
            storage::set_reward_pool(env, reward_id, pool.id, &next);
        }
        let amount = settlement::settle(env, &reward, &next, pool.id, user, balance)?;
        paid = paid.saturating_add(amount);
    }
    Ok(paid)
}

fn adjust_custody(env: &Env, token: &Address, delta: i128) -> Result<(), ContractError> {
    let custody = storage::staked_custody(env, token)
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    storage::set_staked_custody(env, token, custody);
    Ok(())
}

pub fn deposit(env: &Env, user: &Address, pool_id: u64, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let mut pool = storage::get_pool(env, pool_id)?;
    let balance = storage::get_stake(env, pool_id, user);

    // 1. Settle under the pre-deposit balances.
    sync_rewards(env, &pool, user, balance)?;

    // 2. Then grow them.
    let new_balance = balance
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    storage::set_stake(env, pool_id, user, new_balance);
    storage::set_pool(env, &pool);
    adjust_custody(env, &pool.staking_token, amount)?;

    // 3. Pull the principal.
    token::Client::new(env, &pool.staking_token).transfer(
        user,
        &env.current_contract_address(),
        &amount,
    );

    events::publish_deposited(
        env,
        pool_id,
        user.clone(),
        amount,
        new_balance,
        pool.total_staked,
    );
    Ok(())
}

pub fn withdraw(env: &Env, user: &Address, pool_id: u64, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let mut pool = storage::get_pool(env, pool_id)?;
    let balance = storage::get_stake(env, pool_id, user);
    if balance < amount {
        return Err(ContractError::InsufficientStake);
    }

    sync_rewards(env, &pool, user, balance)?;

    let new_balance = balance - amount;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    storage::set_stake(env, pool_id, user, new_balance);
    storage::set_pool(env, &pool);
    adjust_custody(env, &pool.staking_token, -amount)?;

    token::Client::new(env, &pool.staking_token).transfer(
        &env.current_contract_address(),
        user,
        &amount,
    );

    events::publish_withdrawn(
        env,
        pool_id,
        user.clone(),
        amount,
        new_balance,
        pool.total_staked,
    );
    Ok(())
}

/// Settle every stream of every listed pool. Balances are untouched; payout
/// happens inside settlement. Returns the total paid.
pub fn claim(env: &Env, user: &Address, pool_ids: &Vec<u64>) -> Result<i128, ContractError> {
    let mut paid: i128 = 0;
    for pool_id in pool_ids.iter() {
        let pool = storage::get_pool(env, pool_id)?;
        let balance = storage::get_stake(env, pool_id, user);
        paid = paid.saturating_add(sync_rewards(env, &pool, user, balance)?);
    }
    Ok(paid)
}

/// Read-only projection of what `claim` would credit per attached stream.
pub fn claimable(env: &Env, user: &Address, pool_id: u64) -> Result<Claimable, ContractError> {
    let pool = storage::get_pool(env, pool_id)?;
    let balance = storage::get_stake(env, pool_id, user);
    let now = env.ledger().timestamp();

    let mut amounts = Vec::new(env);
    for reward_id in pool.reward_ids.iter() {
        let reward = storage::get_reward(env, reward_id)?;
        let state = storage::get_reward_pool(env, reward_id, pool_id)?;
        let projected = accrual::accrue(
            env,
            &state,
            pool.total_staked,
            reward.start_time,
            reward.end_time,
            now,
        )?;
        amounts.push_back(settlement::preview(
            env, reward_id, &projected, pool_id, user, balance,
        )?);
    }

    Ok(Claimable {
        reward_ids: pool.reward_ids,
        amounts,
    })
}
