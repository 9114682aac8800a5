use soroban_sdk::{log, token, Address, Env};

use crate::accrual::{self, multiplier};
use crate::errors::ContractError;
use crate::events;
use crate::storage;
use crate::types::{RewardPoolState, RewardStream, UserRewardSnapshot};

fn fresh_snapshot(env: &Env) -> UserRewardSnapshot {
    UserRewardSnapshot {
        last_index: multiplier(env),
        unpaid_accrued: 0,
    }
}

/// Reward-token balance the ledger may pay out: its holdings minus the
/// principal staked in that same token.
pub(crate) fn available_rewards(env: &Env, reward_token: &Address) -> i128 {
    let held = token::Client::new(env, reward_token).balance(&env.current_contract_address());
    held.saturating_sub(storage::staked_custody(env, reward_token))
        .max(0)
}

/// Convert index growth on `(reward, pool)` into credit for `user`, then pay
/// out everything pending if custody covers it.
///
/// `state` must already be accrued to now and `balance` must be the user's
/// stake over the accrued interval. Returns the amount paid.
pub fn settle(
    env: &Env,
    reward: &RewardStream,
    state: &RewardPoolState,
    pool_id: u64,
    user: &Address,
    balance: i128,
) -> Result<i128, ContractError> {
    let stored = storage::get_user_reward(env, reward.id, pool_id, user);
    let mut snapshot = stored.clone().unwrap_or_else(|| fresh_snapshot(env));

    if state.index > snapshot.last_index {
        let earned = accrual::earned(env, &state.index, &snapshot.last_index, balance)?;
        snapshot.last_index = state.index.clone();
        snapshot.unpaid_accrued = snapshot
            .unpaid_accrued
            .checked_add(earned)
            .ok_or(ContractError::ArithmeticOverflow)?;
        events::publish_distributed(
            env,
            reward.id,
            pool_id,
            user.clone(),
            earned,
            state.index.clone(),
        );
    }

    let owed = snapshot.unpaid_accrued;
    let pay = owed > 0 && available_rewards(env, &reward.reward_token) >= owed;
    if pay {
        snapshot.unpaid_accrued = 0;
    } else if owed > 0 {
        log!(env, "reward payout deferred", reward.id, pool_id, owed);
    }

    if stored.as_ref() != Some(&snapshot) {
        storage::set_user_reward(env, reward.id, pool_id, user, &snapshot);
    }

    if !pay {
        return Ok(0);
    }
    token::Client::new(env, &reward.reward_token).transfer(
        &env.current_contract_address(),
        user,
        &owed,
    );
    events::publish_reward_paid(env, reward.id, pool_id, user.clone(), owed);
    Ok(owed)
}

/// What `settle` would credit right now, including amounts still pending.
/// `state` is a projected (accrued) copy; nothing is written.
pub fn preview(
    env: &Env,
    reward_id: u64,
    state: &RewardPoolState,
    pool_id: u64,
    user: &Address,
    balance: i128,
) -> Result<i128, ContractError> {
    let snapshot = storage::get_user_reward(env, reward_id, pool_id, user)
        .unwrap_or_else(|| fresh_snapshot(env));
    let earned = accrual::earned(env, &state.index, &snapshot.last_index, balance)?;
    snapshot
        .unpaid_accrued
        .checked_add(earned)
        .ok_or(ContractError::ArithmeticOverflow)
}
