//! Index accrual engine.
//!
//! Every `(reward, pool)` pair carries an index: cumulative reward earned per
//! staked unit, scaled by [`MULTIPLIER`]. Indices are advanced lazily, only
//! when an operation touches the pair, and always under the parameters that
//! were in force for the elapsed interval.
//!
//! ```text
//! Δindex = speed × elapsed × MULTIPLIER / total_staked
//! earned = (index − last_index) × balance / MULTIPLIER
//! ```
//!
//! All divisions floor. Rounding loss stays with the ledger.

use soroban_sdk::{Env, U256};

use crate::errors::ContractError;
use crate::types::RewardPoolState;

/// Fixed-point scale of every index (10^36). An index of exactly
/// `MULTIPLIER` means 1.0, the value a pair starts at.
pub const MULTIPLIER: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000;

pub fn multiplier(env: &Env) -> U256 {
    U256::from_u128(env, MULTIPLIER)
}

fn u256_max(env: &Env) -> U256 {
    U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

fn zero(env: &Env) -> U256 {
    U256::from_u32(env, 0)
}

/// `a × b / d` with an explicit overflow check on the product.
pub fn mul_div(env: &Env, a: &U256, b: &U256, d: &U256) -> Result<U256, ContractError> {
    let zero = zero(env);
    if *d == zero {
        return Err(ContractError::ArithmeticOverflow);
    }
    if *a == zero || *b == zero {
        return Ok(zero);
    }
    if *b > u256_max(env).div(a) {
        return Err(ContractError::ArithmeticOverflow);
    }
    Ok(a.mul(b).div(d))
}

fn checked_add(env: &Env, a: &U256, b: &U256) -> Result<U256, ContractError> {
    if *b > u256_max(env).sub(a) {
        return Err(ContractError::ArithmeticOverflow);
    }
    Ok(a.add(b))
}

fn to_u256(env: &Env, amount: i128) -> Result<U256, ContractError> {
    let unsigned = u128::try_from(amount).map_err(|_| ContractError::ArithmeticOverflow)?;
    Ok(U256::from_u128(env, unsigned))
}

fn to_i128(value: &U256) -> Result<i128, ContractError> {
    value
        .to_u128()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Advance `state` to `now`, returning the new state.
///
/// * before `start` nothing happens;
/// * an unset `last_update_time` (0) is treated as `start`;
/// * time past `end` is clamped to `end`;
/// * with nothing staked the clock still moves but the index does not, so
///   emission for an unstaked interval is dropped rather than banked.
pub fn accrue(
    env: &Env,
    state: &RewardPoolState,
    total_staked: i128,
    start: u64,
    end: u64,
    now: u64,
) -> Result<RewardPoolState, ContractError> {
    let mut next = state.clone();
    if now < start {
        return Ok(next);
    }
    if next.last_update_time == 0 {
        next.last_update_time = start;
    }

    let effective_now = now.min(end);
    let elapsed = effective_now.saturating_sub(next.last_update_time);
    if elapsed == 0 {
        return Ok(next);
    }

    if total_staked > 0 {
        let accrued = next
            .speed
            .checked_mul(i128::from(elapsed))
            .ok_or(ContractError::ArithmeticOverflow)?;
        let delta = mul_div(
            env,
            &to_u256(env, accrued)?,
            &multiplier(env),
            &to_u256(env, total_staked)?,
        )?;
        next.index = checked_add(env, &next.index, &delta)?;
    }
    next.last_update_time = effective_now;

    Ok(next)
}

/// Reward owed for holding `balance` while the index moved from
/// `last_index` to `index`.
pub fn earned(
    env: &Env,
    index: &U256,
    last_index: &U256,
    balance: i128,
) -> Result<i128, ContractError> {
    if *index <= *last_index || balance <= 0 {
        return Ok(0);
    }
    let delta = index.sub(last_index);
    let amount = mul_div(env, &delta, &to_u256(env, balance)?, &multiplier(env))?;
    to_i128(&amount)
}

/// Stream-wide emission per time unit: `total_amount / (end − start)`.
pub fn total_speed(total_amount: i128, start: u64, end: u64) -> Result<i128, ContractError> {
    if end <= start {
        return Err(ContractError::InvalidTimeWindow);
    }
    Ok(total_amount / i128::from(end - start))
}

/// Share of `total_speed` owed to a pool of `weight` out of `total_weight`.
pub fn pool_speed(total_speed: i128, weight: u32, total_weight: u64) -> Result<i128, ContractError> {
    if total_weight == 0 {
        return Err(ContractError::InvalidWeights);
    }
    total_speed
        .checked_mul(i128::from(weight))
        .map(|scaled| scaled / i128::from(total_weight))
        .ok_or(ContractError::ArithmeticOverflow)
}
