#![no_std]

//! Multi-pool, multi-reward staking distribution ledger.
//!
//! Users stake into pools; reward streams emit a token over a bounded window,
//! split across pools by weight and within a pool by staked balance.
//!
//! Every mutating entry point follows the same order:
//! 1. accrue the indices it touches (under the old parameters),
//! 2. settle affected users against the now-current index,
//! 3. only then change balances or stream configuration,
//! 4. move tokens last.

pub mod accrual;
pub mod admin;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod registry;
pub mod settlement;
pub mod storage;
pub mod types;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use accrual::MULTIPLIER;
pub use admin::AdminTier;
pub use errors::ContractError;
pub use types::{Claimable, Pool, RewardPoolState, RewardStream, UserRewardSnapshot};

#[contract]
pub struct MultiRewardsContract;

#[contractimpl]
impl MultiRewardsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger with `admin` as its first `SuperAdmin`.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        admin::bootstrap(&env, &admin);
        events::publish_initialized(&env, admin);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::get_admin(&env)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        admin::promote(&env, &caller, &target, &tier)
    }

    /// Remove any tier held by `target`. Only a `SuperAdmin` may call this.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        admin::demote(&env, &caller, &target)
    }

    pub fn get_admin_tier(env: Env, account: Address) -> Option<AdminTier> {
        admin::get_tier(&env, &account)
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a pool staking `staking_token`. Ids are sequential from 1.
    ///
    /// Requires at least `PoolManager`.
    pub fn create_pool(
        env: Env,
        caller: Address,
        staking_token: Address,
    ) -> Result<u64, ContractError> {
        storage::require_initialized(&env)?;
        admin::require(&env, &caller, &AdminTier::PoolManager)?;
        guard::non_reentrant(&env, || Ok(registry::create_pool(&env, staking_token)))
    }

    // ── Reward registry ─────────────────────────────────────────────────────

    /// Create a stream paying `total_amount` of `reward_token` over
    /// `[start_time, end_time)`, split across `pool_ids` by `weights`.
    /// The full amount is pulled from `caller`.
    ///
    /// Requires at least `RewardManager`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_reward(
        env: Env,
        caller: Address,
        reward_token: Address,
        total_amount: i128,
        start_time: u64,
        end_time: u64,
        pool_ids: Vec<u64>,
        weights: Vec<u32>,
    ) -> Result<u64, ContractError> {
        storage::require_initialized(&env)?;
        admin::require(&env, &caller, &AdminTier::RewardManager)?;
        guard::non_reentrant(&env, || {
            registry::create_reward(
                &env,
                &caller,
                reward_token,
                total_amount,
                start_time,
                end_time,
                pool_ids,
                weights,
            )
        })
    }

    /// Attach another pool to a running stream with `weight`.
    ///
    /// Requires at least `RewardManager`.
    pub fn attach_pool(
        env: Env,
        caller: Address,
        reward_id: u64,
        pool_id: u64,
        weight: u32,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        admin::require(&env, &caller, &AdminTier::RewardManager)?;
        guard::non_reentrant(&env, || {
            registry::attach_pool(&env, reward_id, pool_id, weight)
        })
    }

    /// Change a running stream's funding by `amount_delta` (pulled from or
    /// returned to `caller`) and move its end to `new_end_time`.
    ///
    /// Requires at least `RewardManager`.
    pub fn update_amount_and_end_time(
        env: Env,
        caller: Address,
        reward_id: u64,
        amount_delta: i128,
        new_end_time: u64,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        admin::require(&env, &caller, &AdminTier::RewardManager)?;
        guard::non_reentrant(&env, || {
            registry::update_amount_and_end_time(
                &env,
                &caller,
                reward_id,
                amount_delta,
                new_end_time,
            )
        })
    }

    /// Move the start of a stream that has not begun yet.
    ///
    /// Requires at least `RewardManager`.
    pub fn update_start_time(
        env: Env,
        caller: Address,
        reward_id: u64,
        new_start_time: u64,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        admin::require(&env, &caller, &AdminTier::RewardManager)?;
        guard::non_reentrant(&env, || {
            registry::update_start_time(&env, reward_id, new_start_time)
        })
    }

    /// Replace the weights of a running stream, aligned with its stored
    /// pool order.
    ///
    /// Requires at least `RewardManager`.
    pub fn update_weights(
        env: Env,
        caller: Address,
        reward_id: u64,
        weights: Vec<u32>,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        admin::require(&env, &caller, &AdminTier::RewardManager)?;
        guard::non_reentrant(&env, || registry::update_weights(&env, reward_id, weights))
    }

    // ── Stake ledger ────────────────────────────────────────────────────────

    /// Stake `amount` into `pool_id`.
    ///
    /// Rewards already earned are settled against the balance held *before*
    /// this deposit.
    pub fn deposit(env: Env, user: Address, pool_id: u64, amount: i128) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();
        guard::non_reentrant(&env, || ledger::deposit(&env, &user, pool_id, amount))
    }

    /// Unstake `amount` from `pool_id`; fails with `InsufficientStake` if the
    /// user holds less.
    pub fn withdraw(
        env: Env,
        user: Address,
        pool_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();
        guard::non_reentrant(&env, || ledger::withdraw(&env, &user, pool_id, amount))
    }

    /// Settle and pay out every stream of every listed pool. Returns the total
    /// paid in this call; amounts the ledger cannot cover stay pending.
    pub fn claim(env: Env, user: Address, pool_ids: Vec<u64>) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();
        guard::non_reentrant(&env, || ledger::claim(&env, &user, &pool_ids))
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// What `claim` would currently credit `user` per stream of `pool_id`,
    /// including amounts still pending payout. Does not write.
    pub fn claimable(env: Env, user: Address, pool_id: u64) -> Result<Claimable, ContractError> {
        ledger::claimable(&env, &user, pool_id)
    }

    pub fn get_pool(env: Env, pool_id: u64) -> Result<Pool, ContractError> {
        storage::get_pool(&env, pool_id)
    }

    pub fn get_reward(env: Env, reward_id: u64) -> Result<RewardStream, ContractError> {
        storage::get_reward(&env, reward_id)
    }

    /// Stored (not projected) accrual state of a `(reward, pool)` pair.
    pub fn get_reward_pool(
        env: Env,
        reward_id: u64,
        pool_id: u64,
    ) -> Result<RewardPoolState, ContractError> {
        storage::get_reward(&env, reward_id)?;
        storage::get_reward_pool(&env, reward_id, pool_id)
    }

    pub fn get_stake(env: Env, pool_id: u64, user: Address) -> i128 {
        storage::get_stake(&env, pool_id, &user)
    }

    pub fn get_user_reward(
        env: Env,
        reward_id: u64,
        pool_id: u64,
        user: Address,
    ) -> Option<UserRewardSnapshot> {
        storage::get_user_reward(&env, reward_id, pool_id, &user)
    }

    pub fn pool_count(env: Env) -> u64 {
        storage::pool_count(&env)
    }

    pub fn reward_count(env: Env) -> u64 {
        storage::reward_count(&env)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin_tiers;
