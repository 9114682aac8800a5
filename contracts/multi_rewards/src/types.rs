use soroban_sdk::{contracttype, Address, Vec, U256};

/// A staking bucket for one asset, shared by every reward stream attached
/// to it. Ids start at 1; 0 never names a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u64,
    pub staking_token: Address,
    pub total_staked: i128,
    /// Streams attached to this pool, in attachment order.
    pub reward_ids: Vec<u64>,
}

/// A time-bounded emission of `reward_token` split across `pool_ids` by
/// weight. Per-pool state lives in [`RewardPoolState`] entries keyed by
/// `(id, pool_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardStream {
    pub id: u64,
    pub reward_token: Address,
    pub total_amount: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub pool_ids: Vec<u64>,
}

/// Accrual state of one `(reward, pool)` attachment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPoolState {
    pub weight: u32,
    /// Reward units emitted per second to this pool.
    pub speed: i128,
    /// Cumulative reward per staked unit, scaled by `MULTIPLIER`.
    pub index: U256,
    /// 0 until the first accrual after the stream starts.
    pub last_update_time: u64,
}

/// Per `(reward, pool, user)` settlement snapshot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRewardSnapshot {
    pub last_index: U256,
    /// Credited but not yet paid out; retried on every settlement.
    pub unpaid_accrued: i128,
}

/// Preview of what a user would receive from each stream of a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claimable {
    pub reward_ids: Vec<u64>,
    pub amounts: Vec<i128>,
}
