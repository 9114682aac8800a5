use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;
use crate::storage::{self, TTL_EXTEND_TO, TTL_THRESHOLD};

const ADMIN_TIER: Symbol = symbol_short!("ADM_TIER");

/// Tiered administration of the ledger.
///
/// - `PoolManager`   – may register new staking pools.
/// - `RewardManager` – may also create reward streams and change their
///                     amount, window, and pool weights.
/// - `SuperAdmin`    – everything, plus promoting and demoting admins.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    PoolManager = 1,
    RewardManager = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::PoolManager => 1,
            AdminTier::RewardManager => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_TIER, admin.clone())
}

pub fn get_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = tier_key(admin);
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    tier
}

fn set_tier(env: &Env, admin: &Address, tier: &AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Record `admin` as the bootstrap `SuperAdmin`.
pub fn bootstrap(env: &Env, admin: &Address) {
    storage::set_admin(env, admin);
    set_tier(env, admin, &AdminTier::SuperAdmin);
}

/// Authenticate `caller` and check it holds at least `min_tier`.
///
/// The bootstrap admin always passes, even if its tier entry was demoted.
pub fn require(env: &Env, caller: &Address, min_tier: &AdminTier) -> Result<(), ContractError> {
    caller.require_auth();
    if let Some(tier) = get_tier(env, caller) {
        if tier.has_at_least(min_tier) {
            return Ok(());
        }
    }
    if storage::get_admin(env)? == *caller {
        return Ok(());
    }
    Err(ContractError::Unauthorized)
}

pub fn promote(
    env: &Env,
    caller: &Address,
    target: &Address,
    tier: &AdminTier,
) -> Result<(), ContractError> {
    require(env, caller, &AdminTier::SuperAdmin)?;
    set_tier(env, target, tier);
    Ok(())
}

pub fn demote(env: &Env, caller: &Address, target: &Address) -> Result<(), ContractError> {
    require(env, caller, &AdminTier::SuperAdmin)?;
    env.storage().persistent().remove(&tier_key(target));
    Ok(())
}
