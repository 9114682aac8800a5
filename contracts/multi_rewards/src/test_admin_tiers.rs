#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, vec, Address, Env};

use crate::{AdminTier, ContractError, MultiRewardsContract, MultiRewardsContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, MultiRewardsContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(MultiRewardsContract, ());
    let client = MultiRewardsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    (env, client, admin, token)
}

fn assert_unauthorized<T: core::fmt::Debug, E: core::fmt::Debug>(
    result: Result<T, Result<ContractError, E>>,
) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        other => unreachable!("expected Unauthorized, got {:?}", other),
    }
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let (_env, client, admin, _token) = setup();
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

// ── Promote / demote ─────────────────────────────────────────────────────────

#[test]
fn test_super_admin_promotes_each_tier() {
    let (env, client, admin, _token) = setup();

    for tier in [
        AdminTier::PoolManager,
        AdminTier::RewardManager,
        AdminTier::SuperAdmin,
    ] {
        let target = Address::generate(&env);
        client.promote_admin(&admin, &target, &tier);
        assert_eq!(client.get_admin_tier(&target), Some(tier));
    }
}

#[test]
fn test_super_admin_demotes() {
    let (env, client, admin, _token) = setup();
    let target = Address::generate(&env);

    client.promote_admin(&admin, &target, &AdminTier::RewardManager);
    client.demote_admin(&admin, &target);
    assert_eq!(client.get_admin_tier(&target), None);
}

#[test]
fn test_reward_manager_cannot_promote() {
    let (env, client, admin, _token) = setup();
    let manager = Address::generate(&env);
    let target = Address::generate(&env);

    client.promote_admin(&admin, &manager, &AdminTier::RewardManager);
    assert_unauthorized(client.try_promote_admin(&manager, &target, &AdminTier::PoolManager));
    assert_unauthorized(client.try_demote_admin(&manager, &admin));
}

// ── Tier gates on ledger administration ──────────────────────────────────────

#[test]
fn test_untiered_caller_cannot_administer() {
    let (env, client, _admin, token) = setup();
    let stranger = Address::generate(&env);

    assert_unauthorized(client.try_create_pool(&stranger, &token));
    assert_unauthorized(client.try_update_weights(&stranger, &1, &vec![&env, 1]));
    assert_unauthorized(client.try_update_start_time(&stranger, &1, &10));
}

#[test]
fn test_pool_manager_creates_pools_but_not_rewards() {
    let (env, client, admin, token) = setup();
    let manager = Address::generate(&env);
    client.promote_admin(&admin, &manager, &AdminTier::PoolManager);

    let pool_id = client.create_pool(&manager, &token);
    assert_eq!(pool_id, 1);

    StellarAssetClient::new(&env, &token).mint(&manager, &1_000);
    assert_unauthorized(client.try_create_reward(
        &manager,
        &token,
        &1_000,
        &0,
        &100,
        &vec![&env, pool_id],
        &vec![&env, 1],
    ));
}

#[test]
fn test_reward_manager_runs_streams() {
    let (env, client, admin, token) = setup();
    let manager = Address::generate(&env);
    client.promote_admin(&admin, &manager, &AdminTier::RewardManager);

    let pool_id = client.create_pool(&manager, &token);
    StellarAssetClient::new(&env, &token).mint(&manager, &1_000);
    let reward_id = client.create_reward(
        &manager,
        &token,
        &1_000,
        &0,
        &100,
        &vec![&env, pool_id],
        &vec![&env, 1],
    );
    client.update_weights(&manager, &reward_id, &vec![&env, 2]);
    assert_eq!(client.get_reward_pool(&reward_id, &pool_id).weight, 2);

    client.demote_admin(&admin, &manager);
    assert_unauthorized(client.try_update_weights(&manager, &reward_id, &vec![&env, 3]));
}

#[test]
fn test_bootstrap_admin_keeps_access_after_self_demotion() {
    let (_env, client, admin, token) = setup();

    client.demote_admin(&admin, &admin);
    assert_eq!(client.get_admin_tier(&admin), None);
    assert_eq!(client.create_pool(&admin, &token), 1);
}
