#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env,
};
use multi_rewards::{MultiRewardsContract, MultiRewardsContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { user: u8, pool: bool, amount: u64 },
    Withdraw { user: u8, pool: bool, amount: u64 },
    Claim { user: u8 },
    Advance { seconds: u16 },
    Reweight { first: u32, second: u32 },
    TopUp { delta: i64, extend: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(MultiRewardsContract, ());
    let client = MultiRewardsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);
    StellarAssetClient::new(&env, &reward_token).mint(&admin, &(i64::MAX as i128));

    let pools = [
        client.create_pool(&admin, &stake_token),
        client.create_pool(&admin, &stake_token),
    ];
    let reward = client.create_reward(
        &admin,
        &reward_token,
        &1_000_000_000i128,
        &0,
        &10_000,
        &vec![&env, pools[0], pools[1]],
        &vec![&env, 1u32, 1u32],
    );

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    for user in &users {
        StellarAssetClient::new(&env, &stake_token).mint(user, &(u64::MAX as i128));
    }

    // Looking for panics and arithmetic traps; contract errors are expected.
    for action in actions {
        match action {
            FuzzAction::Deposit { user, pool, amount } => {
                let who = &users[usize::from(user) % users.len()];
                let _ = client.try_deposit(who, &pools[usize::from(pool)], &i128::from(amount));
            }
            FuzzAction::Withdraw { user, pool, amount } => {
                let who = &users[usize::from(user) % users.len()];
                let _ = client.try_withdraw(who, &pools[usize::from(pool)], &i128::from(amount));
            }
            FuzzAction::Claim { user } => {
                let who = &users[usize::from(user) % users.len()];
                let _ = client.try_claim(who, &vec![&env, pools[0], pools[1]]);
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(u64::from(seconds)));
            }
            FuzzAction::Reweight { first, second } => {
                let _ = client.try_update_weights(&admin, &reward, &vec![&env, first, second]);
            }
            FuzzAction::TopUp { delta, extend } => {
                let end = client.get_reward(&reward).end_time;
                let _ = client.try_update_amount_and_end_time(
                    &admin,
                    &reward,
                    &i128::from(delta),
                    &end.saturating_add(u64::from(extend)),
                );
            }
        }
    }
});
